use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "TIBRETON_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_API_KEY: &str = "OPENAI_API_KEY";
const ENV_REPORT_MODEL: &str = "REPORT_MODEL";
const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
const ENV_FORM_PATH: &str = "TIBRETON_FORM_PATH";
const ENV_ENDPOINT: &str = "TIBRETON_ENDPOINT";

/// Default chat-completion model for report generation
pub const DEFAULT_MODEL: &str = "gpt-4.1";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_FORM_PATH: &str = ".tibreton-form.json";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/api/generate-report";

/// LLM settings
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API credential. Never read from the YAML file.
    #[serde(skip)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// OpenAI-compatible base URL override
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            base_url: None,
        }
    }
}

/// Local form persistence settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Terminal client settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

/// Application configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub form_store_path: PathBuf,
    pub endpoint: String,
    pub port: u16,
    pub host: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            form_store_path: PathBuf::from(DEFAULT_FORM_PATH),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();
        Self::from_file_and_env(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with environment lookups. Environment wins.
    fn from_file_and_env(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();

        let port = env("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let host = env("HOST").unwrap_or(defaults.host);

        let mut llm = file.llm;
        llm.api_key = env(ENV_API_KEY).filter(|k| !k.trim().is_empty());
        if let Some(model) = env(ENV_REPORT_MODEL) {
            llm.model = model;
        }
        if let Some(base_url) = env(ENV_BASE_URL) {
            llm.base_url = Some(base_url);
        }

        let form_store_path = env(ENV_FORM_PATH)
            .map(PathBuf::from)
            .or(file.form.store_path)
            .unwrap_or(defaults.form_store_path);

        let endpoint = env(ENV_ENDPOINT)
            .or(file.client.endpoint)
            .unwrap_or(defaults.endpoint);

        Self {
            llm,
            form_store_path,
            endpoint,
            port,
            host,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => Self::parse_config(path, &contents),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    fn parse_config(path: &Path, contents: &str) -> Option<ConfigFile> {
        let contents = contents.trim();
        if contents.is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Some(ConfigFile::default());
        }

        match serde_yaml::from_str(contents) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration from file");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
