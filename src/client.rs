//! Report endpoint client and result panes
//!
//! Terminal counterpart of the browser page: submits the saved form and keeps
//! the report pane, market pane and error message of the last submission.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::form::FormState;
use crate::model::{GenerateReportBody, split_report};
use crate::service::report::error::GENERATION_FAILED_MESSAGE;

/// Shown when the server rejects a request without a message
pub const UNKNOWN_ERROR_MESSAGE: &str = "Erreur inconnue";

/// Market pane content when the model output had no separator
pub const NO_SPLIT_NOTE: &str = "_La synthèse n’a pas été séparée, voici le texte complet._";

pub const REPORT_FILE_NAME: &str = "rapport.md";
pub const MARKET_FILE_NAME: &str = "synthese-marche.md";

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Non-OK answer; carries the server message
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// Message to display in the error area
    pub fn user_message(&self) -> &str {
        match self {
            ClientError::Rejected { message, .. } => message.as_str(),
            ClientError::HttpError(_) | ClientError::MalformedResponse(_) => {
                GENERATION_FAILED_MESSAGE
            }
        }
    }
}

/// Client for the report-generation endpoint
pub struct ReportClient {
    client: Client,
    endpoint: String,
}

impl ReportClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a payload and return the raw generated text
    pub async fn submit(&self, body: &GenerateReportBody) -> Result<String, ClientError> {
        let response = self.client.post(&self.endpoint).json(body).send().await?;
        let status = response.status();
        let payload: Value = response.json().await?;

        if !status.is_success() {
            let message = payload
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .unwrap_or(UNKNOWN_ERROR_MESSAGE)
                .to_string();
            return Err(ClientError::Rejected { status, message });
        }

        payload
            .get("result")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ClientError::MalformedResponse("missing 'result' string".to_string()))
    }
}

/// State of the result area
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Presenter {
    pub loading: bool,
    pub report: String,
    pub market_summary: String,
    pub error: String,
}

impl Presenter {
    /// Submit the form and update the panes
    ///
    /// Previous results are cleared first. On failure both panes stay empty.
    pub async fn submit(&mut self, client: &ReportClient, form: &FormState) {
        self.submit_with(client, form, |_| {}).await;
    }

    /// Same as [`Presenter::submit`], calling `on_change` once the request is
    /// in flight (`loading` set) and once the panes are filled (`loading` cleared)
    pub async fn submit_with(
        &mut self,
        client: &ReportClient,
        form: &FormState,
        mut on_change: impl FnMut(&Presenter),
    ) {
        self.report.clear();
        self.market_summary.clear();
        self.error.clear();
        self.loading = true;
        on_change(self);

        match client.submit(&form.to_body()).await {
            Ok(text) => {
                let split = split_report(&text);
                self.report = split.report;
                self.market_summary = split.market_summary;
            }
            Err(e) => {
                tracing::error!(endpoint = %client.endpoint(), error = %e, "Report submission failed");
                self.error = e.user_message().to_string();
            }
        }

        self.loading = false;
        on_change(self);
    }

    pub fn has_report(&self) -> bool {
        !self.report.is_empty()
    }

    /// Market pane content, with a note when the output was not split
    pub fn market_pane(&self) -> &str {
        if self.market_summary.is_empty() {
            NO_SPLIT_NOTE
        } else {
            &self.market_summary
        }
    }

    /// Write both panes as Markdown files into `dir`
    ///
    /// Without a market summary the market file receives the full report.
    pub fn export(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)?;

        let report_path = dir.join(REPORT_FILE_NAME);
        fs::write(&report_path, &self.report)?;

        let market = if self.market_summary.is_empty() {
            &self.report
        } else {
            &self.market_summary
        };
        let market_path = dir.join(MARKET_FILE_NAME);
        fs::write(&market_path, market)?;

        Ok(vec![report_path, market_path])
    }

    /// Render the result area as text
    pub fn render(&self) -> String {
        if self.loading {
            return "Génération en cours...\n".to_string();
        }
        if !self.error.is_empty() {
            return format!("Erreur : {}\n", self.error);
        }
        if !self.has_report() {
            return "Le rapport généré s’affichera ici après analyse de vos notes.\n".to_string();
        }
        format!(
            "## Rapport d’expertise complet\n\n{}\n\n## Synthèse de marché localisée\n\n{}\n",
            self.report,
            self.market_pane()
        )
    }
}
