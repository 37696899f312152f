//! Report generation service using LLM
//!
//! Validates the form payload, builds the prompt and runs one chat completion.

use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::model::GenerateReportBody;
use crate::service::llm::TextGenerator;
use crate::service::report::prompts::{REPORT_SYSTEM_PROMPT, build_report_prompt};
use crate::service::report::validation::validate_report_body;

pub mod error;
pub mod prompts;
pub mod validation;

pub use error::ReportError;

/// Service generating inspection reports
///
/// Holds no per-request state. The generator is absent when no API key was
/// configured, in which case every generation fails before any external call.
pub struct ReportService {
    generator: Option<Arc<dyn TextGenerator>>,
    shutdown: CancellationToken,
}

impl ReportService {
    /// Create a new report service
    ///
    /// `shutdown` is the process-wide token; each request derives a child from it.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>, shutdown: CancellationToken) -> Self {
        match generator.as_ref() {
            Some(g) => tracing::info!(model = %g.model(), "Report service initialized"),
            None => tracing::warn!("Report service initialized without API key, generation disabled"),
        }
        Self {
            generator,
            shutdown,
        }
    }

    /// Whether an API credential was configured at startup
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Fail fast when no credential is configured
    pub fn ensure_configured(&self) -> Result<&dyn TextGenerator, ReportError> {
        self.generator
            .as_deref()
            .ok_or(ReportError::MissingCredential)
    }

    /// Cancellation token for one request, cancelled on process shutdown
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Generate a report from a raw payload
    ///
    /// Returns the model text verbatim. No retry on any failure.
    pub async fn generate(
        &self,
        body: GenerateReportBody,
        cancel: &CancellationToken,
    ) -> Result<String, ReportError> {
        let generator = self.ensure_configured()?;
        let request = validate_report_body(body)?;

        let start_time = Instant::now();
        let prompt = build_report_prompt(&request);
        let prompt_length = prompt.len();

        tracing::debug!(
            model = %generator.model(),
            property_type = %request.property_type,
            detail_level = request.detail_level.as_str(),
            "Initiating OpenAI API call for report generation"
        );

        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::warn!(
                    elapsed_ms = start_time.elapsed().as_millis(),
                    "Report generation cancelled"
                );
                return Err(ReportError::Cancelled);
            }
            result = generator.generate(REPORT_SYSTEM_PROMPT, &prompt) => result,
        };

        let elapsed = start_time.elapsed();
        match outcome {
            Ok(text) if text.trim().is_empty() => {
                tracing::error!(
                    model = %generator.model(),
                    elapsed_ms = elapsed.as_millis(),
                    "OpenAI API returned an empty report"
                );
                Err(ReportError::EmptyResponse)
            }
            Ok(text) => {
                tracing::info!(
                    model = %generator.model(),
                    elapsed_ms = elapsed.as_millis(),
                    prompt_length = prompt_length,
                    result_length = text.len(),
                    "OpenAI API call for report generation completed successfully"
                );
                Ok(text)
            }
            Err(e) => {
                tracing::error!(
                    model = %generator.model(),
                    elapsed_ms = elapsed.as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "OpenAI API call for report generation failed"
                );
                Err(ReportError::GenerationFailed(e.to_string()))
            }
        }
    }
}
