//! Application state and service initialization
//!
//! Builds the service graph once from [`Config`] and injects it into actix-web.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tokio_util::sync::CancellationToken;

use crate::model::Config;
use crate::service::{LlmClient, ReportService, TextGenerator};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Report generation service
    pub report_service: web::Data<ReportService>,
    /// Cancelled on shutdown; every request token derives from it
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Initialize all services
    ///
    /// A missing API key is not fatal: the server starts, readiness reports it
    /// and every generation request fails with a configuration error.
    pub fn new(config: &Config) -> Self {
        let shutdown = CancellationToken::new();

        let generator = match config.llm.api_key.as_deref() {
            Some(api_key) => {
                let client = LlmClient::new(api_key, &config.llm);
                Some(Arc::new(client) as Arc<dyn TextGenerator>)
            }
            None => {
                tracing::warn!("OPENAI_API_KEY is not set, report generation will fail");
                None
            }
        };

        let report_service = web::Data::new(ReportService::new(generator, shutdown.clone()));

        Self {
            report_service,
            shutdown,
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Server could not bind or stopped with an I/O error
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Run the HTTP server until it stops
pub async fn serve(config: Config) -> Result<(), AppError> {
    let bind_addr = config.bind_addr();
    let state = AppState::new(&config);
    let report_service = state.report_service.clone();

    let shutdown = state.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received, cancelling in-flight generations");
            shutdown.cancel();
        }
    });

    tracing::info!(model = %config.llm.model, "Starting TiBreton report server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(report_service.clone())
            .configure(crate::api::page::configure)
            .configure(crate::api::report::configure)
            .configure(crate::api::health::configure)
            .configure(crate::api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    state.shutdown.cancel();
    Ok(())
}
