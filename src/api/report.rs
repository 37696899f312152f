//! REST API endpoint for report generation

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, post, web};
use tokio_util::sync::CancellationToken;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{GenerateReportBody, ReportResponse};
use crate::service::ReportService;
use crate::service::report::ReportError;

/// Upper bound for a request body, sized for long voice transcriptions
pub const MAX_PAYLOAD_BYTES: usize = 2 * 1024 * 1024;

const INVALID_PAYLOAD_MESSAGE: &str =
    "Corps de requête invalide : le JSON est mal formé ou n’est pas un objet.";
const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Requête trop volumineuse : réduisez la longueur des notes.";

/// Generate an inspection report and market synthesis
///
/// The credential check runs before the payload is even parsed, so a server
/// without API key answers 500 to every request.
#[utoipa::path(
    post,
    path = "/api/generate-report",
    request_body = GenerateReportBody,
    responses(
        (status = 200, description = "Report generated", body = ReportResponse),
        (status = 400, description = "Missing required field or body that is not a JSON object", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Missing API key, empty model response or upstream failure", body = ErrorResponse),
        (status = 503, description = "Generation cancelled", body = ErrorResponse)
    ),
    tag = "reports"
)]
#[post("/api/generate-report")]
pub async fn generate_report(
    service: web::Data<ReportService>,
    payload: Result<web::Bytes, actix_web::Error>,
) -> Result<HttpResponse, ApiError> {
    service.ensure_configured()?;

    let payload = payload.map_err(|e| {
        if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
        } else {
            tracing::debug!(error = %e, "Failed to read report payload");
            ApiError::BadRequest(INVALID_PAYLOAD_MESSAGE.to_string())
        }
    })?;

    let body: GenerateReportBody = serde_json::from_slice(&payload).map_err(|e| {
        tracing::debug!(error = %e, "Failed to parse report payload");
        ApiError::BadRequest(INVALID_PAYLOAD_MESSAGE.to_string())
    })?;

    let result = generate_until_dropped(&service, body, service.request_token()).await?;

    Ok(HttpResponse::Ok().json(ReportResponse { result }))
}

/// Run one generation whose token is cancelled as soon as this future is
/// dropped, which is what actix does when the client disconnects.
async fn generate_until_dropped(
    service: &ReportService,
    body: GenerateReportBody,
    token: CancellationToken,
) -> Result<String, ReportError> {
    let _guard = token.clone().drop_guard();
    service.generate(body, &token).await
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .service(generate_report);
}
