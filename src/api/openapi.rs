//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ErrorResponse;
use crate::api::health::{DependencyHealth, HealthStatus, ReadinessStatus};
use crate::model::{GenerateReportBody, ReportResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "TiBreton report generator",
        description = "Generates property-inspection reports and a localized market synthesis"
    ),
    paths(
        crate::api::report::generate_report,
        crate::api::health::liveness,
        crate::api::health::readiness
    ),
    components(schemas(
        GenerateReportBody,
        ReportResponse,
        ErrorResponse,
        HealthStatus,
        ReadinessStatus,
        DependencyHealth
    )),
    tags(
        (name = "reports", description = "Report generation"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_report_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/generate-report"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}
