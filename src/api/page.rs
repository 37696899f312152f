//! Browser form page

use actix_web::{HttpResponse, Responder, get};

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serve the report form
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Configure page routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(index);
}
