//! Validation of incoming report payloads
//!
//! Only the required text fields are checked. Numeric ranges are left to the form.

use crate::model::{DetailLevel, GenerateReportBody, ReportRequest};
use crate::service::report::error::ReportError;

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Validate a raw payload and turn it into a [`ReportRequest`]
pub fn validate_report_body(body: GenerateReportBody) -> Result<ReportRequest, ReportError> {
    let mut missing = Vec::new();
    if is_blank(&body.address) {
        missing.push("address");
    }
    if is_blank(&body.notes) {
        missing.push("notes");
    }
    if is_blank(&body.property_type) {
        missing.push("propertyType");
    }
    if is_blank(&body.detail_level) {
        missing.push("detailLevel");
    }

    if !missing.is_empty() {
        return Err(ReportError::MissingFields(missing));
    }

    Ok(ReportRequest {
        address: body.address.unwrap_or_default(),
        property_type: body.property_type.unwrap_or_default(),
        surface: body.surface,
        year_built: body.year_built,
        notes: body.notes.unwrap_or_default(),
        extra_context: body.extra_context,
        detail_level: DetailLevel::from_wire(body.detail_level.as_deref().unwrap_or_default()),
    })
}
