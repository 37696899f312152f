//! Report request/response data model
//!
//! Shared by the HTTP endpoint and by the presentation layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Literal marker the model is asked to put between the report and the market synthesis
pub const RESULT_SPLIT_SEPARATOR: &str = "--- Synthèse de marché ---";

/// Property types offered by the form. Any other non-empty text is accepted as-is.
pub const PROPERTY_TYPES: &[&str] = &[
    "Appartement",
    "Maison",
    "Local commercial",
    "Terrain",
    "Autre",
];

/// Property type selected by default
pub const DEFAULT_PROPERTY_TYPE: &str = "Appartement";

/// How verbose the generated report should be
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    #[default]
    Standard,
    Detailed,
}

impl DetailLevel {
    /// Parse a wire value. Exactly `"detailed"` selects the detailed report, anything else is standard.
    pub fn from_wire(value: &str) -> Self {
        if value == "detailed" {
            DetailLevel::Detailed
        } else {
            DetailLevel::Standard
        }
    }

    /// Wording used inside the prompt
    pub fn label(&self) -> &'static str {
        match self {
            DetailLevel::Standard => "Standard",
            DetailLevel::Detailed => "Très détaillé",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DetailLevel::Standard => "standard",
            DetailLevel::Detailed => "detailed",
        }
    }
}

/// Raw payload of `POST /api/generate-report`, before validation
///
/// Any JSON object is accepted. A field holding a value of the wrong type is
/// treated as absent and left to validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportBody {
    /// Property address
    #[schema(example = "12 rue de Bretagne, 35000 Rennes")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    /// Property type (Appartement, Maison, Local commercial, Terrain, Autre or free text)
    #[schema(example = "Maison")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub property_type: Option<String>,
    /// Approximate surface in square meters. Non-numeric values are ignored.
    #[serde(default, deserialize_with = "lenient_surface")]
    pub surface: Option<f64>,
    /// Approximate construction year. Non-integer values are ignored.
    #[serde(default, deserialize_with = "lenient_year")]
    pub year_built: Option<i32>,
    /// Raw visit notes, bullet points or voice transcription
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    /// Optional client context
    #[serde(default, deserialize_with = "lenient_text")]
    pub extra_context: Option<String>,
    /// `standard` or `detailed`
    #[schema(example = "standard")]
    #[serde(default, deserialize_with = "lenient_text")]
    pub detail_level: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_surface<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_f64))
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_i64)
        .and_then(|year| i32::try_from(year).ok()))
}

/// Validated report request
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub address: String,
    pub property_type: String,
    pub surface: Option<f64>,
    pub year_built: Option<i32>,
    pub notes: String,
    pub extra_context: Option<String>,
    pub detail_level: DetailLevel,
}

/// Successful generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportResponse {
    /// Raw model output, report and market synthesis separated by the split marker
    pub result: String,
}

/// Model output split into the two display panes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub report: String,
    pub market_summary: String,
}

/// Split model output on the first occurrence of [`RESULT_SPLIT_SEPARATOR`].
///
/// Later occurrences stay inside the market summary. Without a separator the
/// whole text goes to the report and the market summary is empty.
pub fn split_report(text: &str) -> SplitReport {
    match text.split_once(RESULT_SPLIT_SEPARATOR) {
        Some((report, market)) => SplitReport {
            report: report.trim().to_string(),
            market_summary: market.trim().to_string(),
        },
        None => SplitReport {
            report: text.trim().to_string(),
            market_summary: String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_separator() {
        let split = split_report("Rapport...\n--- Synthèse de marché ---\nMarché en hausse.");
        assert_eq!(split.report, "Rapport...");
        assert_eq!(split.market_summary, "Marché en hausse.");
    }

    #[test]
    fn test_split_without_separator() {
        let split = split_report("  Rapport complet sans synthèse  \n");
        assert_eq!(split.report, "Rapport complet sans synthèse");
        assert!(split.market_summary.is_empty());
    }

    // The model is only asked for one separator; extra occurrences are kept verbatim
    // in the market summary instead of being dropped.
    #[test]
    fn test_split_keeps_later_separators_in_market_summary() {
        let text = "A\n--- Synthèse de marché ---\nB\n--- Synthèse de marché ---\nC";
        let split = split_report(text);
        assert_eq!(split.report, "A");
        assert_eq!(split.market_summary, "B\n--- Synthèse de marché ---\nC");
    }

    #[test]
    fn test_split_separator_at_end() {
        let split = split_report("Rapport\n--- Synthèse de marché ---\n");
        assert_eq!(split.report, "Rapport");
        assert!(split.market_summary.is_empty());
    }

    #[test]
    fn test_detail_level_from_wire() {
        assert_eq!(DetailLevel::from_wire("detailed"), DetailLevel::Detailed);
        assert_eq!(DetailLevel::from_wire("standard"), DetailLevel::Standard);
        assert_eq!(DetailLevel::from_wire("autre"), DetailLevel::Standard);
        assert_eq!(DetailLevel::from_wire("detailed "), DetailLevel::Standard);
        assert_eq!(DetailLevel::from_wire("Detailed"), DetailLevel::Standard);
        assert_eq!(DetailLevel::Detailed.label(), "Très détaillé");
    }

    #[test]
    fn test_body_uses_camel_case() {
        let body: GenerateReportBody = serde_json::from_str(
            r#"{"address":"1 rue Test","propertyType":"Appartement","surface":null,
                "yearBuilt":1998,"notes":"visite ok","detailLevel":"standard"}"#,
        )
        .unwrap();
        assert_eq!(body.property_type.as_deref(), Some("Appartement"));
        assert_eq!(body.year_built, Some(1998));
        assert_eq!(body.surface, None);
        assert_eq!(body.extra_context, None);
    }

    #[test]
    fn test_unexpected_numeric_types_are_dropped() {
        let body: GenerateReportBody = serde_json::from_str(
            r#"{"address":"a","propertyType":"Maison","notes":"n","detailLevel":"standard",
                "surface":"120","yearBuilt":1998.5}"#,
        )
        .unwrap();
        assert_eq!(body.surface, None);
        assert_eq!(body.year_built, None);
        assert_eq!(body.address.as_deref(), Some("a"));

        let body: GenerateReportBody =
            serde_json::from_str(r#"{"surface":85.5,"yearBuilt":3000000000}"#).unwrap();
        assert_eq!(body.surface, Some(85.5));
        assert_eq!(body.year_built, None);

        let body: GenerateReportBody =
            serde_json::from_str(r#"{"address":12,"notes":["a"],"extraContext":false}"#).unwrap();
        assert_eq!(body.address, None);
        assert_eq!(body.notes, None);
        assert_eq!(body.extra_context, None);
    }
}
