//! Report form state
//!
//! Mirrors the browser form: field values are edited one at a time, persisted
//! after every change, and turned into a request payload on submit.

use std::fmt;

use chrono::Datelike;
use serde::{Deserialize, Deserializer, Serialize};

use crate::model::{DEFAULT_PROPERTY_TYPE, DetailLevel, GenerateReportBody, PROPERTY_TYPES};

pub mod store;

pub use store::FormStore;

/// Earliest accepted construction year
pub const MIN_YEAR_BUILT: i32 = 1800;

/// Form field names, as used in the persisted JSON and on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[value(rename_all = "camelCase")]
pub enum FormField {
    Address,
    PropertyType,
    Surface,
    YearBuilt,
    Notes,
    ExtraContext,
    DetailLevel,
}

/// Error type for form edits
#[derive(Debug, thiserror::Error, PartialEq)]
#[non_exhaustive]
pub enum FormError {
    #[error("{field} doit être un nombre : '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("La surface doit être positive ou nulle")]
    NegativeSurface,

    #[error("L'année de construction doit être comprise entre 1800 et {max}")]
    YearOutOfRange { max: i32 },

    #[error("Niveau de détail inconnu : '{0}' (standard ou detailed)")]
    UnknownDetailLevel(String),
}

/// Persisted form fields
///
/// Empty numeric inputs are stored as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormState {
    pub address: String,
    pub property_type: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub surface: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub year_built: Option<i32>,
    pub notes: String,
    pub extra_context: String,
    pub detail_level: DetailLevel,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            address: String::new(),
            property_type: DEFAULT_PROPERTY_TYPE.to_string(),
            surface: None,
            year_built: None,
            notes: String::new(),
            extra_context: String::new(),
            detail_level: DetailLevel::Standard,
        }
    }
}

/// Accept `""` (what an untouched number input holds) as an unset value
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText<T> {
        Number(T),
        Text(String),
    }

    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(NumberOrText::Text(s)) => Err(serde::de::Error::custom(format!(
            "expected a number, got '{s}'"
        ))),
        None => Ok(None),
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

impl FormState {
    /// Update one field from raw input
    pub fn set(&mut self, field: FormField, raw: &str) -> Result<(), FormError> {
        match field {
            FormField::Address => self.address = raw.to_string(),
            FormField::PropertyType => self.property_type = raw.to_string(),
            FormField::Notes => self.notes = raw.to_string(),
            FormField::ExtraContext => self.extra_context = raw.to_string(),
            FormField::Surface => {
                let surface = parse_optional::<f64>("surface", raw)?;
                if surface.is_some_and(|s| !s.is_finite() || s < 0.0) {
                    return Err(FormError::NegativeSurface);
                }
                self.surface = surface;
            }
            FormField::YearBuilt => {
                let year = parse_optional::<i32>("yearBuilt", raw)?;
                let max = current_year();
                if year.is_some_and(|y| !(MIN_YEAR_BUILT..=max).contains(&y)) {
                    return Err(FormError::YearOutOfRange { max });
                }
                self.year_built = year;
            }
            FormField::DetailLevel => {
                self.detail_level = match raw.trim() {
                    "standard" => DetailLevel::Standard,
                    "detailed" => DetailLevel::Detailed,
                    other => return Err(FormError::UnknownDetailLevel(other.to_string())),
                };
            }
        }
        Ok(())
    }

    /// Submit is only offered once address, notes and property type are filled in
    pub fn can_submit(&self) -> bool {
        !self.address.trim().is_empty()
            && !self.notes.trim().is_empty()
            && !self.property_type.trim().is_empty()
    }

    /// Whether the property type is free text rather than one of the listed choices
    pub fn has_custom_property_type(&self) -> bool {
        !PROPERTY_TYPES.contains(&self.property_type.as_str())
    }

    /// Build the request payload
    pub fn to_body(&self) -> GenerateReportBody {
        GenerateReportBody {
            address: Some(self.address.clone()),
            property_type: Some(self.property_type.clone()),
            surface: self.surface,
            year_built: self.year_built,
            notes: Some(self.notes.clone()),
            extra_context: Some(self.extra_context.clone()).filter(|c| !c.is_empty()),
            detail_level: Some(self.detail_level.as_str().to_string()),
        }
    }
}

fn parse_optional<T: std::str::FromStr>(
    field: &'static str,
    raw: &str,
) -> Result<Option<T>, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| FormError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

impl fmt::Display for FormState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

        writeln!(f, "Adresse du bien        : {}", or_dash(&self.address))?;
        let custom = if self.has_custom_property_type() && !self.property_type.is_empty() {
            " (saisie libre)"
        } else {
            ""
        };
        writeln!(f, "Type de bien           : {}{custom}", or_dash(&self.property_type))?;
        writeln!(
            f,
            "Surface (m²)           : {}",
            self.surface.map_or("-".to_string(), |s| s.to_string())
        )?;
        writeln!(
            f,
            "Année de construction  : {}",
            self.year_built.map_or("-".to_string(), |y| y.to_string())
        )?;
        writeln!(f, "Notes de visite        : {}", or_dash(&self.notes))?;
        writeln!(f, "Contexte               : {}", or_dash(&self.extra_context))?;
        write!(f, "Niveau de détail       : {}", self.detail_level.label())
    }
}
