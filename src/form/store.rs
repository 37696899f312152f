//! Local persistence of the form state
//!
//! One JSON slot on disk. Best effort: a missing or unreadable slot yields the
//! default form and write failures are only logged by callers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::form::FormState;

/// Single-slot JSON file holding the last form state
#[derive(Debug, Clone)]
pub struct FormStore {
    path: PathBuf,
}

impl FormStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted form, falling back to defaults
    pub fn load(&self) -> FormState {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No saved form, using defaults");
                return FormState::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read saved form, using defaults");
                return FormState::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(form) => form,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Saved form is corrupt, using defaults");
                FormState::default()
            }
        }
    }

    /// Overwrite the slot with the given form
    pub fn save(&self, form: &FormState) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(form)?;
        fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "Form saved");
        Ok(())
    }

    /// Remove the slot. Returns whether anything was removed.
    pub fn clear(&self) -> io::Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use crate::model::DetailLevel;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FormStore::new(dir.path().join("form.json"));

        let mut form = FormState::default();
        form.set(FormField::Address, "12 rue de Bretagne, 35000 Rennes").unwrap();
        form.set(FormField::PropertyType, "Maison").unwrap();
        form.set(FormField::Surface, "120").unwrap();
        form.set(FormField::YearBuilt, "1998").unwrap();
        form.set(FormField::Notes, "Bon état général").unwrap();
        form.set(FormField::DetailLevel, "detailed").unwrap();
        store.save(&form).unwrap();

        let reloaded = store.load();
        assert_eq!(reloaded, form);
        assert_eq!(reloaded.surface, Some(120.0));
        assert_eq!(reloaded.year_built, Some(1998));
        assert_eq!(reloaded.detail_level, DetailLevel::Detailed);
    }

    #[test]
    fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let store = FormStore::new(dir.path().join("form.json"));

        let mut form = FormState::default();
        form.set(FormField::Notes, "premier").unwrap();
        store.save(&form).unwrap();
        form.set(FormField::Notes, "second").unwrap();
        store.save(&form).unwrap();

        assert_eq!(store.load().notes, "second");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FormStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load(), FormState::default());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FormStore::new(&path);
        assert_eq!(store.load(), FormState::default());
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        fs::write(&path, r#"{"address":"1 rue Test"}"#).unwrap();

        let form = FormStore::new(&path).load();
        assert_eq!(form.address, "1 rue Test");
        assert_eq!(form.property_type, "Appartement");
        assert_eq!(form.detail_level, DetailLevel::Standard);
    }

    #[test]
    fn test_clear_removes_slot() {
        let dir = tempfile::tempdir().unwrap();
        let store = FormStore::new(dir.path().join("nested/form.json"));
        store.save(&FormState::default()).unwrap();
        assert!(store.path().exists());

        assert!(store.clear().unwrap());
        assert!(!store.path().exists());
    }
}
