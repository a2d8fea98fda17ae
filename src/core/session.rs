//! One user session: the record store plus the active version
//!
//! Each button in the UI maps to one handler here. Handlers take the raw
//! input, update the store, and report what happened.

use crate::export::{self, DocumentBuildError, ExportArtifact, ExportOptions};

use super::collector::{self, Rejected};
use super::record::{Field, RecordStore};

/// State for a single user session. Dropped when the window closes.
#[derive(Debug, Clone)]
pub struct Session {
    store: RecordStore,
    active_version: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            store: RecordStore::new(),
            active_version: None,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Version that field saves are recorded against
    pub fn active_version(&self) -> Option<&str> {
        self.active_version.as_deref()
    }

    /// "Save App Version": record the version and make it active
    pub fn on_save_version(&mut self, raw: &str) -> Result<(), Rejected> {
        let version = collector::collect_version(&mut self.store, raw).inspect_err(|e| {
            tracing::debug!("Ignored version save: {}", e);
        })?;
        self.active_version = Some(version);
        Ok(())
    }

    /// Make an already recorded version active again
    pub fn on_select_version(&mut self, version: &str) -> bool {
        if !self.store.contains_version(version) {
            return false;
        }
        self.active_version = Some(version.to_string());
        true
    }

    /// "Save <field>": append the value to the active version
    pub fn on_save_field(&mut self, field: Field, raw: &str) -> Result<(), Rejected> {
        collector::collect_field(&mut self.store, self.active_version.as_deref(), field, raw)
            .inspect_err(|e| tracing::debug!("Ignored {} save: {}", field.label(), e))
    }

    /// "Generate PDF": render everything saved so far
    pub fn on_generate_pdf(&self, options: &ExportOptions) -> Result<ExportArtifact, DocumentBuildError> {
        export::build_artifact(&self.store, options).inspect_err(|e| {
            tracing::error!("Failed to build PDF: {}", e);
        })
    }
}
