//! Turns raw form input into store entries

use super::record::{Entry, Field, RecordStore};

/// Why a submission was dropped. Neither case is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejected {
    #[error("input was empty")]
    EmptyInputIgnored,
    #[error("no app version has been saved yet")]
    NoActiveVersion,
}

/// Convert raw input for `field` into an entry.
///
/// Text fields containing a comma become a list of the comma separated
/// parts, each trimmed. Code is kept verbatim.
pub fn parse_entry(field: Field, raw: &str) -> Entry {
    if !field.is_code() && raw.contains(',') {
        Entry::Multiple(raw.split(',').map(|part| part.trim().to_string()).collect())
    } else {
        Entry::Single(raw.to_string())
    }
}

/// Record a version identifier. Blank input is ignored.
pub fn collect_version(store: &mut RecordStore, raw: &str) -> Result<String, Rejected> {
    if raw.trim().is_empty() {
        return Err(Rejected::EmptyInputIgnored);
    }
    if store.record_version(raw) {
        tracing::info!("Recorded app version: {}", raw);
    }
    Ok(raw.to_string())
}

/// Append one field submission for the active version
pub fn collect_field(
    store: &mut RecordStore,
    active_version: Option<&str>,
    field: Field,
    raw: &str,
) -> Result<(), Rejected> {
    if raw.trim().is_empty() {
        return Err(Rejected::EmptyInputIgnored);
    }
    let version = active_version.ok_or(Rejected::NoActiveVersion)?;

    let entry = parse_entry(field, raw);
    store.append_field(version, field, entry);
    tracing::info!("Saved {} for version {}", field.label(), version);
    Ok(())
}
