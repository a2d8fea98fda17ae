//! Per-version record store
//!
//! Every saved value lands here as an [`Entry`] under a `(version, field)`
//! pair. The store is append-only: versions keep their first-seen order and
//! entries are never edited or removed.

use std::collections::HashMap;

/// One of the ten attributes tracked per app version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Framework,
    Languages,
    Modules,
    RegressionNotes,
    Packages,
    NodeVersion,
    NpmVersion,
    JsCode,
    CssCode,
    HtmlCode,
}

/// Whether a field holds short text or source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, split on commas when saved
    Text,
    /// Source text, always stored verbatim
    Code,
}

impl Field {
    /// All fields in display and export order
    pub const ALL: [Field; 10] = [
        Field::Framework,
        Field::Languages,
        Field::Modules,
        Field::RegressionNotes,
        Field::Packages,
        Field::NodeVersion,
        Field::NpmVersion,
        Field::JsCode,
        Field::CssCode,
        Field::HtmlCode,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            Field::JsCode | Field::CssCode | Field::HtmlCode => FieldKind::Code,
            _ => FieldKind::Text,
        }
    }

    pub fn is_code(self) -> bool {
        self.kind() == FieldKind::Code
    }

    /// Human readable label used in the form, the listing and the PDF
    pub fn label(self) -> &'static str {
        match self {
            Field::Framework => "Framework",
            Field::Languages => "Languages",
            Field::Modules => "Modules",
            Field::RegressionNotes => "Regression Testing Notes",
            Field::Packages => "Packages",
            Field::NodeVersion => "Node Version",
            Field::NpmVersion => "NPM Version",
            Field::JsCode => "JavaScript Code",
            Field::CssCode => "CSS Code",
            Field::HtmlCode => "HTML Code",
        }
    }

    /// Syntax tag for code fields (`None` for text fields)
    pub fn language(self) -> Option<&'static str> {
        match self {
            Field::JsCode => Some("javascript"),
            Field::CssCode => Some("css"),
            Field::HtmlCode => Some("html"),
            _ => None,
        }
    }
}

/// A single saved value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Raw text as submitted
    Single(String),
    /// Comma separated input, kept as its ordered parts
    Multiple(Vec<String>),
}

impl Entry {
    /// Text shown to the user: list parts joined with `", "`
    pub fn display_text(&self) -> String {
        match self {
            Entry::Single(text) => text.clone(),
            Entry::Multiple(parts) => parts.join(", "),
        }
    }
}

/// Append-only mapping from version identifier to per-field entries
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    versions: Vec<String>,
    entries: HashMap<String, HashMap<Field, Vec<Entry>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `version` to the known versions unless it is already there.
    ///
    /// Returns `true` when the version was new.
    pub fn record_version(&mut self, version: &str) -> bool {
        if self.versions.iter().any(|v| v == version) {
            return false;
        }
        self.versions.push(version.to_string());
        true
    }

    /// Append an entry to `(version, field)`, creating the list if needed
    pub fn append_field(&mut self, version: &str, field: Field, entry: Entry) {
        self.entries
            .entry(version.to_string())
            .or_default()
            .entry(field)
            .or_default()
            .push(entry);
    }

    /// Known versions in first-seen order
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn contains_version(&self, version: &str) -> bool {
        self.versions.iter().any(|v| v == version)
    }

    /// Entries for `(version, field)`, `None` if nothing was ever saved there
    pub fn entries(&self, version: &str, field: Field) -> Option<&[Entry]> {
        self.entries
            .get(version)
            .and_then(|fields| fields.get(&field))
            .map(Vec::as_slice)
    }

    /// Non-empty fields of `version` in display order
    pub fn fields_of<'a>(&'a self, version: &'a str) -> impl Iterator<Item = (Field, &'a [Entry])> + 'a {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.entries(version, field).map(|e| (field, e)))
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Total number of entries across all versions and fields
    pub fn entry_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|fields| fields.values())
            .map(Vec::len)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_version_keeps_first_seen_order() {
        let mut store = RecordStore::new();
        assert!(store.record_version("2.0"));
        assert!(store.record_version("1.0"));
        assert!(!store.record_version("2.0"));
        assert_eq!(store.versions(), ["2.0".to_string(), "1.0".to_string()]);
    }

    #[test]
    fn test_append_field_accumulates() {
        let mut store = RecordStore::new();
        store.record_version("1.0");
        store.append_field("1.0", Field::Packages, Entry::Single("lodash".into()));
        store.append_field("1.0", Field::Packages, Entry::Single("lodash".into()));

        let entries = store.entries("1.0", Field::Packages).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(store.entry_count(), 2);
    }

    #[test]
    fn test_absent_field_is_none_not_empty() {
        let mut store = RecordStore::new();
        store.record_version("1.0");
        assert!(store.entries("1.0", Field::Framework).is_none());
        assert!(store.entries("9.9", Field::Framework).is_none());
    }

    #[test]
    fn test_fields_of_follows_display_order() {
        let mut store = RecordStore::new();
        store.record_version("1.0");
        store.append_field("1.0", Field::HtmlCode, Entry::Single("<p></p>".into()));
        store.append_field("1.0", Field::Framework, Entry::Single("Vue".into()));

        let fields: Vec<Field> = store.fields_of("1.0").map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Framework, Field::HtmlCode]);
    }

    #[test]
    fn test_display_text_joins_parts() {
        let entry = Entry::Multiple(vec!["React".into(), "Redux".into()]);
        assert_eq!(entry.display_text(), "React, Redux");
    }

    #[test]
    fn test_field_kinds() {
        let code: Vec<Field> = Field::ALL.into_iter().filter(|f| f.is_code()).collect();
        assert_eq!(code, vec![Field::JsCode, Field::CssCode, Field::HtmlCode]);
        assert_eq!(Field::JsCode.language(), Some("javascript"));
        assert_eq!(Field::Packages.language(), None);
    }
}
