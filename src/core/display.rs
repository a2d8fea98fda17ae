//! Grouped view of the record store
//!
//! [`render`] flattens the store into a sequence of blocks that the UI draws
//! top to bottom. The blocks carry enough structure that the saved records
//! can be re-derived from them.

use super::record::{Entry, Field, RecordStore};

/// One line or group in the saved items listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayBlock {
    /// Version header
    Version(String),
    /// A non-empty field of the preceding version
    Field { field: Field, items: Vec<DisplayItem> },
}

/// A single rendered entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem {
    /// Bullet text; list entries already joined with `", "`
    Text(String),
    /// Syntax tagged code block
    Code { language: &'static str, code: String },
}

impl DisplayBlock {
    /// Heading text as shown in the listing
    pub fn title(&self) -> String {
        match self {
            DisplayBlock::Version(version) => format!("App Version: {}", version),
            DisplayBlock::Field { field, .. } => format!("{}:", field.label()),
        }
    }
}

impl DisplayItem {
    /// Bullet line for text items, raw source for code items
    pub fn line(&self) -> String {
        match self {
            DisplayItem::Text(text) => format!("- {}", text),
            DisplayItem::Code { code, .. } => code.clone(),
        }
    }
}

/// Build the listing for every known version in first-seen order
pub fn render(store: &RecordStore) -> Vec<DisplayBlock> {
    let mut blocks = Vec::new();

    for version in store.versions() {
        blocks.push(DisplayBlock::Version(version.clone()));

        for (field, entries) in store.fields_of(version) {
            let items = entries.iter().map(|entry| render_entry(field, entry)).collect();
            blocks.push(DisplayBlock::Field { field, items });
        }
    }

    blocks
}

fn render_entry(field: Field, entry: &Entry) -> DisplayItem {
    match field.language() {
        Some(language) => DisplayItem::Code {
            language,
            code: entry.display_text(),
        },
        None => DisplayItem::Text(entry.display_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collector::{collect_field, collect_version, parse_entry};
    use crate::core::record::Entry;

    /// Records re-derived from a listing: `(version, field, entries)`
    type DerivedRecord = (String, Field, Vec<Entry>);

    /// Reconstruct the stored records from a rendered listing.
    ///
    /// Field blocks that appear before any version header are skipped.
    fn derive_records(blocks: &[DisplayBlock]) -> Vec<DerivedRecord> {
        let mut records = Vec::new();
        let mut current: Option<&str> = None;

        for block in blocks {
            match block {
                DisplayBlock::Version(version) => current = Some(version),
                DisplayBlock::Field { field, items } => {
                    let Some(version) = current else { continue };
                    let entries = items
                        .iter()
                        .map(|item| match item {
                            DisplayItem::Text(text) => parse_entry(*field, text),
                            DisplayItem::Code { code, .. } => Entry::Single(code.clone()),
                        })
                        .collect();
                    records.push((version.to_string(), *field, entries));
                }
            }
        }

        records
    }

    fn sample_store() -> RecordStore {
        let mut store = RecordStore::new();
        collect_version(&mut store, "1.0").unwrap();
        collect_field(&mut store, Some("1.0"), Field::Framework, "React, Redux").unwrap();
        collect_field(&mut store, Some("1.0"), Field::NodeVersion, "18.2.0").unwrap();
        collect_field(&mut store, Some("1.0"), Field::JsCode, "let a = [1, 2];").unwrap();
        collect_field(&mut store, Some("1.0"), Field::JsCode, "console.log(a);").unwrap();
        collect_version(&mut store, "2.0").unwrap();
        collect_field(&mut store, Some("2.0"), Field::CssCode, "body { margin: 0; }").unwrap();
        collect_field(&mut store, Some("2.0"), Field::Languages, "TypeScript").unwrap();
        store
    }

    #[test]
    fn test_framework_scenario() {
        let mut store = RecordStore::new();
        collect_version(&mut store, "1.0").unwrap();
        collect_field(&mut store, Some("1.0"), Field::Framework, "React, Redux").unwrap();

        let blocks = render(&store);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title(), "App Version: 1.0");
        assert_eq!(blocks[1].title(), "Framework:");
        let DisplayBlock::Field { items, .. } = &blocks[1] else {
            panic!("expected a field block");
        };
        assert_eq!(items[0].line(), "- React, Redux");
    }

    #[test]
    fn test_code_entries_stay_separate() {
        let blocks = render(&sample_store());
        let code_block = blocks
            .iter()
            .find(|b| matches!(b, DisplayBlock::Field { field: Field::JsCode, .. }))
            .unwrap();
        let DisplayBlock::Field { items, .. } = code_block else {
            unreachable!()
        };
        assert_eq!(
            items,
            &vec![
                DisplayItem::Code { language: "javascript", code: "let a = [1, 2];".into() },
                DisplayItem::Code { language: "javascript", code: "console.log(a);".into() },
            ]
        );
    }

    #[test]
    fn test_fields_follow_fixed_order() {
        let blocks = render(&sample_store());
        let titles: Vec<String> = blocks.iter().map(DisplayBlock::title).collect();
        assert_eq!(
            titles,
            vec![
                "App Version: 1.0",
                "Framework:",
                "Node Version:",
                "JavaScript Code:",
                "App Version: 2.0",
                "Languages:",
                "CSS Code:",
            ]
        );
    }

    #[test]
    fn test_version_without_fields_renders_header_only() {
        let mut store = RecordStore::new();
        collect_version(&mut store, "3.1").unwrap();
        assert_eq!(render(&store), vec![DisplayBlock::Version("3.1".into())]);
        assert!(render(&RecordStore::new()).is_empty());
    }

    #[test]
    fn test_round_trip_reconstructs_records() {
        let store = sample_store();
        let derived = derive_records(&render(&store));

        let mut expected = Vec::new();
        for version in store.versions() {
            for (field, entries) in store.fields_of(version) {
                expected.push((version.clone(), field, entries.to_vec()));
            }
        }
        assert_eq!(derived, expected);
    }
}
