//! Structural document model for the PDF export
//!
//! The store is first flattened into a list of flowables (headings,
//! paragraphs, spacers and page breaks). Layout and PDF serialization only
//! ever see this list.

use crate::core::record::{Entry, RecordStore};

use super::layout::FontFace;

/// Vertical gap after a heading or field group: 0.2 inch
pub const SECTION_GAP: f32 = 14.4;

/// Named paragraph styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleName {
    Heading2,
    Heading3,
    BodyText,
    Code,
}

/// Resolved typographic settings for a style, all sizes in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    pub face: FontFace,
    pub size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    /// Keep line breaks and runs of spaces instead of collapsing them
    pub preformatted: bool,
}

impl StyleName {
    pub fn style(self) -> ParagraphStyle {
        match self {
            StyleName::Heading2 => ParagraphStyle {
                face: FontFace::HelveticaBold,
                size: 14.0,
                leading: 18.0,
                space_before: 12.0,
                space_after: 6.0,
                left_indent: 0.0,
                preformatted: false,
            },
            StyleName::Heading3 => ParagraphStyle {
                face: FontFace::HelveticaBoldOblique,
                size: 12.0,
                leading: 14.4,
                space_before: 12.0,
                space_after: 6.0,
                left_indent: 0.0,
                preformatted: false,
            },
            StyleName::BodyText => ParagraphStyle {
                face: FontFace::Helvetica,
                size: 10.0,
                leading: 12.0,
                space_before: 6.0,
                space_after: 0.0,
                left_indent: 0.0,
                preformatted: false,
            },
            StyleName::Code => ParagraphStyle {
                face: FontFace::Courier,
                size: 8.0,
                leading: 8.8,
                space_before: 0.0,
                space_after: 0.0,
                left_indent: 36.0,
                preformatted: true,
            },
        }
    }
}

/// One element of the document flow
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    /// Markup text in a named style
    Paragraph { text: String, style: StyleName },
    /// Fixed vertical gap in points
    Spacer(f32),
    /// Start the next content on a fresh page
    PageBreak,
}

impl Flowable {
    fn paragraph(text: String, style: StyleName) -> Self {
        Flowable::Paragraph { text, style }
    }
}

/// Escape everything the paragraph markup would otherwise interpret
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Flatten the store into the document flow.
///
/// Each version gets a heading, its non-empty fields in display order, and a
/// page break.
pub fn build_flowables(store: &RecordStore) -> Vec<Flowable> {
    let mut flow = Vec::new();

    for version in store.versions() {
        flow.push(Flowable::paragraph(
            format!("App Version: {}", escape(version)),
            StyleName::Heading2,
        ));
        flow.push(Flowable::Spacer(SECTION_GAP));

        for (field, entries) in store.fields_of(version) {
            flow.push(Flowable::paragraph(
                format!("{}:", field.label()),
                StyleName::Heading3,
            ));
            let style = if field.is_code() { StyleName::Code } else { StyleName::BodyText };
            for entry in entries {
                flow.push(Flowable::paragraph(entry_markup(entry, style), style));
            }
            flow.push(Flowable::Spacer(SECTION_GAP));
        }

        flow.push(Flowable::PageBreak);
    }

    flow
}

/// Body text collapses whitespace, so typed line breaks become `<br/>`
fn entry_markup(entry: &Entry, style: StyleName) -> String {
    let text = escape(&entry.display_text());
    if style.style().preformatted {
        text
    } else {
        text.replace('\n', "<br/>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::collector::{collect_field, collect_version};
    use crate::core::record::Field;

    fn paragraph(text: &str, style: StyleName) -> Flowable {
        Flowable::Paragraph { text: text.to_string(), style }
    }

    fn field_paragraphs<'a>(flow: &'a [Flowable], field: Field) -> Vec<&'a str> {
        let heading = format!("{}:", field.label());
        let mut in_field = false;
        let mut out = Vec::new();

        for item in flow {
            match item {
                Flowable::Paragraph { text, style: StyleName::Heading3 } => in_field = *text == heading,
                Flowable::Paragraph { style: StyleName::Heading2, .. } | Flowable::PageBreak => {
                    in_field = false
                }
                Flowable::Paragraph { text, .. } if in_field => out.push(text.as_str()),
                _ => {}
            }
        }

        out
    }

    #[test]
    fn test_escape_markup_characters() {
        assert_eq!(escape("<script>alert(1)</script>"), "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(escape("a && b"), "a &amp;&amp; b");
        assert_eq!(escape("&lt;"), "&amp;lt;");
    }

    #[test]
    fn test_version_heading_is_escaped() {
        let mut store = RecordStore::new();
        collect_version(&mut store, "<beta> & rc").unwrap();

        let flow = build_flowables(&store);
        assert_eq!(flow[0], paragraph("App Version: &lt;beta&gt; &amp; rc", StyleName::Heading2));
    }

    #[test]
    fn test_multiline_notes_keep_line_breaks() {
        let mut store = RecordStore::new();
        collect_version(&mut store, "1.0").unwrap();
        collect_field(&mut store, Some("1.0"), Field::RegressionNotes, "login ok\nlogout ok").unwrap();
        collect_field(&mut store, Some("1.0"), Field::HtmlCode, "<ul>\n</ul>").unwrap();

        let flow = build_flowables(&store);
        assert_eq!(field_paragraphs(&flow, Field::RegressionNotes), vec!["login ok<br/>logout ok"]);
        assert_eq!(field_paragraphs(&flow, Field::HtmlCode), vec!["&lt;ul&gt;\n&lt;/ul&gt;"]);
    }

    #[test]
    fn test_flow_for_single_version() {
        let mut store = RecordStore::new();
        collect_version(&mut store, "1.0").unwrap();
        collect_field(&mut store, Some("1.0"), Field::Framework, "React, Redux").unwrap();
        collect_field(&mut store, Some("1.0"), Field::HtmlCode, "<div>hi</div>").unwrap();

        assert_eq!(
            build_flowables(&store),
            vec![
                paragraph("App Version: 1.0", StyleName::Heading2),
                Flowable::Spacer(SECTION_GAP),
                paragraph("Framework:", StyleName::Heading3),
                paragraph("React, Redux", StyleName::BodyText),
                Flowable::Spacer(SECTION_GAP),
                paragraph("HTML Code:", StyleName::Heading3),
                paragraph("&lt;div&gt;hi&lt;/div&gt;", StyleName::Code),
                Flowable::Spacer(SECTION_GAP),
                Flowable::PageBreak,
            ]
        );
    }

    #[test]
    fn test_script_entry_is_escaped() {
        let mut store = RecordStore::new();
        collect_version(&mut store, "1.0").unwrap();
        collect_field(&mut store, Some("1.0"), Field::RegressionNotes, "<script>").unwrap();

        let flow = build_flowables(&store);
        assert_eq!(field_paragraphs(&flow, Field::RegressionNotes), vec!["&lt;script&gt;"]);
        assert!(!flow.iter().any(|f| matches!(
            f,
            Flowable::Paragraph { text, .. } if text.contains("<script>")
        )));
    }

    #[test]
    fn test_empty_packages_omits_heading() {
        let mut store = RecordStore::new();
        collect_version(&mut store, "1.0").unwrap();
        let _ = collect_field(&mut store, Some("1.0"), Field::Packages, "");

        let flow = build_flowables(&store);
        assert!(!flow.contains(&paragraph("Packages:", StyleName::Heading3)));
        assert_eq!(flow.last(), Some(&Flowable::PageBreak));
    }

    #[test]
    fn test_flow_is_deterministic() {
        let mut store = RecordStore::new();
        for version in ["1.0", "1.1"] {
            collect_version(&mut store, version).unwrap();
            collect_field(&mut store, Some(version), Field::Modules, "auth, billing").unwrap();
            collect_field(&mut store, Some(version), Field::CssCode, "a { color: red; }").unwrap();
        }
        assert_eq!(build_flowables(&store), build_flowables(&store.clone()));
        let breaks = build_flowables(&store)
            .iter()
            .filter(|f| **f == Flowable::PageBreak)
            .count();
        assert_eq!(breaks, 2);
    }
}
