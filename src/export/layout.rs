//! Line breaking and pagination
//!
//! Paragraphs are wrapped using the standard metrics of the PDF base-14
//! Helvetica and Courier faces, then stacked top to bottom onto pages.
//! Coordinates are PDF points with the origin at the bottom-left corner.

use super::flowables::{Flowable, ParagraphStyle};
use super::markup::{self, MarkupError, LINE_BREAK};

/// Built-in PDF faces used by the export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    HelveticaBoldOblique,
    Courier,
}

/// Advance widths of Helvetica for `' '..='~'`, in 1/1000 em
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Advance widths of Helvetica-Bold for `' '..='~'`, in 1/1000 em
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

const COURIER_WIDTH: u16 = 600;

impl FontFace {
    pub const ALL: [FontFace; 4] = [
        FontFace::Helvetica,
        FontFace::HelveticaBold,
        FontFace::HelveticaBoldOblique,
        FontFace::Courier,
    ];

    /// Advance width of `c` in 1/1000 em
    fn char_units(self, c: char) -> u16 {
        let table = match self {
            FontFace::Courier => return COURIER_WIDTH,
            FontFace::Helvetica => &HELVETICA_WIDTHS,
            FontFace::HelveticaBold | FontFace::HelveticaBoldOblique => &HELVETICA_BOLD_WIDTHS,
        };
        match c {
            ' '..='~' => table[c as usize - 0x20],
            _ => 556,
        }
    }

    /// Width of `text` set at `size` points
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_units(c))).sum();
        units as f32 * size / 1000.0
    }
}

/// Characters the base-14 fonts can show; everything else becomes `?`
fn printable(c: char) -> char {
    match c {
        ' '..='~' => c,
        '\u{a0}' => ' ',
        _ => '?',
    }
}

/// Page size and margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    fn frame_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn top(&self) -> f32 {
        self.height - self.margin
    }

    fn bottom(&self) -> f32 {
        self.margin
    }
}

/// A piece of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub x: f32,
    /// Baseline
    pub y: f32,
    pub face: FontFace,
    pub size: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub items: Vec<PlacedText>,
}

/// One output line: segments with x offsets relative to the line start
#[derive(Debug, Clone, Default, PartialEq)]
struct Line {
    segments: Vec<(f32, FontFace, String)>,
    width: f32,
}

impl Line {
    fn push(&mut self, face: FontFace, text: &str, width: f32, gap: f32) {
        let x = self.width + gap;
        match self.segments.last_mut() {
            Some((_, last_face, last_text)) if *last_face == face => {
                if gap > 0.0 {
                    last_text.push(' ');
                }
                last_text.push_str(text);
            }
            _ => self.segments.push((x, face, text.to_string())),
        }
        self.width = x + width;
    }
}

/// Wrap collapsed text: any whitespace run separates words, only `<br/>`
/// forces a break
fn wrap_words(text: &str, style: &ParagraphStyle, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    let mut pending_space = false;

    let face = style.face;
    let space = face.text_width(" ", style.size);
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c == LINE_BREAK {
            chars.next();
            lines.push(std::mem::take(&mut line));
            pending_space = false;
            continue;
        }
        if c.is_whitespace() {
            chars.next();
            pending_space = !line.segments.is_empty();
            continue;
        }

        let mut word = String::new();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                break;
            }
            word.push(printable(c));
            chars.next();
        }

        let width = face.text_width(&word, style.size);
        let gap = if pending_space { space } else { 0.0 };
        pending_space = false;

        if !line.segments.is_empty() && line.width + gap + width > max_width {
            lines.push(std::mem::take(&mut line));
            place_long_word(&mut lines, &mut line, face, &word, style.size, max_width);
        } else if line.segments.is_empty() && width > max_width {
            place_long_word(&mut lines, &mut line, face, &word, style.size, max_width);
        } else {
            line.push(face, &word, width, gap);
        }
    }

    if !line.segments.is_empty() {
        lines.push(line);
    }
    lines
}

/// Put `word` at the start of `line`, splitting it across lines if it is
/// wider than the frame
fn place_long_word(
    lines: &mut Vec<Line>,
    line: &mut Line,
    face: FontFace,
    word: &str,
    size: f32,
    max_width: f32,
) {
    for c in word.chars() {
        let mut buf = [0u8; 4];
        let piece = c.encode_utf8(&mut buf);
        let width = face.text_width(piece, size);
        if !line.segments.is_empty() && line.width + width > max_width {
            lines.push(std::mem::take(line));
        }
        line.push(face, piece, width, 0.0);
    }
}

/// Wrap preformatted text: line breaks and spaces are kept, long lines are
/// broken at the frame edge
fn wrap_preformatted(text: &str, style: &ParagraphStyle, max_width: f32) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut line = Line::default();
    let face = style.face;

    for c in text.chars() {
        match c {
            '\n' | LINE_BREAK => lines.push(std::mem::take(&mut line)),
            '\r' => {}
            '\t' => {
                for _ in 0..4 {
                    push_char(&mut lines, &mut line, face, ' ', style.size, max_width);
                }
            }
            _ => push_char(&mut lines, &mut line, face, printable(c), style.size, max_width),
        }
    }

    lines.push(line);
    lines
}

fn push_char(lines: &mut Vec<Line>, line: &mut Line, face: FontFace, c: char, size: f32, max_width: f32) {
    let mut buf = [0u8; 4];
    let piece = c.encode_utf8(&mut buf);
    let width = face.text_width(piece, size);
    if !line.segments.is_empty() && line.width + width > max_width {
        lines.push(std::mem::take(line));
    }
    line.push(face, piece, width, 0.0);
}

/// Break one paragraph into lines for a frame of `frame_width` points
fn wrap_paragraph(
    markup_text: &str,
    style: &ParagraphStyle,
    frame_width: f32,
) -> Result<Vec<Line>, MarkupError> {
    let text = markup::parse(markup_text)?;
    let max_width = (frame_width - style.left_indent).max(style.size);
    Ok(if style.preformatted {
        wrap_preformatted(&text, style, max_width)
    } else {
        wrap_words(&text, style, max_width)
    })
}

struct Cursor<'a> {
    geometry: &'a PageGeometry,
    pages: Vec<PageLayout>,
    y: f32,
    at_top: bool,
    break_pending: bool,
}

impl<'a> Cursor<'a> {
    fn new(geometry: &'a PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            y: geometry.top(),
            at_top: true,
            break_pending: false,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(PageLayout::default());
        self.y = self.geometry.top();
        self.at_top = true;
        self.break_pending = false;
    }

    /// Make sure content has a page to go on, honouring a pending break
    fn ensure_page(&mut self) {
        if self.pages.is_empty() || self.break_pending {
            self.new_page();
        }
    }

    fn place_line(&mut self, line: Line, style: &ParagraphStyle) {
        if !self.at_top && self.y - style.leading < self.geometry.bottom() {
            self.new_page();
        }
        let baseline = self.y - style.size;
        let left = self.geometry.margin + style.left_indent;
        if let Some(page) = self.pages.last_mut() {
            for (x, face, text) in line.segments {
                if text.trim().is_empty() {
                    continue;
                }
                page.items.push(PlacedText {
                    x: left + x,
                    y: baseline,
                    face,
                    size: style.size,
                    text,
                });
            }
        }
        self.y -= style.leading;
        self.at_top = false;
    }
}

/// Lay the flow out onto pages. Always returns at least one page.
pub fn layout(flow: &[Flowable], geometry: &PageGeometry) -> Result<Vec<PageLayout>, MarkupError> {
    let mut cursor = Cursor::new(geometry);

    for item in flow {
        match item {
            Flowable::Paragraph { text, style } => {
                let style = style.style();
                let lines = wrap_paragraph(text, &style, geometry.frame_width())?;
                cursor.ensure_page();
                if !cursor.at_top {
                    cursor.y -= style.space_before;
                }
                for line in lines {
                    cursor.place_line(line, &style);
                }
                cursor.y -= style.space_after;
            }
            Flowable::Spacer(height) => {
                cursor.ensure_page();
                if cursor.at_top {
                    continue;
                }
                if cursor.y - height < geometry.bottom() {
                    cursor.new_page();
                } else {
                    cursor.y -= height;
                }
            }
            Flowable::PageBreak => {
                if !cursor.pages.is_empty() {
                    cursor.break_pending = true;
                }
            }
        }
    }

    if cursor.pages.is_empty() {
        cursor.new_page();
    }
    Ok(cursor.pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::flowables::StyleName;

    const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
        margin: 50.0,
    };

    fn para(text: &str, style: StyleName) -> Flowable {
        Flowable::Paragraph {
            text: text.to_string(),
            style,
        }
    }

    fn page_text(page: &PageLayout) -> Vec<&str> {
        page.items.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn test_text_width_uses_metrics() {
        assert_eq!(FontFace::Courier.text_width("abcd", 10.0), 24.0);
        assert_eq!(FontFace::Helvetica.text_width("il", 10.0), 4.44);
        assert!(FontFace::HelveticaBold.text_width("m", 10.0) > FontFace::Helvetica.text_width("m", 10.0));
        assert_eq!(
            FontFace::HelveticaBoldOblique.text_width("App", 12.0),
            FontFace::HelveticaBold.text_width("App", 12.0)
        );
    }

    #[test]
    fn test_line_break_tag_splits_body_text() {
        let pages = layout(&[para("first  line<br/>second", StyleName::BodyText)], &LETTER).unwrap();
        assert_eq!(page_text(&pages[0]), vec!["first line", "second"]);
        assert_eq!(pages[0].items[0].y - pages[0].items[1].y, 12.0);
    }

    #[test]
    fn test_short_paragraph_is_one_line() {
        let pages = layout(&[para("React,  Redux\n and   more", StyleName::BodyText)], &LETTER).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(page_text(&pages[0]), vec!["React, Redux and more"]);
        let item = &pages[0].items[0];
        assert_eq!(item.x, 50.0);
        assert_eq!(item.y, 792.0 - 50.0 - 10.0);
    }

    #[test]
    fn test_long_paragraph_wraps_within_frame() {
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        let pages = layout(&[para(&text, StyleName::BodyText)], &LETTER).unwrap();
        let items = &pages[0].items;
        assert!(items.len() > 1);
        for item in items {
            assert!(item.x + item.face.text_width(&item.text, item.size) <= 562.0 + 0.01);
        }
    }

    #[test]
    fn test_code_keeps_line_breaks_and_indent() {
        let code = "function f() {\n    return 1;\n}";
        let pages = layout(&[para(code, StyleName::Code)], &LETTER).unwrap();
        assert_eq!(page_text(&pages[0]), vec!["function f() {", "    return 1;", "}"]);
        assert_eq!(pages[0].items[0].x, 86.0);
        assert_eq!(pages[0].items[0].face, FontFace::Courier);
    }

    #[test]
    fn test_escaped_markup_is_shown_literally() {
        let pages = layout(&[para("&lt;script&gt;", StyleName::BodyText)], &LETTER).unwrap();
        assert_eq!(page_text(&pages[0]), vec!["<script>"]);
    }

    #[test]
    fn test_unescaped_markup_fails() {
        let err = layout(&[para("<script>", StyleName::BodyText)], &LETTER).unwrap_err();
        assert_eq!(err, MarkupError::UnknownTag("script".to_string()));
    }

    #[test]
    fn test_page_break_has_no_trailing_blank_page() {
        let flow = vec![
            para("App Version: 1.0", StyleName::Heading2),
            Flowable::PageBreak,
            para("App Version: 2.0", StyleName::Heading2),
            Flowable::PageBreak,
        ];
        let pages = layout(&flow, &LETTER).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(page_text(&pages[1]), vec!["App Version: 2.0"]);
    }

    #[test]
    fn test_overflow_starts_new_page() {
        let code = vec!["x = 1;"; 200].join("\n");
        let pages = layout(&[para(&code, StyleName::Code)], &LETTER).unwrap();
        assert!(pages.len() >= 2);
        for page in &pages {
            for item in &page.items {
                assert!(item.y >= 50.0);
            }
        }
        let total: usize = pages.iter().map(|p| p.items.len()).sum();
        assert_eq!(total, 200);
    }

    #[test]
    fn test_empty_flow_is_one_blank_page() {
        let pages = layout(&[], &LETTER).unwrap();
        assert_eq!(pages, vec![PageLayout::default()]);
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        let pages = layout(&[para("caf\u{e9} \u{1f680}", StyleName::BodyText)], &LETTER).unwrap();
        assert_eq!(page_text(&pages[0]), vec!["caf? ?"]);
    }
}
