//! PDF serialization of laid out pages

use std::collections::HashMap;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, Pt};

use super::layout::{FontFace, PageGeometry, PageLayout};

impl FontFace {
    fn builtin(self) -> BuiltinFont {
        match self {
            FontFace::Helvetica => BuiltinFont::Helvetica,
            FontFace::HelveticaBold => BuiltinFont::HelveticaBold,
            FontFace::HelveticaBoldOblique => BuiltinFont::HelveticaBoldOblique,
            FontFace::Courier => BuiltinFont::Courier,
        }
    }
}

/// Write `pages` into a complete in-memory PDF file
pub fn write_pdf(
    title: &str,
    pages: &[PageLayout],
    geometry: &PageGeometry,
) -> Result<Vec<u8>, printpdf::Error> {
    let width: Mm = Pt(geometry.width).into();
    let height: Mm = Pt(geometry.height).into();

    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Content");

    let mut fonts: HashMap<FontFace, IndirectFontRef> = HashMap::new();
    for face in FontFace::ALL {
        fonts.insert(face, doc.add_builtin_font(face.builtin())?);
    }

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(width, height, "Content");
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        for item in &page.items {
            let Some(font) = fonts.get(&item.face) else {
                continue;
            };
            layer.use_text(
                item.text.as_str(),
                item.size,
                Pt(item.x).into(),
                Pt(item.y).into(),
                font,
            );
        }
    }

    doc.save_to_bytes()
}
