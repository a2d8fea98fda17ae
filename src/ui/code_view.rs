//! Syntax highlighted code editing and display

use eframe::egui::{self, Color32, FontId, RichText, Ui};
use egui_extras::syntax_highlighting::{self, CodeTheme};

use crate::core::record::Field;

/// File extension the highlighter knows the display tag by
fn syntax_extension(language: &str) -> &str {
    match language {
        "javascript" => "js",
        other => other,
    }
}

/// Multi-line code editor for one of the code fields
pub fn code_editor(ui: &mut Ui, code: &mut String, field: Field, rows: usize, font_size: f32) -> egui::Response {
    let language = syntax_extension(field.language().unwrap_or_default());
    let theme = CodeTheme::from_memory(ui.ctx(), ui.style());

    let mut layouter = |ui: &Ui, buf: &dyn egui::TextBuffer, wrap_width: f32| {
        let mut job = syntax_highlighting::highlight(ui.ctx(), ui.style(), &theme, buf.as_str(), language);
        job.wrap.max_width = wrap_width;
        for section in &mut job.sections {
            section.format.font_id = FontId::monospace(font_size);
        }
        ui.fonts(|f| f.layout_job(job))
    };

    egui::ScrollArea::vertical()
        .id_salt(("code_editor", field))
        .max_height(font_size * 1.4 * rows as f32 + 16.0)
        .show(ui, |ui| {
            ui.add(
                egui::TextEdit::multiline(code)
                    .font(egui::TextStyle::Monospace)
                    .code_editor()
                    .desired_rows(rows)
                    .lock_focus(true)
                    .desired_width(f32::INFINITY)
                    .layouter(&mut layouter),
            )
        })
        .inner
}

/// Read-only code block with a language label
pub fn render_code_block(ui: &mut Ui, language: &str, code: &str) {
    let bg_color = Color32::from_rgb(40, 40, 40);
    let border_color = Color32::from_rgb(60, 60, 60);
    let theme = CodeTheme::from_memory(ui.ctx(), ui.style());

    egui::Frame::none()
        .fill(bg_color)
        .stroke(egui::Stroke::new(1.0, border_color))
        .inner_margin(egui::Margin::same(8))
        .outer_margin(egui::Margin::symmetric(0, 4))
        .rounding(4.0)
        .show(ui, |ui| {
            ui.label(
                RichText::new(language)
                    .font(FontId::monospace(12.0))
                    .color(Color32::from_rgb(128, 128, 128)),
            );
            ui.add_space(4.0);

            syntax_highlighting::code_view_ui(ui, &theme, code, syntax_extension(language));
        });
}
