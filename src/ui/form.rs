//! Data entry form: version input, text fields and code editors

use std::collections::HashMap;

use eframe::egui;

use crate::app::AppDetailsApp;
use crate::core::record::Field;

use super::code_view;

/// Unsaved input, one draft per field
#[derive(Debug, Default)]
pub struct FormState {
    pub version_input: String,
    drafts: HashMap<Field, String>,
}

impl FormState {
    pub fn draft(&self, field: Field) -> &str {
        self.drafts.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn draft_mut(&mut self, field: Field) -> &mut String {
        self.drafts.entry(field).or_default()
    }

    pub fn clear_draft(&mut self, field: Field) {
        self.drafts.remove(&field);
    }

    /// Code editors belong to one version; drop their content on switch
    pub fn clear_code_drafts(&mut self) {
        self.drafts.retain(|field, _| !field.is_code());
    }
}

/// Fields that get a multi-line text area instead of a single line input
fn is_multiline(field: Field) -> bool {
    matches!(field, Field::RegressionNotes | Field::Packages)
}

/// Data entry form panel
pub struct FormPanel;

impl FormPanel {
    /// Show the form panel
    pub fn show(ui: &mut egui::Ui, app: &mut AppDetailsApp) {
        egui::ScrollArea::vertical()
            .id_salt("form_scroll")
            .show(ui, |ui| {
                Self::show_version_input(ui, app);
                ui.separator();

                for field in Field::ALL {
                    if field.is_code() {
                        Self::show_code_field(ui, app, field);
                    } else {
                        Self::show_text_field(ui, app, field);
                    }
                    ui.add_space(8.0);
                }
            });
    }

    fn show_version_input(ui: &mut egui::Ui, app: &mut AppDetailsApp) {
        ui.heading("App Details");
        ui.add_space(8.0);

        ui.label("App Version:");
        let mut submit = false;
        ui.horizontal(|ui| {
            let response = ui.text_edit_singleline(&mut app.form.version_input);
            submit = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Save App Version").clicked() {
                submit = true;
            }
        });
        if submit {
            app.save_version();
        }
    }

    fn show_text_field(ui: &mut egui::Ui, app: &mut AppDetailsApp, field: Field) {
        ui.label(format!("{} being used:", field.label()));

        let draft = app.form.draft_mut(field);
        if is_multiline(field) {
            ui.add(
                egui::TextEdit::multiline(draft)
                    .desired_width(f32::INFINITY)
                    .desired_rows(4),
            );
        } else {
            ui.add(egui::TextEdit::singleline(draft).desired_width(f32::INFINITY));
        }

        if ui.button(format!("Save {}", field.label())).clicked() {
            app.save_field(field);
        }
    }

    fn show_code_field(ui: &mut egui::Ui, app: &mut AppDetailsApp, field: Field) {
        ui.label(
            egui::RichText::new(format!("Enter your {} here:", field.label()))
                .small()
                .weak(),
        );

        let rows = app.config.editor.code_rows;
        let font_size = app.config.editor.font_size;
        code_view::code_editor(ui, app.form.draft_mut(field), field, rows, font_size);

        if ui.button(format!("Save {}", field.label())).clicked() {
            app.save_field(field);
        }
    }
}
