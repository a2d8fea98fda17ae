//! PDF export controls

use eframe::egui::{self, Color32, RichText, Ui};

use crate::app::AppDetailsApp;

/// Bottom bar with the "Generate PDF" action and the download options
pub struct ExportPanel;

impl ExportPanel {
    pub fn show(ui: &mut Ui, app: &mut AppDetailsApp) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Generate PDF").clicked() {
                app.generate_pdf();
            }

            if let Some(error) = &app.export.error {
                ui.label(
                    RichText::new(format!("PDF generation failed: {}", error))
                        .color(Color32::from_rgb(224, 108, 117)),
                );
                return;
            }

            if let Some(artifact) = &app.export.artifact {
                ui.separator();
                ui.label(format!("{} ({} bytes)", artifact.file_name, artifact.bytes.len()));

                if ui.button("Download PDF").clicked() {
                    app.save_pdf_as();
                }
                if ui
                    .button("Copy Download Link")
                    .on_hover_text("Copies an HTML link with the PDF embedded as base64")
                    .clicked()
                {
                    app.copy_download_link(ui.ctx());
                }
                if app.export.saved_path.is_some() && ui.button("Open").clicked() {
                    app.open_saved_pdf();
                }
            }

            if let Some(status) = &app.export.status {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(status).weak());
                });
            }
        });
        ui.add_space(4.0);
    }
}
