//! Main application state and UI coordination

use std::path::PathBuf;

use anyhow::{Context, Result};
use eframe::egui;

use crate::core::{config::AppConfig, record::Field, session::Session};
use crate::export::{ExportArtifact, ExportOptions};
use crate::ui::{export_panel::ExportPanel, form::{FormPanel, FormState}, saved_items::SavedItemsPanel};

/// Outcome of the last export, shown in the export panel
#[derive(Debug, Default)]
pub struct ExportState {
    /// Last successfully built document
    pub artifact: Option<ExportArtifact>,
    /// Build failure; no download is offered while set
    pub error: Option<String>,
    /// Where the artifact was last written
    pub saved_path: Option<PathBuf>,
    /// Short status line
    pub status: Option<String>,
}

/// Main application state
pub struct AppDetailsApp {
    /// Records entered in this session
    pub session: Session,
    /// Unsaved form input
    pub form: FormState,
    /// Export results
    pub export: ExportState,
    /// Application configuration
    pub config: AppConfig,
    /// Whether the saved items panel is visible
    pub saved_items_visible: bool,
}

impl AppDetailsApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load config or use defaults
        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Using default config: {:#}", e);
            AppConfig::default()
        });

        Self::apply_theme(&cc.egui_ctx, &config);
        Self::with_config(config)
    }

    fn with_config(config: AppConfig) -> Self {
        Self {
            session: Session::new(),
            form: FormState::default(),
            export: ExportState::default(),
            saved_items_visible: config.ui.show_saved_items,
            config,
        }
    }

    fn apply_theme(ctx: &egui::Context, config: &AppConfig) {
        let visuals = if config.ui.theme == "light" {
            egui::Visuals::light()
        } else {
            egui::Visuals::dark()
        };
        ctx.set_visuals(visuals);
    }

    /// Save the version currently typed in the form
    pub fn save_version(&mut self) {
        let previous = self.session.active_version().map(str::to_string);
        let input = self.form.version_input.clone();
        if self.session.on_save_version(&input).is_ok() {
            self.form.version_input.clear();
            self.discard_export();
            if self.session.active_version() != previous.as_deref() {
                self.form.clear_code_drafts();
            }
        }
    }

    /// Switch the active version from the saved items listing
    pub fn select_version(&mut self, version: &str) {
        let changed = self.session.active_version() != Some(version);
        if self.session.on_select_version(version) && changed {
            self.form.clear_code_drafts();
        }
    }

    /// Save the draft for `field`; the draft is cleared only when accepted
    pub fn save_field(&mut self, field: Field) {
        let draft = self.form.draft(field).to_string();
        if self.session.on_save_field(field, &draft).is_ok() {
            self.form.clear_draft(field);
            self.discard_export();
        }
    }

    /// A generated PDF only covers the records saved before it was built
    fn discard_export(&mut self) {
        if self.export.artifact.take().is_some() {
            tracing::debug!("Discarded stale PDF after new save");
        }
        self.export.saved_path = None;
        self.export.status = None;
    }

    /// Build the PDF from everything saved so far
    pub fn generate_pdf(&mut self) {
        let options = ExportOptions::from(&self.config.export);
        match self.session.on_generate_pdf(&options) {
            Ok(artifact) => {
                self.export.status = Some(format!("{} ready", artifact.file_name));
                self.export.artifact = Some(artifact);
                self.export.error = None;
                self.export.saved_path = None;
            }
            Err(e) => {
                self.export.artifact = None;
                self.export.saved_path = None;
                self.export.status = None;
                self.export.error = Some(e.to_string());
            }
        }
    }

    /// Ask for a location and write the last generated PDF there
    pub fn save_pdf_as(&mut self) {
        let Some(artifact) = self.export.artifact.as_ref() else {
            return;
        };

        let mut dialog = rfd::FileDialog::new()
            .set_file_name(&artifact.file_name)
            .add_filter("PDF", &["pdf"]);
        if let Some(dir) = &self.config.last_export_dir {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        match write_artifact(artifact, &path) {
            Ok(()) => {
                self.export.status = Some(format!("Saved {}", path.display()));
                self.config.set_last_export(&path);
                if let Err(e) = self.config.save() {
                    tracing::warn!("Failed to save config: {:#}", e);
                }
                self.export.saved_path = Some(path);
            }
            Err(e) => {
                tracing::error!("Failed to save PDF: {:#}", e);
                self.export.status = Some(format!("Could not save: {:#}", e));
            }
        }
    }

    /// Put the HTML download link on the clipboard
    pub fn copy_download_link(&mut self, ctx: &egui::Context) {
        if let Some(artifact) = &self.export.artifact {
            ctx.copy_text(artifact.link.anchor());
            self.export.status = Some("Download link copied to clipboard".to_string());
        }
    }

    /// Open the last saved PDF in the system viewer
    pub fn open_saved_pdf(&mut self) {
        if let Some(path) = &self.export.saved_path {
            if let Err(e) = open::that(path) {
                tracing::error!("Failed to open {}: {}", path.display(), e);
                self.export.status = Some(format!("Could not open: {}", e));
            }
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Generate PDF").clicked() {
                        self.generate_pdf();
                        ui.close();
                    }
                    let has_artifact = self.export.artifact.is_some();
                    if ui.add_enabled(has_artifact, egui::Button::new("Save PDF As...")).clicked() {
                        self.save_pdf_as();
                        ui.close();
                    }
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("View", |ui| {
                    if ui.button("Toggle Saved Items").clicked() {
                        self.saved_items_visible = !self.saved_items_visible;
                        ui.close();
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let active = self.session.active_version().unwrap_or("none");
                    ui.label(format!("Active version: {}", active));
                });
            });
        });
    }
}

fn write_artifact(artifact: &ExportArtifact, path: &std::path::Path) -> Result<()> {
    std::fs::write(path, &artifact.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Saved PDF: {}", path.display());
    Ok(())
}

impl eframe::App for AppDetailsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Handle keyboard shortcuts
        let (generate, toggle) = ctx.input(|i| {
            (
                i.modifiers.ctrl && i.key_pressed(egui::Key::E),
                i.modifiers.ctrl && i.key_pressed(egui::Key::B),
            )
        });
        if generate {
            self.generate_pdf();
        }
        if toggle {
            self.saved_items_visible = !self.saved_items_visible;
        }

        self.render_menu_bar(ctx);

        egui::TopBottomPanel::bottom("export_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ExportPanel::show(ui, self);
            });

        if self.saved_items_visible {
            egui::SidePanel::right("saved_items")
                .resizable(true)
                .default_width(self.config.ui.saved_items_width)
                .min_width(250.0)
                .show(ctx, |ui| {
                    SavedItemsPanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            FormPanel::show(ui, self);
        });
    }
}
