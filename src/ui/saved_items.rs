//! Saved items listing, grouped by version

use eframe::egui::{self, Color32, FontId, RichText, Ui};

use crate::app::AppDetailsApp;
use crate::core::display::{self, DisplayBlock, DisplayItem};

use super::code_view;

/// Panel listing everything saved in this session
pub struct SavedItemsPanel;

impl SavedItemsPanel {
    /// Show the saved items panel
    pub fn show(ui: &mut Ui, app: &mut AppDetailsApp) {
        ui.heading("Saved Items");
        let store = app.session.store();
        if !store.is_empty() {
            ui.label(
                RichText::new(format!(
                    "{} versions, {} entries",
                    store.versions().len(),
                    store.entry_count()
                ))
                .weak(),
            );
        }
        ui.separator();

        let blocks = display::render(app.session.store());
        let active = app.session.active_version().map(str::to_string);
        let mut selected = None;

        egui::ScrollArea::vertical()
            .id_salt("saved_items_scroll")
            .show(ui, |ui| {
                if blocks.is_empty() {
                    Self::show_empty(ui);
                    return;
                }

                for block in &blocks {
                    match block {
                        DisplayBlock::Version(version) => {
                            let is_active = active.as_deref() == Some(version.as_str());
                            if render_version_heading(ui, &block.title(), is_active) {
                                selected = Some(version.clone());
                            }
                        }
                        DisplayBlock::Field { items, .. } => {
                            render_field(ui, &block.title(), items);
                        }
                    }
                }
            });

        if let Some(version) = selected {
            app.select_version(&version);
        }
    }

    /// Show empty state
    fn show_empty(ui: &mut Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("Nothing saved yet");
            ui.label("Save an app version to start recording details");
        });
    }
}

/// Version header; returns `true` when clicked
fn render_version_heading(ui: &mut Ui, title: &str, active: bool) -> bool {
    ui.add_space(10.0);
    let text = RichText::new(title)
        .font(FontId::proportional(20.0))
        .strong();
    let clicked = ui
        .selectable_label(active, text)
        .on_hover_text("Record new details against this version")
        .clicked();
    ui.add_space(6.0);
    clicked
}

fn render_field(ui: &mut Ui, title: &str, items: &[DisplayItem]) {
    ui.label(
        RichText::new(title)
            .font(FontId::proportional(16.0))
            .color(Color32::from_rgb(180, 180, 180))
            .strong(),
    );

    for item in items {
        match item {
            DisplayItem::Text(_) => {
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(16.0);
                    ui.label(item.line());
                });
            }
            DisplayItem::Code { language, code } => {
                code_view::render_code_block(ui, language, code);
            }
        }
    }

    ui.add_space(8.0);
}
