//! App Details - per-version app notes with PDF export
//!
//! Record framework, languages, packages, runtime versions and code snippets
//! for each app version, review them grouped by version, and export
//! everything to a paginated PDF.

mod app;
mod core;
mod export;
mod ui;

use app::AppDetailsApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting App Details...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("App Details"),
        ..Default::default()
    };

    eframe::run_native(
        "App Details",
        native_options,
        Box::new(|cc| Ok(Box::new(AppDetailsApp::new(cc)))),
    )
}
