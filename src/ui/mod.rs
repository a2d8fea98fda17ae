//! UI components for App Details

pub mod code_view;
pub mod export_panel;
pub mod form;
pub mod saved_items;
