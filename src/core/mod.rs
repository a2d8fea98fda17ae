//! Core functionality: records, input collection, the listing view model and configuration

pub mod collector;
pub mod config;
pub mod display;
pub mod record;
pub mod session;
