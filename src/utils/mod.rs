//! Utility functions shared by the CLI and the TUI.
//!
//! - [`app_data`] - Application data directory and config file

pub mod app_data;

pub use app_data::*;
