//! Shared utilities.
//!
//! - [`app_data`] - Configuration file and app data directory
//! - [`progress`] - Progress reporting that compiles away without the `progress` feature

pub mod app_data;
pub mod progress;

pub use app_data::*;
pub use progress::*;
