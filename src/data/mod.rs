//! Data loading and external tuning
//!
//! This module handles loading progression tuning from external RON files,
//! so curves can be adjusted without rebuilding.

pub mod loader;

pub use loader::{ProgressionConfig, export_default_config, config_search_paths};
