pub mod config;
pub mod dataset;
pub mod error;

// Search pipeline
pub mod search;

// HTTP surfaces
pub mod api;
pub mod web;

// Command-line interface
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
