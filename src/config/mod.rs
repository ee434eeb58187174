//! Configuration module for favicon-finder
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not required: [`ScanConfig::default`] enables every
//! discovery source with conservative timeouts.
//!
//! # Example
//!
//! ```no_run
//! use favicon_finder::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("favicon-finder.toml")).unwrap();
//! println!("Scanning HTML: {}", config.features.scan_html_head);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ExecutorConfig, FeatureFlags, HttpConfig, ScanConfig, ServiceEndpoints,
    DEFAULT_DUCKDUCKGO_ENDPOINT, DEFAULT_GOOGLE_ENDPOINT,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
