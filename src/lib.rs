//! favicon-finder: discovers the icons a website advertises
//!
//! This crate probes well-known favicon paths, parses the `<head>` of the
//! site's HTML, follows Web App Manifest and `browserconfig.xml` references,
//! and can download the discovered images.

pub mod config;
pub mod download;
pub mod executor;
pub mod extract;
pub mod icon;
pub mod probe;
pub mod scan;
pub mod url;

use thiserror::Error;

/// Main error type for favicon-finder operations
///
/// Per-probe failures never surface here; they are reported inside
/// [`probe::ProbeResult::Failed`]. Only setup problems do.
#[derive(Debug, Error)]
pub enum FaviconError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for favicon-finder operations
pub type Result<T> = std::result::Result<T, FaviconError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::ScanConfig;
pub use download::{best_icon, dedupe_icons, download_all, Downloader};
pub use executor::{Executor, Operation};
pub use icon::{DetectedIcon, IconSize, IconType};
pub use probe::{HttpSession, Probe, ProbeError, ProbeKind, ProbeResult};
pub use scan::{scan_url, ScanPhase, ScanResults, Scanner};
