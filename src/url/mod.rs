//! URL handling module for favicon-finder
//!
//! This module provides base URL validation, reference resolution for
//! extracted `href`/`src` values, host extraction, and the URLs probed on
//! behalf of a scan (well-known paths and third-party icon services).

mod domain;
mod resolve;
mod services;

pub use domain::extract_domain;
pub use resolve::{parse_base_url, resolve_reference};
pub use services::{duckduckgo_icon_url, google_icon_url, well_known_icon_urls, WELL_KNOWN_ICON_PATHS};
