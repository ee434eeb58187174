//! Extraction functions
//!
//! Pure functions turning an HTML document, a Web App Manifest, or a
//! `browserconfig.xml` document into [`DetectedIcon`](crate::icon::DetectedIcon)s
//! and follow-up URLs. Nothing here performs I/O, and malformed entries are
//! skipped rather than failing the whole extraction.

mod browser_config;
mod html;
mod manifest;

pub use browser_config::extract_browser_config_icons;
pub use html::{
    extract_browser_config, extract_html_head_icons, extract_manifest_urls, extract_metadata,
    parse_document, BrowserConfigRef,
};
pub use manifest::extract_manifest_icons;

use scraper::Selector;

/// Parses a selector that is known to be valid at compile time
///
/// Returns None instead of panicking so callers can skip the extraction step.
fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::error!("Invalid selector '{}': {:?}", css, e);
            None
        }
    }
}
