//! Probe operations
//!
//! A probe is one unit of network work: an existence check, a text download,
//! or an image download. Every probe resolves to a [`ProbeResult`]; transport
//! failures, bad statuses and decode errors are reported as
//! [`ProbeResult::Failed`] instead of being returned as errors, so one probe
//! can never abort its siblings.

mod fetch;
mod session;

pub use fetch::{Probe, ProbeKind};
pub use session::HttpSession;

use image::DynamicImage;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Why a single probe failed
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("operation timed out after {0:?}")]
    TimedOut(Duration),

    #[error("operation task aborted before completing")]
    Aborted,
}

/// Outcome of a single probe
#[derive(Debug)]
pub enum ProbeResult {
    /// Existence check got a 2xx response; `url` is the final URL after redirects
    Exists { url: Url },

    /// Existence check got a non-2xx response
    NotFound { url: Url, status: u16 },

    /// Text download succeeded
    TextDownloaded {
        url: Url,
        text: String,
        /// MIME essence of the Content-Type header, lowercase without parameters
        content_type: Option<String>,
    },

    /// Image download and decode succeeded
    ImageDownloaded { url: Url, image: DynamicImage },

    /// The probe failed; `url` is the URL that was requested
    Failed { url: Url, error: ProbeError },
}

impl ProbeResult {
    /// The URL this result is about (final URL on success, requested URL otherwise)
    pub fn url(&self) -> &Url {
        match self {
            Self::Exists { url }
            | Self::NotFound { url, .. }
            | Self::TextDownloaded { url, .. }
            | Self::ImageDownloaded { url, .. }
            | Self::Failed { url, .. } => url,
        }
    }

    /// Returns true for every outcome except `Failed`
    ///
    /// A `NotFound` is a legitimate negative answer, not a failure.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Short label used in log output
    pub fn kind_label(&self) -> &'static str {
        match self {
            Self::Exists { .. } => "exists",
            Self::NotFound { .. } => "not_found",
            Self::TextDownloaded { .. } => "text",
            Self::ImageDownloaded { .. } => "image",
            Self::Failed { .. } => "failed",
        }
    }
}
