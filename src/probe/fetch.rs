//! Probe execution
//!
//! # Outcome mapping
//!
//! | Probe | Condition | Result |
//! |-------|-----------|--------|
//! | CheckExists | 2xx | `Exists` (final URL) |
//! | CheckExists | other status | `NotFound` |
//! | DownloadText | 2xx, body read | `TextDownloaded` |
//! | DownloadImage | 2xx, body decoded | `ImageDownloaded` |
//! | Downloads | other status | `Failed(Status)` |
//! | any | transport error | `Failed(Transport)` |
//! | DownloadImage | undecodable body | `Failed(Decode)` |

use super::{HttpSession, ProbeError, ProbeResult};
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use url::Url;

/// What a probe asks of its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKind {
    /// `HEAD` request; success means the resource exists
    CheckExists,
    /// `GET` request expecting HTML, JSON or XML
    DownloadText,
    /// `GET` request expecting an image
    DownloadImage,
}

/// A single unit of network work
#[derive(Debug, Clone)]
pub struct Probe {
    kind: ProbeKind,
    url: Url,
    session: HttpSession,
}

impl Probe {
    pub fn new(kind: ProbeKind, url: Url, session: HttpSession) -> Self {
        Self { kind, url, session }
    }

    pub fn check_exists(url: Url, session: HttpSession) -> Self {
        Self::new(ProbeKind::CheckExists, url, session)
    }

    pub fn download_text(url: Url, session: HttpSession) -> Self {
        Self::new(ProbeKind::DownloadText, url, session)
    }

    pub fn download_image(url: Url, session: HttpSession) -> Self {
        Self::new(ProbeKind::DownloadImage, url, session)
    }

    pub fn kind(&self) -> ProbeKind {
        self.kind
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Runs the probe to completion
    ///
    /// Always resolves to a result; never returns an error.
    pub async fn execute(&self) -> ProbeResult {
        let result = match self.kind {
            ProbeKind::CheckExists => self.check_exists_inner().await,
            ProbeKind::DownloadText => self.download_text_inner().await,
            ProbeKind::DownloadImage => self.download_image_inner().await,
        };

        tracing::debug!(
            "Probe {:?} {} -> {}",
            self.kind,
            self.url,
            result.kind_label()
        );
        result
    }

    async fn check_exists_inner(&self) -> ProbeResult {
        let response = match self.session.client().head(self.url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return self.failed(ProbeError::Transport(e)),
        };

        let status = response.status();
        if status.is_success() {
            ProbeResult::Exists {
                url: response.url().clone(),
            }
        } else {
            ProbeResult::NotFound {
                url: self.url.clone(),
                status: status.as_u16(),
            }
        }
    }

    async fn download_text_inner(&self) -> ProbeResult {
        let response = match self.get_success().await {
            Ok(response) => response,
            Err(error) => return self.failed(error),
        };

        let url = response.url().clone();
        let content_type = mime_essence(&response);

        match response.text().await {
            Ok(text) => ProbeResult::TextDownloaded {
                url,
                text,
                content_type,
            },
            Err(e) => self.failed(ProbeError::Transport(e)),
        }
    }

    async fn download_image_inner(&self) -> ProbeResult {
        let response = match self.get_success().await {
            Ok(response) => response,
            Err(error) => return self.failed(error),
        };

        let url = response.url().clone();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return self.failed(ProbeError::Transport(e)),
        };

        match image::load_from_memory(&bytes) {
            Ok(image) => ProbeResult::ImageDownloaded { url, image },
            Err(e) => self.failed(ProbeError::Decode(e)),
        }
    }

    /// Sends a GET request, treating any non-2xx status as a failure
    async fn get_success(&self) -> Result<Response, ProbeError> {
        let response = self.session.client().get(self.url.clone()).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(ProbeError::Status(status.as_u16()))
        }
    }

    fn failed(&self, error: ProbeError) -> ProbeResult {
        ProbeResult::Failed {
            url: self.url.clone(),
            error,
        }
    }
}

/// Extracts the lowercase MIME essence (`text/html`) from the Content-Type header
fn mime_essence(response: &Response) -> Option<String> {
    let value = response.headers().get(CONTENT_TYPE)?.to_str().ok()?;
    parse_mime_essence(value)
}

fn parse_mime_essence(value: &str) -> Option<String> {
    let essence = value.split(';').next()?.trim();
    if essence.is_empty() {
        None
    } else {
        Some(essence.to_ascii_lowercase())
    }
}
