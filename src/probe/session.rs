//! Shared HTTP session
//!
//! One [`HttpSession`] is built per scan (or injected by the caller) and
//! cloned into every probe. Cloning is cheap: the underlying
//! `reqwest::Client` keeps its connection pool behind an `Arc`.

use crate::config::HttpConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops followed by existence checks and downloads
const MAX_REDIRECTS: usize = 10;

/// Handle to the HTTP client shared by all probes of a scan
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    /// Builds a session from configuration
    ///
    /// When `allow_invalid_certificates` is set, certificate validation is
    /// disabled for every request made through this session and a warning
    /// is logged.
    ///
    /// # Returns
    ///
    /// * `Ok(HttpSession)` - Successfully built session
    /// * `Err(reqwest::Error)` - The TLS backend or client could not be initialised
    ///
    /// # Example
    ///
    /// ```no_run
    /// use favicon_finder::config::HttpConfig;
    /// use favicon_finder::probe::HttpSession;
    ///
    /// let session = HttpSession::new(&HttpConfig::default()).unwrap();
    /// ```
    pub fn new(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true);

        if config.allow_invalid_certificates {
            tracing::warn!(
                "TLS certificate validation is DISABLED for this session; \
                 any server certificate will be accepted"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing client, e.g. one configured by the caller
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}
