//! Scan orchestration
//!
//! The scanner builds the phase-1 operation set, wires the handlers that
//! discover phase-2 follow-ups, and drives the two waves through the
//! [`Executor`].

use crate::config::{validate, ScanConfig};
use crate::executor::{Executor, Operation};
use crate::extract::{
    extract_browser_config, extract_browser_config_icons, extract_html_head_icons,
    extract_manifest_icons, extract_manifest_urls, extract_metadata, parse_document,
    BrowserConfigRef,
};
use crate::icon::{DetectedIcon, IconType};
use crate::probe::{HttpSession, Probe, ProbeResult};
use crate::scan::accumulator::{ScanAccumulator, ScanResults};
use crate::scan::phase::ScanPhase;
use crate::url::{duckduckgo_icon_url, google_icon_url, parse_base_url, well_known_icon_urls};
use crate::FaviconError;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Content type an HTML download must report before its head is parsed
const HTML_CONTENT_TYPE: &str = "text/html";

/// Discovers the icons of websites
///
/// A scanner is cheap to clone and can run any number of scans, sequentially
/// or concurrently. All scans share its HTTP session and executor.
#[derive(Debug, Clone)]
pub struct Scanner {
    config: Arc<ScanConfig>,
    session: HttpSession,
    executor: Executor,
    duckduckgo_endpoint: Url,
    google_endpoint: Url,
}

impl Scanner {
    /// Creates a scanner, building its HTTP session from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Scanner)` - Ready to scan
    /// * `Err(FaviconError)` - Invalid configuration or HTTP client construction failed
    pub fn new(config: ScanConfig) -> Result<Self, FaviconError> {
        validate(&config)?;
        let session = HttpSession::new(&config.http)?;
        Self::with_session(config, session)
    }

    /// Creates a scanner around a caller-supplied session
    pub fn with_session(config: ScanConfig, session: HttpSession) -> Result<Self, FaviconError> {
        let executor = Executor::from_config(&config.executor);
        let duckduckgo_endpoint = Url::parse(&config.services.duckduckgo)?;
        let google_endpoint = Url::parse(&config.services.google)?;

        Ok(Self {
            config: Arc::new(config),
            session,
            executor,
            duckduckgo_endpoint,
            google_endpoint,
        })
    }

    /// Replaces the executor, e.g. to run operations on a dedicated runtime
    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn session(&self) -> &HttpSession {
        &self.session
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Scans a base URL for icons
    ///
    /// # Flow
    ///
    /// 1. Build phase 1 from the enabled features: HTML download of the base
    ///    URL, existence checks for the well-known paths, DuckDuckGo and
    ///    Google icon service checks
    /// 2. Run phase 1; the HTML handler queues manifest and browser
    ///    configuration downloads as it parses the head
    /// 3. Run the queued follow-ups, if any, as phase 2
    /// 4. Return the accumulated icons and metadata
    ///
    /// Individual probe failures are skipped; this never fails. Icons are
    /// not deduplicated.
    pub async fn scan(&self, base_url: &Url) -> ScanResults {
        let started = Instant::now();
        let accumulator = ScanAccumulator::new();
        let mut phase = ScanPhase::Init;

        let initial = self.initial_operations(base_url, &accumulator);
        if initial.is_empty() {
            tracing::info!("No discovery source enabled for {}, nothing to scan", base_url);
            advance(&mut phase, ScanPhase::Done);
            return ScanResults::default();
        }

        advance(&mut phase, ScanPhase::Phase1Running);
        tracing::info!("Scanning {} with {} operations", base_url, initial.len());
        self.executor.run(initial).await;

        let follow_ups = accumulator.take_follow_ups();
        if !follow_ups.is_empty() {
            advance(&mut phase, ScanPhase::Phase2Running);
            tracing::info!("Following {} referenced documents", follow_ups.len());
            self.executor.run(follow_ups).await;
        }

        advance(&mut phase, ScanPhase::Done);
        let results = accumulator.results();
        tracing::info!(
            "Scan of {} completed: {} icons, {} meta tags in {:?}",
            base_url,
            results.icons.len(),
            results.metadata.len(),
            started.elapsed()
        );
        results
    }

    /// Builds the phase-1 operation set from the enabled features
    fn initial_operations(&self, base_url: &Url, accumulator: &ScanAccumulator) -> Vec<Operation> {
        let features = &self.config.features;
        let mut operations = Vec::new();

        if features.scan_html_head {
            operations.push(self.html_operation(base_url, accumulator));
        }

        if features.check_favicon_paths {
            for url in well_known_icon_urls(base_url) {
                operations.push(self.existence_operation(url, accumulator));
            }
        }

        if features.check_duckduckgo {
            match duckduckgo_icon_url(&self.duckduckgo_endpoint, base_url) {
                Some(url) => operations.push(self.existence_operation(url, accumulator)),
                None => tracing::debug!(
                    "DuckDuckGo endpoint {} cannot take path segments",
                    self.duckduckgo_endpoint
                ),
            }
        }

        if features.check_google {
            let url = google_icon_url(&self.google_endpoint, base_url);
            operations.push(self.existence_operation(url, accumulator));
        }

        operations
    }

    /// Existence check that records a classic icon at the final URL on success
    fn existence_operation(&self, url: Url, accumulator: &ScanAccumulator) -> Operation {
        let accumulator = accumulator.clone();
        Operation::new(
            Probe::check_exists(url, self.session.clone()),
            move |result| {
                if let ProbeResult::Exists { url } = result {
                    accumulator.add_icon(DetectedIcon::new(url.clone(), IconType::Classic));
                }
            },
        )
    }

    /// HTML download whose handler extracts head icons and queues follow-ups
    fn html_operation(&self, base_url: &Url, accumulator: &ScanAccumulator) -> Operation {
        let accumulator = accumulator.clone();
        let session = self.session.clone();
        Operation::new(
            Probe::download_text(base_url.clone(), self.session.clone()),
            move |result| handle_html_result(result, &accumulator, &session),
        )
    }
}

/// Moves the scan to its next phase, refusing invalid transitions
fn advance(phase: &mut ScanPhase, next: ScanPhase) {
    if phase.can_transition_to(next) {
        tracing::debug!("Scan phase {} -> {}", phase, next);
        *phase = next;
    } else {
        tracing::error!("Invalid scan phase transition: {} -> {}", phase, next);
    }
}

/// Parses a downloaded HTML document and records everything it references
///
/// Runs inside the phase-1 handler, so follow-ups are queued before phase 1
/// completes.
fn handle_html_result(result: &ProbeResult, accumulator: &ScanAccumulator, session: &HttpSession) {
    let ProbeResult::TextDownloaded {
        url,
        text,
        content_type,
    } = result
    else {
        tracing::debug!("HTML download of {} produced no document", result.url());
        return;
    };

    if content_type.as_deref() != Some(HTML_CONTENT_TYPE) {
        tracing::debug!(
            "Not scanning {}: content type is {:?}",
            url,
            content_type.as_deref().unwrap_or("missing")
        );
        return;
    }

    let document = parse_document(text);
    let icons = extract_html_head_icons(&document, url);
    let metadata = extract_metadata(&document);

    let mut follow_ups = Vec::new();
    for manifest_url in extract_manifest_urls(&document, url) {
        follow_ups.push(manifest_operation(manifest_url, accumulator, session));
    }

    match extract_browser_config(&document, url) {
        BrowserConfigRef::Url(config_url) => {
            follow_ups.push(browser_config_operation(config_url, accumulator, session));
        }
        BrowserConfigRef::Disabled => {
            tracing::debug!("Browser configuration disabled by {}", url);
        }
        BrowserConfigRef::Absent => {}
    }

    tracing::debug!(
        "Parsed {}: {} head icons, {} follow-up documents",
        url,
        icons.len(),
        follow_ups.len()
    );
    accumulator.record_document(icons, metadata, follow_ups);
}

/// Manifest download; icons resolve against the manifest's own URL
fn manifest_operation(url: Url, accumulator: &ScanAccumulator, session: &HttpSession) -> Operation {
    let accumulator = accumulator.clone();
    Operation::new(Probe::download_text(url, session.clone()), move |result| {
        if let ProbeResult::TextDownloaded { url, text, .. } = result {
            accumulator.add_icons(extract_manifest_icons(text, url));
        }
    })
}

/// `browserconfig.xml` download; tiles resolve against the document's own URL
fn browser_config_operation(
    url: Url,
    accumulator: &ScanAccumulator,
    session: &HttpSession,
) -> Operation {
    let accumulator = accumulator.clone();
    Operation::new(Probe::download_text(url, session.clone()), move |result| {
        if let ProbeResult::TextDownloaded { url, text, .. } = result {
            accumulator.add_icons(extract_browser_config_icons(text, url));
        }
    })
}

/// Parses `url`, builds a scanner from `config`, and scans
///
/// Setup problems (invalid base URL, invalid configuration, HTTP client
/// construction) are logged and produce empty results, so callers always
/// get a single non-failing answer.
///
/// # Example
///
/// ```no_run
/// use favicon_finder::{scan_url, ScanConfig};
///
/// # async fn example() {
/// let results = scan_url("https://www.rust-lang.org/", ScanConfig::default()).await;
/// for icon in &results.icons {
///     println!("{}", icon);
/// }
/// # }
/// ```
pub async fn scan_url(url: &str, config: ScanConfig) -> ScanResults {
    let base_url = match parse_base_url(url) {
        Ok(base_url) => base_url,
        Err(e) => {
            tracing::error!("Invalid base URL {}: {}", url, e);
            return ScanResults::default();
        }
    };

    match Scanner::new(config) {
        Ok(scanner) => scanner.scan(&base_url).await,
        Err(e) => {
            tracing::error!("Failed to set up scan of {}: {}", url, e);
            ScanResults::default()
        }
    }
}
