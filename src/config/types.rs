use serde::Deserialize;

/// Default DuckDuckGo icon service endpoint; `{domain}.ico` is appended as a path segment
pub const DEFAULT_DUCKDUCKGO_ENDPOINT: &str = "https://icons.duckduckgo.com/ip3/";

/// Default Google favicon service endpoint; `domain` is added as a query parameter
pub const DEFAULT_GOOGLE_ENDPOINT: &str = "https://www.google.com/s2/favicons";

/// Main configuration structure for a scan
///
/// Every section is optional in the TOML file; missing values fall back to
/// the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub features: FeatureFlags,
    pub http: HttpConfig,
    pub executor: ExecutorConfig,
    pub services: ServiceEndpoints,
}

impl ScanConfig {
    /// A configuration with every discovery source switched off
    pub fn disabled() -> Self {
        Self {
            features: FeatureFlags {
                check_favicon_paths: false,
                scan_html_head: false,
                check_duckduckgo: false,
                check_google: false,
            },
            ..Self::default()
        }
    }
}

/// Which discovery sources a scan uses
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Probe the well-known favicon paths (`favicon.ico`, `apple-touch-icon.png`, ...)
    #[serde(rename = "check-favicon-paths")]
    pub check_favicon_paths: bool,

    /// Download the base URL and parse its `<head>`
    #[serde(rename = "scan-html-head")]
    pub scan_html_head: bool,

    /// Probe the DuckDuckGo icon service
    #[serde(rename = "check-duckduckgo")]
    pub check_duckduckgo: bool,

    /// Probe the Google favicon service
    #[serde(rename = "check-google")]
    pub check_google: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            check_favicon_paths: true,
            scan_html_head: true,
            check_duckduckgo: true,
            check_google: true,
        }
    }
}

/// HTTP session configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Accept any TLS certificate, including self-signed and expired ones.
    ///
    /// This disables certificate validation for every request of the scan.
    /// It must only be enabled for hosts the caller already trusts.
    #[serde(rename = "allow-invalid-certificates")]
    pub allow_invalid_certificates: bool,

    /// User-Agent header sent with every probe
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allow_invalid_certificates: false,
            user_agent: format!("favicon-finder/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: 15,
            connect_timeout_secs: 10,
        }
    }
}

/// Operation executor configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Maximum number of operations in flight at once (0 = unbounded)
    #[serde(rename = "max-concurrent-operations")]
    pub max_concurrent_operations: usize,

    /// Upper bound on a single operation, after which it reports a timeout failure
    #[serde(rename = "operation-timeout-secs")]
    pub operation_timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_operations: 0,
            operation_timeout_secs: 20,
        }
    }
}

/// Third-party icon service endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceEndpoints {
    #[serde(rename = "duckduckgo-endpoint")]
    pub duckduckgo: String,

    #[serde(rename = "google-endpoint")]
    pub google: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            duckduckgo: DEFAULT_DUCKDUCKGO_ENDPOINT.to_string(),
            google: DEFAULT_GOOGLE_ENDPOINT.to_string(),
        }
    }
}
