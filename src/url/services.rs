use super::domain::extract_domain;
use url::Url;

/// Paths probed relative to the base URL when checking for common favicons
pub const WELL_KNOWN_ICON_PATHS: &[&str] = &[
    "favicon.ico",
    "apple-touch-icon.png",
    "apple-icon-57x57.png",
    "apple-icon-60x60.png",
    "apple-icon-72x72.png",
    "apple-icon-76x76.png",
    "apple-icon-114x114.png",
    "apple-icon-120x120.png",
    "apple-icon-144x144.png",
    "apple-icon-152x152.png",
    "apple-icon-180x180.png",
    "android-icon-192x192.png",
    "favicon-32x32.png",
    "favicon-96x96.png",
    "favicon-16x16.png",
    "ms-icon-144x144.png",
];

/// Resolves every well-known icon path against the base URL
pub fn well_known_icon_urls(base_url: &Url) -> Vec<Url> {
    WELL_KNOWN_ICON_PATHS
        .iter()
        .filter_map(|path| base_url.join(path).ok())
        .collect()
}

/// Builds the DuckDuckGo icon service URL for the base URL's domain
///
/// The domain becomes the percent-encoded path segment `{domain}.ico`
/// appended to `endpoint`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use favicon_finder::url::duckduckgo_icon_url;
///
/// let endpoint = Url::parse("https://icons.duckduckgo.com/ip3/").unwrap();
/// let base = Url::parse("https://www.rust-lang.org/learn").unwrap();
/// let url = duckduckgo_icon_url(&endpoint, &base).unwrap();
/// assert_eq!(url.as_str(), "https://icons.duckduckgo.com/ip3/www.rust-lang.org.ico");
/// ```
pub fn duckduckgo_icon_url(endpoint: &Url, base_url: &Url) -> Option<Url> {
    let domain = extract_domain(base_url);
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(&format!("{}.ico", domain));
    Some(url)
}

/// Builds the Google favicon service URL for the base URL's domain
///
/// The domain is added as the percent-encoded `domain` query parameter.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use favicon_finder::url::google_icon_url;
///
/// let endpoint = Url::parse("https://www.google.com/s2/favicons").unwrap();
/// let base = Url::parse("https://example.com/").unwrap();
/// let url = google_icon_url(&endpoint, &base);
/// assert_eq!(url.as_str(), "https://www.google.com/s2/favicons?domain=example.com");
/// ```
pub fn google_icon_url(endpoint: &Url, base_url: &Url) -> Url {
    let domain = extract_domain(base_url);
    let mut url = endpoint.clone();
    url.query_pairs_mut().append_pair("domain", &domain);
    url
}
