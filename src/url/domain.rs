use url::Url;

/// Extracts the domain that third-party icon services are keyed by
///
/// This is the lowercase host of the URL, without port, credentials, path or
/// query. URLs without a host fall back to their full serialization.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use favicon_finder::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM:8443/path?q=1").unwrap();
/// assert_eq!(extract_domain(&url), "example.com");
/// ```
pub fn extract_domain(url: &Url) -> String {
    match url.host_str() {
        Some(host) => host.to_lowercase(),
        None => url.as_str().to_string(),
    }
}
