use crate::UrlError;
use url::Url;

/// Parses and validates the base URL of a scan
///
/// The URL must be absolute, use `http` or `https`, and have a host.
///
/// # Examples
///
/// ```
/// use favicon_finder::url::parse_base_url;
///
/// assert!(parse_base_url("https://example.com/").is_ok());
/// assert!(parse_base_url("ftp://example.com/").is_err());
/// assert!(parse_base_url("/relative/path").is_err());
/// ```
pub fn parse_base_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(url)
}

/// Resolves an `href`/`src`/`content` reference against a base URL
///
/// Returns None if the reference should be skipped:
/// - empty or fragment-only references
/// - `javascript:`, `mailto:`, `tel:` and `data:` references
/// - references that fail to parse
/// - non-HTTP(S) URLs after resolution
pub fn resolve_reference(reference: &str, base_url: &Url) -> Option<Url> {
    let reference = reference.trim();

    if reference.is_empty() || reference.starts_with('#') {
        return None;
    }

    let lowered = reference.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let resolved = base_url.join(reference).ok()?;
    if resolved.scheme() == "http" || resolved.scheme() == "https" {
        Some(resolved)
    } else {
        None
    }
}
