//! HTML `<head>` extraction
//!
//! Icons are advertised in the head using several overlapping conventions:
//!
//! | Markup | Icon type |
//! |--------|-----------|
//! | `<link rel="shortcut icon">` | `Shortcut` |
//! | `<link rel="icon" type="image/png" sizes="...">` | by size, see [`icon_type_for_png_size`] |
//! | `<link rel="icon">` (other) | `Classic` |
//! | `<link rel="apple-touch-icon[-precomposed]">` | `AppleIosWebClip` (60x60 when unsized) |
//! | `<link rel="mask-icon">` | `AppleOsxSafariTab` |
//! | `<meta name="msapplication-TileImage">` | `MicrosoftPinnedSite` 144x144 |
//! | `<meta property="og:image">` | `OpenGraphImage` |

use super::selector;
use crate::icon::{parse_icon_sizes, DetectedIcon, IconSize, IconType};
use crate::url::resolve_reference;
use scraper::{ElementRef, Html};
use std::collections::HashMap;
use url::Url;

/// Size assumed for apple-touch-icons that don't declare one
const DEFAULT_APPLE_TOUCH_ICON_SIZE: IconSize = IconSize::new(60, 60);

/// Size of the Windows pinned site tile image
const MICROSOFT_TILE_IMAGE_SIZE: IconSize = IconSize::new(144, 144);

/// Reference to a Microsoft browser configuration document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserConfigRef {
    /// No `msapplication-config` meta tag
    Absent,
    /// `<meta name="msapplication-config" content="none">`: the site opts out
    Disabled,
    /// Resolved URL of the `browserconfig.xml` document
    Url(Url),
}

/// Parses an HTML document
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extracts icons advertised by `<link>` and `<meta>` tags in the head
///
/// # Arguments
///
/// * `document` - The parsed HTML document
/// * `base_url` - The URL the document was served from, for resolving relative references
///
/// # Example
///
/// ```
/// use favicon_finder::extract::{extract_html_head_icons, parse_document};
/// use favicon_finder::icon::IconType;
/// use url::Url;
///
/// let document = parse_document(r#"<html><head><link rel="shortcut icon" href="/favicon.ico"></head></html>"#);
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let icons = extract_html_head_icons(&document, &base_url);
/// assert_eq!(icons.len(), 1);
/// assert_eq!(icons[0].icon_type(), IconType::Shortcut);
/// ```
pub fn extract_html_head_icons(document: &Html, base_url: &Url) -> Vec<DetectedIcon> {
    let mut icons = Vec::new();

    if let Some(link_selector) = selector("head link[rel][href]") {
        for link in document.select(&link_selector) {
            extract_link_icons(link, base_url, &mut icons);
        }
    }

    if let Some(meta_selector) = selector("head meta[content]") {
        for meta in document.select(&meta_selector) {
            let element = meta.value();
            let content = element.attr("content").unwrap_or_default();

            if attr_eq(element.attr("name"), "msapplication-tileimage") {
                if let Some(url) = resolve_reference(content, base_url) {
                    icons.push(DetectedIcon::with_size(
                        url,
                        IconType::MicrosoftPinnedSite,
                        MICROSOFT_TILE_IMAGE_SIZE,
                    ));
                }
            } else if attr_eq(element.attr("property"), "og:image") {
                if let Some(url) = resolve_reference(content, base_url) {
                    icons.push(DetectedIcon::new(url, IconType::OpenGraphImage));
                }
            }
        }
    }

    icons
}

/// Classifies a single `<link>` element and appends any icons it declares
fn extract_link_icons(link: ElementRef<'_>, base_url: &Url, icons: &mut Vec<DetectedIcon>) {
    let element = link.value();
    let (Some(rel), Some(href)) = (element.attr("rel"), element.attr("href")) else {
        return;
    };
    let Some(url) = resolve_reference(href, base_url) else {
        tracing::debug!("Skipping unresolvable icon reference: {}", href);
        return;
    };

    let rel = rel.to_ascii_lowercase();
    let tokens: Vec<&str> = rel.split_whitespace().collect();
    let sizes = element.attr("sizes").map(parse_icon_sizes).unwrap_or_default();

    if tokens
        .iter()
        .any(|t| *t == "apple-touch-icon" || *t == "apple-touch-icon-precomposed")
    {
        if sizes.is_empty() {
            icons.push(DetectedIcon::with_size(
                url,
                IconType::AppleIosWebClip,
                DEFAULT_APPLE_TOUCH_ICON_SIZE,
            ));
        } else {
            for size in sizes {
                icons.push(DetectedIcon::with_size(url.clone(), IconType::AppleIosWebClip, size));
            }
        }
    } else if tokens.contains(&"mask-icon") {
        icons.push(DetectedIcon::new(url, IconType::AppleOsxSafariTab));
    } else if tokens.contains(&"shortcut") && tokens.contains(&"icon") {
        icons.push(DetectedIcon::new(url, IconType::Shortcut));
    } else if tokens.contains(&"icon") {
        let is_png = attr_eq(element.attr("type"), "image/png");
        if is_png && !sizes.is_empty() {
            for size in sizes {
                icons.push(DetectedIcon::with_size(
                    url.clone(),
                    icon_type_for_png_size(size),
                    size,
                ));
            }
        } else {
            icons.push(DetectedIcon::new(url, IconType::Classic));
        }
    }
}

/// Maps the size of a `rel="icon"` PNG to the platform convention it targets
pub fn icon_type_for_png_size(size: IconSize) -> IconType {
    match (size.width, size.height) {
        (32, 32) => IconType::AppleOsxSafariTab,
        (96, 96) => IconType::GoogleTv,
        (192, 192) | (196, 196) => IconType::GoogleAndroidChrome,
        _ => IconType::Classic,
    }
}

/// Extracts the Web App Manifest URLs referenced by `<link rel="manifest">`
pub fn extract_manifest_urls(document: &Html, base_url: &Url) -> Vec<Url> {
    let Some(link_selector) = selector("head link[rel][href]") else {
        return Vec::new();
    };

    let mut urls: Vec<Url> = Vec::new();
    for link in document.select(&link_selector) {
        let element = link.value();
        let is_manifest = element
            .attr("rel")
            .map(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case("manifest")))
            .unwrap_or(false);
        if !is_manifest {
            continue;
        }
        if let Some(url) = element.attr("href").and_then(|href| resolve_reference(href, base_url)) {
            if !urls.contains(&url) {
                urls.push(url);
            }
        }
    }
    urls
}

/// Extracts the `browserconfig.xml` reference from `<meta name="msapplication-config">`
///
/// The first matching meta tag wins. A `content` of `none` disables the
/// browser configuration lookup.
pub fn extract_browser_config(document: &Html, base_url: &Url) -> BrowserConfigRef {
    let Some(meta_selector) = selector("head meta[name][content]") else {
        return BrowserConfigRef::Absent;
    };

    for meta in document.select(&meta_selector) {
        let element = meta.value();
        if !attr_eq(element.attr("name"), "msapplication-config") {
            continue;
        }

        let content = element.attr("content").unwrap_or_default().trim();
        if content.eq_ignore_ascii_case("none") {
            return BrowserConfigRef::Disabled;
        }
        return match resolve_reference(content, base_url) {
            Some(url) => BrowserConfigRef::Url(url),
            None => BrowserConfigRef::Absent,
        };
    }

    BrowserConfigRef::Absent
}

/// Collects `<meta>` name/content pairs from the head
///
/// Tags without a `name` fall back to their `property` attribute, which
/// picks up Open Graph metadata.
pub fn extract_metadata(document: &Html) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    let Some(meta_selector) = selector("head meta[content]") else {
        return metadata;
    };

    for meta in document.select(&meta_selector) {
        let element = meta.value();
        let key = element.attr("name").or_else(|| element.attr("property"));
        if let (Some(key), Some(content)) = (key, element.attr("content")) {
            if !key.trim().is_empty() {
                metadata.insert(key.trim().to_string(), content.to_string());
            }
        }
    }
    metadata
}

/// Case-insensitive attribute comparison
fn attr_eq(value: Option<&str>, expected: &str) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case(expected))
        .unwrap_or(false)
}
