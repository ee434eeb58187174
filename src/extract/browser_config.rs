//! Microsoft `browserconfig.xml` icon extraction
//!
//! The document is read with the HTML5 tree builder rather than a strict XML
//! parser, so truncated or sloppy files still yield whatever tiles they
//! declare. Tag names are matched case-insensitively.

use super::selector;
use crate::icon::{DetectedIcon, IconSize, IconType};
use crate::url::resolve_reference;
use scraper::Html;
use url::Url;

/// Maps a tile element name to the size Windows renders it at
fn tile_size(name: &str) -> Option<IconSize> {
    match name {
        "tileimage" => Some(IconSize::new(144, 144)),
        "square70x70logo" => Some(IconSize::new(70, 70)),
        "square150x150logo" => Some(IconSize::new(150, 150)),
        "wide310x150logo" => Some(IconSize::new(310, 150)),
        "square310x310logo" => Some(IconSize::new(310, 310)),
        _ => None,
    }
}

/// Extracts tile icons from the text of a `browserconfig.xml` document
///
/// # Arguments
///
/// * `xml` - The browser configuration text
/// * `base_url` - The URL the document was served from
///
/// # Example
///
/// ```
/// use favicon_finder::extract::extract_browser_config_icons;
/// use url::Url;
///
/// let xml = r#"<browserconfig><msapplication><tile>
///     <square150x150logo src="/mstile-150x150.png"/>
/// </tile></msapplication></browserconfig>"#;
/// let base_url = Url::parse("https://example.com/browserconfig.xml").unwrap();
/// let icons = extract_browser_config_icons(xml, &base_url);
/// assert_eq!(icons[0].width(), Some(150));
/// ```
pub fn extract_browser_config_icons(xml: &str, base_url: &Url) -> Vec<DetectedIcon> {
    let document = Html::parse_fragment(xml);
    let Some(tile_selector) = selector("browserconfig msapplication tile *") else {
        return Vec::new();
    };

    let mut icons = Vec::new();
    for tile in document.select(&tile_selector) {
        let element = tile.value();
        let name = element.name().to_ascii_lowercase();

        let Some(size) = tile_size(&name) else {
            continue;
        };
        let Some(url) = element.attr("src").and_then(|src| resolve_reference(src, base_url)) else {
            continue;
        };

        icons.push(DetectedIcon::with_size(url, IconType::MicrosoftPinnedSite, size));
    }
    icons
}
