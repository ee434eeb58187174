//! Web App Manifest icon extraction

use crate::icon::{parse_icon_sizes, DetectedIcon, IconType};
use crate::url::resolve_reference;
use serde::Deserialize;
use url::Url;

/// The subset of a Web App Manifest this crate cares about
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    icons: Vec<serde_json::Value>,
}

/// One entry of the manifest `icons` array
#[derive(Debug, Deserialize)]
struct ManifestIcon {
    src: String,
    #[serde(default)]
    sizes: Option<String>,
    #[serde(default, rename = "type")]
    mime_type: Option<String>,
}

/// Extracts icons from the text of a Web App Manifest
///
/// Each `icons[]` entry yields one [`IconType::WebAppManifest`] icon per
/// declared size, or a single unsized icon. Entries without a `src`, with a
/// non-image `type`, or with an unresolvable URL are skipped. Text that is
/// not a JSON object yields no icons.
///
/// # Arguments
///
/// * `json` - The manifest text
/// * `base_url` - The URL the manifest was served from
///
/// # Example
///
/// ```
/// use favicon_finder::extract::extract_manifest_icons;
/// use url::Url;
///
/// let json = r#"{"icons": [{"src": "/icon-192.png", "sizes": "192x192", "type": "image/png"}]}"#;
/// let base_url = Url::parse("https://example.com/manifest.json").unwrap();
/// let icons = extract_manifest_icons(json, &base_url);
/// assert_eq!(icons[0].area(), Some(192 * 192));
/// ```
pub fn extract_manifest_icons(json: &str, base_url: &Url) -> Vec<DetectedIcon> {
    let manifest: Manifest = match serde_json::from_str(json) {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::debug!("Ignoring malformed manifest from {}: {}", base_url, e);
            return Vec::new();
        }
    };

    let mut icons = Vec::new();
    for entry in manifest.icons {
        let icon: ManifestIcon = match serde_json::from_value(entry) {
            Ok(icon) => icon,
            Err(e) => {
                tracing::debug!("Skipping malformed manifest icon entry: {}", e);
                continue;
            }
        };

        if let Some(mime_type) = &icon.mime_type {
            if !mime_type.trim().to_ascii_lowercase().starts_with("image/") {
                continue;
            }
        }

        let Some(url) = resolve_reference(&icon.src, base_url) else {
            continue;
        };

        let sizes = icon.sizes.as_deref().map(parse_icon_sizes).unwrap_or_default();
        if sizes.is_empty() {
            icons.push(DetectedIcon::new(url, IconType::WebAppManifest));
        } else {
            for size in sizes {
                icons.push(DetectedIcon::with_size(url.clone(), IconType::WebAppManifest, size));
            }
        }
    }
    icons
}
