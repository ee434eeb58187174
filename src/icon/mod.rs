//! Icon model
//!
//! A [`DetectedIcon`] is one candidate icon found during a scan: its absolute
//! URL, the convention that advertised it, and its dimensions when known.

mod sizes;

pub use sizes::{parse_icon_sizes, IconSize};

use serde::Serialize;
use std::fmt;
use url::Url;

/// The convention through which an icon was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconType {
    /// `<link rel="shortcut icon">`
    Shortcut,

    /// Plain favicon: `/favicon.ico`, `<link rel="icon">`, or an icon service
    Classic,

    /// `apple-touch-icon` web clip for iOS home screens
    AppleIosWebClip,

    /// Safari pinned tab / 32x32 PNG icon
    AppleOsxSafariTab,

    /// Windows pinned site tile (`msapplication-TileImage`, `browserconfig.xml`)
    MicrosoftPinnedSite,

    /// 96x96 PNG icon used by Google TV
    GoogleTv,

    /// 192x192 / 196x196 PNG icon used by Chrome for Android
    GoogleAndroidChrome,

    /// Entry of a Web App Manifest `icons` array
    WebAppManifest,

    /// `<meta property="og:image">`
    OpenGraphImage,
}

impl IconType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Shortcut => "shortcut",
            Self::Classic => "classic",
            Self::AppleIosWebClip => "apple_ios_web_clip",
            Self::AppleOsxSafariTab => "apple_osx_safari_tab",
            Self::MicrosoftPinnedSite => "microsoft_pinned_site",
            Self::GoogleTv => "google_tv",
            Self::GoogleAndroidChrome => "google_android_chrome",
            Self::WebAppManifest => "web_app_manifest",
            Self::OpenGraphImage => "open_graph_image",
        }
    }
}

impl fmt::Display for IconType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered icon resource
///
/// Identity is the URL. Values are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DetectedIcon {
    url: Url,
    #[serde(rename = "type")]
    icon_type: IconType,
    width: Option<u32>,
    height: Option<u32>,
}

impl DetectedIcon {
    /// Creates an icon with unknown dimensions
    pub fn new(url: Url, icon_type: IconType) -> Self {
        Self {
            url,
            icon_type,
            width: None,
            height: None,
        }
    }

    /// Creates an icon with known dimensions
    pub fn with_size(url: Url, icon_type: IconType, size: IconSize) -> Self {
        Self {
            url,
            icon_type,
            width: Some(size.width),
            height: Some(size.height),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn icon_type(&self) -> IconType {
        self.icon_type
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// Area in pixels, defined only when both dimensions are known
    pub fn area(&self) -> Option<u64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(u64::from(w) * u64::from(h)),
            _ => None,
        }
    }
}

impl fmt::Display for DetectedIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.width, self.height) {
            (Some(w), Some(h)) => write!(f, "{} [{} {}x{}]", self.url, self.icon_type, w, h),
            _ => write!(f, "{} [{}]", self.url, self.icon_type),
        }
    }
}
