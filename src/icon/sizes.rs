use serde::Serialize;

/// Pixel dimensions of an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl IconSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses a single `WxH` token (the `x` is case-insensitive)
    pub fn parse(token: &str) -> Option<Self> {
        let (w, h) = token.split_once(['x', 'X'])?;
        let width = w.trim().parse().ok()?;
        let height = h.trim().parse().ok()?;
        Some(Self::new(width, height))
    }
}

/// Parses an HTML/manifest `sizes` attribute such as `"16x16 32x32"`
///
/// `any` and malformed tokens are skipped.
pub fn parse_icon_sizes(sizes: &str) -> Vec<IconSize> {
    sizes.split_whitespace().filter_map(IconSize::parse).collect()
}
