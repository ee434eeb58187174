//! Download pipeline
//!
//! Turns detected icons into decoded images: icons are deduplicated by URL,
//! then one image download per unique URL goes through the [`Executor`].
//! Failed downloads are dropped silently.

use crate::config::ScanConfig;
use crate::executor::{Executor, Operation};
use crate::icon::DetectedIcon;
use crate::probe::{HttpSession, Probe, ProbeResult};
use crate::scan::Scanner;
use crate::url::parse_base_url;
use crate::FaviconError;
use image::DynamicImage;
use std::collections::HashMap;
use url::Url;

/// Deduplicates icons by URL
///
/// When several icons share a URL the last one wins, but it keeps the
/// position of the first occurrence.
pub fn dedupe_icons(icons: Vec<DetectedIcon>) -> Vec<DetectedIcon> {
    let mut positions: HashMap<Url, usize> = HashMap::new();
    let mut unique: Vec<DetectedIcon> = Vec::with_capacity(icons.len());

    for icon in icons {
        match positions.get(icon.url()) {
            Some(&index) => unique[index] = icon,
            None => {
                positions.insert(icon.url().clone(), unique.len());
                unique.push(icon);
            }
        }
    }
    unique
}

/// Picks the icon with the largest known area
///
/// Icons without dimensions are only chosen when no icon has any.
pub fn best_icon(icons: &[DetectedIcon]) -> Option<&DetectedIcon> {
    icons
        .iter()
        .max_by_key(|icon| icon.area().unwrap_or(0))
}

/// Downloads and decodes icon images
#[derive(Debug, Clone)]
pub struct Downloader {
    session: HttpSession,
    executor: Executor,
}

impl Downloader {
    pub fn new(session: HttpSession, executor: Executor) -> Self {
        Self { session, executor }
    }

    /// A downloader sharing the scanner's session and executor
    pub fn for_scanner(scanner: &Scanner) -> Self {
        Self::new(scanner.session().clone(), scanner.executor().clone())
    }

    /// Downloads every unique icon, returning the decoded images in input order
    pub async fn download(&self, icons: &[DetectedIcon]) -> Vec<DynamicImage> {
        self.fetch(icons)
            .await
            .into_iter()
            .filter_map(|result| match result {
                ProbeResult::ImageDownloaded { image, .. } => Some(image),
                _ => None,
            })
            .collect()
    }

    /// Downloads every unique icon, returning the decoded images keyed by final URL
    pub async fn download_map(&self, icons: &[DetectedIcon]) -> HashMap<Url, DynamicImage> {
        self.fetch(icons)
            .await
            .into_iter()
            .filter_map(|result| match result {
                ProbeResult::ImageDownloaded { url, image } => Some((url, image)),
                _ => None,
            })
            .collect()
    }

    async fn fetch(&self, icons: &[DetectedIcon]) -> Vec<ProbeResult> {
        let operations: Vec<Operation> = dedupe_icons(icons.to_vec())
            .into_iter()
            .map(|icon| {
                Operation::probe_only(Probe::download_image(
                    icon.url().clone(),
                    self.session.clone(),
                ))
            })
            .collect();

        let results = self.executor.run(operations).await;
        let failures = results.iter().filter(|r| !r.is_success()).count();
        if failures > 0 {
            tracing::debug!("{} of {} icon downloads failed", failures, results.len());
        }
        results
    }
}

/// Scans `url` and downloads every unique icon found
///
/// Any setup failure yields an empty list rather than an error.
pub async fn download_all(url: &str, config: ScanConfig) -> Vec<DynamicImage> {
    let setup = parse_base_url(url)
        .map_err(FaviconError::from)
        .and_then(|base_url| Ok((base_url, Scanner::new(config)?)));
    let (base_url, scanner) = match setup {
        Ok(setup) => setup,
        Err(e) => {
            tracing::error!("Failed to set up download of {}: {}", url, e);
            return Vec::new();
        }
    };

    let results = scanner.scan(&base_url).await;
    Downloader::for_scanner(&scanner)
        .download(&results.icons)
        .await
}
