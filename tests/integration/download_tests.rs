//! Integration tests for the download pipeline

use favicon_finder::config::ScanConfig;
use favicon_finder::download::{download_all, Downloader};
use favicon_finder::executor::Executor;
use favicon_finder::icon::{DetectedIcon, IconType};
use favicon_finder::probe::HttpSession;
use favicon_finder::scan::Scanner;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Encodes a blank RGBA image of the given dimensions as PNG
fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(RgbaImage::new(width, height))
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buffer.into_inner()
}

async fn mount_png(server: &MockServer, at: &str, width: u32, height: u32) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(width, height), "image/png"))
        .mount(server)
        .await;
}

fn icon(server: &MockServer, at: &str, icon_type: IconType) -> DetectedIcon {
    let url = Url::parse(&format!("{}{}", server.uri(), at)).expect("Failed to build icon URL");
    DetectedIcon::new(url, icon_type)
}

fn downloader() -> Downloader {
    Downloader::new(
        HttpSession::from_client(reqwest::Client::new()),
        Executor::new(),
    )
}

#[tokio::test]
async fn test_duplicate_urls_are_downloaded_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/favicon.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(16, 16), "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_png(&mock_server, "/large.png", 64, 48).await;

    let icons = vec![
        icon(&mock_server, "/favicon.png", IconType::Classic),
        icon(&mock_server, "/large.png", IconType::WebAppManifest),
        icon(&mock_server, "/favicon.png", IconType::Shortcut),
    ];

    let images = downloader().download(&icons).await;

    assert_eq!(images.len(), 2);
    assert_eq!((images[0].width(), images[0].height()), (16, 16));
    assert_eq!((images[1].width(), images[1].height()), (64, 48));
}

#[tokio::test]
async fn test_failed_downloads_are_dropped() {
    let mock_server = MockServer::start().await;
    mount_png(&mock_server, "/good.png", 32, 32).await;

    Mock::given(method("GET"))
        .and(path("/not-an-image.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>nope</html>", "text/html"))
        .mount(&mock_server)
        .await;

    let icons = vec![
        icon(&mock_server, "/not-an-image.png", IconType::Classic),
        icon(&mock_server, "/missing.png", IconType::Classic),
        icon(&mock_server, "/good.png", IconType::Classic),
    ];

    let images = downloader().download(&icons).await;

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].width(), 32);
}

#[tokio::test]
async fn test_download_map_is_keyed_by_url() {
    let mock_server = MockServer::start().await;
    mount_png(&mock_server, "/a.png", 8, 8).await;
    mount_png(&mock_server, "/b.png", 24, 12).await;

    let icons = vec![
        icon(&mock_server, "/a.png", IconType::Classic),
        icon(&mock_server, "/b.png", IconType::AppleIosWebClip),
        icon(&mock_server, "/gone.png", IconType::Classic),
    ];

    let images = downloader().download_map(&icons).await;

    assert_eq!(images.len(), 2);
    let b = images
        .get(icons[1].url())
        .expect("image for /b.png missing");
    assert_eq!((b.width(), b.height()), (24, 12));
    assert!(!images.contains_key(icons[2].url()));
}

#[tokio::test]
async fn test_download_all_scans_then_downloads() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<html><head>
                <link rel="icon" href="/favicon.png">
                <link rel="apple-touch-icon" href="/favicon.png">
                <link rel="apple-touch-icon" sizes="180x180" href="/touch.png">
            </head></html>"#,
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/favicon.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(png_bytes(16, 16), "image/png"))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_png(&mock_server, "/touch.png", 180, 180).await;

    let mut config = ScanConfig::disabled();
    config.features.scan_html_head = true;

    let images = download_all(&mock_server.uri(), config).await;

    assert_eq!(images.len(), 2);
    let mut widths: Vec<u32> = images.iter().map(|i| i.width()).collect();
    widths.sort_unstable();
    assert_eq!(widths, vec![16, 180]);
}

#[tokio::test]
async fn test_downloader_reuses_scanner_session() {
    let mock_server = MockServer::start().await;
    mount_png(&mock_server, "/icon.png", 10, 10).await;

    let scanner = Scanner::new(ScanConfig::disabled()).expect("Failed to create scanner");
    let images = Downloader::for_scanner(&scanner)
        .download(&[icon(&mock_server, "/icon.png", IconType::Classic)])
        .await;

    assert_eq!(images.len(), 1);
}

#[tokio::test]
async fn test_download_all_with_invalid_url_is_empty() {
    assert!(download_all("not a url", ScanConfig::default()).await.is_empty());
    assert!(download_all("mailto:someone@example.com", ScanConfig::default())
        .await
        .is_empty());
}
