//! Integration tests for the scanner
//!
//! These tests use wiremock to serve a site with an HTML head, manifests,
//! a browser configuration and icon service endpoints, and run full
//! two-phase scans against it.

use favicon_finder::config::ScanConfig;
use favicon_finder::icon::{DetectedIcon, IconType};
use favicon_finder::scan::{scan_url, Scanner};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Mock site</title>
    <link rel="shortcut icon" href="/favicon.ico">
    <link rel="apple-touch-icon" sizes="180x180" href="/apple-touch-icon.png">
    <link rel="icon" type="image/png" sizes="32x32" href="/favicon-32x32.png">
    <link rel="manifest" href="/site.webmanifest">
    <link rel="manifest" href="/static/app.json">
    <meta name="msapplication-config" content="/browserconfig.xml">
    <meta name="description" content="A site for testing">
    <meta property="og:title" content="Mock">
</head>
<body><p>Hello</p></body>
</html>"#;

const SITE_MANIFEST: &str = r#"{
    "name": "Mock",
    "icons": [
        {"src": "/android-chrome-192x192.png", "sizes": "192x192", "type": "image/png"},
        {"src": "/android-chrome-512x512.png", "sizes": "512x512", "type": "image/png"}
    ]
}"#;

const APP_MANIFEST: &str = r#"{"icons": [{"src": "icon-96.png", "sizes": "96x96"}]}"#;

const BROWSER_CONFIG: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<browserconfig>
    <msapplication>
        <tile>
            <square150x150logo src="/mstile-150x150.png"/>
            <TileColor>#da532c</TileColor>
        </tile>
    </msapplication>
</browserconfig>"##;

/// Configuration with only HTML head scanning enabled
fn html_only_config() -> ScanConfig {
    let mut config = ScanConfig::disabled();
    config.features.scan_html_head = true;
    config
}

async fn mount_html(server: &MockServer, body: &str, content_type: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), content_type))
        .mount(server)
        .await;
}

fn base_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/", server.uri())).expect("Failed to parse mock server URI")
}

fn find<'a>(icons: &'a [DetectedIcon], path: &str) -> Option<&'a DetectedIcon> {
    icons.iter().find(|icon| icon.url().path() == path)
}

#[tokio::test]
async fn test_full_two_phase_scan() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, HOME_PAGE, "text/html").await;

    // Each referenced document is fetched exactly once, in phase 2
    Mock::given(method("GET"))
        .and(path("/site.webmanifest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(SITE_MANIFEST, "application/manifest+json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/static/app.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(APP_MANIFEST, "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/browserconfig.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BROWSER_CONFIG, "application/xml"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(html_only_config()).expect("Failed to create scanner");
    let results = scanner.scan(&base_url(&mock_server)).await;
    let icons = &results.icons;

    // Head: 3, site manifest: 2, app manifest: 1, browser config: 1
    assert_eq!(icons.len(), 7, "unexpected icons: {:?}", icons);

    let shortcut = find(icons, "/favicon.ico").expect("shortcut icon missing");
    assert_eq!(shortcut.icon_type(), IconType::Shortcut);

    let apple = find(icons, "/apple-touch-icon.png").expect("apple touch icon missing");
    assert_eq!(apple.icon_type(), IconType::AppleIosWebClip);
    assert_eq!((apple.width(), apple.height()), (Some(180), Some(180)));

    let safari = find(icons, "/favicon-32x32.png").expect("32x32 icon missing");
    assert_eq!(safari.icon_type(), IconType::AppleOsxSafariTab);

    let chrome = find(icons, "/android-chrome-512x512.png").expect("manifest icon missing");
    assert_eq!(chrome.icon_type(), IconType::WebAppManifest);
    assert_eq!(chrome.area(), Some(512 * 512));

    // Relative manifest entries resolve against the manifest's own URL
    let relative = find(icons, "/static/icon-96.png").expect("relative manifest icon missing");
    assert_eq!(relative.icon_type(), IconType::WebAppManifest);

    let tile = find(icons, "/mstile-150x150.png").expect("tile icon missing");
    assert_eq!(tile.icon_type(), IconType::MicrosoftPinnedSite);
    assert_eq!((tile.width(), tile.height()), (Some(150), Some(150)));

    assert_eq!(results.metadata["description"], "A site for testing");
    assert_eq!(results.metadata["og:title"], "Mock");
    assert_eq!(results.metadata["msapplication-config"], "/browserconfig.xml");
}

#[tokio::test]
async fn test_disabled_browser_config_is_not_fetched() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        r#"<html><head>
            <link rel="icon" href="/favicon.ico">
            <meta name="msapplication-config" content="none">
        </head></html>"#,
        "text/html; charset=utf-8",
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/browserconfig.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BROWSER_CONFIG, "application/xml"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(html_only_config()).expect("Failed to create scanner");
    let results = scanner.scan(&base_url(&mock_server)).await;

    assert_eq!(results.icons.len(), 1);
    assert_eq!(results.icons[0].icon_type(), IconType::Classic);
}

#[tokio::test]
async fn test_malformed_manifest_does_not_abort_scan() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        r#"<html><head>
            <link rel="manifest" href="/broken.json">
            <link rel="manifest" href="/good.json">
            <link rel="manifest" href="/missing.json">
        </head></html>"#,
        "text/html",
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/broken.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"icons\": [", "application/json"))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/good.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SITE_MANIFEST, "application/json"))
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(html_only_config()).expect("Failed to create scanner");
    let results = scanner.scan(&base_url(&mock_server)).await;

    assert_eq!(results.icons.len(), 2);
    assert!(results
        .icons
        .iter()
        .all(|icon| icon.icon_type() == IconType::WebAppManifest));
}

#[tokio::test]
async fn test_non_html_response_is_not_parsed() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, HOME_PAGE, "text/plain").await;

    Mock::given(method("GET"))
        .and(path("/site.webmanifest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SITE_MANIFEST, "application/json"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(html_only_config()).expect("Failed to create scanner");
    let results = scanner.scan(&base_url(&mock_server)).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_html_error_status_yields_nothing() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(html_only_config()).expect("Failed to create scanner");
    let results = scanner.scan(&base_url(&mock_server)).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_well_known_paths_and_services() {
    let mock_server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/favicon.ico"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/apple-touch-icon.png"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/ip3/127.0.0.1.ico"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/s2/favicons"))
        .and(query_param("domain", "127.0.0.1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = ScanConfig::default();
    config.features.scan_html_head = false;
    config.services.duckduckgo = format!("{}/ip3/", mock_server.uri());
    config.services.google = format!("{}/s2/favicons", mock_server.uri());

    let scanner = Scanner::new(config).expect("Failed to create scanner");
    let results = scanner.scan(&base_url(&mock_server)).await;

    // Every other well-known path answers 404
    assert_eq!(results.icons.len(), 4, "unexpected icons: {:?}", results.icons);
    assert!(results
        .icons
        .iter()
        .all(|icon| icon.icon_type() == IconType::Classic));
    assert!(find(&results.icons, "/favicon.ico").is_some());
    assert!(find(&results.icons, "/apple-touch-icon.png").is_some());
    assert!(find(&results.icons, "/ip3/127.0.0.1.ico").is_some());
    assert!(find(&results.icons, "/s2/favicons").is_some());
    assert!(results.metadata.is_empty());
}

#[tokio::test]
async fn test_all_sources_disabled_makes_no_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let scanner = Scanner::new(ScanConfig::disabled()).expect("Failed to create scanner");
    let results = scanner.scan(&base_url(&mock_server)).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_scan_url_end_to_end() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        r#"<html><head><link rel="icon" type="image/png" sizes="192x192" href="/icon.png"></head></html>"#,
        "text/html",
    )
    .await;

    let results = scan_url(&mock_server.uri(), html_only_config()).await;

    assert_eq!(results.icons.len(), 1);
    assert_eq!(results.icons[0].icon_type(), IconType::GoogleAndroidChrome);

    let json = serde_json::to_value(&results).expect("results serialize");
    assert_eq!(json["icons"][0]["type"], "google_android_chrome");
}

#[tokio::test]
async fn test_concurrent_scans_share_a_scanner() {
    let first = MockServer::start().await;
    let second = MockServer::start().await;
    mount_html(&first, r#"<html><head><link rel="icon" href="/one.ico"></head></html>"#, "text/html").await;
    mount_html(&second, r#"<html><head><link rel="icon" href="/two.ico"></head></html>"#, "text/html").await;

    let scanner = Scanner::new(html_only_config()).expect("Failed to create scanner");
    let first_url = base_url(&first);
    let second_url = base_url(&second);
    let (a, b) = tokio::join!(scanner.scan(&first_url), scanner.scan(&second_url));

    assert_eq!(a.icons.len(), 1);
    assert_eq!(a.icons[0].url().path(), "/one.ico");
    assert_eq!(b.icons.len(), 1);
    assert_eq!(b.icons[0].url().path(), "/two.ico");
}
