//! favicon-finder main entry point
//!
//! This is the command-line interface for discovering (and optionally
//! downloading) the icons of a website.

use anyhow::Context;
use clap::Parser;
use favicon_finder::config::{load_config, ScanConfig};
use favicon_finder::download::{best_icon, dedupe_icons, Downloader};
use favicon_finder::scan::{ScanResults, Scanner};
use favicon_finder::url::parse_base_url;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// favicon-finder: discover the icons a website advertises
///
/// Probes well-known favicon paths, parses the page's <head>, follows Web App
/// Manifest and browserconfig.xml references, and asks the DuckDuckGo and
/// Google icon services.
#[derive(Parser, Debug)]
#[command(name = "favicon-finder")]
#[command(version)]
#[command(about = "Discover the icons a website advertises", long_about = None)]
struct Cli {
    /// Base URL of the site to scan
    #[arg(value_name = "URL")]
    url: String,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Don't probe well-known favicon paths
    #[arg(long)]
    no_favicon_paths: bool,

    /// Don't download and parse the HTML head
    #[arg(long)]
    no_html: bool,

    /// Don't ask the DuckDuckGo icon service
    #[arg(long)]
    no_duckduckgo: bool,

    /// Don't ask the Google favicon service
    #[arg(long)]
    no_google: bool,

    /// Accept invalid TLS certificates (DANGEROUS: disables certificate validation)
    #[arg(long)]
    allow_invalid_certs: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Download every unique icon into this directory as PNG files
    #[arg(long, value_name = "DIR")]
    download: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let base_url = parse_base_url(&cli.url).with_context(|| format!("invalid URL '{}'", cli.url))?;
    let scanner = Scanner::new(config).context("failed to set up scanner")?;

    let results = scanner.scan(&base_url).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else if !cli.quiet {
        print_results(&results);
    }

    if let Some(dir) = &cli.download {
        let written = download_icons(&scanner, &results, dir).await?;
        if !cli.quiet {
            println!("\n✓ Saved {} icons to {}", written, dir.display());
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("favicon_finder=warn,warn"),
            1 => EnvFilter::new("favicon_finder=info,warn"),
            2 => EnvFilter::new("favicon_finder=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<ScanConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path).with_context(|| format!("failed to load {}", path.display()))?
        }
        None => ScanConfig::default(),
    };

    let features = &mut config.features;
    features.check_favicon_paths &= !cli.no_favicon_paths;
    features.scan_html_head &= !cli.no_html;
    features.check_duckduckgo &= !cli.no_duckduckgo;
    features.check_google &= !cli.no_google;
    config.http.allow_invalid_certificates |= cli.allow_invalid_certs;

    Ok(config)
}

/// Prints scan results in a human-readable form
fn print_results(results: &ScanResults) {
    let icons = dedupe_icons(results.icons.clone());

    println!("Icons ({}):", icons.len());
    for icon in &icons {
        println!("  - {}", icon);
    }

    if let Some(best) = best_icon(&icons) {
        println!("\nLargest: {}", best.url());
    }

    if !results.metadata.is_empty() {
        let mut keys: Vec<&String> = results.metadata.keys().collect();
        keys.sort();

        println!("\nMetadata ({}):", keys.len());
        for key in keys {
            println!("  {}: {}", key, results.metadata[key]);
        }
    }
}

/// Downloads every unique icon and writes it as `icon-<n>-<w>x<h>.png`
async fn download_icons(scanner: &Scanner, results: &ScanResults, dir: &Path) -> anyhow::Result<usize> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let images = Downloader::for_scanner(scanner).download(&results.icons).await;
    for (index, image) in images.iter().enumerate() {
        let path = dir.join(format!("icon-{}-{}x{}.png", index, image.width(), image.height()));
        image
            .save_with_format(&path, ImageFormat::Png)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::debug!("Wrote {}", path.display());
    }

    Ok(images.len())
}
