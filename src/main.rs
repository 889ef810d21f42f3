//! # Tibet Post Fetcher
//!
//! Crawls the configured news site and writes every fresh article as a
//! Markdown document, plus an optional JSON export.
//!
//! ## Usage
//!
//! ```sh
//! tibetpost_fetcher -m ./markdown -j ./json
//! ```

use clap::Parser;
use std::error::Error;
use tibetpost_fetcher::convert::ZhConverter;
use tibetpost_fetcher::fetcher::ReqwestFetcher;
use tibetpost_fetcher::outputs::{indexes, json, markdown};
use tibetpost_fetcher::utils::ensure_writable_dir;
use tibetpost_fetcher::{ArticleStore, Crawler, SiteConfig};
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("tibetpost_fetcher starting up");

    let args = Cli::parse();
    debug!(?args.markdown_output_dir, ?args.json_output_dir, ?args.config, "Parsed CLI arguments");

    // Early check: output dirs must be writable before any crawling
    let mut output_dirs = vec![args.markdown_output_dir.as_str()];
    output_dirs.extend(args.json_output_dir.as_deref());
    for dir in output_dirs {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let config = SiteConfig::load(args.config.as_deref()).await?;
    let site_title = config.title.clone();

    // ---- Crawl ----
    let crawler = Crawler::new(ReqwestFetcher::new()?, ZhConverter::simplified(), config)?;
    let store = ArticleStore::new(site_title.as_str());
    let report = crawler.run(&store).await?;
    let articles = store.list_all().await;

    // ---- Markdown output ----
    markdown::write_articles(&articles, &args.markdown_output_dir).await?;
    if let Err(e) = indexes::write_index(&args.markdown_output_dir, &site_title, &articles).await {
        error!(error = %e, "Failed to update index.md");
    }

    // ---- JSON output ----
    if let Some(json_output_dir) = args.json_output_dir.as_deref() {
        if let Err(e) = json::write_articles(&articles, json_output_dir).await {
            error!(error = %e, "Failed to write JSON");
        }
    }

    // ---- Search ----
    if !args.search.is_empty() {
        let keywords: Vec<&str> = args.search.iter().map(String::as_str).collect();
        let found = store.search(&keywords).await;
        info!(keywords = ?keywords, matches = found.len(), "Search complete");
        for article in found {
            println!("{}\t{}\t{}", article.id, article.title, article.source_url);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        stored = report.stored,
        stale = report.stale,
        failed = report.failed,
        "Execution complete"
    );

    Ok(())
}
