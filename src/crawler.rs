//! End-to-end crawl of one site.
//!
//! The crawl follows the data flow of the crate:
//!
//! ```text
//! seed urls → collect → route → extract (concurrent) → store
//! ```
//!
//! Seed collection is strict: one unreachable seed fails the crawl. Article
//! extraction is per item: a failed or stale article is logged and skipped
//! while its siblings keep going.

use crate::article::ArticleExtractor;
use crate::config::SiteConfig;
use crate::convert::ScriptConverter;
use crate::error::{ConfigError, CrawlError};
use crate::fetcher::HtmlFetcher;
use crate::links::{LinkRouter, collect};
use crate::store::ArticleStore;
use futures::stream::{self, StreamExt};
use std::pin::pin;
use tracing::{debug, error, info, instrument, warn};

/// Counters of one crawl.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CrawlReport {
    /// Candidate article links after routing.
    pub candidates: usize,
    /// Articles appended to the store.
    pub stored: usize,
    /// Articles skipped by the staleness policy.
    pub stale: usize,
    /// Articles that failed to extract.
    pub failed: usize,
}

pub struct Crawler<F, C> {
    extractor: ArticleExtractor<F, C>,
    router: LinkRouter,
    concurrency: usize,
}

impl<F: HtmlFetcher, C: ScriptConverter> Crawler<F, C> {
    /// Build a crawler for `site`, compiling its patterns and selectors.
    pub fn new(fetcher: F, converter: C, site: SiteConfig) -> Result<Self, ConfigError> {
        let timeout = site.timeout();
        let concurrency = site.concurrency();
        let router = LinkRouter::from_config(&site)?;
        let extractor = ArticleExtractor::new(fetcher, converter, site, timeout)?;
        Ok(Self {
            extractor,
            router,
            concurrency,
        })
    }

    pub fn extractor(&self) -> &ArticleExtractor<F, C> {
        &self.extractor
    }

    /// Candidate article links of the configured seed pages.
    ///
    /// # Errors
    ///
    /// Fails if any seed page cannot be fetched.
    #[instrument(level = "info", skip_all)]
    pub async fn discover(&self) -> Result<Vec<String>, CrawlError> {
        let site = self.extractor.site();
        let links = collect(
            self.extractor.fetcher(),
            &site.title,
            &site.urls,
            self.extractor.timeout(),
        )
        .await?;
        Ok(self.router.route(&links))
    }

    /// Discover candidates, extract them concurrently and append the
    /// successful ones to `store`.
    ///
    /// # Errors
    ///
    /// Only discovery errors are returned; per-article failures are counted
    /// in the report.
    #[instrument(level = "info", skip_all, fields(site = %self.extractor.site().title))]
    pub async fn run(&self, store: &ArticleStore) -> Result<CrawlReport, CrawlError> {
        let candidates = self.discover().await?;
        let mut report = CrawlReport {
            candidates: candidates.len(),
            ..CrawlReport::default()
        };
        info!(
            candidates = candidates.len(),
            concurrency = self.concurrency,
            "Starting article extraction"
        );

        let mut results = pin!(
            stream::iter(candidates.iter())
                .map(|url| async move { (url, self.extractor.extract(url).await) })
                .buffer_unordered(self.concurrency)
        );

        while let Some((url, result)) = results.next().await {
            match result {
                Ok(article) => {
                    debug!(%url, id = %article.id, title = %article.title, "Stored article");
                    store.append(article).await;
                    report.stored += 1;
                }
                Err(e) if e.is_time_over_days() => {
                    debug!(%url, published = ?e.published_time(), "Skipping stale article");
                    report.stale += 1;
                }
                Err(e @ CrawlError::Fetch { .. }) => {
                    warn!(%url, error = %e, "Article fetch failed; skipping");
                    report.failed += 1;
                }
                Err(e) => {
                    error!(%url, error = %e, "Article extraction failed; skipping");
                    report.failed += 1;
                }
            }
        }

        info!(
            candidates = report.candidates,
            stored = report.stored,
            stale = report.stale,
            failed = report.failed,
            "Crawl complete"
        );
        Ok(report)
    }
}
