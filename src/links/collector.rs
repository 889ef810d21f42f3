//! Collection of raw links from seed pages.

use crate::error::CrawlError;
use crate::fetcher::HtmlFetcher;
use crate::utils::dedup_stable;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Gather the links of every seed page.
///
/// Seeds are fetched one after another. Each seed's links are deduplicated
/// (first occurrence wins) before being appended, so the result keeps seed
/// order; links shared by two seeds appear once per seed.
///
/// # Errors
///
/// The first seed that cannot be parsed or fetched aborts the whole
/// collection. No seed is skipped.
#[instrument(level = "info", skip(fetcher, seeds), fields(seeds = seeds.len()))]
pub async fn collect<F: HtmlFetcher>(
    fetcher: &F,
    site: &str,
    seeds: &[String],
    timeout: Duration,
) -> Result<Vec<String>, CrawlError> {
    let mut links = Vec::new();
    for seed in seeds {
        let url = Url::parse(seed).map_err(|source| CrawlError::InvalidUrl {
            site: site.to_string(),
            url: seed.clone(),
            source,
        })?;
        let found = fetcher
            .extract_links(&url, timeout)
            .await
            .map_err(|source| CrawlError::CollectLinks {
                site: site.to_string(),
                url: seed.clone(),
                source,
            })?;
        let found = dedup_stable(found);
        debug!(%seed, count = found.len(), "Collected seed links");
        links.extend(found);
    }
    info!(count = links.len(), "Collected links from seeds");
    Ok(links)
}
