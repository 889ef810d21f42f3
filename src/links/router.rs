//! Routing of collected links into article candidates.
//!
//! The router applies the configured categories in declaration order, so
//! links from earlier categories come first in the result. A link in
//! several categories appears several times in the intermediate
//! concatenation; the stable deduplication that follows keeps its first
//! position. Blacklisted links are removed last.

use super::classifier::{Category, matches};
use crate::config::SiteConfig;
use crate::error::ConfigError;
use crate::utils::dedup_stable;
use regex::Regex;
use tracing::{debug, info, instrument};

/// Ordered category table plus blacklist.
#[derive(Debug, Clone)]
pub struct LinkRouter {
    categories: Vec<Category>,
    blacklist: Vec<Regex>,
}

impl LinkRouter {
    /// Compile the categories and blacklist of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Pattern`] for the first pattern that is not a
    /// valid regular expression.
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        let categories = config
            .categories
            .iter()
            .map(Category::compile)
            .collect::<Result<Vec<_>, _>>()?;
        let blacklist = config
            .blacklist
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ConfigError::Pattern {
                    name: "blacklist".to_string(),
                    pattern: p.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            categories,
            blacklist,
        })
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Per-category subsets concatenated in declaration order, before deduplication.
    pub fn bucket(&self, links: &[String]) -> Vec<String> {
        self.categories
            .iter()
            .flat_map(|category| {
                let selected = category.select(links);
                debug!(category = %category.name, count = selected.len(), "Category matched");
                selected
            })
            .collect()
    }

    /// Whether `link` falls under a known non-article path.
    pub fn is_blacklisted(&self, link: &str) -> bool {
        self.blacklist.iter().any(|re| matches(link, re))
    }

    /// Candidate article links of `links`.
    ///
    /// Never fails; no matching link yields an empty list.
    #[instrument(level = "info", skip_all, fields(input = links.len()))]
    pub fn route(&self, links: &[String]) -> Vec<String> {
        let candidates = dedup_stable(self.bucket(links));
        let before = candidates.len();
        let routed: Vec<String> = candidates
            .into_iter()
            .filter(|link| !self.is_blacklisted(link))
            .collect();
        info!(
            candidates = before,
            blacklisted = before - routed.len(),
            routed = routed.len(),
            "Routed links"
        );
        routed
    }
}
