//! Structural URL classification.
//!
//! A category is nothing more than a URL shape such as
//! `/<section>/<optional-subpath/>NNN-slug`. Matching is syntactic; no page
//! is fetched to decide whether a link is an article.

use crate::config::CategoryPattern;
use crate::error::ConfigError;
use regex::Regex;

/// Whether `link` has the shape described by `pattern`.
pub fn matches(link: &str, pattern: &Regex) -> bool {
    pattern.is_match(link)
}

/// A named, compiled category pattern.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub pattern: Regex,
}

impl Category {
    pub fn compile(def: &CategoryPattern) -> Result<Self, ConfigError> {
        let pattern = Regex::new(&def.pattern).map_err(|source| ConfigError::Pattern {
            name: def.name.clone(),
            pattern: def.pattern.clone(),
            source,
        })?;
        Ok(Self {
            name: def.name.clone(),
            pattern,
        })
    }

    /// The links of `links` in this category, in input order.
    pub fn select(&self, links: &[String]) -> Vec<String> {
        links
            .iter()
            .filter(|link| matches(link, &self.pattern))
            .cloned()
            .collect()
    }
}
