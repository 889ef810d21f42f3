//! Site configuration.
//!
//! One deployment crawls one site. Everything that identifies the site or
//! depends on its markup lives here so the pipelines stay generic:
//!
//! ```yaml
//! domain: www.tibetpost.net
//! title: 國際西藏郵報
//! timeout: 1m
//! concurrency: 8
//! urls:
//!   - http://www.tibetpost.net/
//! categories:
//!   - name: news
//!     pattern: '.*?/news/.*?/\d+-.*'
//! blacklist:
//!   - 'health-safety'
//! rules:
//!   title_suffix: " - 國際西藏郵報"
//!   content: div.article-content-main
//! ```
//!
//! Every field is optional; missing fields take the built-in defaults for
//! the Tibet Post site.

use crate::error::ConfigError;
use crate::utils::fingerprint;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Fetch timeout used when none is configured or the configured one is malformed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Number of article extractions allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// A named URL shape that identifies article links of one site section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CategoryPattern {
    pub name: String,
    pub pattern: String,
}

impl CategoryPattern {
    fn new(name: &str, pattern: &str) -> Self {
        Self {
            name: name.to_string(),
            pattern: pattern.to_string(),
        }
    }
}

/// Markup rules used by the article extractor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractRules {
    /// Site decoration removed from the `<title>` text.
    pub title_suffix: String,
    /// `property` of the `<meta>` carrying the publish time.
    pub published_meta: String,
    /// chrono format of the publish time value.
    pub published_format: String,
    /// Main content container.
    pub content: String,
    /// Introductory quote inside the container.
    pub intro: String,
    /// Section holding the body paragraphs inside the container.
    pub body: String,
}

impl Default for ExtractRules {
    fn default() -> Self {
        Self {
            title_suffix: " - 國際西藏郵報".to_string(),
            published_meta: "article:published_time".to_string(),
            published_format: "%Y-%m-%d %H:%M:%S".to_string(),
            content: "div.article-content-main".to_string(),
            intro: "blockquote.article-intro".to_string(),
            body: "section.article-content".to_string(),
        }
    }
}

/// Configuration of the crawled site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Bare host name, e.g. `www.tibetpost.net`.
    pub domain: String,
    /// Display title of the site.
    pub title: String,
    /// Seed pages the link collector starts from.
    pub urls: Vec<String>,
    /// Fetch timeout as human readable text (`1m`, `45s`, `1m 30s`).
    pub timeout: String,
    /// Parallel article extractions.
    pub concurrency: usize,
    /// Ordered category patterns; order decides candidate order.
    pub categories: Vec<CategoryPattern>,
    /// Regexes of known non-article paths.
    pub blacklist: Vec<String>,
    pub rules: ExtractRules,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            domain: "www.tibetpost.net".to_string(),
            title: "國際西藏郵報".to_string(),
            urls: vec![
                "http://www.tibetpost.net/".to_string(),
                "http://www.tibetpost.net/news".to_string(),
                "http://www.tibetpost.net/features".to_string(),
                "http://www.tibetpost.net/op-ed".to_string(),
            ],
            timeout: "1m".to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            categories: vec![
                CategoryPattern::new("home", r".*?/\d+-.*"),
                CategoryPattern::new("news", r".*?/news/.*?/\d+-.*"),
                CategoryPattern::new("features", r".*?/features/.*?/\d+-.*"),
                CategoryPattern::new("op-ed", r".*?/op-ed/(.*?/)?\d+-.*"),
                CategoryPattern::new("ecosystem", r".*?/ecosystem/(.*?/)?\d+-.*"),
                CategoryPattern::new("influence-impact", r".*?/influence-impact/(.*?/)?\d+-.*"),
                CategoryPattern::new("tibet-facts", r".*?/tibet-facts/(.*?/)?\d+-.*"),
            ],
            blacklist: vec![
                "letters-to-the-editor".to_string(),
                "health-safety".to_string(),
            ],
            rules: ExtractRules::default(),
        }
    }
}

impl SiteConfig {
    /// Load the configuration from a YAML file, or the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Yaml`] if it is not valid YAML for [`SiteConfig`].
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            info!("No config file given; using built-in site defaults");
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).await.map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_string(),
            source,
        })?;
        info!(path, domain = %config.domain, seeds = config.urls.len(), "Loaded site config");
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// The fetch timeout, falling back to [`DEFAULT_TIMEOUT`] when malformed.
    pub fn timeout(&self) -> Duration {
        match humantime::parse_duration(self.timeout.trim()) {
            Ok(d) if !d.is_zero() => d,
            Ok(_) => {
                warn!(site = %self.title, "timeout is zero; using default");
                DEFAULT_TIMEOUT
            }
            Err(e) => {
                warn!(site = %self.title, timeout = %self.timeout, error = %e, "timeout init error; using default");
                DEFAULT_TIMEOUT
            }
        }
    }

    /// Extraction parallelism, never below one.
    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Identifier of the site, derived from its domain.
    pub fn website_id(&self) -> String {
        fingerprint(&self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.categories[0].name, "home");
        assert!(!config.urls.is_empty());
        assert_eq!(config.website_id(), fingerprint("www.tibetpost.net"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
domain: example.test
title: Example
timeout: 45s
urls:
  - http://example.test/
"#;
        let config = SiteConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.domain, "example.test");
        assert_eq!(config.urls, vec!["http://example.test/".to_string()]);
        assert_eq!(config.timeout(), Duration::from_secs(45));
        assert_eq!(config.rules, ExtractRules::default());
        assert_eq!(config.categories, SiteConfig::default().categories);
    }

    #[test]
    fn test_malformed_timeout_falls_back() {
        let config = SiteConfig {
            timeout: "one minute".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);

        let config = SiteConfig {
            timeout: "0s".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_compound_timeout() {
        let config = SiteConfig {
            timeout: "1m 30s".to_string(),
            ..SiteConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(90));
    }

    #[test]
    fn test_concurrency_floor() {
        let config = SiteConfig {
            concurrency: 0,
            ..SiteConfig::default()
        };
        assert_eq!(config.concurrency(), 1);
    }

    #[tokio::test]
    async fn test_load_without_path() {
        let config = SiteConfig::load(None).await.unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = SiteConfig::load(Some("/nonexistent/site.yaml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
