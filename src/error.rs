//! Error types for the crawl pipeline.
//!
//! Errors are split by layer:
//!
//! - [`FetchError`]: transport failures reported by an [`HtmlFetcher`](crate::fetcher::HtmlFetcher)
//! - [`ConvertError`]: failures of a [`ScriptConverter`](crate::convert::ScriptConverter)
//! - [`UnescapeError`]: a malformed escape in a URL shown in article footers
//! - [`CrawlError`]: failures of a single pipeline item (one seed page or one article)
//! - [`ConfigError`]: startup problems with the site configuration
//!
//! [`CrawlError::TimeOverDays`] is not an operational failure. It is the
//! staleness policy's soft reject, and callers are expected to match on it
//! (see [`CrawlError::is_time_over_days`]) and skip the article quietly.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Transport-level failures of the HTML fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with headers that violate the HTTP protocol.
    ///
    /// Article extraction degrades to a stand-in article for this case
    /// instead of failing.
    #[error("malformed response header: {0}")]
    MalformedHeader(String),

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The server answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// Any other transport failure (DNS, TLS, connection reset, body read).
    #[error("request failed: {0}")]
    Request(String),
}

/// A `%` not followed by two hex digits in a URL being unescaped for display.
#[derive(Debug, Error)]
#[error("invalid URL escape {0:?}")]
pub struct UnescapeError(pub String);

/// Failure of the traditional→simplified script converter.
#[derive(Debug, Error)]
#[error("script conversion failed: {0}")]
pub struct ConvertError(pub String);

/// Failure while crawling one item.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("[{site}] invalid url {url}: {source}")]
    InvalidUrl {
        site: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("[{site}] fetch {url}: {source}")]
    Fetch {
        site: String,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("[{site}] cannot extract links from {url}: {source}")]
    CollectLinks {
        site: String,
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("[{site}] there is no element <title>: {url}")]
    MissingTitle { site: String, url: String },

    #[error("[{site}] no article content matched: {url}")]
    MissingContent { site: String, url: String },

    #[error("[{site}] no matched meta contains published_time {value:?} at {url}: {source}")]
    TimeParse {
        site: String,
        url: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The article was published before the freshness window.
    #[error("[{site}] article update time out of range: {published} ({url})")]
    TimeOverDays {
        site: String,
        url: String,
        published: DateTime<Utc>,
    },

    #[error("[{site}] convert {url}: {source}")]
    Convert {
        site: String,
        url: String,
        #[source]
        source: ConvertError,
    },

    #[error("[{site}] no article with id: {id}")]
    NotFound { site: String, id: String },
}

impl CrawlError {
    /// `true` for the staleness soft reject.
    pub fn is_time_over_days(&self) -> bool {
        matches!(self, CrawlError::TimeOverDays { .. })
    }

    /// The publish time carried by a [`CrawlError::TimeOverDays`] reject.
    pub fn published_time(&self) -> Option<DateTime<Utc>> {
        match self {
            CrawlError::TimeOverDays { published, .. } => Some(*published),
            _ => None,
        }
    }
}

/// Problems loading or compiling the site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid pattern {name:?} ({pattern}): {source}")]
    Pattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },
}
