//! HTML fetching capability.
//!
//! The pipelines never talk to the network directly. They receive an
//! [`HtmlFetcher`], which turns a URL into raw bytes plus a parsed
//! [`Document`](dom::Document) and reports transport problems as a
//! [`FetchError`]. [`ReqwestFetcher`] is the production implementation;
//! tests substitute fixture fetchers that serve HTML strings.
//!
//! # Malformed headers
//!
//! Some servers answer with headers that violate the HTTP protocol. Those
//! failures are surfaced as [`FetchError::MalformedHeader`] so the article
//! extractor can degrade instead of failing the whole item.

pub mod dom;

use crate::error::FetchError;
use dom::Document;
use std::error::Error as StdError;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// A fetched page: the raw response body and its parsed document.
pub struct Page {
    pub raw: Vec<u8>,
    pub document: Document,
}

impl Page {
    pub fn from_html(html: &str) -> Self {
        Self {
            raw: html.as_bytes().to_vec(),
            document: Document::parse(html),
        }
    }
}

/// Source of HTML pages.
pub trait HtmlFetcher {
    /// Fetch `url`, giving up after `timeout`.
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Page, FetchError>;

    /// All hyperlinks found at `url`, already resolved to absolute form.
    async fn extract_links(&self, url: &Url, timeout: Duration) -> Result<Vec<String>, FetchError> {
        let page = self.fetch(url, timeout).await?;
        Ok(page.document.links(url))
    }
}

/// [`HtmlFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Request(error_chain(&e)))?;
        Ok(Self { client })
    }
}

impl HtmlFetcher for ReqwestFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url, timeout: Duration) -> Result<Page, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(&e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "Unexpected status");
            return Err(FetchError::Status(status.as_u16()));
        }

        let raw = response
            .bytes()
            .await
            .map_err(|e| classify(&e, timeout))?
            .to_vec();
        debug!(%url, bytes = raw.len(), "Fetched page");

        let document = Document::parse(&String::from_utf8_lossy(&raw));
        Ok(Page { raw, document })
    }
}

/// Map a `reqwest` failure onto the fetcher error taxonomy.
fn classify(err: &reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout(timeout);
    }
    let chain = error_chain(err);
    if is_header_defect(&chain) {
        FetchError::MalformedHeader(chain)
    } else {
        FetchError::Request(chain)
    }
}

/// The error and all of its sources, joined with `": "`.
fn error_chain(err: &dyn StdError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        text.push_str(": ");
        text.push_str(&e.to_string());
        source = e.source();
    }
    text
}

/// Whether an error chain describes a response whose headers could not be parsed.
fn is_header_defect(chain: &str) -> bool {
    let lower = chain.to_lowercase();
    lower.contains("header") && (lower.contains("invalid") || lower.contains("parse"))
}


#[cfg(test)]
mod tests {
    use super::testing::{Fixture, FixtureFetcher};
    use super::*;

    #[test]
    fn test_is_header_defect() {
        assert!(is_header_defect(
            "error sending request for url (http://x/): invalid HTTP header parsed"
        ));
        assert!(is_header_defect("hyper::Error(Parse(Header(Token)))"));
        assert!(!is_header_defect("error sending request: connection refused"));
        assert!(!is_header_defect("dns error: failed to lookup address information"));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::Other, "invalid header value");
        let chain = error_chain(&inner);
        assert!(chain.contains("invalid header value"));
    }

    #[test]
    fn test_page_from_html() {
        let page = Page::from_html("<html><head><title>T</title></head></html>");
        assert!(!page.raw.is_empty());
        assert_eq!(page.document.title().as_deref(), Some("T"));
    }

    #[tokio::test]
    async fn test_default_extract_links() {
        let fetcher = FixtureFetcher::new().page(
            "http://example.test/",
            r#"<a href="/news/x/5-a">a</a><a href="news/x/6-b">b</a>"#,
        );
        let url = Url::parse("http://example.test/").unwrap();
        let links = fetcher
            .extract_links(&url, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(
            links,
            vec!["http://example.test/news/x/5-a", "http://example.test/news/x/6-b"]
        );
    }

    #[tokio::test]
    async fn test_fixture_failures() {
        let fetcher = FixtureFetcher::new().failing("http://example.test/", Fixture::Timeout);
        let url = Url::parse("http://example.test/").unwrap();
        let err = fetcher
            .extract_links(&url, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
        assert_eq!(fetcher.requests(), vec!["http://example.test/"]);
    }

    #[test]
    fn test_reqwest_fetcher_builds() {
        assert!(ReqwestFetcher::new().is_ok());
    }
}
