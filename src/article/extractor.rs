//! Article extraction.
//!
//! [`ArticleExtractor::extract`] turns one candidate URL into a finished
//! [`Article`]. The steps run in a fixed order because each one feeds the
//! next: title, then publish time, then body, then normalization (which
//! embeds the title and time in the markdown).
//!
//! # Failure semantics
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | Malformed response headers | stand-in article (URL path as title, now as time, empty body) |
//! | Other transport errors | [`CrawlError::Fetch`] |
//! | No `<title>` | [`CrawlError::MissingTitle`] |
//! | No publish-time meta | time defaults to now |
//! | Unparseable publish time | [`CrawlError::TimeParse`] |
//! | Published before the freshness window | [`CrawlError::TimeOverDays`] (soft reject) |
//! | No content container | [`CrawlError::MissingContent`] |
//! | Script conversion failure | [`CrawlError::Convert`] |

use super::normalizer::normalize;
use crate::config::SiteConfig;
use crate::convert::ScriptConverter;
use crate::error::{ConfigError, CrawlError, FetchError};
use crate::fetcher::HtmlFetcher;
use crate::fetcher::dom::{self, Document};
use crate::models::Article;
use crate::utils::{sanitize_text, truncate_for_log};
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use scraper::{ElementRef, Selector};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

/// Articles published more than this many days ago are rejected.
pub const FRESHNESS_DAYS: i64 = 3;

/// `true` when `published` lies before the freshness window ending at `now`.
///
/// The boundary is exclusive: an article exactly [`FRESHNESS_DAYS`] old is
/// still accepted.
pub fn is_stale(published: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    published < now - TimeDelta::days(FRESHNESS_DAYS)
}

/// Compiled markup rules of the site.
#[derive(Debug, Clone)]
struct Rules {
    title_suffix: String,
    published_meta: String,
    published_format: String,
    content: Selector,
    intro: Selector,
    body: Selector,
    paragraph: Selector,
}

impl Rules {
    fn compile(config: &SiteConfig) -> Result<Self, ConfigError> {
        let rules = &config.rules;
        Ok(Self {
            title_suffix: rules.title_suffix.clone(),
            published_meta: rules.published_meta.clone(),
            published_format: rules.published_format.clone(),
            content: dom::compile(&rules.content)?,
            intro: dom::compile(&rules.intro)?,
            body: dom::compile(&rules.body)?,
            paragraph: dom::compile("p")?,
        })
    }
}

/// Extracts articles of one site through an injected fetcher and converter.
pub struct ArticleExtractor<F, C> {
    fetcher: F,
    converter: C,
    site: SiteConfig,
    rules: Rules,
    timeout: Duration,
}

impl<F: HtmlFetcher, C: ScriptConverter> ArticleExtractor<F, C> {
    /// # Errors
    ///
    /// Returns [`ConfigError::Selector`] if a configured selector is invalid.
    pub fn new(fetcher: F, converter: C, site: SiteConfig, timeout: Duration) -> Result<Self, ConfigError> {
        let rules = Rules::compile(&site)?;
        Ok(Self {
            fetcher,
            converter,
            site,
            rules,
            timeout,
        })
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch `url` and build its article.
    ///
    /// # Errors
    ///
    /// See the module documentation. [`CrawlError::TimeOverDays`] carries
    /// the parsed publish time so callers can skip the article quietly.
    #[instrument(level = "info", skip(self), fields(site = %self.site.title))]
    pub async fn extract(&self, url: &str) -> Result<Article, CrawlError> {
        let u = Url::parse(url).map_err(|source| CrawlError::InvalidUrl {
            site: self.site.title.clone(),
            url: url.to_string(),
            source,
        })?;
        let mut article = Article::new(&self.site, url);

        let page = match self.fetcher.fetch(&u, self.timeout).await {
            Ok(page) => page,
            Err(FetchError::MalformedHeader(reason)) => {
                warn!(%url, %reason, "Malformed response header; keeping a stand-in article");
                article.title = u.path().to_string();
                article.update_time = Utc::now();
                article.content = normalize(&self.converter, &article, "")?;
                return Ok(article);
            }
            Err(source) => {
                return Err(CrawlError::Fetch {
                    site: self.site.title.clone(),
                    url: url.to_string(),
                    source,
                });
            }
        };
        debug!(%url, bytes = page.raw.len(), "Fetched article page");

        article.title = self.fetch_title(&page.document, url)?;
        article.update_time = self.fetch_update_time(&page.document, url, Utc::now())?;
        // Content goes last: the markdown embeds title and time.
        let body = self.fetch_content(&page.document, url)?;
        debug!(%url, body = %truncate_for_log(&body, 200), "Extracted body");
        article.content = normalize(&self.converter, &article, &body)?;
        Ok(article)
    }

    /// Title text without the site decoration.
    pub fn fetch_title(&self, doc: &Document, url: &str) -> Result<String, CrawlError> {
        let raw = doc.title().ok_or_else(|| CrawlError::MissingTitle {
            site: self.site.title.clone(),
            url: url.to_string(),
        })?;
        let title = if self.rules.title_suffix.is_empty() {
            raw
        } else {
            raw.replace(&self.rules.title_suffix, "")
        };
        Ok(sanitize_text(title.trim()))
    }

    /// Publish time from the page meta, or `now` when the page has none.
    ///
    /// # Errors
    ///
    /// [`CrawlError::TimeParse`] when the meta value does not match the
    /// configured format, [`CrawlError::TimeOverDays`] when the time is
    /// older than the freshness window.
    pub fn fetch_update_time(
        &self,
        doc: &Document,
        url: &str,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, CrawlError> {
        let published = match doc.meta_property(&self.rules.published_meta) {
            None => {
                debug!(%url, "No publish time on page; using now");
                now
            }
            Some(value) => NaiveDateTime::parse_from_str(value.trim(), &self.rules.published_format)
                .map_err(|source| CrawlError::TimeParse {
                    site: self.site.title.clone(),
                    url: url.to_string(),
                    value: value.clone(),
                    source,
                })?
                .and_utc(),
        };

        if is_stale(published, now) {
            return Err(CrawlError::TimeOverDays {
                site: self.site.title.clone(),
                url: url.to_string(),
                published,
            });
        }
        Ok(published)
    }

    /// Markdown lines of the article body.
    ///
    /// The optional intro quote comes first as a `> ` line, followed by one
    /// line per non-empty paragraph. A paragraph made only of a bold run is
    /// rendered as `**text**`. Every line ends with a hard break (two
    /// spaces); the quote is followed by a blank line so the paragraphs are
    /// not folded into it.
    pub fn fetch_content(&self, doc: &Document, url: &str) -> Result<String, CrawlError> {
        let container = doc
            .first(&self.rules.content)
            .ok_or_else(|| CrawlError::MissingContent {
                site: self.site.title.clone(),
                url: url.to_string(),
            })?;

        let mut body = String::new();
        let intro = container.select(&self.rules.intro).next();
        if let Some(intro) = intro {
            let quote = self.intro_text(intro);
            if !quote.is_empty() {
                body.push_str("> ");
                body.push_str(&quote);
                body.push_str("  \n\n");
            }
        }

        let scope = container.select(&self.rules.body).next().unwrap_or(container);
        for p in scope.select(&self.rules.paragraph) {
            if intro.is_some_and(|q| p.ancestors().any(|a| a.id() == q.id())) {
                continue;
            }
            if let Some(line) = render_paragraph(p) {
                body.push_str(&line);
                body.push_str("  \n");
            }
        }
        Ok(body)
    }

    /// The intro quote as one line: its paragraphs joined with a space, or
    /// its whole text when it has no paragraphs.
    fn intro_text(&self, intro: ElementRef<'_>) -> String {
        let paragraphs: Vec<String> = intro
            .select(&self.rules.paragraph)
            .map(|p| sanitize_text(&dom::text_of(p)))
            .filter(|t| !t.is_empty())
            .collect();
        if paragraphs.is_empty() {
            sanitize_text(&dom::text_of(intro))
        } else {
            paragraphs.join(" ")
        }
    }
}

/// One markdown line for a paragraph, `None` for an empty one.
fn render_paragraph(p: ElementRef<'_>) -> Option<String> {
    let text = sanitize_text(&dom::text_of(p));
    if text.is_empty() {
        return None;
    }
    let mut children = dom::child_elements(p);
    let only_child = match (children.next(), children.next()) {
        (Some(child), None) => Some(child),
        _ => None,
    };
    let bold = dom::has_only_element_content(p)
        && only_child.is_some_and(|c| matches!(c.value().name(), "strong" | "b"));
    if bold {
        Some(format!("**{text}**"))
    } else {
        Some(text)
    }
}
