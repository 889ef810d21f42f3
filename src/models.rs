//! Data model for extracted articles.
//!
//! An [`Article`] is built in a fixed order during extraction: the source
//! identity is filled in at construction, then title, then update time, then
//! content. It is only appended to the [`ArticleStore`](crate::store::ArticleStore)
//! once all of those steps succeeded, and is never mutated afterwards.

use crate::config::SiteConfig;
use crate::utils::fingerprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One extracted news item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// Fingerprint of `source_url`.
    pub id: String,
    /// Display title with the site decoration and illegal characters removed.
    pub title: String,
    /// Final markdown document.
    pub content: String,
    pub website_id: String,
    pub website_domain: String,
    pub website_title: String,
    /// Publish time reported by the page, or the fetch time if the page had none.
    pub update_time: DateTime<Utc>,
    /// Absolute URL the article was fetched from.
    pub source_url: String,
}

impl Article {
    /// An empty article for `source_url` with the site identity filled in.
    pub fn new(site: &SiteConfig, source_url: &str) -> Self {
        Self {
            id: fingerprint(source_url),
            title: String::new(),
            content: String::new(),
            website_id: site.website_id(),
            website_domain: site.domain.clone(),
            website_title: site.title.clone(),
            update_time: Utc::now(),
            source_url: source_url.to_string(),
        }
    }

    /// Oldest first ordering on `update_time`.
    pub fn by_update_time(a: &Article, b: &Article) -> Ordering {
        a.update_time.cmp(&b.update_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_article_identity() {
        let site = SiteConfig::default();
        let article = Article::new(&site, "http://www.tibetpost.net/news/tibet-news/1647-x");

        assert_eq!(article.id, fingerprint("http://www.tibetpost.net/news/tibet-news/1647-x"));
        assert_eq!(article.website_domain, "www.tibetpost.net");
        assert_eq!(article.website_title, site.title);
        assert_eq!(article.website_id, site.website_id());
        assert!(article.title.is_empty());
        assert!(article.content.is_empty());
    }

    #[test]
    fn test_id_ignores_content() {
        let site = SiteConfig::default();
        let mut a = Article::new(&site, "http://example.test/news/x/5-a");
        let b = Article::new(&site, "http://example.test/news/x/5-a");
        a.content = "changed".to_string();
        a.title = "changed".to_string();
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_by_update_time() {
        let site = SiteConfig::default();
        let mut old = Article::new(&site, "http://example.test/1-old");
        old.update_time = Utc.with_ymd_and_hms(2021, 9, 6, 0, 0, 0).unwrap();
        let mut new = Article::new(&site, "http://example.test/2-new");
        new.update_time = Utc.with_ymd_and_hms(2021, 9, 7, 0, 0, 0).unwrap();

        let mut articles = vec![new.clone(), old.clone()];
        articles.sort_by(Article::by_update_time);
        assert_eq!(articles[0].id, old.id);
        assert_eq!(articles[1].id, new.id);
    }

    #[test]
    fn test_article_serialization() {
        let site = SiteConfig::default();
        let mut article = Article::new(&site, "http://example.test/5-a");
        article.title = "Title".to_string();

        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }
}
