//! In-memory article store.
//!
//! Articles become visible here only once fully built. Reads are linear
//! scans and hand out clones, so stored articles are never mutated.

use crate::error::CrawlError;
use crate::models::Article;
use tokio::sync::RwLock;

pub struct ArticleStore {
    site: String,
    articles: RwLock<Vec<Article>>,
}

impl ArticleStore {
    /// An empty store for the site titled `site` (used in error messages).
    pub fn new(site: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            articles: RwLock::new(Vec::new()),
        }
    }

    pub async fn append(&self, article: Article) {
        self.articles.write().await.push(article);
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }

    /// Every stored article, in insertion order.
    pub async fn list_all(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }

    /// # Errors
    ///
    /// [`CrawlError::NotFound`] when no article has this id.
    pub async fn get_by_id(&self, id: &str) -> Result<Article, CrawlError> {
        self.articles
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| CrawlError::NotFound {
                site: self.site.clone(),
                id: id.to_string(),
            })
    }

    /// Articles matching any of `keywords`, in insertion order.
    ///
    /// Keywords are trimmed and lower-cased. An article matches when a
    /// keyword equals its id or website id, or is a case-insensitive
    /// substring of its title, content, website domain or website title.
    /// Empty keywords are ignored.
    pub async fn search(&self, keywords: &[&str]) -> Vec<Article> {
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self.articles
            .read()
            .await
            .iter()
            .filter(|a| keywords.iter().any(|k| matches_keyword(a, k)))
            .cloned()
            .collect()
    }
}

fn matches_keyword(article: &Article, keyword: &str) -> bool {
    article.id == keyword
        || article.website_id == keyword
        || article.title.to_lowercase().contains(keyword)
        || article.content.to_lowercase().contains(keyword)
        || article.website_domain.to_lowercase().contains(keyword)
        || article.website_title.to_lowercase().contains(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn article(url: &str, title: &str, content: &str) -> Article {
        let site = SiteConfig {
            domain: "example.test".to_string(),
            title: "Example Post".to_string(),
            ..SiteConfig::default()
        };
        let mut a = Article::new(&site, url);
        a.title = title.to_string();
        a.content = content.to_string();
        a
    }

    async fn store() -> ArticleStore {
        let store = ArticleStore::new("Example Post");
        store.append(article("http://example.test/1-a", "Dalai Lama visit", "body one")).await;
        store.append(article("http://example.test/2-b", "Weather", "Snow in LHASA")).await;
        store.append(article("http://example.test/3-c", "Sports", "nothing")).await;
        store
    }

    #[tokio::test]
    async fn test_list_all_keeps_order() {
        let store = store().await;
        let titles: Vec<String> = store.list_all().await.into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Dalai Lama visit", "Weather", "Sports"]);
        assert_eq!(store.len().await, 3);
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = store().await;
        let id = crate::utils::fingerprint("http://example.test/2-b");
        assert_eq!(store.get_by_id(&id).await.unwrap().title, "Weather");

        let err = store.get_by_id("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "[Example Post] no article with id: missing");
    }

    #[tokio::test]
    async fn test_search_case_insensitive() {
        let store = store().await;
        let found = store.search(&["  lhasa "]).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Weather");

        let found = store.search(&["DALAI"]).await;
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_search_site_fields_and_ids() {
        let store = store().await;
        assert_eq!(store.search(&["example.test"]).await.len(), 3);
        assert_eq!(store.search(&["example post"]).await.len(), 3);

        let id = crate::utils::fingerprint("http://example.test/3-c");
        let found = store.search(&[id.as_str()]).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Sports");
    }

    #[tokio::test]
    async fn test_search_multiple_keywords_no_duplicates() {
        let store = store().await;
        let found = store.search(&["weather", "snow", "sports"]).await;
        let titles: Vec<&str> = found.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Weather", "Sports"]);
    }

    #[tokio::test]
    async fn test_search_nothing() {
        let store = store().await;
        assert!(store.search(&[]).await.is_empty());
        assert!(store.search(&["   "]).await.is_empty());
        assert!(store.search(&["zebra"]).await.is_empty());
    }
}
