//! Per-article Markdown files.
//!
//! Article content is already a complete Markdown document, so writing is a
//! matter of picking the file name: `{markdown_output_dir}/{id}.md`. Ids are
//! fingerprints of the source URL, so a later crawl of the same article
//! overwrites its earlier file.

use crate::models::Article;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error, info, instrument};

/// File name of an article's Markdown document.
pub fn article_filename(article: &Article) -> String {
    format!("{}.md", article.id)
}

/// Write every article to its own Markdown file.
///
/// # Arguments
///
/// * `articles` - Finished articles
/// * `markdown_output_dir` - Directory receiving the files
///
/// # Returns
///
/// The paths written, in the order of `articles`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir, count = articles.len()))]
pub async fn write_articles(
    articles: &[Article],
    markdown_output_dir: &str,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    fs::create_dir_all(markdown_output_dir).await?;

    let mut written = Vec::with_capacity(articles.len());
    for article in articles {
        let path = Path::new(markdown_output_dir).join(article_filename(article));
        if let Err(e) = fs::write(&path, &article.content).await {
            error!(path = %path.display(), error = %e, "Failed writing article Markdown");
            return Err(e.into());
        }
        debug!(path = %path.display(), title = %article.title, "Wrote article Markdown");
        written.push(path);
    }

    info!(count = written.len(), "Wrote article Markdown files");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn article(url: &str, content: &str) -> Article {
        let mut a = Article::new(&SiteConfig::default(), url);
        a.content = content.to_string();
        a
    }

    #[tokio::test]
    async fn test_write_articles() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        let articles = vec![
            article("http://example.test/1-a", "# A\n"),
            article("http://example.test/2-b", "# B\n"),
        ];

        let written = write_articles(&articles, out).await.unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0], dir.path().join(format!("{}.md", articles[0].id)));
        assert_eq!(std::fs::read_to_string(&written[1]).unwrap(), "# B\n");
    }

    #[tokio::test]
    async fn test_rewrite_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();

        write_articles(&[article("http://example.test/1-a", "old")], out).await.unwrap();
        let written = write_articles(&[article("http://example.test/1-a", "new")], out)
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&written[0]).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let written = write_articles(
            &[article("http://example.test/1-a", "x")],
            nested.to_str().unwrap(),
        )
        .await
        .unwrap();
        assert!(written[0].exists());
    }
}
