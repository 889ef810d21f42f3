//! Index file for navigation.
//!
//! `index.md` lists every article of the run, newest first, linking to the
//! per-article files written by [`markdown`](super::markdown):
//!
//! ```text
//! # 國際西藏郵報
//!
//! - 2021-09-07 08:00 - [八名溫波藏人…](./3f1c…e9.md)
//! - 2021-09-06 17:30 - [流亡藏人…](./8a07…21.md)
//! ```
//!
//! Dates are shown at +08:00, like the `LastUpdate` line of the articles.

use super::markdown::article_filename;
use crate::article::normalizer::utc8;
use crate::models::Article;
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

pub const INDEX_FILE: &str = "index.md";

/// Render the index document for `articles` under the heading `site_title`.
pub fn render_index(site_title: &str, articles: &[Article]) -> Result<String, std::fmt::Error> {
    let mut sorted: Vec<&Article> = articles.iter().collect();
    sorted.sort_by(|a, b| Article::by_update_time(b, a));

    let zone = utc8();
    let mut md = String::new();
    writeln!(md, "# {site_title}\n")?;
    for article in sorted {
        writeln!(
            md,
            "- {} - [{}](./{})",
            article.update_time.with_timezone(&zone).format("%Y-%m-%d %H:%M"),
            article.title,
            article_filename(article)
        )?;
    }
    Ok(md)
}

/// Replace `index.md` in `markdown_output_dir`.
///
/// # Arguments
///
/// * `markdown_output_dir` - Directory containing the article files
/// * `site_title` - Heading of the index
/// * `articles` - Articles to list
#[instrument(level = "info", skip_all, fields(%markdown_output_dir, count = articles.len()))]
pub async fn write_index(
    markdown_output_dir: &str,
    site_title: &str,
    articles: &[Article],
) -> Result<PathBuf, Box<dyn Error>> {
    let md = render_index(site_title, articles)?;
    let path = Path::new(markdown_output_dir).join(INDEX_FILE);
    fs::write(&path, md).await?;
    info!(path = %path.display(), "Updated index.md");
    Ok(path)
}
