//! JSON output of the stored articles.
//!
//! The whole store is serialized into `{json_output_dir}/articles.json`, in
//! store order, replacing the file of any earlier run.

use crate::models::Article;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

pub const ARTICLES_FILE: &str = "articles.json";

/// Write `articles` as a pretty-printed JSON array.
///
/// # Arguments
///
/// * `articles` - The articles to serialize
/// * `json_output_dir` - Base directory for JSON output
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(%json_output_dir, count = articles.len()))]
pub async fn write_articles(
    articles: &[Article],
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(articles)?;

    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(%json_output_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = Path::new(json_output_dir).join(ARTICLES_FILE);
    info!(path = %path.display(), "Writing JSON");
    fs::write(&path, json).await?;
    info!(path = %path.display(), "Wrote JSON articles file");
    Ok(path)
}
