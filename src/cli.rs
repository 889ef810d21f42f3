//! Command-line interface definitions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.

use clap::Parser;

/// Command-line arguments for the crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl with the built-in site configuration
/// tibetpost_fetcher -m ./markdown
///
/// # Custom configuration, JSON export and a search over the results
/// tibetpost_fetcher -c site.yaml -m ./markdown -j ./json -s 達賴 lhasa
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Output directory for the article Markdown files and index.md
    #[arg(short, long)]
    pub markdown_output_dir: String,

    /// Optional output directory for articles.json
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Optional path to the site config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Keywords to look up among the crawled articles
    #[arg(short, long, num_args = 1..)]
    pub search: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "tibetpost_fetcher",
            "--markdown-output-dir",
            "./markdown",
            "--json-output-dir",
            "./json",
            "--config",
            "site.yaml",
        ]);

        assert_eq!(cli.markdown_output_dir, "./markdown");
        assert_eq!(cli.json_output_dir.as_deref(), Some("./json"));
        assert_eq!(cli.config.as_deref(), Some("site.yaml"));
        assert!(cli.search.is_empty());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["tibetpost_fetcher", "-m", "/tmp/markdown", "-s", "達賴", "lhasa"]);

        assert_eq!(cli.markdown_output_dir, "/tmp/markdown");
        assert_eq!(cli.json_output_dir, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.search, vec!["達賴", "lhasa"]);
    }

    #[test]
    fn test_markdown_dir_required() {
        assert!(Cli::try_parse_from(["tibetpost_fetcher", "-j", "./json"]).is_err());
    }
}
