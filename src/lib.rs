//! # Tibet Post Fetcher
//!
//! Crawls one news site, keeps the articles published in the last few days
//! and renders each of them as a Markdown document in simplified Chinese
//! script.
//!
//! ## Architecture
//!
//! The crate follows a pipeline architecture:
//! 1. **Collecting**: fetch every seed page and gather its links ([`links::collect`])
//! 2. **Routing**: keep the links shaped like articles, drop blacklisted
//!    sections ([`links::LinkRouter`])
//! 3. **Extracting**: fetch each candidate and pull title, publish time and
//!    body out of it, several at a time ([`article::ArticleExtractor`])
//! 4. **Normalizing**: convert to simplified script and render the Markdown
//!    template ([`article::normalize`])
//! 5. **Storing**: keep finished articles for listing, lookup and search
//!    ([`store::ArticleStore`])
//!
//! Network access and script conversion are injected through the
//! [`fetcher::HtmlFetcher`] and [`convert::ScriptConverter`] traits.

pub mod article;
pub mod config;
pub mod convert;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod links;
pub mod models;
pub mod outputs;
pub mod store;
pub mod utils;

pub use config::SiteConfig;
pub use crawler::{CrawlReport, Crawler};
pub use error::{ConfigError, ConvertError, CrawlError, FetchError};
pub use models::Article;
pub use store::ArticleStore;
