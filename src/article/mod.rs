//! Article extraction and normalization.
//!
//! - [`extractor`]: fetches one candidate URL and pulls title, publish time
//!   and body out of the page
//! - [`normalizer`]: converts the body to simplified script and renders the
//!   final markdown document

pub mod extractor;
pub mod normalizer;

pub use extractor::{ArticleExtractor, FRESHNESS_DAYS, is_stale};
pub use normalizer::{fmt_content, normalize};
