//! Utility functions for text cleanup, identifiers, and file system checks.
//!
//! This module provides helper functions used throughout the crate:
//! - Stable, order-preserving deduplication of link lists
//! - Fingerprints for article and website identifiers
//! - Sanitizing scraped text before it reaches markdown
//! - String truncation for logging
//! - File system validation for output directories

use itertools::Itertools;
use sha2::{Digest, Sha256};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Deduplicate strings by exact equality, keeping the first occurrence.
///
/// # Examples
///
/// ```ignore
/// let links = vec!["a".to_string(), "b".to_string(), "a".to_string()];
/// assert_eq!(dedup_stable(links), vec!["a", "b"]);
/// ```
pub fn dedup_stable(items: Vec<String>) -> Vec<String> {
    items.into_iter().unique().collect()
}

/// Hex digest used for article ids (from the source URL) and website ids
/// (from the domain).
///
/// Only the input string contributes, so the same URL always yields the
/// same id.
pub fn fingerprint(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    format!("{:x}", digest)
}

/// Remove characters that must never reach a title or a markdown line.
///
/// Control characters (including line breaks and tabs) become spaces, then
/// zero-width characters and the byte order mark are dropped, and runs of
/// whitespace collapse to a single space.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_text("a\tb\u{200b}c"), "a bc");
/// ```
pub fn sanitize_text(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{feff}'))
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at the last character boundary before `max` bytes
/// and annotated with the number of bytes dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
