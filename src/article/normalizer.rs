//! Content normalization: script conversion and markdown assembly.
//!
//! Every article is rendered with the same template:
//!
//! ```text
//! # <title>
//!
//! LastUpdate: <update time, RFC 3339, +08:00>
//!  @ [<site title>](/list/?v=<site title>): [<domain>](http://<domain>)
//!
//! ---
//! <converted body>
//!
//! 原地址：[<unescaped source url>](<unescaped source url>)
//! ```

use crate::convert::ScriptConverter;
use crate::error::{CrawlError, UnescapeError};
use crate::models::Article;
use chrono::{FixedOffset, SecondsFormat};
use tracing::warn;

/// Offset of the zone timestamps are rendered in, independent of the host locale.
const UTC8_SECS: i32 = 8 * 60 * 60;

/// Label in front of the original-URL footer.
pub const SOURCE_LABEL: &str = "原地址：";

/// The +08:00 zone timestamps are displayed in.
pub fn utc8() -> FixedOffset {
    FixedOffset::east_opt(UTC8_SECS).expect("+08:00 is a valid offset")
}

/// Convert `raw_body` to simplified script and render the final markdown.
///
/// `article` must already carry its title and update time.
///
/// # Errors
///
/// Returns [`CrawlError::Convert`] when the converter fails.
pub fn normalize<C: ScriptConverter>(
    converter: &C,
    article: &Article,
    raw_body: &str,
) -> Result<String, CrawlError> {
    let body = converter
        .convert(raw_body)
        .map_err(|source| CrawlError::Convert {
            site: article.website_title.clone(),
            url: article.source_url.clone(),
            source,
        })?;
    Ok(fmt_content(article, &body))
}

/// Render the markdown document for `article` around an already converted body.
pub fn fmt_content(article: &Article, body: &str) -> String {
    let last_update = article
        .update_time
        .with_timezone(&utc8())
        .to_rfc3339_opts(SecondsFormat::Secs, false);
    let source = unescape_url(&article.source_url);
    format!(
        "# {title}\n\n\
         LastUpdate: {last_update}\n @ [{site}](/list/?v={site}): [{domain}](http://{domain})\n\n\
         ---\n\
         {body}\n\n\
         {SOURCE_LABEL}[{source}]({source})",
        title = article.title,
        site = article.website_title,
        domain = article.website_domain,
    )
}

/// Percent-decode `raw` for display.
///
/// Every `%` must start a two-hex-digit escape. Decoding problems never abort
/// formatting: the raw value is returned with the error appended. Decoded
/// bytes that are not UTF-8 are replaced, not reported.
pub fn unescape_url(raw: &str) -> String {
    match strict_unescape(raw) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(url = %raw, error = %e, "unescape url error");
            format!("{raw}\n\nunescape url error:\n{e}")
        }
    }
}

fn strict_unescape(raw: &str) -> Result<String, UnescapeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            i += 1;
            continue;
        }
        let valid = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return Err(UnescapeError(raw[i..].chars().take(3).collect()));
        }
        i += 3;
    }
    Ok(String::from_utf8_lossy(&urlencoding::decode_binary(bytes)).into_owned())
}
