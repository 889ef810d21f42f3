//! Queries over a parsed HTML document.
//!
//! Extraction code only talks to [`Document`] and compiled selectors, so the
//! HTML parser behind it can change without touching the extractor.

use crate::error::ConfigError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Compile a CSS selector coming from configuration.
pub fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// A parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// First element matching `selector`, in document order.
    pub fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// Text of the first `<title>` element, `None` if the document has none.
    pub fn title(&self) -> Option<String> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "title")
            .map(|el| el.text().collect::<String>())
    }

    /// `content` of the first `<meta property="…">` with the given property.
    ///
    /// A matching meta without a `content` attribute counts as absent.
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "meta")
            .find(|el| el.value().attr("property") == Some(property))
            .and_then(|el| el.value().attr("content"))
            .map(str::to_string)
    }

    /// All hyperlinks of the document, resolved against `base`.
    ///
    /// Fragments are dropped from every link, so `/5-a#comments` and `/5-a`
    /// yield the same string. Fragment-only anchors, `javascript:` and
    /// `mailto:` links and anything that does not resolve to http(s) are
    /// skipped. Document order is kept and duplicates are not removed.
    pub fn links(&self, base: &Url) -> Vec<String> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name() == "a")
            .filter_map(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty() && !href.starts_with('#'))
            .filter_map(|href| base.join(href).ok())
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .map(|mut u| {
                u.set_fragment(None);
                u.to_string()
            })
            .collect()
    }
}

/// Element children of `el`, skipping text and comment nodes.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Concatenated text of `el` and its descendants.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

/// `true` when `el` has no text other than whitespace outside of its child elements.
pub fn has_only_element_content(el: ElementRef<'_>) -> bool {
    el.children()
        .filter_map(|n| n.value().as_text())
        .all(|t| t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"
        <html>
          <head>
            <title>Headline - Site</title>
            <meta property="og:title" content="Headline">
            <meta property="article:published_time" content="2021-09-07 00:00:00">
          </head>
          <body>
            <a href="/news/x/5-a">five</a>
            <a href="http://other.test/6-b#comments">six</a>
            <a href="#top">top</a>
            <a href="mailto:editor@example.test">mail</a>
            <a href="javascript:void(0)">js</a>
            <a>no href</a>
            <div class="box"><p>one</p></div>
          </body>
        </html>
    "##;

    #[test]
    fn test_title_and_meta() {
        let doc = Document::parse(PAGE);
        assert_eq!(doc.title().as_deref(), Some("Headline - Site"));
        assert_eq!(
            doc.meta_property("article:published_time").as_deref(),
            Some("2021-09-07 00:00:00")
        );
        assert_eq!(doc.meta_property("article:modified_time"), None);
    }

    #[test]
    fn test_missing_title() {
        let doc = Document::parse("<html><body><p>x</p></body></html>");
        assert_eq!(doc.title(), None);
    }

    #[test]
    fn test_meta_without_content_is_absent() {
        let doc = Document::parse(r#"<html><head><meta property="article:published_time"></head></html>"#);
        assert_eq!(doc.meta_property("article:published_time"), None);
    }

    #[test]
    fn test_links_are_absolute() {
        let doc = Document::parse(PAGE);
        let base = Url::parse("http://example.test/").unwrap();
        assert_eq!(
            doc.links(&base),
            vec!["http://example.test/news/x/5-a", "http://other.test/6-b"]
        );
    }

    #[test]
    fn test_fragment_variants_collapse() {
        let doc = Document::parse(
            r##"<a href="/news/x/5-a#comments">c</a><a href="/news/x/5-a">a</a><a href="/news/x/5-a#">e</a>"##,
        );
        let base = Url::parse("http://example.test/").unwrap();
        assert_eq!(
            doc.links(&base),
            vec![
                "http://example.test/news/x/5-a",
                "http://example.test/news/x/5-a",
                "http://example.test/news/x/5-a",
            ]
        );
    }

    #[test]
    fn test_first_and_compile() {
        let doc = Document::parse(PAGE);
        let sel = compile("div.box").unwrap();
        let el = doc.first(&sel).unwrap();
        assert_eq!(text_of(el), "one");
        assert_eq!(child_elements(el).count(), 1);
        assert!(has_only_element_content(el));
        assert!(compile("div[").is_err());
    }
}
