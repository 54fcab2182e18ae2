//! HTML parsing and DOM queries.
//!
//! Thin wrappers over `scraper` used by the fetcher (body text extraction)
//! and the readability extractor (candidate scoring).

use scraper::{Html, Selector};

use crate::{LegendaError, Result};

/// A parsed HTML document.
///
/// # Example
///
/// ```rust
/// use legenda_core::dom::Document;
///
/// let doc = Document::parse("<html><head><title>T</title></head><body><p>Hi</p></body></html>");
/// assert_eq!(doc.title(), Some("T".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// `scraper` is error-recovering, so this accepts arbitrarily malformed
    /// markup and never fails.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`LegendaError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| LegendaError::HtmlParseError(format!("invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the content of the `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// Gets the tag-stripped text content of the document body.
    ///
    /// Script and style text is excluded; the rest of the body's text nodes
    /// are concatenated with single-space separators.
    pub fn body_text(&self) -> String {
        let body = Selector::parse("body").expect("static selector");
        let skip = Selector::parse("script, style, noscript").expect("static selector");

        let Some(body_el) = self.html.select(&body).next() else {
            return self.text_content();
        };

        let skipped: Vec<String> = self
            .html
            .select(&skip)
            .map(|el| el.text().collect::<String>())
            .collect();

        let mut text = body_el.text().collect::<Vec<_>>().join(" ");
        for chunk in skipped {
            if !chunk.is_empty() {
                text = text.replace(&chunk, " ");
            }
        }
        normalize_whitespace(&text)
    }

    /// Gets all text content from the document.
    pub fn text_content(&self) -> String {
        normalize_whitespace(&self.html.root_element().text().collect::<Vec<_>>().join(" "))
    }
}

/// Collapses whitespace runs into single spaces and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A single element in a parsed document.
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the HTML content inside this element, excluding its own tags.
    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }

    /// Gets the HTML content including this element's own tags.
    pub fn outer_html(&self) -> String {
        self.element.html()
    }

    /// Gets the concatenated text of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the value of an attribute, or `None` if absent.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = Selector::parse(selector)
            .map_err(|e| LegendaError::HtmlParseError(format!("invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head><title>Test Page</title><style>body { color: red; }</style></head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p>
            <p class="content">Paragraph 2</p>
            <script>var hidden = "nope";</script>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_title() {
        let doc = Document::parse(SAMPLE_HTML);
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_select() {
        let doc = Document::parse(SAMPLE_HTML);
        let elements = doc.select("p.content").unwrap();

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Paragraph 1");
        assert_eq!(elements[1].text(), "Paragraph 2");
    }

    #[test]
    fn test_invalid_selector() {
        let doc = Document::parse(SAMPLE_HTML);
        assert!(matches!(doc.select("[[oops"), Err(LegendaError::HtmlParseError(_))));
    }

    #[test]
    fn test_attr() {
        let doc = Document::parse(SAMPLE_HTML);
        let links = doc.select("a").unwrap();
        assert_eq!(links[0].attr("href"), Some("https://example.com"));
    }

    #[test]
    fn test_body_text_strips_tags_and_scripts() {
        let doc = Document::parse(SAMPLE_HTML);
        let text = doc.body_text();

        assert!(text.contains("Heading"));
        assert!(text.contains("Paragraph 1"));
        assert!(text.contains("Link"));
        assert!(!text.contains("hidden"));
        assert!(!text.contains("<p"));
    }

    #[test]
    fn test_body_text_without_body() {
        let doc = Document::parse("just a fragment");
        assert_eq!(doc.body_text(), "just a fragment");
    }
}
