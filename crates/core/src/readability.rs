//! Readability extraction: isolating the main article content of a page.
//!
//! Given raw HTML and its origin URL, [`extract_readable`] strips
//! scripts/boilerplate, scores candidate container elements by tag type,
//! class/id hints, text density, and link density, and returns the cleaned
//! HTML of the best candidate together with a derived title and byline.
//! Relative `href`/`src` attributes in the result are resolved against the
//! origin URL.

use regex::Regex;
use url::Url;

use crate::dom::{Document, Element};
use crate::{LegendaError, Result};

/// A cleaned article produced by readability extraction.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Readable {
    /// Derived title, usually the document `<title>`.
    pub title: Option<String>,
    /// Main article content as clean HTML.
    pub content: String,
    /// Author attribution when the page declares one.
    pub byline: Option<String>,
}

/// Tuning knobs for candidate scoring.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum score for the winning candidate.
    pub min_score: f64,
    /// Candidates with less text than this are skipped outright.
    pub min_text_chars: usize,
    /// Weight applied for positive/negative class and id patterns.
    pub pattern_weight: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { min_score: 10.0, min_text_chars: 25, pattern_weight: 25.0 }
    }
}

/// Class/id substrings that suggest main content.
const POSITIVE_PATTERNS: &str = r"(?i)(article|body|content|entry|hentry|main|page|post|text|blog|story)";

/// Class/id substrings that suggest navigation, ads, or other boilerplate.
const NEGATIVE_PATTERNS: &str = r"(?i)(banner|breadcrumbs?|combx|comment|community|disqus|extra|foot|header|menu|related|remark|rss|share|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup)";

/// Tags worth considering as content containers.
const CANDIDATE_TAGS: &[&str] = &["article", "main", "section", "div", "td", "blockquote", "pre"];

/// Extracts the readable article from an HTML page.
///
/// # Errors
///
/// Returns [`LegendaError::NoContent`] when no element scores above the
/// configured threshold, which is the normal outcome for navigation pages
/// and near-empty documents. Callers should surface that case gracefully.
pub fn extract_readable(html: &str, origin_url: &str) -> Result<Readable> {
    extract_readable_with_config(html, origin_url, &ExtractConfig::default())
}

/// [`extract_readable`] with explicit scoring configuration.
pub fn extract_readable_with_config(html: &str, origin_url: &str, config: &ExtractConfig) -> Result<Readable> {
    let cleaned = strip_noise(html);
    let doc = Document::parse(&cleaned);

    let mut best: Option<(f64, String)> = None;
    for tag in CANDIDATE_TAGS {
        for element in doc.select(tag)? {
            let text = element.text();
            let text_len = text.chars().count();
            if !matches!(*tag, "article" | "main") && text_len < config.min_text_chars {
                continue;
            }

            let score = score_element(&element, config);
            if best.as_ref().is_none_or(|(s, _)| score > *s) {
                best = Some((score, element.outer_html()));
            }
        }
    }

    let (score, content) = best.ok_or(LegendaError::NoContent)?;
    if score < config.min_score {
        return Err(LegendaError::NoContent);
    }

    let content = match Url::parse(origin_url) {
        Ok(base) => absolutize_urls(&content, &base),
        Err(_) => content,
    };

    Ok(Readable { title: doc.title(), content, byline: find_byline(&doc) })
}

/// Scores a candidate element.
///
/// The score combines a base weight per tag type, a class/id pattern
/// adjustment, text and comma density, and a link-density penalty.
fn score_element(element: &Element<'_>, config: &ExtractConfig) -> f64 {
    let base = match element.tag_name().as_str() {
        "article" | "main" => 10.0,
        "section" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        _ => 0.0,
    };

    let text = element.text();
    let char_score = ((text.chars().count() / 100) as f64).min(3.0);
    let comma_score = (text.matches(',').count() as f64).min(3.0);

    let raw = base + class_id_weight(element, config) + char_score + comma_score;
    raw * (1.0 - link_density(element))
}

/// Adjusts the score for class/id hints: positive patterns win over
/// negative ones, matching the order the class list is declared in.
fn class_id_weight(element: &Element<'_>, config: &ExtractConfig) -> f64 {
    let positive = Regex::new(POSITIVE_PATTERNS).expect("static regex");
    let negative = Regex::new(NEGATIVE_PATTERNS).expect("static regex");

    for value in [element.attr("id"), element.attr("class")].into_iter().flatten() {
        for name in value.split_whitespace() {
            if positive.is_match(name) {
                return config.pattern_weight;
            }
            if negative.is_match(name) {
                return -config.pattern_weight;
            }
        }
    }

    0.0
}

/// Ratio of link text characters to total text characters, 0.0 to 1.0.
fn link_density(element: &Element<'_>) -> f64 {
    let total = element.text().chars().count();
    if total == 0 {
        return 0.0;
    }

    let linked: usize = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.text().chars().count())
        .sum();

    linked as f64 / total as f64
}

/// Removes scripts, styles, embedded frames, and comments before scoring.
fn strip_noise(html: &str) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: ["script", "style", "noscript", "iframe", "svg", "canvas", "form"]
                .into_iter()
                .map(|tag| {
                    lol_html::element!(tag, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() || output.is_empty() {
        output = html.to_string();
    }

    let comments = Regex::new(r"(?s)<!--.*?-->").expect("static regex");
    comments.replace_all(&output, "").to_string()
}

/// Rewrites relative `href` and `src` attributes to absolute URLs.
fn absolutize_urls(html: &str, base_url: &Url) -> String {
    let mut output = String::new();
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: vec![
                lol_html::element!("a", |el| {
                    if let Some(href) = el.get_attribute("href")
                        && let Ok(absolute) = base_url.join(&href)
                    {
                        el.set_attribute("href", absolute.as_str()).ok();
                    }
                    Ok(())
                }),
                lol_html::element!("img", |el| {
                    if let Some(src) = el.get_attribute("src")
                        && let Ok(absolute) = base_url.join(&src)
                    {
                        el.set_attribute("src", absolute.as_str()).ok();
                    }
                    Ok(())
                }),
            ],
            ..Default::default()
        },
        |c: &[u8]| {
            output.push_str(&String::from_utf8_lossy(c));
        },
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() || output.is_empty() {
        return html.to_string();
    }

    output
}

/// Looks for an author attribution in meta tags or byline-ish elements.
fn find_byline(doc: &Document) -> Option<String> {
    if let Ok(metas) = doc.select(r#"meta[name="author"]"#)
        && let Some(meta) = metas.first()
        && let Some(content) = meta.attr("content")
        && !content.trim().is_empty()
    {
        return Some(content.trim().to_string());
    }

    for selector in [".byline", ".author", "[rel=\"author\"]"] {
        if let Ok(elements) = doc.select(selector)
            && let Some(el) = elements.first()
        {
            let text = el.text().trim().to_string();
            if !text.is_empty() && text.chars().count() < 120 {
                return Some(text);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article_page() -> String {
        let body = "It was a dark and stormy night, the rain fell in torrents, \
                    except at occasional intervals, when it was checked by a \
                    violent gust of wind which swept up the streets."
            .repeat(4);
        format!(
            r#"<!DOCTYPE html>
            <html>
            <head>
                <title>The Storm</title>
                <meta name="author" content="E. Bulwer-Lytton">
                <script>analytics();</script>
            </head>
            <body>
                <nav class="menu"><a href="/">Home</a><a href="/about">About</a></nav>
                <div class="sidebar"><a href="/ad">Buy things</a></div>
                <article class="post-content">
                    <p>{}</p>
                    <p>More prose follows, with commas, clauses, and length.</p>
                    <img src="/images/storm.jpg">
                    <a href="/chapter-2">Next chapter</a>
                </article>
                <footer>Copyright</footer>
            </body>
            </html>"#,
            body
        )
    }

    #[test]
    fn test_extracts_article_over_boilerplate() {
        let readable = extract_readable(&article_page(), "https://example.com/book").unwrap();

        assert_eq!(readable.title, Some("The Storm".to_string()));
        assert!(readable.content.contains("dark and stormy"));
        assert!(!readable.content.contains("Buy things"));
    }

    #[test]
    fn test_byline_from_meta() {
        let readable = extract_readable(&article_page(), "https://example.com/book").unwrap();
        assert_eq!(readable.byline, Some("E. Bulwer-Lytton".to_string()));
    }

    #[test]
    fn test_relative_urls_resolved() {
        let readable = extract_readable(&article_page(), "https://example.com/book").unwrap();

        assert!(readable.content.contains("https://example.com/images/storm.jpg"));
        assert!(readable.content.contains("https://example.com/chapter-2"));
    }

    #[test]
    fn test_empty_document_is_no_content() {
        let result = extract_readable("<html><body></body></html>", "https://example.com");
        assert!(matches!(result, Err(LegendaError::NoContent)));
    }

    #[test]
    fn test_navigation_page_is_no_content() {
        let html = r#"<html><body><div class="menu">
            <a href="/a">One</a> <a href="/b">Two</a> <a href="/c">Three</a>
        </div></body></html>"#;
        let result = extract_readable(html, "https://example.com");
        assert!(matches!(result, Err(LegendaError::NoContent)));
    }

    #[test]
    fn test_scripts_removed() {
        let readable = extract_readable(&article_page(), "https://example.com/book").unwrap();
        assert!(!readable.content.contains("analytics"));
    }

    #[test]
    fn test_invalid_origin_url_keeps_relative_links() {
        let readable = extract_readable(&article_page(), "not a url").unwrap();
        assert!(readable.content.contains(r#"src="/images/storm.jpg""#));
    }

    #[test]
    fn test_link_density_penalizes_navigation() {
        let html = r#"<div class="content"><a href="/x">all of this text is one link and nothing else at all</a></div>"#;
        let doc = Document::parse(&strip_noise(html));
        let div = doc.select("div").unwrap().into_iter().next().unwrap();
        assert!(link_density(&div) > 0.9);
    }
}
