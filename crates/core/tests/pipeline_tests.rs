//! Public API integration tests for the content pipeline.
use legenda_core::*;

fn article_html() -> String {
    let prose = "The quick brown fox jumps over the lazy dog, pauses, and considers \
                 whether the dog was ever truly lazy, or merely patient."
        .repeat(5);
    format!(
        r#"<html>
        <head><title>Fox and Dog</title><meta name="author" content="A. Fable"></head>
        <body>
            <header class="menu"><a href="/">Home</a></header>
            <article class="post">
                <p>{}</p>
                <p>A second paragraph closes the argument, briefly.</p>
            </article>
        </body>
        </html>"#,
        prose
    )
}

#[test]
fn test_extract_then_estimate() {
    let readable = extract_readable(&article_html(), "https://example.com/fox").expect("should extract");
    assert_eq!(readable.title, Some("Fox and Dog".to_string()));
    assert_eq!(readable.byline, Some("A. Fable".to_string()));

    let text = body_text(&readable.content);
    let estimate = estimate_reading_time(&text);
    assert!(estimate.words > 50);
    assert!(estimate.minutes > 0.0);
}

#[test]
fn test_extract_then_summarize() {
    let readable = extract_readable(&article_html(), "https://example.com/fox").expect("should extract");
    let sentences = summarize(&readable.content, 3);

    assert!(!sentences.is_empty());
    assert!(sentences.len() <= 3);
    for sentence in &sentences {
        assert!(!sentence.contains('<'));
    }
}

#[test]
fn test_extract_then_paginate_round_trip() {
    let readable = extract_readable(&article_html(), "https://example.com/fox").expect("should extract");

    let page_size = 100;
    let first = paginate(&readable.content, 1, page_size);
    assert_eq!(first.total_pages, readable.content.chars().count().div_ceil(page_size));

    let mut rebuilt = String::new();
    for page in 1..=first.total_pages {
        rebuilt.push_str(&paginate(&readable.content, page, page_size).content);
    }
    assert_eq!(rebuilt, readable.content);
}

#[test]
fn test_generated_ids_sort_in_creation_order() {
    let ids: Vec<String> = (0..10).map(|_| generate_id()).collect();
    let mut sorted_prefixes: Vec<&str> = ids.iter().map(|id| &id[..id::ID_PREFIX_LENGTH]).collect();
    let original_prefixes = sorted_prefixes.clone();
    sorted_prefixes.sort();
    assert_eq!(sorted_prefixes, original_prefixes);
}

#[test]
fn test_unreadable_page_errors_cleanly() {
    let result = extract_readable("<html><body><nav></nav></body></html>", "https://example.com");
    assert!(matches!(result, Err(LegendaError::NoContent)));
}
