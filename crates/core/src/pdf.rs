//! PDF rendering for plaintext display.
//!
//! Uploaded and remote PDFs are converted to HTML before being cached on
//! the article record: text is pulled out in reading order with
//! `pdf_extract`, then wrapped into escaped `<p>` blocks, one per
//! blank-line-separated chunk.

use crate::{LegendaError, Result};

/// Renders PDF bytes into HTML suitable for plaintext display.
///
/// # Errors
///
/// Returns [`LegendaError::PdfRender`] on malformed PDF input.
pub fn render_pdf_to_html(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| LegendaError::PdfRender(e.to_string()))?;

    Ok(text_to_html(&text))
}

/// Wraps extracted text into paragraph markup.
///
/// Chunks are split on blank lines; single newlines inside a chunk are
/// collapsed, matching how PDF extractors break lines mid-sentence.
fn text_to_html(text: &str) -> String {
    let mut html = String::new();
    for chunk in text.split("\n\n") {
        let paragraph = chunk.split_whitespace().collect::<Vec<_>>().join(" ");
        if paragraph.is_empty() {
            continue;
        }
        html.push_str("<p>");
        html.push_str(&escape_html(&paragraph));
        html.push_str("</p>");
    }
    html
}

/// Escapes the characters that would otherwise open markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
