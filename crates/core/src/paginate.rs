//! Fixed-size character pagination of cached article HTML.
//!
//! Slicing is by raw character offset, so a page boundary may split an HTML
//! tag. That is an accepted limitation of the wire contract: the front end
//! stitches pages back together before rendering, and concatenating all
//! pages in order reconstructs the input exactly.

use serde::{Deserialize, Serialize};

/// One page of article content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number requested.
    pub page: usize,
    /// Characters per page.
    pub page_size: usize,
    /// Total number of pages at this page size.
    pub total_pages: usize,
    /// The characters of this page; empty past the last page.
    pub content: String,
}

/// Slices `html` into its `page`-th window of `page_size` characters.
///
/// `page` and `page_size` are clamped to a minimum of 1. Requesting a page
/// beyond the last returns an empty `content` with the same `total_pages`.
///
/// # Example
///
/// ```rust
/// use legenda_core::paginate::paginate;
///
/// let page = paginate("abcdef", 2, 4);
/// assert_eq!(page.total_pages, 2);
/// assert_eq!(page.content, "ef");
/// ```
pub fn paginate(html: &str, page: usize, page_size: usize) -> Page {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let total_chars = html.chars().count();
    let total_pages = total_chars.div_ceil(page_size);
    let offset = (page - 1) * page_size;

    let content: String = html.chars().skip(offset).take(page_size).collect();

    Page { page, page_size, total_pages, content }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_reconstruct_input() {
        let html = "<p>0123456789</p>".repeat(17);
        let page_size = 23;
        let total_pages = paginate(&html, 1, page_size).total_pages;

        let mut rebuilt = String::new();
        for page in 1..=total_pages {
            rebuilt.push_str(&paginate(&html, page, page_size).content);
        }
        assert_eq!(rebuilt, html);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(paginate(&"x".repeat(250), 1, 100).total_pages, 3);
        assert_eq!(paginate(&"x".repeat(200), 1, 100).total_pages, 2);
        assert_eq!(paginate("", 1, 100).total_pages, 0);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = paginate(&"x".repeat(250), 4, 100);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.content, "");
    }

    #[test]
    fn test_middle_page_slice() {
        let html: String = ('a'..='z').cycle().take(250).collect();
        let page = paginate(&html, 2, 100);

        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 100);
        assert_eq!(page.total_pages, 3);
        let expected: String = html.chars().skip(100).take(100).collect();
        assert_eq!(page.content, expected);
    }

    #[test]
    fn test_slices_by_characters_not_bytes() {
        let html = "é".repeat(10);
        let page = paginate(&html, 2, 4);
        assert_eq!(page.content.chars().count(), 4);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn test_boundary_may_split_a_tag() {
        let page = paginate("<p>hello</p>", 1, 5);
        assert_eq!(page.content, "<p>he");
    }

    #[test]
    fn test_zero_inputs_clamped() {
        let page = paginate("abc", 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.content, "a");
    }

    #[test]
    fn test_serialized_field_names() {
        let page = paginate("abc", 1, 2);
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("pageSize").is_some());
        assert!(json.get("totalPages").is_some());
    }
}
