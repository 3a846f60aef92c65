//! Verse pagination over lyric text
//!
//! Lyrics are stored as one string with verses separated by line breaks.
//! Splitting follows plain `str::split` semantics, so empty text is a single
//! empty verse and consecutive delimiters produce empty verses.

use serde::Serialize;

use crate::pagination::PageRequest;

/// Delimiter between verses in stored lyrics
pub const VERSE_DELIMITER: &str = "\n";

/// One page of verses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersePage {
    /// Verses on this page (empty when the page is past the end)
    #[serde(rename = "lyrics")]
    pub verses: Vec<String>,
    /// Requested page number (1-indexed)
    pub page: i64,
    /// Number of pages for the whole text
    pub total_pages: u64,
}

/// Split lyric text into ordered verses
pub fn split_verses<'a>(text: &'a str, delimiter: &str) -> Vec<&'a str> {
    text.split(delimiter).collect()
}

/// Slice one page of verses out of `text`
///
/// A page beyond the last verse yields an empty window, not an error.
///
/// # Examples
/// ```
/// use songcat_common::pagination::PageRequest;
/// use songcat_common::verses::{paginate_verses, VERSE_DELIMITER};
///
/// let text = "line1\nline2\nline3\nline4";
/// let page = paginate_verses(text, VERSE_DELIMITER, &PageRequest::new(2, 2).unwrap());
/// assert_eq!(page.verses, vec!["line3", "line4"]);
/// assert_eq!(page.total_pages, 2);
/// ```
pub fn paginate_verses(text: &str, delimiter: &str, request: &PageRequest) -> VersePage {
    let verses = split_verses(text, delimiter);
    let total_verses = verses.len();
    let total_pages = request.total_pages(total_verses as u64);

    // offset() is non-negative for a validated request
    let start = request.offset() as usize;
    let window = if start >= total_verses {
        Vec::new()
    } else {
        let end = (start + request.limit() as usize).min(total_verses);
        verses[start..end].iter().map(|v| v.to_string()).collect()
    };

    VersePage {
        verses: window,
        page: request.page(),
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn req(page: i64, limit: i64) -> PageRequest {
        PageRequest::new(page, limit).unwrap()
    }

    #[test]
    fn test_empty_text_is_one_empty_verse() {
        assert_eq!(split_verses("", VERSE_DELIMITER), vec![""]);

        let page = paginate_verses("", VERSE_DELIMITER, &req(1, 2));
        assert_eq!(page.verses, vec![String::new()]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_last_page_is_partial() {
        let page = paginate_verses("a\nb\nc", VERSE_DELIMITER, &req(2, 2));
        assert_eq!(page.verses, vec!["c"]);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = paginate_verses("a\nb\nc", VERSE_DELIMITER, &req(5, 2));
        assert!(page.verses.is_empty());
        assert_eq!(page.page, 5);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let verses = split_verses("a\n\nb\n", VERSE_DELIMITER);
        assert_eq!(verses, vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_custom_delimiter() {
        let page = paginate_verses("v1\n\nv2\n\nv3", "\n\n", &req(1, 2));
        assert_eq!(page.verses, vec!["v1", "v2"]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_serializes_as_lyrics_field() {
        let page = paginate_verses("x\ny", VERSE_DELIMITER, &req(1, 1));
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["lyrics"], serde_json::json!(["x"]));
        assert_eq!(json["page"], 1);
        assert_eq!(json["total_pages"], 2);
    }

    proptest! {
        #[test]
        fn prop_windows_cover_all_verses(
            lines in proptest::collection::vec("[a-z ]{0,8}", 1..40),
            limit in 1i64..10,
        ) {
            let text = lines.join("\n");
            let total = split_verses(&text, VERSE_DELIMITER).len() as u64;
            let pages = req(1, limit).total_pages(total) as i64;

            let mut rebuilt = Vec::new();
            for page in 1..=pages {
                let window = paginate_verses(&text, VERSE_DELIMITER, &req(page, limit));
                prop_assert!(window.verses.len() as i64 <= limit);
                rebuilt.extend(window.verses);
            }
            prop_assert_eq!(rebuilt, lines);

            let beyond = paginate_verses(&text, VERSE_DELIMITER, &req(pages + 1, limit));
            prop_assert!(beyond.verses.is_empty());
        }

        #[test]
        fn prop_split_is_deterministic(text in ".{0,200}") {
            prop_assert_eq!(
                split_verses(&text, VERSE_DELIMITER),
                split_verses(&text, VERSE_DELIMITER)
            );
        }
    }
}
