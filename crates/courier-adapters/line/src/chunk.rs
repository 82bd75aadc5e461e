//! Splitting long text into message-sized pieces.

use std::iter::FusedIterator;

/// Longest chunk sent as one text bubble.
pub const MAX_CHUNK_LENGTH: usize = 320;

/// Splits `text` into chunks of at most `max` characters.
///
/// Splits happen on whitespace, which is dropped at the boundaries. A single
/// word longer than `max` becomes its own oversized chunk rather than being
/// cut in half.
pub fn chunk_text(text: &str, max: usize) -> Chunks<'_> {
    Chunks {
        rest: text,
        max: max.max(1),
    }
}

/// Iterator returned by [`chunk_text`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    max: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest.trim_start();
        if rest.is_empty() {
            self.rest = rest;
            return None;
        }

        // Byte offset of the first character past the window, if any.
        let Some((boundary, next)) = rest.char_indices().nth(self.max) else {
            self.rest = "";
            return Some(rest.trim_end());
        };

        let window = &rest[..boundary];
        let split = if next.is_whitespace() {
            boundary
        } else {
            match window.rfind(char::is_whitespace) {
                Some(pos) => pos,
                // One word fills the whole window: emit it whole.
                None => rest.find(char::is_whitespace).unwrap_or(rest.len()),
            }
        };

        self.rest = &rest[split..];
        Some(rest[..split].trim_end())
    }
}

impl FusedIterator for Chunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunk_text("Hello world", 320).collect::<Vec<_>>(), ["Hello world"]);
    }

    #[test]
    fn test_splits_on_word_boundaries() {
        let text = "blok ".repeat(100);
        let chunks: Vec<_> = chunk_text(&text, MAX_CHUNK_LENGTH).collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 319);
        assert_eq!(chunks[1].len(), 179);
        assert!(chunks.iter().all(|c| c.split(' ').all(|word| word == "blok")));
    }

    #[test]
    fn test_chunks_never_exceed_max() {
        let text = "lorem ipsum dolor sit amet consectetur ".repeat(40);
        for chunk in chunk_text(&text, 50) {
            assert!(chunk.chars().count() <= 50, "{chunk:?}");
            assert!(!chunk.starts_with(' ') && !chunk.ends_with(' '));
        }
        let rebuilt: Vec<_> = chunk_text(&text, 50).collect();
        assert_eq!(rebuilt.join(" "), text.trim_end());
    }

    #[test]
    fn test_split_exactly_at_whitespace() {
        let chunks: Vec<_> = chunk_text("abcd efgh", 4).collect();
        assert_eq!(chunks, ["abcd", "efgh"]);
    }

    #[test]
    fn test_oversized_word_is_kept_whole() {
        let long = "x".repeat(10);
        let text = format!("ab {long} cd");
        let chunks: Vec<_> = chunk_text(&text, 4).collect();
        assert_eq!(chunks, ["ab", long.as_str(), "cd"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let text = "ねこ ".repeat(4);
        let chunks: Vec<_> = chunk_text(&text, 5).collect();
        assert_eq!(chunks, ["ねこ ねこ", "ねこ ねこ"]);
    }

    #[test]
    fn test_whitespace_only_yields_nothing() {
        assert_eq!(chunk_text("   \n ", 320).count(), 0);
        assert_eq!(chunk_text("", 320).count(), 0);
    }
}
