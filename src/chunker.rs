//! Fixed-size text chunking.
//!
//! Input text is split into contiguous, non-overlapping substrings of at
//! most K characters, in original order. The split is by character count,
//! not semantic boundaries; multi-byte characters are never split.

use crate::pipeline::GenerationParams;

/// One unit of work for the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the original chunk sequence, for ordered logging.
    pub index: usize,
    pub text: String,
    pub params: GenerationParams,
}

/// Split `text` into chunks of at most `max_chars` characters, dropping
/// chunks that are empty or whitespace-only.
#[must_use]
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<Chunk> {
    assert!(max_chars > 0, "chunk size must be positive");

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;
    let mut index = 0usize;

    let mut push = |buf: &mut String, len: usize, index: &mut usize, out: &mut Vec<Chunk>| {
        if !buf.trim().is_empty() {
            out.push(Chunk {
                index: *index,
                text: std::mem::take(buf),
                params: GenerationParams::for_chunk_len(len),
            });
        } else {
            buf.clear();
        }
        *index += 1;
    };

    for ch in text.chars() {
        current.push(ch);
        count += 1;
        if count == max_chars {
            push(&mut current, count, &mut index, &mut chunks);
            count = 0;
        }
    }

    if count > 0 {
        push(&mut current, count, &mut index, &mut chunks);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_count_matches_ceil_division() {
        let text = "x".repeat(1200);
        let chunks = chunk_text(&text, 512);

        // ceil(1200 / 512) = 3, no whitespace-only chunks.
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text.chars().count(), 512);
        assert_eq!(chunks[1].text.chars().count(), 512);
        assert_eq!(chunks[2].text.chars().count(), 176);
    }

    #[test]
    fn chunks_are_contiguous_and_ordered() {
        let text: String = ('a'..='z').cycle().take(2000).collect();
        let chunks = chunk_text(&text, 512);

        let rejoined: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn whitespace_only_chunks_are_dropped() {
        // Middle chunk is pure whitespace and must not be dispatched.
        let mut text = "a".repeat(8);
        text.push_str(&" ".repeat(8));
        text.push_str(&"b".repeat(8));
        let chunks = chunk_text(&text, 8);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "a".repeat(8));
        assert_eq!(chunks[1].text, "b".repeat(8));
        // Original positions survive the filtering.
        assert_eq!(chunks[0].index, 0);
        assert_eq!(chunks[1].index, 2);
    }

    #[test]
    fn empty_and_whitespace_input_yield_no_chunks() {
        assert!(chunk_text("", 512).is_empty());
        assert!(chunk_text(" \n\t  ", 512).is_empty());
    }

    #[test]
    fn multibyte_characters_count_as_one() {
        let text = "é".repeat(10);
        let chunks = chunk_text(&text, 4);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].text, "é".repeat(4));
        assert_eq!(chunks[2].text, "é".repeat(2));
    }

    #[test]
    fn params_derive_from_chunk_length() {
        let text = "y".repeat(700);
        let chunks = chunk_text(&text, 512);

        assert_eq!(chunks[0].params, GenerationParams::for_chunk_len(512));
        assert_eq!(chunks[1].params, GenerationParams::for_chunk_len(188));
    }
}
