//! Size units, unit counters, and character-offset addressing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::Span;

/// The measurement granularity for chunk sizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeUnit {
    /// Count characters
    #[default]
    Char,
    /// Count tokens via the injected `UnitCounter`
    Token,
}

/// Capability: measure the length of a text slice in some unit.
///
/// Implementations must be pure; the engine calls `measure` repeatedly
/// while translating unit budgets into character ranges.
pub trait UnitCounter: Send + Sync {
    fn measure(&self, text: &str) -> usize;
}

/// Counts characters. The trivial counter for the `char` unit.
pub struct CharCounter;

impl UnitCounter for CharCounter {
    fn measure(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// Token counter backed by tiktoken (cl100k_base encoding).
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    /// Create a counter with the cl100k_base encoding (GPT-4 / embeddings).
    pub fn new() -> Self {
        let bpe = tiktoken_rs::cl100k_base().expect("Failed to load cl100k_base encoding");
        Self { bpe }
    }

    /// Shared process-wide instance; the BPE table is loaded once.
    pub fn shared() -> Arc<TiktokenCounter> {
        lazy_static::lazy_static! {
            static ref SHARED: Arc<TiktokenCounter> = Arc::new(TiktokenCounter::new());
        }
        Arc::clone(&SHARED)
    }
}

impl Default for TiktokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitCounter for TiktokenCounter {
    fn measure(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}

/// Prefix table mapping character offsets to byte offsets.
///
/// Built once per chunking call so span slicing and offset translation
/// never re-scan the document.
pub struct CharMap {
    byte_of: Vec<usize>,
    total_bytes: usize,
}

impl CharMap {
    pub fn new(text: &str) -> Self {
        Self {
            byte_of: text.char_indices().map(|(b, _)| b).collect(),
            total_bytes: text.len(),
        }
    }

    /// Total length of the mapped text in characters.
    pub fn len_chars(&self) -> usize {
        self.byte_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.byte_of.is_empty()
    }

    /// Byte offset of the given character offset. The one-past-the-end
    /// character offset maps to the total byte length.
    pub fn byte_offset(&self, char_offset: usize) -> usize {
        match self.byte_of.get(char_offset) {
            Some(&b) => b,
            None => self.total_bytes,
        }
    }

    /// Character offset containing the given byte offset.
    pub fn char_offset(&self, byte_offset: usize) -> usize {
        self.byte_of.partition_point(|&b| b < byte_offset)
    }

    /// Slice `text` by a character-unit span.
    pub fn slice<'a>(&self, text: &'a str, span: Span) -> &'a str {
        &text[self.byte_offset(span.start)..self.byte_offset(span.end)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_counter() {
        assert_eq!(CharCounter.measure(""), 0);
        assert_eq!(CharCounter.measure("hello"), 5);
        // Characters, not bytes.
        assert_eq!(CharCounter.measure("héllo"), 5);
    }

    #[test]
    fn test_char_map_ascii() {
        let text = "hello world";
        let map = CharMap::new(text);
        assert_eq!(map.len_chars(), 11);
        assert_eq!(map.byte_offset(6), 6);
        assert_eq!(map.byte_offset(11), 11);
        assert_eq!(map.slice(text, Span::new(6, 11)), "world");
    }

    #[test]
    fn test_char_map_multibyte() {
        let text = "aé漢x";
        let map = CharMap::new(text);
        assert_eq!(map.len_chars(), 4);
        assert_eq!(map.byte_offset(0), 0);
        assert_eq!(map.byte_offset(1), 1);
        assert_eq!(map.byte_offset(2), 3);
        assert_eq!(map.byte_offset(3), 6);
        assert_eq!(map.byte_offset(4), 7);
        assert_eq!(map.slice(text, Span::new(1, 3)), "é漢");
        assert_eq!(map.char_offset(3), 2);
        assert_eq!(map.char_offset(7), 4);
    }

    #[test]
    fn test_empty_map() {
        let map = CharMap::new("");
        assert!(map.is_empty());
        assert_eq!(map.len_chars(), 0);
        assert_eq!(map.byte_offset(0), 0);
    }
}
