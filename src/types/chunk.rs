//! Chunk type definitions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::{SeparatorKind, StrategyTag};
use super::document::Span;

/// One structural step in the derivation of a recursive chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    /// The separator level that produced the span
    pub level: SeparatorKind,
    /// The span carved out at that level
    pub span: Span,
}

/// A contiguous, addressable slice of a document's text.
///
/// Chunks are the unit of downstream indexing; every chunk addresses
/// back into the document it came from via `[start_offset, end_offset)`
/// in character units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position within the output sequence (0-based, assigned by the engine)
    pub index: usize,

    /// Id of the document this chunk was cut from
    pub document_id: Uuid,

    /// Starting character offset in the document's raw text (inclusive)
    pub start_offset: usize,

    /// Ending character offset in the document's raw text (exclusive)
    pub end_offset: usize,

    /// The chunk text, exactly `raw_text[start_offset..end_offset]`
    pub text: String,

    /// Measured size under the strategy's configured unit
    pub unit_count: usize,

    /// The strategy that produced this chunk
    pub strategy_tag: StrategyTag,

    /// Units shared with the preceding chunk (0 at the first boundary)
    pub overlap_prev: usize,

    /// Units shared with the following chunk (0 at the last boundary)
    pub overlap_next: usize,

    /// The chain of structural spans this chunk was carved from.
    /// Populated only by the recursive strategy; empty otherwise.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub structural_path: Vec<PathSegment>,
}

impl Chunk {
    /// The chunk's span within the document.
    pub fn span(&self) -> Span {
        Span::new(self.start_offset, self.end_offset)
    }

    /// Length of the chunk in characters.
    pub fn len_chars(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    pub fn is_empty(&self) -> bool {
        self.end_offset <= self.start_offset
    }
}
