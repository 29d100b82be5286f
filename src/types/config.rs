//! Configuration types for segmentation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ChunkingError;
use crate::measure::SizeUnit;
use crate::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_DOCUMENT_CHARS};

/// Identifies the strategy that produced a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    FixedSize,
    SlidingWindow,
    SentenceBased,
    Recursive,
}

impl StrategyTag {
    /// Every strategy, in catalog order.
    pub const ALL: [StrategyTag; 4] = [
        StrategyTag::FixedSize,
        StrategyTag::SlidingWindow,
        StrategyTag::SentenceBased,
        StrategyTag::Recursive,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyTag::FixedSize => "fixed_size",
            StrategyTag::SlidingWindow => "sliding_window",
            StrategyTag::SentenceBased => "sentence_based",
            StrategyTag::Recursive => "recursive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyTag::FixedSize => {
                "Splits text into chunks of a fixed unit length with optional overlap"
            }
            StrategyTag::SlidingWindow => {
                "Emits windows of fixed length at a fixed stride, overlapping or gapped"
            }
            StrategyTag::SentenceBased => {
                "Groups whole sentences into chunks, never cutting inside a sentence"
            }
            StrategyTag::Recursive => {
                "Splits along document structure first, falling back to size cuts only as a last resort"
            }
        }
    }

    pub fn pros(&self) -> &'static [&'static str] {
        match self {
            StrategyTag::FixedSize => &[
                "Predictable chunk sizes",
                "Simple and fast",
                "Uniform memory profile",
            ],
            StrategyTag::SlidingWindow => &[
                "Controlled overlap preserves cross-boundary context",
                "Stride is tunable independently of window size",
            ],
            StrategyTag::SentenceBased => &[
                "Preserves sentence integrity",
                "Natural boundaries for downstream NLP",
            ],
            StrategyTag::Recursive => &[
                "Respects headings and paragraphs",
                "Adapts to document structure",
                "Hard upper bound on chunk size",
            ],
        }
    }

    pub fn cons(&self) -> &'static [&'static str] {
        match self {
            StrategyTag::FixedSize => &[
                "May cut sentences and words",
                "Ignores document structure",
            ],
            StrategyTag::SlidingWindow => &[
                "Duplicated text raises storage cost",
                "Stride larger than window leaves gaps",
            ],
            StrategyTag::SentenceBased => &[
                "Variable chunk sizes",
                "A single long sentence can exceed the upper bound",
            ],
            StrategyTag::Recursive => &[
                "Variable chunk sizes",
                "Needs structural markers to shine",
            ],
        }
    }
}

impl fmt::Display for StrategyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A structural level the recursive strategy may split at, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorKind {
    Heading,
    Paragraph,
    Sentence,
    FixedSize,
}

impl SeparatorKind {
    /// The default separator priority: structure before sentences before
    /// hard size cuts.
    pub fn default_order() -> Vec<SeparatorKind> {
        vec![
            SeparatorKind::Heading,
            SeparatorKind::Paragraph,
            SeparatorKind::Sentence,
            SeparatorKind::FixedSize,
        ]
    }
}

impl fmt::Display for SeparatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeparatorKind::Heading => "heading",
            SeparatorKind::Paragraph => "paragraph",
            SeparatorKind::Sentence => "sentence",
            SeparatorKind::FixedSize => "fixed_size",
        };
        f.write_str(name)
    }
}

/// Strategy selection and parameters for one chunking call.
///
/// A closed set of variants: the engine matches exhaustively, so adding a
/// strategy is a compile-time-checked extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Consecutive runs of `size` units, each chunk starting `overlap`
    /// units before the previous chunk's end.
    FixedSize {
        size: usize,
        #[serde(default)]
        overlap: usize,
        #[serde(default)]
        unit: SizeUnit,
    },

    /// Windows of `window` units emitted at starts 0, stride, 2*stride, ...
    /// `stride > window` is legal and produces gaps.
    SlidingWindow {
        window: usize,
        stride: usize,
        #[serde(default)]
        unit: SizeUnit,
    },

    /// Greedy grouping of whole sentences, bounded by sentence count and
    /// character length. Closed chunks below `min_chars` merge backward.
    SentenceBased {
        max_sentences: usize,
        #[serde(default)]
        min_chars: usize,
        max_chars: usize,
    },

    /// Top-down structural splitting through `separators`, with a zero-
    /// overlap fixed-size cut as the terminal splitter.
    Recursive {
        #[serde(default = "SeparatorKind::default_order")]
        separators: Vec<SeparatorKind>,
        max_chunk_size: usize,
        #[serde(default)]
        unit: SizeUnit,
    },
}

impl StrategyConfig {
    /// The tag stamped onto chunks produced under this configuration.
    pub fn tag(&self) -> StrategyTag {
        match self {
            StrategyConfig::FixedSize { .. } => StrategyTag::FixedSize,
            StrategyConfig::SlidingWindow { .. } => StrategyTag::SlidingWindow,
            StrategyConfig::SentenceBased { .. } => StrategyTag::SentenceBased,
            StrategyConfig::Recursive { .. } => StrategyTag::Recursive,
        }
    }

    /// Check every configuration invariant, before any chunk is produced.
    pub fn validate(&self) -> Result<(), ChunkingError> {
        match *self {
            StrategyConfig::FixedSize { size, overlap, .. } => {
                if size == 0 {
                    return Err(ChunkingError::NotPositive { field: "size" });
                }
                if overlap >= size {
                    return Err(ChunkingError::OverlapTooLarge { size, overlap });
                }
                Ok(())
            }
            StrategyConfig::SlidingWindow { window, stride, .. } => {
                if window == 0 {
                    return Err(ChunkingError::NotPositive { field: "window" });
                }
                if stride == 0 {
                    return Err(ChunkingError::NotPositive { field: "stride" });
                }
                // stride > window is a documented gap-producing configuration,
                // deliberately not rejected.
                Ok(())
            }
            StrategyConfig::SentenceBased {
                max_sentences,
                min_chars,
                max_chars,
            } => {
                if max_sentences == 0 {
                    return Err(ChunkingError::NotPositive { field: "max_sentences" });
                }
                if max_chars == 0 {
                    return Err(ChunkingError::NotPositive { field: "max_chars" });
                }
                if min_chars > max_chars {
                    return Err(ChunkingError::MinAboveMax { min_chars, max_chars });
                }
                Ok(())
            }
            StrategyConfig::Recursive { max_chunk_size, .. } => {
                if max_chunk_size == 0 {
                    return Err(ChunkingError::NotPositive { field: "max_chunk_size" });
                }
                Ok(())
            }
        }
    }
}

/// Service-level configuration, read from the environment at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Default chunk size in characters, used when a request omits a config
    pub default_chunk_size: usize,

    /// Default chunk overlap in characters
    pub default_chunk_overlap: usize,

    /// Largest document the service accepts, in characters
    pub max_document_chars: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_chunk_size: DEFAULT_CHUNK_SIZE,
            default_chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            max_document_chars: DEFAULT_MAX_DOCUMENT_CHARS,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            default_chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_SIZE),
            default_chunk_overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_CHUNK_OVERLAP),
            max_document_chars: std::env::var("MAX_DOCUMENT_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_DOCUMENT_CHARS),
        }
    }

    /// The strategy used when a request does not name one.
    pub fn default_strategy(&self) -> StrategyConfig {
        StrategyConfig::FixedSize {
            size: self.default_chunk_size,
            overlap: self.default_chunk_overlap,
            unit: SizeUnit::Char,
        }
    }
}
