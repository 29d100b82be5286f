//! Segmenter Service Library
//!
//! A deterministic document-segmentation engine for RAG pipelines.
//! Partitions extracted text (plus optional structural annotations) into an
//! ordered chunk sequence under one of four interchangeable strategies:
//! fixed-size, sliding-window, sentence-based, and recursive/structural.

pub mod api;
pub mod chunkers;
pub mod engine;
pub mod error;
pub mod measure;
pub mod splitters;
pub mod types;

pub use engine::{ChunkOutput, ChunkStats, ChunkingEngine};
pub use error::ChunkingError;
pub use measure::{CharCounter, SizeUnit, TiktokenCounter, UnitCounter};
pub use splitters::{SentenceSplitter, StructuralSplitter};
pub use types::{Chunk, Document, StrategyConfig, StrategyTag};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::engine::{ChunkOutput, ChunkStats, ChunkingEngine};
    pub use crate::error::ChunkingError;
    pub use crate::measure::*;
    pub use crate::splitters::*;
    pub use crate::types::*;
}

/// Default chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default chunk overlap in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Maximum document size accepted at the service boundary, in characters
pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 10 * 1024 * 1024;
