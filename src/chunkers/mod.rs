//! Chunking strategy implementations.
//!
//! One file per strategy; `base` holds the per-call context they share.
//! Dispatch lives in the engine façade, which matches exhaustively on the
//! strategy configuration.

mod base;
mod fixed_size_chunker;
mod recursive_chunker;
mod sentence_chunker;
mod sliding_window_chunker;

pub(crate) use base::SegmentContext;
pub use fixed_size_chunker::FixedSizeChunker;
pub use recursive_chunker::RecursiveChunker;
pub use sentence_chunker::SentenceChunker;
pub use sliding_window_chunker::SlidingWindowChunker;
