//! Chunking engine façade.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chunkers::{
    FixedSizeChunker, RecursiveChunker, SegmentContext, SentenceChunker, SlidingWindowChunker,
};
use crate::error::ChunkingError;
use crate::measure::{TiktokenCounter, UnitCounter};
use crate::splitters::{MarkerSplitter, SentenceSplitter, StructuralSplitter, UnicodeSentenceSplitter};
use crate::types::{Chunk, Document, StrategyConfig};

/// Aggregate statistics over one chunk sequence. A side artifact of the
/// call, never part of the sequence itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub count: usize,
    pub total_units: usize,
    pub min_units: usize,
    pub max_units: usize,
    pub mean_units: f64,
}

impl ChunkStats {
    fn from_chunks(chunks: &[Chunk]) -> Self {
        if chunks.is_empty() {
            return Self { count: 0, total_units: 0, min_units: 0, max_units: 0, mean_units: 0.0 };
        }
        let count = chunks.len();
        let total_units: usize = chunks.iter().map(|c| c.unit_count).sum();
        Self {
            count,
            total_units,
            min_units: chunks.iter().map(|c| c.unit_count).min().unwrap_or(0),
            max_units: chunks.iter().map(|c| c.unit_count).max().unwrap_or(0),
            mean_units: total_units as f64 / count as f64,
        }
    }
}

/// The result of one chunking call.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkOutput {
    pub chunks: Vec<Chunk>,
    pub stats: ChunkStats,
}

/// Dispatches a validated strategy configuration to its implementation.
///
/// The engine owns the injected capabilities (unit counter, sentence
/// splitter, structural splitter) and holds no per-call state: identical
/// `(document, config)` inputs always produce identical chunk sequences,
/// and independent calls may run fully in parallel.
pub struct ChunkingEngine {
    token_counter: Arc<dyn UnitCounter>,
    sentence_splitter: Arc<dyn SentenceSplitter>,
    structural_splitter: Arc<dyn StructuralSplitter>,
}

impl ChunkingEngine {
    /// Engine with the default capabilities: the shared tiktoken counter,
    /// UAX #29 sentence splitting, and marker-based structural splitting.
    pub fn new() -> Self {
        Self {
            token_counter: TiktokenCounter::shared(),
            sentence_splitter: Arc::new(UnicodeSentenceSplitter),
            structural_splitter: Arc::new(MarkerSplitter),
        }
    }

    /// Replace the token counter used for the `token` unit.
    pub fn with_token_counter(mut self, counter: Arc<dyn UnitCounter>) -> Self {
        self.token_counter = counter;
        self
    }

    /// Replace the sentence splitter.
    pub fn with_sentence_splitter(mut self, splitter: Arc<dyn SentenceSplitter>) -> Self {
        self.sentence_splitter = splitter;
        self
    }

    /// Replace the structural splitter.
    pub fn with_structural_splitter(mut self, splitter: Arc<dyn StructuralSplitter>) -> Self {
        self.structural_splitter = splitter;
        self
    }

    /// Partition a document into an ordered chunk sequence.
    ///
    /// Fails fast on an invalid configuration, before any chunk is
    /// produced. An empty document yields an empty sequence, not an error.
    pub fn chunk(
        &self,
        document: &Document,
        config: &StrategyConfig,
    ) -> Result<ChunkOutput, ChunkingError> {
        config.validate()?;

        if document.raw_text.is_empty() {
            return Ok(ChunkOutput { chunks: Vec::new(), stats: ChunkStats::from_chunks(&[]) });
        }

        let cx = SegmentContext::new(document, Arc::clone(&self.token_counter));

        let mut chunks = match config {
            StrategyConfig::FixedSize { size, overlap, unit } => {
                FixedSizeChunker::new(*size, *overlap, *unit).chunk(&cx)
            }
            StrategyConfig::SlidingWindow { window, stride, unit } => {
                SlidingWindowChunker::new(*window, *stride, *unit).chunk(&cx)
            }
            StrategyConfig::SentenceBased { max_sentences, min_chars, max_chars } => {
                SentenceChunker::new(*max_sentences, *min_chars, *max_chars)
                    .chunk(&cx, self.sentence_splitter.as_ref())
            }
            StrategyConfig::Recursive { separators, max_chunk_size, unit } => RecursiveChunker {
                separators: separators.as_slice(),
                max_chunk_size: *max_chunk_size,
                unit: *unit,
            }
            .chunk(&cx, self.sentence_splitter.as_ref(), self.structural_splitter.as_ref()),
        };

        for (index, chunk) in chunks.iter_mut().enumerate() {
            chunk.index = index;
        }
        let stats = ChunkStats::from_chunks(&chunks);

        debug!(
            document_id = %document.id,
            strategy = %config.tag(),
            chunks = stats.count,
            "chunked document"
        );

        Ok(ChunkOutput { chunks, stats })
    }
}

impl Default for ChunkingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{CharCounter, SizeUnit};
    use crate::types::StrategyTag;

    fn char_engine() -> ChunkingEngine {
        // The token unit is unused here; the trivial counter keeps tests
        // independent of any tokenizer.
        ChunkingEngine::new().with_token_counter(Arc::new(CharCounter))
    }

    fn fixed(size: usize, overlap: usize) -> StrategyConfig {
        StrategyConfig::FixedSize { size, overlap, unit: SizeUnit::Char }
    }

    #[test]
    fn test_invalid_config_produces_no_chunks() {
        let engine = char_engine();
        let doc = Document::new("some text that would otherwise chunk fine");
        let result = engine.chunk(&doc, &fixed(10, 10));
        assert_eq!(
            result.unwrap_err(),
            ChunkingError::OverlapTooLarge { size: 10, overlap: 10 }
        );
    }

    #[test]
    fn test_empty_document_is_not_an_error() {
        let engine = char_engine();
        let doc = Document::new("");
        let output = engine.chunk(&doc, &fixed(10, 0)).unwrap();
        assert!(output.chunks.is_empty());
        assert_eq!(output.stats.count, 0);
    }

    #[test]
    fn test_indices_are_sequential() {
        let engine = char_engine();
        let doc = Document::new("abcdefghijklmnopqrstuvwxyz");
        let output = engine.chunk(&doc, &fixed(5, 0)).unwrap();
        for (i, chunk) in output.chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
        }
    }

    #[test]
    fn test_chunks_carry_document_id_and_tag() {
        let engine = char_engine();
        let doc = Document::new("abcdefghij");
        let output = engine.chunk(&doc, &fixed(4, 0)).unwrap();
        assert!(output
            .chunks
            .iter()
            .all(|c| c.document_id == doc.id && c.strategy_tag == StrategyTag::FixedSize));
    }

    #[test]
    fn test_determinism() {
        let engine = char_engine();
        let doc = Document::from_markdown("# A\n\nOne two three. Four five six.\n\n# B\n\nSeven.");
        let config = StrategyConfig::Recursive {
            separators: crate::types::SeparatorKind::default_order(),
            max_chunk_size: 12,
            unit: SizeUnit::Char,
        };

        let first = engine.chunk(&doc, &config).unwrap();
        let second = engine.chunk(&doc, &config).unwrap();
        assert_eq!(first.chunks, second.chunks);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_stats_aggregation() {
        let engine = char_engine();
        let doc = Document::new("abcdefghij");
        let output = engine.chunk(&doc, &fixed(4, 0)).unwrap();

        // Chunks of 4, 4, and 2 chars.
        assert_eq!(output.stats.count, 3);
        assert_eq!(output.stats.total_units, 10);
        assert_eq!(output.stats.min_units, 2);
        assert_eq!(output.stats.max_units, 4);
        assert!((output.stats.mean_units - 10.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_sentence_strategy_dispatch() {
        let engine = char_engine();
        let doc = Document::new("First sentence. Second sentence. Third sentence.");
        let config = StrategyConfig::SentenceBased {
            max_sentences: 2,
            min_chars: 0,
            max_chars: 1000,
        };
        let output = engine.chunk(&doc, &config).unwrap();

        assert!(output.chunks.iter().all(|c| c.strategy_tag == StrategyTag::SentenceBased));
        let rebuilt: String = output.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, doc.raw_text);
    }
}
