//! Fixed-size chunking with optional overlap.

use crate::measure::SizeUnit;
use crate::types::{Chunk, Span, StrategyTag};

use super::base::SegmentContext;

/// Cuts consecutive runs of `size` units; each subsequent chunk starts
/// `overlap` units before the previous chunk's end. The final chunk may be
/// shorter than `size` and is always emitted.
pub struct FixedSizeChunker {
    pub size: usize,
    pub overlap: usize,
    pub unit: SizeUnit,
}

impl FixedSizeChunker {
    pub fn new(size: usize, overlap: usize, unit: SizeUnit) -> Self {
        Self { size, overlap, unit }
    }

    /// Raw spans over `region`, left to right. Also serves as the terminal
    /// splitter for recursive chunking (with `overlap = 0`).
    pub(crate) fn spans(&self, cx: &SegmentContext, region: Span) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut start = region.start;

        while start < region.end {
            let end = cx.advance(start, self.size, self.unit).min(region.end);
            spans.push(Span::new(start, end));
            if end >= region.end {
                break;
            }
            let mut next = if self.overlap > 0 {
                cx.retreat(end, self.overlap, self.unit)
            } else {
                end
            };
            // Forward progress must hold even when overlap back-off lands
            // at or before the current start.
            if next <= start {
                next = end;
            }
            start = next;
        }

        spans
    }

    pub(crate) fn chunk(&self, cx: &SegmentContext) -> Vec<Chunk> {
        let region = Span::new(0, cx.len_chars());
        let spans = self.spans(cx, region);
        let total = spans.len();

        spans
            .into_iter()
            .enumerate()
            .map(|(i, span)| {
                let mut chunk = cx.make_chunk(StrategyTag::FixedSize, span, self.unit);
                chunk.overlap_prev = if i == 0 { 0 } else { self.overlap };
                chunk.overlap_next = if i + 1 == total { 0 } else { self.overlap };
                chunk
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::base::test_support::{char_context, word_context};
    use super::*;
    use crate::types::Document;

    #[test]
    fn test_exact_boundaries_without_overlap() {
        let doc = Document::new("This is a sample text for chunking demonstration.");
        let cx = char_context(&doc);
        let chunks = FixedSizeChunker::new(10, 0, SizeUnit::Char).chunk(&cx);

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["This is a ", "sample tex", "t for chun", "king demon", "stration."]
        );
        let offsets: Vec<(usize, usize)> =
            chunks.iter().map(|c| (c.start_offset, c.end_offset)).collect();
        assert_eq!(offsets, vec![(0, 10), (10, 20), (20, 30), (30, 40), (40, 49)]);
    }

    #[test]
    fn test_roundtrip_without_overlap() {
        let doc = Document::new("abcdefghijklmnopqrstuvwxyz0123456789");
        let cx = char_context(&doc);
        let chunks = FixedSizeChunker::new(7, 0, SizeUnit::Char).chunk(&cx);

        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, doc.raw_text);
    }

    #[test]
    fn test_overlap_exactness() {
        let doc = Document::new("abcdefghijklmnopqrstuvwxy");
        assert_eq!(doc.raw_text.len(), 25);
        let cx = char_context(&doc);
        let chunks = FixedSizeChunker::new(10, 3, SizeUnit::Char).chunk(&cx);

        assert!(chunks.len() > 1);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].text.chars().rev().take(3).collect::<Vec<_>>()
                .into_iter().rev().collect();
            let head: String = pair[1].text.chars().take(3).collect();
            assert_eq!(tail, head);
        }
    }

    #[test]
    fn test_overlap_metadata() {
        let doc = Document::new("abcdefghijklmnopqrstuvwxy");
        let cx = char_context(&doc);
        let chunks = FixedSizeChunker::new(10, 3, SizeUnit::Char).chunk(&cx);

        let first = chunks.first().unwrap();
        let last = chunks.last().unwrap();
        assert_eq!(first.overlap_prev, 0);
        assert_eq!(first.overlap_next, 3);
        assert_eq!(last.overlap_prev, 3);
        assert_eq!(last.overlap_next, 0);
        for chunk in &chunks[1..chunks.len() - 1] {
            assert_eq!(chunk.overlap_prev, 3);
            assert_eq!(chunk.overlap_next, 3);
        }
    }

    #[test]
    fn test_short_final_chunk_kept() {
        let doc = Document::new("abcdefghij12");
        let cx = char_context(&doc);
        let chunks = FixedSizeChunker::new(10, 0, SizeUnit::Char).chunk(&cx);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].text, "12");
        assert_eq!(chunks[1].unit_count, 2);
    }

    #[test]
    fn test_token_unit_boundaries() {
        let doc = Document::new("alpha beta gamma delta");
        let cx = word_context(&doc);
        let chunks = FixedSizeChunker::new(2, 0, SizeUnit::Token).chunk(&cx);

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha beta ", "gamma delta"]);
        assert!(chunks.iter().all(|c| c.unit_count <= 2));
        let rebuilt: String = texts.concat();
        assert_eq!(rebuilt, doc.raw_text);
    }

    #[test]
    fn test_unit_count_measured_per_unit() {
        let doc = Document::new("aaaa bbbb cccc");
        let cx = word_context(&doc);
        let chunks = FixedSizeChunker::new(5, 0, SizeUnit::Char).chunk(&cx);
        assert!(chunks.iter().all(|c| c.unit_count == c.len_chars()));
    }
}
