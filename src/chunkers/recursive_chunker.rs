//! Recursive structural chunking.

use crate::measure::SizeUnit;
use crate::splitters::{SentenceSplitter, StructuralSplitter};
use crate::types::{Chunk, MarkerKind, PathSegment, SeparatorKind, Span, StrategyTag};

use super::base::SegmentContext;
use super::fixed_size_chunker::FixedSizeChunker;

/// Splits top-down through an ordered separator list.
///
/// A region within `max_chunk_size` is emitted whole; an oversized region
/// is split at the current separator and each piece retried with the next
/// one. A structural boundary always wins over a size cut: the zero-overlap
/// fixed-size split runs only when the separator list is exhausted (or
/// names `fixed_size` explicitly), which also guarantees termination.
/// A separator that yields no split for a region, including any structural
/// level with no markers, degrades to the next separator.
pub struct RecursiveChunker<'a> {
    pub separators: &'a [SeparatorKind],
    pub max_chunk_size: usize,
    pub unit: SizeUnit,
}

impl<'a> RecursiveChunker<'a> {
    pub(crate) fn chunk(
        &self,
        cx: &SegmentContext,
        sentences: &dyn SentenceSplitter,
        structural: &dyn StructuralSplitter,
    ) -> Vec<Chunk> {
        let len = cx.len_chars();
        let mut chunks = Vec::new();
        if len == 0 {
            return chunks;
        }

        let mut path = Vec::new();
        self.split_region(cx, Span::new(0, len), 0, &mut path, &mut chunks, sentences, structural);
        chunks
    }

    #[allow(clippy::too_many_arguments)]
    fn split_region(
        &self,
        cx: &SegmentContext,
        region: Span,
        separator_index: usize,
        path: &mut Vec<PathSegment>,
        out: &mut Vec<Chunk>,
        sentences: &dyn SentenceSplitter,
        structural: &dyn StructuralSplitter,
    ) {
        if cx.measure(region, self.unit) <= self.max_chunk_size {
            out.push(self.emit(cx, region, path));
            return;
        }

        let Some(&separator) = self.separators.get(separator_index) else {
            self.fixed_cut(cx, region, path, out);
            return;
        };

        let spans: Vec<Span> = match separator {
            SeparatorKind::Heading => structural.split_structural(
                &cx.document().structural_markers,
                MarkerKind::Heading,
                region,
            ),
            SeparatorKind::Paragraph => structural.split_structural(
                &cx.document().structural_markers,
                MarkerKind::ParagraphBreak,
                region,
            ),
            SeparatorKind::Sentence => sentences
                .split_sentences(cx.slice(region))
                .into_iter()
                .map(|s| Span::new(region.start + s.start, region.start + s.end))
                .collect(),
            SeparatorKind::FixedSize => {
                self.fixed_cut(cx, region, path, out);
                return;
            }
        };

        // No split at this level: try the next separator.
        if spans.len() <= 1 {
            self.split_region(cx, region, separator_index + 1, path, out, sentences, structural);
            return;
        }

        for span in spans.into_iter().filter(|s| !s.is_empty()) {
            path.push(PathSegment { level: separator, span });
            if cx.measure(span, self.unit) <= self.max_chunk_size {
                out.push(self.emit(cx, span, path));
            } else {
                self.split_region(cx, span, separator_index + 1, path, out, sentences, structural);
            }
            path.pop();
        }
    }

    /// Terminal splitter: fixed-size spans with zero overlap, each within
    /// `max_chunk_size`. These carry no structural segment of their own.
    fn fixed_cut(&self, cx: &SegmentContext, region: Span, path: &[PathSegment], out: &mut Vec<Chunk>) {
        let terminal = FixedSizeChunker::new(self.max_chunk_size, 0, self.unit);
        for span in terminal.spans(cx, region) {
            out.push(self.emit(cx, span, path));
        }
    }

    fn emit(&self, cx: &SegmentContext, span: Span, path: &[PathSegment]) -> Chunk {
        let mut chunk = cx.make_chunk(StrategyTag::Recursive, span, self.unit);
        chunk.structural_path = path.to_vec();
        chunk
    }
}
