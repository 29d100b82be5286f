//! Sliding-window chunking with a fixed stride.

use crate::measure::SizeUnit;
use crate::types::{Chunk, Span, StrategyTag};

use super::base::SegmentContext;

/// Emits windows of `window` units at successive stride steps.
///
/// With `stride <= window` every character lands in at least one window;
/// `stride > window` is a legal configuration that leaves gaps. The last
/// window is clipped to the end of text and still emitted when non-empty.
pub struct SlidingWindowChunker {
    pub window: usize,
    pub stride: usize,
    pub unit: SizeUnit,
}

impl SlidingWindowChunker {
    pub fn new(window: usize, stride: usize, unit: SizeUnit) -> Self {
        Self { window, stride, unit }
    }

    pub(crate) fn chunk(&self, cx: &SegmentContext) -> Vec<Chunk> {
        let len = cx.len_chars();
        let mut chunks = Vec::new();
        let mut start = 0;

        while start < len {
            let end = cx.advance(start, self.window, self.unit);
            chunks.push(cx.make_chunk(StrategyTag::SlidingWindow, Span::new(start, end), self.unit));

            let next = cx.advance(start, self.stride, self.unit);
            if next <= start {
                break;
            }
            start = next;
        }

        let shared = self.window.saturating_sub(self.stride);
        let total = chunks.len();
        for (i, chunk) in chunks.iter_mut().enumerate() {
            chunk.overlap_prev = if i == 0 { 0 } else { shared };
            chunk.overlap_next = if i + 1 == total { 0 } else { shared };
        }

        chunks
    }
}
