//! Shared per-call context for chunking strategies.

use std::sync::Arc;

use crate::measure::{CharMap, SizeUnit, UnitCounter};
use crate::types::{Chunk, Document, Span, StrategyTag};

/// Everything a strategy needs to address and measure one document.
///
/// Built once per engine call: the char map is the prefix table that keeps
/// span slicing and unit translation from re-scanning the document.
pub(crate) struct SegmentContext<'a> {
    doc: &'a Document,
    map: CharMap,
    token_counter: Arc<dyn UnitCounter>,
}

impl<'a> SegmentContext<'a> {
    pub fn new(doc: &'a Document, token_counter: Arc<dyn UnitCounter>) -> Self {
        Self {
            doc,
            map: CharMap::new(&doc.raw_text),
            token_counter,
        }
    }

    pub fn document(&self) -> &Document {
        self.doc
    }

    pub fn text(&self) -> &str {
        &self.doc.raw_text
    }

    pub fn len_chars(&self) -> usize {
        self.map.len_chars()
    }

    pub fn slice(&self, span: Span) -> &str {
        self.map.slice(&self.doc.raw_text, span)
    }

    /// Measure a span under the given unit.
    pub fn measure(&self, span: Span, unit: SizeUnit) -> usize {
        match unit {
            SizeUnit::Char => span.len(),
            SizeUnit::Token => self.token_counter.measure(self.slice(span)),
        }
    }

    /// The largest end offset such that `[start, end)` measures within
    /// `budget` units, never less than one character of progress.
    ///
    /// For tokens this binary-searches the char range; the measure must be
    /// monotone over prefix growth.
    pub fn advance(&self, start: usize, budget: usize, unit: SizeUnit) -> usize {
        let len = self.len_chars();
        match unit {
            SizeUnit::Char => start.saturating_add(budget).min(len),
            SizeUnit::Token => {
                let (mut lo, mut hi) = (start + 1, len);
                while lo < hi {
                    let mid = lo + (hi - lo + 1) / 2;
                    if self.measure(Span::new(start, mid), unit) <= budget {
                        lo = mid;
                    } else {
                        hi = mid - 1;
                    }
                }
                lo
            }
        }
    }

    /// Mirror of `advance`: the smallest start offset such that
    /// `[start, end)` measures within `budget` units.
    pub fn retreat(&self, end: usize, budget: usize, unit: SizeUnit) -> usize {
        match unit {
            SizeUnit::Char => end.saturating_sub(budget),
            SizeUnit::Token => {
                let (mut lo, mut hi) = (0, end);
                while lo < hi {
                    let mid = lo + (hi - lo + 1) / 2;
                    if self.measure(Span::new(end - mid, end), unit) <= budget {
                        lo = mid;
                    } else {
                        hi = mid - 1;
                    }
                }
                end - lo
            }
        }
    }

    /// Build a chunk for a span. The index is assigned by the engine;
    /// overlap metadata and structural path are filled by the strategy.
    pub fn make_chunk(&self, tag: StrategyTag, span: Span, unit: SizeUnit) -> Chunk {
        Chunk {
            index: 0,
            document_id: self.doc.id,
            start_offset: span.start,
            end_offset: span.end,
            text: self.slice(span).to_string(),
            unit_count: self.measure(span, unit),
            strategy_tag: tag,
            overlap_prev: 0,
            overlap_next: 0,
            structural_path: Vec::new(),
        }
    }
}
