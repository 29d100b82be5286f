//! Marker-driven structural splitting.

use crate::types::{MarkerKind, Span, StructuralMarker};

/// Capability: split a region of a document into ordered covering spans at
/// the boundaries of one structural level.
///
/// A return of a single span means the level offers no split for this
/// region; callers degrade to their next separator rather than failing.
pub trait StructuralSplitter: Send + Sync {
    fn split_structural(
        &self,
        markers: &[StructuralMarker],
        kind: MarkerKind,
        region: Span,
    ) -> Vec<Span>;
}

/// Pure marker arithmetic: boundaries are the offsets of matching markers
/// strictly inside the region.
pub struct MarkerSplitter;

impl StructuralSplitter for MarkerSplitter {
    fn split_structural(
        &self,
        markers: &[StructuralMarker],
        kind: MarkerKind,
        region: Span,
    ) -> Vec<Span> {
        let mut boundaries: Vec<usize> = markers
            .iter()
            .filter(|m| m.kind == kind)
            .map(|m| m.offset)
            .filter(|&offset| offset > region.start && offset < region.end)
            .collect();
        boundaries.sort_unstable();
        boundaries.dedup();

        let mut spans = Vec::with_capacity(boundaries.len() + 1);
        let mut start = region.start;
        for boundary in boundaries {
            spans.push(Span::new(start, boundary));
            start = boundary;
        }
        spans.push(Span::new(start, region.end));
        spans
    }
}
