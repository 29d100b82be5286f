//! Document and span types.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::measure::CharMap;

/// A half-open `[start, end)` character range into a document's text.
///
/// All offsets in this crate are character offsets, not byte offsets;
/// `CharMap` handles the translation when slicing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check whether a character offset falls inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// The kind of structural annotation a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// A heading line (markdown `#`..`######` or equivalent).
    Heading,
    /// A blank-line paragraph boundary.
    ParagraphBreak,
}

/// An annotated position in a document used to guide structural splitting.
///
/// `offset` is the character position the new structural unit starts at.
/// `level` carries the heading depth (1-6); it is 0 for paragraph breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralMarker {
    pub offset: usize,
    #[serde(default)]
    pub level: u8,
    pub kind: MarkerKind,
}

/// An immutable input document.
///
/// The engine only ever reads a document; chunk sequences are produced
/// fresh on each call and carry `id` back as their `document_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Identifier stamped onto every chunk produced from this document
    pub id: Uuid,

    /// The full extracted text
    pub raw_text: String,

    /// Structural annotations, sorted by offset (possibly empty)
    #[serde(default)]
    pub structural_markers: Vec<StructuralMarker>,
}

impl Document {
    /// Create a document with a fresh id and no structural markers.
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            raw_text: raw_text.into(),
            structural_markers: Vec::new(),
        }
    }

    /// Create a document and derive structural markers from its markdown.
    pub fn from_markdown(raw_text: impl Into<String>) -> Self {
        let raw_text = raw_text.into();
        let structural_markers = markdown_markers(&raw_text);
        Self {
            id: Uuid::new_v4(),
            raw_text,
            structural_markers,
        }
    }

    /// Replace the generated id with a caller-supplied one.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Attach structural markers, keeping them sorted by offset.
    pub fn with_markers(mut self, mut markers: Vec<StructuralMarker>) -> Self {
        markers.sort_by_key(|m| m.offset);
        self.structural_markers = markers;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.raw_text.is_empty()
    }
}

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"(?m)^(#{1,6})[ \t]+\S").unwrap();
    static ref PARAGRAPH_RE: Regex = Regex::new(r"\n[ \t]*\n").unwrap();
}

/// Derive heading and paragraph-break markers from markdown text.
///
/// Heading markers point at the start of the heading line; paragraph
/// markers point at the first character after the blank-line run. Offsets
/// are character offsets.
pub fn markdown_markers(text: &str) -> Vec<StructuralMarker> {
    let map = CharMap::new(text);
    let mut markers = Vec::new();

    for caps in HEADING_RE.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let level = caps.get(1).map(|m| m.as_str().len()).unwrap_or(1) as u8;
        markers.push(StructuralMarker {
            offset: map.char_offset(whole.start()),
            level,
            kind: MarkerKind::Heading,
        });
    }

    for m in PARAGRAPH_RE.find_iter(text) {
        markers.push(StructuralMarker {
            offset: map.char_offset(m.end()),
            level: 0,
            kind: MarkerKind::ParagraphBreak,
        });
    }

    markers.sort_by_key(|m| m.offset);
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = Span::new(3, 8);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(span.contains(3));
        assert!(span.contains(7));
        assert!(!span.contains(8));
        assert!(Span::new(4, 4).is_empty());
    }

    #[test]
    fn test_markdown_heading_markers() {
        let text = "# Title\n\nBody text.\n\n## Section\n\nMore body.";
        let markers = markdown_markers(text);

        let headings: Vec<_> = markers
            .iter()
            .filter(|m| m.kind == MarkerKind::Heading)
            .collect();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].offset, 0);
        assert_eq!(headings[0].level, 1);
        assert_eq!(headings[1].level, 2);
        // Second heading starts right after the blank line following the body.
        assert_eq!(
            text.chars().skip(headings[1].offset).take(2).collect::<String>(),
            "##"
        );
    }

    #[test]
    fn test_markdown_paragraph_markers() {
        let text = "First paragraph.\n\nSecond paragraph.";
        let markers = markdown_markers(text);

        let paragraphs: Vec<_> = markers
            .iter()
            .filter(|m| m.kind == MarkerKind::ParagraphBreak)
            .collect();
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(
            text.chars().skip(paragraphs[0].offset).take(6).collect::<String>(),
            "Second"
        );
    }

    #[test]
    fn test_markers_use_char_offsets() {
        // Multibyte characters before the break must not skew the offset.
        let text = "héllo wörld.\n\nNext.";
        let markers = markdown_markers(text);
        assert_eq!(markers.len(), 1);
        let offset = markers[0].offset;
        assert_eq!(text.chars().skip(offset).take(4).collect::<String>(), "Next");
    }

    #[test]
    fn test_with_markers_sorts() {
        let doc = Document::new("some text").with_markers(vec![
            StructuralMarker { offset: 7, level: 0, kind: MarkerKind::ParagraphBreak },
            StructuralMarker { offset: 2, level: 1, kind: MarkerKind::Heading },
        ]);
        assert_eq!(doc.structural_markers[0].offset, 2);
        assert_eq!(doc.structural_markers[1].offset, 7);
    }
}
