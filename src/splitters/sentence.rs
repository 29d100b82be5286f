//! Sentence boundary splitting.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Span;

/// Capability: split text into an ordered, disjoint, covering sequence of
/// sentence spans.
///
/// Spans are in character units relative to the input slice. Every
/// character must belong to exactly one span; trailing whitespace after a
/// sentence belongs to that sentence's span.
pub trait SentenceSplitter: Send + Sync {
    fn split_sentences(&self, text: &str) -> Vec<Span>;
}

/// Sentence segmentation per UAX #29.
///
/// Handles abbreviations and unusual punctuation far better than a
/// delimiter scan, and costs nothing extra: the segmentation tables ship
/// with `unicode-segmentation`.
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn split_sentences(&self, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        let mut start = 0;

        for sentence in text.split_sentence_bounds() {
            let len = sentence.chars().count();
            if len == 0 {
                continue;
            }
            spans.push(Span::new(start, start + len));
            start += len;
        }

        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covering(text: &str, spans: &[Span]) {
        let total = text.chars().count();
        let mut expected_start = 0;
        for span in spans {
            assert_eq!(span.start, expected_start);
            assert!(span.end > span.start);
            expected_start = span.end;
        }
        assert_eq!(expected_start, total);
    }

    #[test]
    fn test_empty_text() {
        assert!(UnicodeSentenceSplitter.split_sentences("").is_empty());
    }

    #[test]
    fn test_single_sentence() {
        let text = "Just one sentence without terminal punctuation";
        let spans = UnicodeSentenceSplitter.split_sentences(text);
        assert_eq!(spans, vec![Span::new(0, text.chars().count())]);
    }

    #[test]
    fn test_spans_cover_text() {
        let text = "First sentence. Second one! And a third? Trailing fragment";
        let spans = UnicodeSentenceSplitter.split_sentences(text);
        assert!(spans.len() >= 4);
        assert_covering(text, &spans);
    }

    #[test]
    fn test_whitespace_attaches_to_preceding_sentence() {
        let text = "One. Two.";
        let spans = UnicodeSentenceSplitter.split_sentences(text);
        assert_eq!(spans.len(), 2);
        // The gap after the period belongs to the first span.
        assert_eq!(spans[0], Span::new(0, 5));
        assert_eq!(spans[1], Span::new(5, 9));
    }

    #[test]
    fn test_multibyte_offsets_are_char_units() {
        let text = "Héllo wörld. Ça va bien.";
        let spans = UnicodeSentenceSplitter.split_sentences(text);
        assert_covering(text, &spans);
        assert_eq!(spans.len(), 2);
    }
}
