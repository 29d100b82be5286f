//! Sentence-based chunking.

use crate::measure::SizeUnit;
use crate::splitters::SentenceSplitter;
use crate::types::{Chunk, Span, StrategyTag};

use super::base::SegmentContext;

/// Greedily groups whole sentences into chunks.
///
/// A chunk closes when adding the next sentence would exceed either
/// `max_sentences` or `max_chars`. Closed chunks shorter than `min_chars`
/// merge backward into their predecessor instead of standing alone; the
/// merged chunk may exceed `max_chars`. No chunk boundary ever falls
/// inside a sentence span, and the chunks cover the text exactly.
pub struct SentenceChunker {
    pub max_sentences: usize,
    pub min_chars: usize,
    pub max_chars: usize,
}

impl SentenceChunker {
    pub fn new(max_sentences: usize, min_chars: usize, max_chars: usize) -> Self {
        Self { max_sentences, min_chars, max_chars }
    }

    pub(crate) fn chunk(&self, cx: &SegmentContext, splitter: &dyn SentenceSplitter) -> Vec<Chunk> {
        let sentences = splitter.split_sentences(cx.text());

        let mut closed: Vec<Span> = Vec::new();
        let mut open: Option<(Span, usize)> = None;

        for sentence in sentences.into_iter().filter(|s| !s.is_empty()) {
            open = match open {
                None => Some((sentence, 1)),
                Some((current, count)) => {
                    let grown = Span::new(current.start, sentence.end);
                    if count + 1 > self.max_sentences || grown.len() > self.max_chars {
                        self.close(current, &mut closed);
                        Some((sentence, 1))
                    } else {
                        Some((grown, count + 1))
                    }
                }
            };
        }
        if let Some((current, _)) = open {
            self.close(current, &mut closed);
        }

        closed
            .into_iter()
            .map(|span| cx.make_chunk(StrategyTag::SentenceBased, span, SizeUnit::Char))
            .collect()
    }

    /// Close a chunk span, folding it into the previous chunk when it is
    /// shorter than `min_chars`.
    fn close(&self, span: Span, closed: &mut Vec<Span>) {
        if span.len() < self.min_chars {
            if let Some(previous) = closed.last_mut() {
                previous.end = span.end;
                return;
            }
        }
        closed.push(span);
    }
}
