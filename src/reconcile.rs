//! Span-to-geometry reconciliation.
//!
//! Maps character spans (found over a page's concatenated text) back onto
//! the word boxes that produced that text, and unions the geometry of every
//! word a span touches into one rectangle per span.

use crate::domain::{concatenated_text, MatchedFragment, PiiSpan, Rect, WordBox};

/// Builds each word's `[start, end)` byte interval in extraction order.
///
/// Must mirror [`concatenated_text`] exactly: one separator byte between
/// words, so `start(words[i]) = sum(words[j].text.len() + 1)` for `j < i`.
/// If the two ever diverge, spans silently misalign.
fn word_intervals(words: &[WordBox]) -> Vec<(usize, usize)> {
    let mut intervals = Vec::with_capacity(words.len());
    let mut offset = 0usize;
    for word in words {
        let start = offset;
        let end = start + word.text.len();
        intervals.push((start, end));
        offset = end + 1;
    }
    intervals
}

/// Reconciles PII spans against one page's word boxes.
///
/// A word contributes to a span iff the two intervals strictly overlap:
/// `max(span.start, word.start) < min(span.end, word.end)`. Zero-length
/// contact does not count, so a span covering only the separator between
/// two words matches neither.
///
/// Spans that overlap no word yield no fragment and are dropped without
/// error; the detector may legitimately flag boundary text that never
/// resolves to a whole word. Duplicate spans yield duplicate fragments —
/// no merging across spans is performed.
pub fn reconcile_page(page: u32, words: &[WordBox], spans: &[PiiSpan]) -> Vec<MatchedFragment> {
    let intervals = word_intervals(words);
    let mut fragments = Vec::new();

    for span in spans {
        let mut bbox: Option<Rect> = None;
        let mut parts: Vec<&str> = Vec::new();

        for (word, &(start, end)) in words.iter().zip(&intervals) {
            if span.start.max(start) < span.end.min(end) {
                bbox = Some(match bbox {
                    Some(b) => b.union(&word.bbox),
                    None => word.bbox,
                });
                parts.push(&word.text);
            }
        }

        if let Some(bbox) = bbox {
            fragments.push(MatchedFragment {
                page,
                bbox,
                plaintext: parts.join(" "),
            });
        }
    }

    fragments
}

/// Convenience for detectors operating on a page: the text they must be
/// given is exactly the join the interval table assumes.
pub fn page_text(words: &[WordBox]) -> String {
    concatenated_text(words)
}
