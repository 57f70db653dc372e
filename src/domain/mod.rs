//! Domain models for the redaction pipeline.
//!
//! This module contains the core data types that flow between span
//! detection, geometry reconciliation, and planning: word boxes as produced
//! by an extraction collaborator, PII spans over concatenated page text, and
//! the matched fragments that result from reconciling the two.

pub mod patterns;
pub mod severity;

pub use patterns::{labels, PiiPatterns};
pub use severity::SeverityMap;

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page-local float units.
///
/// Serialized everywhere as `[x0, y0, x1, y1]`, the form the ledger wire
/// format and the word-box input format both use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Rect {
    /// Creates a rectangle from its corner coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Component-wise union: min of the lower corner, max of the upper.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Returns true if `other` lies entirely inside this rectangle.
    pub fn contains(&self, other: &Rect) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }
}

impl From<[f32; 4]> for Rect {
    fn from(v: [f32; 4]) -> Self {
        Rect::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x0, r.y0, r.x1, r.y1]
    }
}

/// A single recognized word with its bounding rectangle.
///
/// Produced once per page by the extraction collaborator, already
/// confidence-filtered, in extraction order. Reading order is not
/// guaranteed across OCR sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordBox {
    pub text: String,
    pub bbox: Rect,
}

impl WordBox {
    pub fn new(text: impl Into<String>, bbox: impl Into<Rect>) -> Self {
        Self {
            text: text.into(),
            bbox: bbox.into(),
        }
    }
}

/// All words of one page, in extraction order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageWords {
    pub page: u32,
    pub words: Vec<WordBox>,
}

/// A half-open character range flagged as PII, with a category label.
///
/// Offsets are **byte** offsets into the concatenated page text (the same
/// coordinate space `regex` reports on `&str`). Spans may overlap; no dedup
/// is performed anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiSpan {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl PiiSpan {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Self {
            start,
            end,
            label: label.into(),
        }
    }
}

/// The merged geometry and reconstructed text of all words overlapping one
/// PII span.
///
/// The plaintext is the single-space join of the contributing words in
/// extraction order, which may differ from the original substring's exact
/// spacing or punctuation.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedFragment {
    pub page: u32,
    pub bbox: Rect,
    pub plaintext: String,
}

/// Joins a page's word texts with exactly one space between words.
///
/// This is the coordinate space span detection operates in. The invariant
/// the reconciler depends on: the offset of `words[i]` equals
/// `sum(words[j].text.len() + 1)` for all `j < i`.
pub fn concatenated_text(words: &[WordBox]) -> String {
    let mut text = String::new();
    for (i, word) in words.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(&word.text);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_union() {
        let a = Rect::new(10.0, 10.0, 50.0, 20.0);
        let b = Rect::new(55.0, 8.0, 90.0, 22.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(10.0, 8.0, 90.0, 22.0));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
    }

    #[test]
    fn test_rect_wire_form() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0]");
        let back: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_concatenated_text_offsets() {
        let words = vec![
            WordBox::new("Contact", [0.0, 0.0, 1.0, 1.0]),
            WordBox::new("Jane", [1.0, 0.0, 2.0, 1.0]),
            WordBox::new("at", [2.0, 0.0, 3.0, 1.0]),
        ];
        let text = concatenated_text(&words);
        assert_eq!(text, "Contact Jane at");
        // Offset invariant: each word starts at sum(len + 1) of its
        // predecessors.
        assert_eq!(&text[8..12], "Jane");
        assert_eq!(&text[13..15], "at");
    }

    #[test]
    fn test_concatenated_text_empty() {
        assert_eq!(concatenated_text(&[]), "");
    }
}
