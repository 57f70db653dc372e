//! PII span detection over page text.
//!
//! Detectors find labelled character spans in a page's concatenated text.
//! The built-in regex detector covers the pattern-backed categories; entity
//! recognition (PERSON, GPE, DATE, ORG) comes from an external
//! [`SpanDetector`] implementation supplied by the caller, and several
//! detectors compose through [`CompositeSpanDetector`].

use regex::Regex;
use tracing::debug;

use crate::domain::{PiiPatterns, PiiSpan, SeverityMap};
use crate::error::{ShroudError, ShroudResult};

/// A source of PII spans over one page's text.
///
/// `text` is always the page's concatenated word text; span offsets are
/// byte offsets into that exact string. Implementations must be
/// deterministic: the same text and severity yield the same spans in the
/// same order.
pub trait SpanDetector: Send + Sync {
    fn detect(&self, text: &str, severity: u8) -> ShroudResult<Vec<PiiSpan>>;

    /// Short name for logging.
    fn name(&self) -> &str;
}

/// Regex-backed detector for the built-in categories plus caller-supplied
/// custom patterns.
pub struct RegexSpanDetector {
    severity_map: SeverityMap,
    custom: Vec<(String, Regex)>,
}

impl RegexSpanDetector {
    pub fn new() -> Self {
        Self {
            severity_map: SeverityMap::standard(),
            custom: Vec::new(),
        }
    }

    pub fn with_severity_map(severity_map: SeverityMap) -> Self {
        Self {
            severity_map,
            custom: Vec::new(),
        }
    }

    /// Registers a custom pattern under its own label.
    ///
    /// Custom patterns bypass the severity gate: registering one is the
    /// caller's opt-in. If the pattern has a capture group, group 1 is the
    /// sensitive part; otherwise the whole match is.
    pub fn add_pattern(&mut self, label: impl Into<String>, pattern: &str) -> ShroudResult<()> {
        let regex = Regex::new(pattern).map_err(|e| ShroudError::PatternError {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        self.custom.push((label.into(), regex));
        Ok(())
    }

    fn collect(label: &str, regex: &Regex, text: &str, spans: &mut Vec<PiiSpan>) {
        for caps in regex.captures_iter(text) {
            let m = caps
                .get(1)
                .unwrap_or_else(|| caps.get(0).expect("match always has group 0"));
            spans.push(PiiSpan::new(m.start(), m.end(), label));
        }
    }
}

impl Default for RegexSpanDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpanDetector for RegexSpanDetector {
    /// Runs every eligible built-in pattern in declared order, then custom
    /// patterns in registration order. Within one pattern, matches come out
    /// left to right, so the full span sequence is deterministic.
    fn detect(&self, text: &str, severity: u8) -> ShroudResult<Vec<PiiSpan>> {
        let eligible = self.severity_map.labels_for(severity);
        let mut spans = Vec::new();

        for label in PiiPatterns::BUILTIN {
            if !eligible.contains(&label) {
                continue;
            }
            let regex = PiiPatterns::for_label(label).expect("builtin label has a pattern");
            Self::collect(label, regex, text, &mut spans);
        }

        for (label, regex) in &self.custom {
            Self::collect(label, regex, text, &mut spans);
        }

        debug!(
            detector = self.name(),
            severity,
            spans = spans.len(),
            "pattern scan complete"
        );
        Ok(spans)
    }

    fn name(&self) -> &str {
        "regex"
    }
}

/// Runs several detectors in sequence and concatenates their spans.
///
/// Detector order is significant: spans keep the order of the detectors
/// that produced them, and downstream reconciliation preserves that order.
pub struct CompositeSpanDetector {
    detectors: Vec<Box<dyn SpanDetector>>,
}

impl CompositeSpanDetector {
    pub fn new(detectors: Vec<Box<dyn SpanDetector>>) -> Self {
        Self { detectors }
    }
}

impl SpanDetector for CompositeSpanDetector {
    fn detect(&self, text: &str, severity: u8) -> ShroudResult<Vec<PiiSpan>> {
        let mut spans = Vec::new();
        for detector in &self.detectors {
            spans.extend(detector.detect(text, severity)?);
        }
        Ok(spans)
    }

    fn name(&self) -> &str {
        "composite"
    }
}
