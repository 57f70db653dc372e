//! Built-in PII pattern library.
//!
//! High-confidence regex patterns for the PII categories the engine detects
//! without an external entity-recognition collaborator. Patterns are cached
//! via `Lazy` and evaluated in the fixed order of [`PiiPatterns::BUILTIN`]
//! so repeated runs discover spans in the same sequence.

use once_cell::sync::Lazy;
use regex::Regex;

/// Category label constants.
///
/// The first seven are regex-backed. `PERSON`, `GPE`, `DATE` and `ORG` are
/// entity-recognition categories: they participate in severity mapping but
/// only an external [`SpanDetector`](crate::detect::SpanDetector)
/// implementation can produce spans for them.
pub mod labels {
    pub const EMAIL: &str = "EMAIL";
    pub const PHONE: &str = "PHONE";
    pub const CREDIT_CARD: &str = "CREDIT_CARD";
    pub const SSN: &str = "SSN";
    pub const PNR: &str = "PNR";
    pub const TRANSACTION_ID: &str = "TRANSACTION_ID";
    pub const INVOICE_NUMBER: &str = "INVOICE_NUMBER";

    pub const PERSON: &str = "PERSON";
    pub const GPE: &str = "GPE";
    pub const DATE: &str = "DATE";
    pub const ORG: &str = "ORG";
}

/// Cached regex patterns for the built-in PII categories.
pub struct PiiPatterns;

impl PiiPatterns {
    /// Regex-backed categories in evaluation order.
    pub const BUILTIN: [&'static str; 7] = [
        labels::EMAIL,
        labels::PHONE,
        labels::CREDIT_CARD,
        labels::SSN,
        labels::PNR,
        labels::TRANSACTION_ID,
        labels::INVOICE_NUMBER,
    ];

    pub fn email() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+").expect("Valid regex")
        });
        &PATTERN
    }

    pub fn phone() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("Valid regex")
        });
        &PATTERN
    }

    pub fn credit_card() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\b(?:\d[ -]*?){13,16}\b").expect("Valid regex"));
        &PATTERN
    }

    pub fn ssn() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("Valid regex"));
        &PATTERN
    }

    /// Ticket PNR: a bare 10-digit number.
    pub fn pnr() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\b\d{10}\b").expect("Valid regex"));
        &PATTERN
    }

    /// Matches the digits following a "Transaction ID:" marker. Group 1 is
    /// the sensitive part; the marker itself stays visible.
    pub fn transaction_id() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"Transaction ID:\s*(\d+)").expect("Valid regex"));
        &PATTERN
    }

    /// Matches the value following an "Invoice Number:" marker. Group 1 is
    /// the sensitive part.
    pub fn invoice_number() -> &'static Regex {
        static PATTERN: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"Invoice Number:\s*([A-Z0-9]+)").expect("Valid regex"));
        &PATTERN
    }

    /// Looks up the cached pattern for a built-in category label.
    pub fn for_label(label: &str) -> Option<&'static Regex> {
        match label {
            labels::EMAIL => Some(Self::email()),
            labels::PHONE => Some(Self::phone()),
            labels::CREDIT_CARD => Some(Self::credit_card()),
            labels::SSN => Some(Self::ssn()),
            labels::PNR => Some(Self::pnr()),
            labels::TRANSACTION_ID => Some(Self::transaction_id()),
            labels::INVOICE_NUMBER => Some(Self::invoice_number()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        let m = PiiPatterns::email().find("Contact Jane at jane@co.com").unwrap();
        assert_eq!(m.as_str(), "jane@co.com");
    }

    #[test]
    fn test_phone_pattern() {
        assert!(PiiPatterns::phone().is_match("(555) 234-5678"));
        assert!(PiiPatterns::phone().is_match("555-234-5678"));
        assert!(PiiPatterns::phone().is_match("555.234.5678"));
    }

    #[test]
    fn test_ssn_pattern() {
        assert!(PiiPatterns::ssn().is_match("SSN: 123-45-6789"));
        assert!(!PiiPatterns::ssn().is_match("123-456-789"));
    }

    #[test]
    fn test_transaction_id_captures_value_only() {
        let caps = PiiPatterns::transaction_id()
            .captures("Transaction ID: 99881122")
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "99881122");
    }

    #[test]
    fn test_invoice_number_captures_value_only() {
        let caps = PiiPatterns::invoice_number()
            .captures("Invoice Number: INV20260042")
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "INV20260042");
    }

    #[test]
    fn test_every_builtin_label_has_a_pattern() {
        for label in PiiPatterns::BUILTIN {
            assert!(PiiPatterns::for_label(label).is_some(), "missing {label}");
        }
        assert!(PiiPatterns::for_label(labels::PERSON).is_none());
    }
}
