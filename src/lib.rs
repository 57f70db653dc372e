//! Reversible PII redaction for paginated documents.
//!
//! This library finds PII in per-page word boxes, covers it with opaque
//! overlays, and seals every covered fragment with authenticated encryption
//! so that the holder of the one-time key can restore the document later.
//! The redacted PDF plus the fragment ledger are the only surviving
//! artifacts; without the key the ledger is opaque.
//!
//! # Features
//!
//! - **Span Detection**: Regex-backed PII categories gated by a severity
//!   knob, plus pluggable external detectors for entity recognition
//! - **Geometry Reconciliation**: Character spans mapped back onto word
//!   bounding boxes, with multi-word spans merged into one rectangle
//! - **Authenticated Encryption**: AES-256-GCM per fragment, fresh nonce
//!   per call, tamper and wrong-key failures indistinguishable
//! - **Deterministic Restoration**: Ledger-ordered draws at the original
//!   locations, damaged entries skipped and counted
//!
//! # Architecture
//!
//! - [`domain`]: Word boxes, spans, rectangles, pattern and severity config
//! - [`detect`]: Span detectors over concatenated page text
//! - [`reconcile`]: Span-to-geometry reconciliation
//! - [`cipher`]: Fragment encryption and the one-time key
//! - [`ledger`]: The persisted encrypted-fragment ledger
//! - [`redaction`]: The planning engine and its plan types
//! - [`render`]: Backends that apply plans to documents
//! - [`extract`]: Word-box input and PDF text preview
//! - [`error`]: Comprehensive error handling
//!
//! # Quick Start
//!
//! ```
//! use shroud::domain::{PageWords, WordBox};
//! use shroud::{plan_restoration, RedactionEngine};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pages = vec![PageWords {
//!     page: 0,
//!     words: vec![
//!         WordBox::new("reach", [10.0, 10.0, 48.0, 22.0]),
//!         WordBox::new("jane@co.com", [52.0, 9.0, 130.0, 23.0]),
//!     ],
//! }];
//!
//! let engine = RedactionEngine::with_builtin_detector(40);
//! let (plan, key) = engine.plan_redaction(&pages)?;
//! assert_eq!(plan.overlays.len(), 1);
//!
//! let restored = plan_restoration(&key, &plan.ledger)?;
//! assert_eq!(restored.draws[0].text, "jane@co.com");
//! # Ok(())
//! # }
//! ```

// Public API
pub mod cipher;
pub mod detect;
pub mod domain;
pub mod error;
pub mod extract;
pub mod ledger;
pub mod reconcile;
pub mod redaction;
pub mod render;

// Re-exports for convenient access
pub use cipher::{decrypt_fragment, encrypt_fragment, RedactionKey};
pub use detect::{CompositeSpanDetector, RegexSpanDetector, SpanDetector};
pub use error::{ShroudError, ShroudResult};
pub use extract::{JsonWordSource, WordSource};
pub use ledger::{EncryptedFragment, Ledger};
pub use redaction::{
    plan_restoration, DrawInstruction, OverlayInstruction, RedactionEngine, RedactionPlan,
    RestorationPlan,
};
pub use render::{apply_redaction, apply_restoration, PdfBackend, RecordingBackend, RenderBackend};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = RedactionEngine::with_builtin_detector(60);
        assert_eq!(engine.severity(), 60);
    }

    #[test]
    fn test_key_round_trips_through_text() {
        let key = RedactionKey::generate();
        let back = RedactionKey::from_base64(&key.to_base64()).unwrap();
        assert_eq!(key, back);
    }
}
