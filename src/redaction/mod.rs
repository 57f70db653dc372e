//! Redaction planning: detection through encryption.
//!
//! [`RedactionEngine`] ties the pipeline together: concatenate a page's
//! words, detect PII spans, reconcile spans back onto word geometry, seal
//! each matched fragment, and record everything in a ledger. The engine
//! produces a backend-neutral [`RedactionPlan`]; applying it to a document
//! is the render layer's job.

pub mod plan;
pub mod restore;

pub use plan::{DrawInstruction, OverlayInstruction, RedactionPlan, RestorationPlan};
pub use restore::{derive_font_size, plan_restoration, MIN_FONT_SIZE};

use tracing::{debug, info};

use crate::cipher::{encrypt_fragment, RedactionKey};
use crate::detect::{RegexSpanDetector, SpanDetector};
use crate::domain::{concatenated_text, PageWords};
use crate::error::ShroudResult;
use crate::ledger::{EncryptedFragment, Ledger};
use crate::reconcile::reconcile_page;

/// Plans document redactions with a configurable span detector.
pub struct RedactionEngine {
    detector: Box<dyn SpanDetector>,
    severity: u8,
}

impl RedactionEngine {
    pub fn new(detector: Box<dyn SpanDetector>, severity: u8) -> Self {
        Self { detector, severity }
    }

    /// Engine with the built-in regex detector only.
    pub fn with_builtin_detector(severity: u8) -> Self {
        Self::new(Box::new(RegexSpanDetector::new()), severity)
    }

    pub fn severity(&self) -> u8 {
        self.severity
    }

    /// Plans the redaction of a whole document and mints its one-time key.
    ///
    /// The key is generated here, used to seal every fragment, and handed to
    /// the caller; the engine keeps no copy. Pages are processed in input
    /// order and fragments land in the ledger in discovery order, so the
    /// same input always yields the same plan geometry (envelopes differ
    /// per run because every fragment gets a fresh nonce).
    pub fn plan_redaction(
        &self,
        pages: &[PageWords],
    ) -> ShroudResult<(RedactionPlan, RedactionKey)> {
        let key = RedactionKey::generate();
        let mut plan = RedactionPlan::default();

        for page in pages {
            let text = concatenated_text(&page.words);
            let spans = self.detector.detect(&text, self.severity)?;
            let fragments = reconcile_page(page.page, &page.words, &spans);
            debug!(
                page = page.page,
                words = page.words.len(),
                spans = spans.len(),
                fragments = fragments.len(),
                "page scanned"
            );

            for fragment in fragments {
                let envelope = encrypt_fragment(&key, &fragment.plaintext)?;
                plan.ledger.push(
                    fragment.page,
                    EncryptedFragment {
                        envelope,
                        bbox: fragment.bbox,
                    },
                );
                plan.overlays.push(OverlayInstruction {
                    page: fragment.page,
                    bbox: fragment.bbox,
                });
            }
        }

        info!(
            pages = pages.len(),
            severity = self.severity,
            fragments = plan.ledger.fragment_count(),
            "redaction planned"
        );
        Ok((plan, key))
    }

    /// Plans restoration from a ledger produced by an earlier redaction.
    pub fn plan_restoration(
        &self,
        key: &RedactionKey,
        ledger: &Ledger,
    ) -> ShroudResult<RestorationPlan> {
        restore::plan_restoration(key, ledger)
    }
}
