//! Backend-neutral redaction and restoration plans.
//!
//! A plan is pure data: the engine computes what to draw where, and a
//! [`RenderBackend`](crate::render::RenderBackend) later applies it to an
//! actual document. Keeping the two apart lets the whole pipeline be tested
//! without touching a PDF.

use serde::{Deserialize, Serialize};

use crate::domain::Rect;
use crate::ledger::Ledger;

/// One opaque box to paint over a redacted fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayInstruction {
    pub page: u32,
    pub bbox: Rect,
}

/// One piece of recovered text to draw back at its original location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawInstruction {
    pub page: u32,
    pub bbox: Rect,
    pub text: String,
    pub font_size: f32,
}

/// Everything a redaction pass produces besides the key: the overlays to
/// paint and the ledger that makes the pass reversible.
#[derive(Debug, Clone, Default)]
pub struct RedactionPlan {
    pub overlays: Vec<OverlayInstruction>,
    pub ledger: Ledger,
}

impl RedactionPlan {
    /// True when the pass found nothing to redact. Callers should skip the
    /// render step and not write a ledger in that case.
    pub fn is_noop(&self) -> bool {
        self.overlays.is_empty()
    }
}

/// The draw list of a restoration pass, plus how many ledger entries could
/// not be authenticated and were skipped.
#[derive(Debug, Clone)]
pub struct RestorationPlan {
    pub draws: Vec<DrawInstruction>,
    pub failed: usize,
}
