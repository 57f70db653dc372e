//! Restoration planning: ledger back to readable text.
//!
//! Walks the ledger in page order, decrypts every fragment it can with the
//! supplied key, and emits draw instructions at the original locations.
//! Fragments that fail authentication are skipped and counted rather than
//! aborting the pass; only a pass that recovers nothing at all is an error.

use tracing::{debug, warn};

use crate::cipher::{decrypt_fragment, RedactionKey};
use crate::error::{ShroudError, ShroudResult};
use crate::ledger::Ledger;
use crate::redaction::plan::{DrawInstruction, RestorationPlan};

/// Smallest font size restored text is ever drawn at.
pub const MIN_FONT_SIZE: f32 = 6.0;

/// Font size for text drawn into a box of the given height: 60% of the box,
/// floored at [`MIN_FONT_SIZE`] so narrow boxes stay legible.
pub fn derive_font_size(box_height: f32) -> f32 {
    (box_height * 0.6).max(MIN_FONT_SIZE)
}

/// Plans the restoration of every recoverable fragment in the ledger.
///
/// Fragments are attempted in ledger order. A wrong key typically fails
/// every entry; a partially corrupted ledger fails only the damaged ones.
/// Returns [`ShroudError::NoRecoverableData`] when nothing decrypts,
/// including the case of an empty ledger.
pub fn plan_restoration(key: &RedactionKey, ledger: &Ledger) -> ShroudResult<RestorationPlan> {
    let mut draws = Vec::new();
    let mut attempted = 0usize;
    let mut failed = 0usize;

    for (&page, fragments) in &ledger.pages {
        for (index, fragment) in fragments.iter().enumerate() {
            attempted += 1;
            match decrypt_fragment(key, &fragment.envelope) {
                Ok(text) => {
                    draws.push(DrawInstruction {
                        page,
                        bbox: fragment.bbox,
                        font_size: derive_font_size(fragment.bbox.height()),
                        text,
                    });
                }
                Err(_) => {
                    failed += 1;
                    warn!(page, index, "fragment failed authentication, skipping");
                }
            }
        }
    }

    if draws.is_empty() {
        return Err(ShroudError::NoRecoverableData { attempted });
    }

    debug!(
        recovered = draws.len(),
        failed, "restoration plan complete"
    );
    Ok(RestorationPlan { draws, failed })
}
