//! Applying plans to documents.
//!
//! The engine emits backend-neutral instructions; a [`RenderBackend`] turns
//! them into actual document mutations. The lopdf-backed implementation
//! lives in [`pdf`]; [`RecordingBackend`] captures instructions verbatim
//! for tests.

pub mod pdf;

pub use pdf::PdfBackend;

use tracing::debug;

use crate::error::ShroudResult;
use crate::redaction::{DrawInstruction, OverlayInstruction, RedactionPlan, RestorationPlan};

/// A document mutator that can paint redaction overlays and draw restored
/// text.
///
/// Implementations receive whole instruction batches so they can group work
/// per page. Instruction order within a batch must be preserved where the
/// target format makes order observable.
pub trait RenderBackend {
    /// Paints one opaque box per overlay instruction.
    fn paint_overlays(&mut self, overlays: &[OverlayInstruction]) -> ShroudResult<()>;

    /// Draws restored text at each instruction's location and size.
    fn draw_text(&mut self, draws: &[DrawInstruction]) -> ShroudResult<()>;

    /// Short name for logging.
    fn name(&self) -> &str;
}

/// Applies a redaction plan's overlays to a backend, in plan order.
///
/// Returns the number of instructions applied. A no-op plan applies zero
/// and touches the backend not at all.
pub fn apply_redaction(
    backend: &mut dyn RenderBackend,
    plan: &RedactionPlan,
) -> ShroudResult<usize> {
    if !plan.overlays.is_empty() {
        backend.paint_overlays(&plan.overlays)?;
    }
    debug!(
        backend = backend.name(),
        overlays = plan.overlays.len(),
        "redaction applied"
    );
    Ok(plan.overlays.len())
}

/// Applies a restoration plan's draws to a backend, in plan order.
///
/// Returns the number of instructions applied.
pub fn apply_restoration(
    backend: &mut dyn RenderBackend,
    plan: &RestorationPlan,
) -> ShroudResult<usize> {
    if !plan.draws.is_empty() {
        backend.draw_text(&plan.draws)?;
    }
    debug!(
        backend = backend.name(),
        draws = plan.draws.len(),
        "restoration applied"
    );
    Ok(plan.draws.len())
}

/// Backend that records every instruction it receives and mutates nothing.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub overlays: Vec<OverlayInstruction>,
    pub draws: Vec<DrawInstruction>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBackend for RecordingBackend {
    fn paint_overlays(&mut self, overlays: &[OverlayInstruction]) -> ShroudResult<()> {
        self.overlays.extend_from_slice(overlays);
        Ok(())
    }

    fn draw_text(&mut self, draws: &[DrawInstruction]) -> ShroudResult<()> {
        self.draws.extend_from_slice(draws);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}
