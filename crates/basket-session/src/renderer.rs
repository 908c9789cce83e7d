//! # Renderer Seam
//!
//! Trait implemented by whatever draws the cart.

use basket_core::CartView;

/// Receives a full view after every cart change.
///
/// Called only after the mutation that produced the view has completed,
/// never before or during it. Implementations must redraw everything; no
/// diff is provided.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &CartView);
}

/// Renderer that draws nothing.
pub struct NoOpRenderer;

impl Renderer for NoOpRenderer {
    fn render(&self, _view: &CartView) {}
}
