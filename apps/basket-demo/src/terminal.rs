//! # Terminal Output
//!
//! A renderer and a notification surface that draw to stdout.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  Widget            $9.99  x2     $19.98  │
//! │  Gadget            $5.01  x1      $5.01  │
//! │  ──────────────────────────────────────  │
//! │  Total (3)                       $24.99  │
//! └──────────────────────────────────────────┘
//! [success] Widget added to cart
//! ```

use basket_core::CartView;
use basket_session::{Notification, NotificationId, NotificationSurface, Renderer};

/// Formats a cart view as the lines printed by [`TerminalRenderer`].
pub fn format_view(view: &CartView) -> Vec<String> {
    let mut out = Vec::with_capacity(view.lines.len() + 2);

    if let Some(message) = &view.empty_message {
        out.push(format!("  {}", message));
    }

    for line in &view.lines {
        out.push(format!(
            "  {:<16} {:>8}  x{:<4} {:>9}",
            line.name, line.unit_price, line.quantity, line.line_total
        ));
    }

    out.push(format!(
        "  {:<16} {:>25}",
        format!("Total ({})", view.total_quantity),
        view.grand_total
    ));
    out
}

/// Prints the whole cart on every change.
pub struct TerminalRenderer;

impl Renderer for TerminalRenderer {
    fn render(&self, view: &CartView) {
        println!("┌─ cart ─────────────────────────────────────");
        for line in format_view(view) {
            println!("│{}", line);
        }
        println!("└────────────────────────────────────────────");
    }
}

/// Prints notifications as they appear and disappear.
pub struct TerminalSurface;

impl NotificationSurface for TerminalSurface {
    fn show(&self, notification: &Notification) {
        println!("[{}] {}", notification.severity, notification.text);
    }

    fn hide(&self, id: NotificationId) {
        println!("  (notification {} dismissed)", id);
    }
}
