//! # View Model
//!
//! The renderer contract, as plain data.
//!
//! ## Render Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartSnapshot ──► render() ──► CartView ──► display surface           │
//! │        ▲                                          │                     │
//! │        │                                          │ user clicks/types   │
//! │        │                                          ▼                     │
//! │   CartStore ◄───────── dispatch ◄──────────── CartIntent               │
//! │                                                                         │
//! │   render() is pure: same snapshot → same view, no display needed      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Renderers re-render the whole view on every change; there is no
//! partial-diff contract.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::CartSnapshot;

/// Text shown in place of the line list when the cart is empty.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

// =============================================================================
// View
// =============================================================================

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub name: String,
    /// e.g. "$9.99"
    pub unit_price: String,
    pub quantity: i64,
    /// e.g. "$19.98"
    pub line_total: String,
}

/// Everything a display surface needs to draw the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub lines: Vec<LineView>,
    /// e.g. "$19.98"
    pub grand_total: String,
    pub total_quantity: i64,
    /// Shown instead of `lines` when the cart is empty.
    pub empty_message: Option<String>,
    pub checkout_enabled: bool,
}

/// Builds the view for a snapshot.
///
/// ## Example
/// ```rust
/// use basket_core::{render, CartStore};
///
/// let mut cart = CartStore::new();
/// cart.add_item("Widget", 9.99).unwrap();
/// cart.add_item("Widget", 9.99).unwrap();
///
/// let view = render(&cart.snapshot());
/// assert_eq!(view.lines[0].line_total, "$19.98");
/// assert_eq!(view.grand_total, "$19.98");
/// ```
pub fn render(snapshot: &CartSnapshot) -> CartView {
    let lines = snapshot
        .entries
        .iter()
        .map(|entry| LineView {
            name: entry.name().to_string(),
            unit_price: entry.unit_price().to_string(),
            quantity: entry.quantity(),
            line_total: entry.line_total().to_string(),
        })
        .collect();

    let is_empty = snapshot.is_empty();

    CartView {
        lines,
        grand_total: snapshot.grand_total.to_string(),
        total_quantity: snapshot.total_quantity,
        empty_message: is_empty.then(|| EMPTY_CART_MESSAGE.to_string()),
        checkout_enabled: !is_empty,
    }
}

// =============================================================================
// Intents
// =============================================================================

/// A user action forwarded verbatim from a renderer.
///
/// `SetQuantity` carries the raw text of the quantity input so that
/// non-numeric input is reported as `InvalidInput` rather than dropped by
/// the renderer.
///
/// ## Wire Format
/// ```json
/// { "type": "add", "name": "Widget", "price": 9.99 }
/// { "type": "set_quantity", "name": "Widget", "quantity": "3" }
/// { "type": "checkout" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartIntent {
    Add { name: String, price: f64 },
    Remove { name: String },
    SetQuantity { name: String, quantity: String },
    Clear,
    Checkout,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CartStore;

    #[test]
    fn test_render_empty_cart() {
        let view = render(&CartStore::new().snapshot());

        assert!(view.lines.is_empty());
        assert_eq!(view.grand_total, "$0.00");
        assert_eq!(view.empty_message.as_deref(), Some(EMPTY_CART_MESSAGE));
        assert!(!view.checkout_enabled);
    }

    #[test]
    fn test_render_lines_in_order() {
        let mut cart = CartStore::new();
        cart.add_item("Widget", 9.99).unwrap();
        cart.add_item("Gadget", 5.005).unwrap();
        cart.update_quantity("Widget", 3).unwrap();

        let view = render(&cart.snapshot());

        assert_eq!(
            view.lines,
            vec![
                LineView {
                    name: "Widget".into(),
                    unit_price: "$9.99".into(),
                    quantity: 3,
                    line_total: "$29.97".into(),
                },
                LineView {
                    name: "Gadget".into(),
                    unit_price: "$5.01".into(),
                    quantity: 1,
                    line_total: "$5.01".into(),
                },
            ]
        );
        // 29.97 + 5.005 = 34.975 → 34.98
        assert_eq!(view.grand_total, "$34.98");
        assert_eq!(view.total_quantity, 4);
        assert_eq!(view.empty_message, None);
        assert!(view.checkout_enabled);
    }

    #[test]
    fn test_render_is_pure() {
        let mut cart = CartStore::new();
        cart.add_item("Widget", 9.99).unwrap();
        let snapshot = cart.snapshot();

        assert_eq!(render(&snapshot), render(&snapshot));
    }

    #[test]
    fn test_intent_wire_format() {
        let add: CartIntent =
            serde_json::from_str(r#"{"type":"add","name":"Widget","price":9.99}"#).unwrap();
        assert_eq!(
            add,
            CartIntent::Add {
                name: "Widget".into(),
                price: 9.99
            }
        );

        let set: CartIntent =
            serde_json::from_str(r#"{"type":"set_quantity","name":"Widget","quantity":"3"}"#)
                .unwrap();
        assert!(matches!(set, CartIntent::SetQuantity { .. }));

        let checkout: CartIntent = serde_json::from_str(r#"{"type":"checkout"}"#).unwrap();
        assert_eq!(checkout, CartIntent::Checkout);
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let view = render(&CartStore::new().snapshot());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["grandTotal"], "$0.00");
        assert_eq!(json["checkoutEnabled"], false);
    }
}
