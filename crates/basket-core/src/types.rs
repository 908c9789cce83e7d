//! # Domain Types
//!
//! Core domain types shared by the cart store, the view model and the
//! session layer.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   CartEntry     │   │  CartSnapshot   │   │   CartEvent     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name (unique)  │   │  entries (ord.) │   │  ItemAdded      │       │
//! │  │  unit_price     │   │  grand_total    │   │  QtyIncreased   │       │
//! │  │  quantity > 0   │   │  total_quantity │   │  ItemRemoved    │       │
//! │  │  line_total     │   └─────────────────┘   │  Cleared ...    │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │    Severity     │   success | info | error                          │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Severity
// =============================================================================

/// Classification of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One named product line in the cart.
///
/// ## Design Notes
/// - `unit_price` is frozen when the entry is created
/// - `line_total` is recomputed by every quantity change and never set
///   directly, so it always equals `unit_price × quantity`
/// - Fields are read through accessors; only the store can mutate an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    pub(crate) name: String,
    pub(crate) unit_price: Money,
    pub(crate) quantity: i64,
    pub(crate) line_total: Money,
}

impl CartEntry {
    /// Creates an entry with quantity 1.
    pub(crate) fn new(name: String, unit_price: Money) -> Self {
        CartEntry {
            name,
            unit_price,
            quantity: 1,
            line_total: unit_price,
        }
    }

    /// Sets the quantity and recomputes the line total.
    ///
    /// On overflow the entry is left untouched and `None` is returned.
    pub(crate) fn set_quantity(&mut self, quantity: i64) -> Option<Money> {
        let line_total = self.unit_price.checked_multiply_quantity(quantity)?;
        self.quantity = quantity;
        self.line_total = line_total;
        Some(line_total)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }

    /// Checks invariants 1 and 2 for this entry.
    pub fn is_consistent(&self) -> bool {
        self.quantity > 0
            && self.unit_price.is_positive()
            && self.unit_price.checked_multiply_quantity(self.quantity) == Some(self.line_total)
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Immutable, owned view of the cart handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    /// Entries in insertion order.
    pub entries: Vec<CartEntry>,

    /// Sum of line totals rounded to cents.
    pub grand_total: Money,

    /// Sum of quantities across all entries.
    pub total_quantity: i64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Cart Event
// =============================================================================

/// What a successful cart mutation did.
///
/// The store returns these instead of performing side effects; the session
/// layer turns them into notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new entry was created with quantity 1.
    ItemAdded { name: String, unit_price: Money },

    /// An existing entry was added again.
    QuantityIncreased { name: String, quantity: i64 },

    /// Quantity was set explicitly to a non-zero value.
    QuantityUpdated { name: String, quantity: i64 },

    /// An entry was deleted (explicitly or by setting quantity to 0).
    ItemRemoved { name: String },

    /// A non-empty cart was emptied.
    Cleared { removed: usize },

    /// `clear` was called on a cart that was already empty.
    AlreadyEmpty,
}

impl CartEvent {
    /// The notification this event should produce, if any.
    ///
    /// ## Example
    /// ```rust
    /// use basket_core::{CartEvent, Severity};
    ///
    /// let event = CartEvent::ItemRemoved { name: "Widget".into() };
    /// let (severity, text) = event.notification().unwrap();
    /// assert_eq!(severity, Severity::Info);
    /// assert_eq!(text, "Widget removed from cart");
    /// ```
    pub fn notification(&self) -> Option<(Severity, String)> {
        match self {
            CartEvent::ItemAdded { name, .. } => {
                Some((Severity::Success, format!("{} added to cart", name)))
            }
            CartEvent::QuantityIncreased { name, quantity } => Some((
                Severity::Info,
                format!("{} quantity increased to {}", name, quantity),
            )),
            CartEvent::QuantityUpdated { .. } => None,
            CartEvent::ItemRemoved { name } => {
                Some((Severity::Info, format!("{} removed from cart", name)))
            }
            CartEvent::Cleared { removed } => Some((
                Severity::Info,
                format!("Cart cleared! Removed {} item(s)", removed),
            )),
            CartEvent::AlreadyEmpty => Some((Severity::Info, "Cart is already empty".to_string())),
        }
    }
}

// =============================================================================
// Checkout Summary
// =============================================================================

/// Totals reported by a successful checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// Sum of quantities.
    pub item_count: i64,

    /// The cart's grand total.
    pub total: Money,
}

impl CheckoutSummary {
    /// Success message shown to the user.
    pub fn message(&self) -> String {
        format!(
            "Checkout successful! {} item(s) for {}",
            self.item_count, self.total
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
