//! # Cart Store
//!
//! Owns the list of cart entries and the derived grand total.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Renderer Intent          Store Method            State Change          │
//! │  ───────────────          ────────────            ────────────          │
//! │                                                                         │
//! │  add(name, price) ───────► add_item() ──────────► push or qty += 1     │
//! │                                                                         │
//! │  setQuantity(name, n) ───► update_quantity() ───► qty = n (0 removes)  │
//! │                                                                         │
//! │  remove(name) ───────────► remove_item() ───────► entries.remove(i)    │
//! │                                                                         │
//! │  clear ──────────────────► clear() ─────────────► entries.clear()      │
//! │                                                                         │
//! │  (render) ───────────────► snapshot() ──────────► (read only)          │
//! │                                                                         │
//! │  Every write: validate → mutate → recompute_total                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! 1. `line_total == unit_price × quantity` for every entry
//! 2. No entry has quantity 0
//! 3. `grand_total == round_to_cents(Σ line_total)`
//! 4. Names are unique
//!
//! Quantities, prices and the number of entries are capped
//! (`MAX_ITEM_QUANTITY`, `MAX_UNIT_PRICE`, `MAX_CART_ITEMS`), which keeps
//! every total far inside `i64`. A rejected mutation touches nothing.
//!
//! The cart is small, so lookups are linear scans over a `Vec`, which also
//! preserves insertion order for display.

use crate::error::{CartError, CartResult, ValidationError};
use crate::money::Money;
use crate::types::{CartEntry, CartEvent, CartSnapshot, CheckoutSummary};
use crate::validation::{
    validate_cart_size, validate_product_name, validate_quantity, validate_unit_price,
};
use crate::MAX_ITEM_QUANTITY;

/// The shopping cart.
///
/// One store is created per session and handed around by reference; there
/// is no process-wide cart.
#[derive(Debug, Clone)]
pub struct CartStore {
    entries: Vec<CartEntry>,
    grand_total: Money,
}

impl CartStore {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartStore {
            entries: Vec::new(),
            grand_total: Money::zero(),
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product, creating the entry on first add.
    ///
    /// ## Behavior
    /// - Entry exists: quantity += 1 (the original unit price is kept)
    /// - Entry missing: new entry with quantity 1
    ///
    /// ## Returns
    /// - `CartEvent::ItemAdded` or `CartEvent::QuantityIncreased`
    /// - `CartError::InvalidInput` for an empty name, a bad price, a
    ///   quantity that would pass `MAX_ITEM_QUANTITY` or a full cart
    pub fn add_item(&mut self, name: &str, unit_price: f64) -> CartResult<CartEvent> {
        let name = validate_product_name(name)?;
        let unit_price = validate_unit_price(unit_price)?;

        let event = match self.position(name) {
            Some(index) => {
                let quantity = validate_quantity(self.entries[index].quantity + 1)?;
                let entry = &mut self.entries[index];
                entry.set_quantity(quantity).ok_or_else(quantity_overflow)?;
                CartEvent::QuantityIncreased {
                    name: entry.name.clone(),
                    quantity,
                }
            }
            None => {
                validate_cart_size(self.entries.len())?;
                self.entries.push(CartEntry::new(name.to_string(), unit_price));
                CartEvent::ItemAdded {
                    name: name.to_string(),
                    unit_price,
                }
            }
        };

        self.recompute_total();
        Ok(event)
    }

    /// Removes an entry by name.
    pub fn remove_item(&mut self, name: &str) -> CartResult<CartEvent> {
        let name = validate_product_name(name)?;
        let index = self.position(name).ok_or_else(|| CartError::NotFound {
            name: name.to_string(),
        })?;

        let entry = self.entries.remove(index);
        self.recompute_total();

        Ok(CartEvent::ItemRemoved { name: entry.name })
    }

    /// Sets the quantity of an entry.
    ///
    /// ## Behavior
    /// - Quantity 0: same as `remove_item`
    /// - Negative or above `MAX_ITEM_QUANTITY`: `InvalidInput`
    /// - Entry missing: `NotFound`
    pub fn update_quantity(&mut self, name: &str, quantity: i64) -> CartResult<CartEvent> {
        let quantity = validate_quantity(quantity)?;
        if quantity == 0 {
            return self.remove_item(name);
        }

        let name = validate_product_name(name)?;
        let index = self.position(name).ok_or_else(|| CartError::NotFound {
            name: name.to_string(),
        })?;

        let entry = &mut self.entries[index];
        entry.set_quantity(quantity).ok_or_else(quantity_overflow)?;
        let event = CartEvent::QuantityUpdated {
            name: entry.name.clone(),
            quantity,
        };

        self.recompute_total();
        Ok(event)
    }

    /// Empties the cart.
    ///
    /// Clearing an empty cart changes nothing but still reports
    /// `CartEvent::AlreadyEmpty`.
    pub fn clear(&mut self) -> CartEvent {
        if self.entries.is_empty() {
            return CartEvent::AlreadyEmpty;
        }

        let removed = self.entries.len();
        self.entries.clear();
        self.recompute_total();

        CartEvent::Cleared { removed }
    }

    /// Recomputes the grand total from the current line totals.
    ///
    /// Idempotent; every mutation calls it before returning.
    pub fn recompute_total(&mut self) -> Money {
        self.grand_total = self
            .entries
            .iter()
            .map(CartEntry::line_total)
            .sum::<Money>()
            .round_to_cents();
        self.grand_total
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns an owned, read-only copy of the cart for rendering.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            entries: self.entries.clone(),
            grand_total: self.grand_total,
            total_quantity: self.total_quantity(),
        }
    }

    /// Re-derives invariants 1–4 over every entry.
    ///
    /// Never panics; returns `false` on the first violation.
    pub fn validate(&self) -> bool {
        if !self.entries.iter().all(CartEntry::is_consistent) {
            return false;
        }

        let unique = self
            .entries
            .iter()
            .enumerate()
            .all(|(i, a)| self.entries[i + 1..].iter().all(|b| b.name != a.name));
        if !unique {
            return false;
        }

        match Money::checked_sum(self.entries.iter().map(CartEntry::line_total)) {
            Some(expected) => self.grand_total == expected.round_to_cents(),
            None => false,
        }
    }

    /// Totals for a checkout, or `EmptyCart` if there is nothing to buy.
    pub fn checkout_summary(&self) -> CartResult<CheckoutSummary> {
        if self.entries.is_empty() {
            return Err(CartError::EmptyCart);
        }

        Ok(CheckoutSummary {
            item_count: self.total_quantity(),
            total: self.grand_total,
        })
    }

    /// Looks up an entry by name.
    pub fn get(&self, name: &str) -> Option<&CartEntry> {
        let name = name.trim();
        self.entries.iter().find(|e| e.name == name)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    pub fn grand_total(&self) -> Money {
        self.grand_total
    }

    /// Returns the number of distinct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total quantity of all entries.
    pub fn total_quantity(&self) -> i64 {
        self.entries.iter().map(CartEntry::quantity).sum()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

fn quantity_overflow() -> CartError {
    ValidationError::OutOfRange {
        field: "quantity".to_string(),
        min: 0,
        max: MAX_ITEM_QUANTITY,
    }
    .into()
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
