//! # basket-core: Pure Cart Logic for Basket
//!
//! This crate is the **heart** of Basket. It holds the cart state machine as
//! plain synchronous code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Basket Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Renderer (any display surface)                 │   │
//! │  │        draws CartView ──► forwards CartIntent                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket-session                               │   │
//! │  │    Notifier (auto-dismiss) • Checkout (delayed clear)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │   money   │  │   view    │  │ validation│  │   │
//! │  │   │ CartStore │  │   Money   │  │ render()  │  │   rules   │  │   │
//! │  │   │ CartEvent │  │ rounding  │  │ CartIntent│  │  parsing  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO LOGGING SIDE EFFECTS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - `CartStore`: add, remove, update, clear, snapshot, validate
//! - [`types`] - Entries, snapshots, events, severities
//! - [`money`] - Fixed-point money (no floating point arithmetic)
//! - [`view`] - Snapshot → view rendering and renderer intents
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{CartStore, Money};
//!
//! let mut cart = CartStore::new();
//! cart.add_item("Widget", 9.99).unwrap();
//! cart.add_item("Widget", 9.99).unwrap();
//! cart.update_quantity("Widget", 3).unwrap();
//!
//! assert_eq!(cart.grand_total(), Money::from_cents(2997));
//! assert!(cart.validate());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::CartStore;
pub use error::{CartError, CartResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;
pub use view::{render, CartIntent, CartView, LineView};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used for every displayed amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum number of distinct entries in one cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single entry.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest accepted unit price ($1,000,000.00).
pub const MAX_UNIT_PRICE: Money = Money::from_cents(100_000_000);

/// How long a notification stays visible, in milliseconds.
pub const NOTIFICATION_TTL_MS: u64 = 3000;

/// Delay between a successful checkout and the cart being cleared.
pub const CHECKOUT_CLEAR_DELAY_MS: u64 = 2000;
