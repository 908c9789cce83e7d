//! # basket-session: Session Orchestration for Basket
//!
//! Wraps the pure `basket-core` store with the parts of a cart that happen
//! over time: notifications that disappear on their own, a checkout that
//! clears the cart a moment later, and a renderer that redraws after every
//! change.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Renderer ──intent──► CartSession ──► CartStore (basket-core)         │
//! │      ▲                     │                                            │
//! │      │ CartView            ├──► Notifier ──► NotificationSurface       │
//! │      └─────────────────────┤       (auto-dismiss after 3 s)             │
//! │                            └──► CheckoutMachine                         │
//! │                                    (clear after 2 s)                    │
//! │                                                                         │
//! │   Single logical thread of control: every operation completes before  │
//! │   it returns. Only the two timers run later, on the Tokio runtime.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`session`] - `CartSession`, the per-session handle
//! - [`notifier`] - Timed notification queue and display surface trait
//! - [`checkout`] - Checkout state machine with cancellable delayed clear
//! - [`renderer`] - Renderer trait
//! - [`config`] - Session configuration (TOML + env)
//! - [`error`] - Session setup errors
//!
//! ## Usage
//!
//! ```rust,no_run
//! use basket_session::{CartSession, SessionConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = CartSession::new(SessionConfig::load_or_default(None))?;
//!
//! session.add_item("Widget", 9.99)?;
//! session.add_item("Widget", 9.99)?;
//! let summary = session.checkout()?;
//! assert_eq!(summary.item_count, 2);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod config;
pub mod error;
pub mod notifier;
pub mod renderer;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutMachine, CheckoutState};
pub use config::{CheckoutSettings, NotifierSettings, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use notifier::{NoOpSurface, Notification, NotificationId, NotificationSurface, Notifier};
pub use renderer::{NoOpRenderer, Renderer};
pub use session::CartSession;
