//! # Checkout State Machine
//!
//! Tracks a simulated purchase from the click to the delayed clear.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │          ┌──────────────────────────────────────────────────┐          │
//! │          ▼                                                  │          │
//! │      ┌──────┐  checkout  ┌────────────┐  ok   ┌─────────┐   │          │
//! │      │ Idle │───────────►│ Processing │──────►│ Success │   │          │
//! │      └──────┘            └────────────┘       └────┬────┘   │          │
//! │          ▲                  │      ▲               │        │          │
//! │          │    empty cart    │      │ checkout      ▼        │          │
//! │      ┌──────────┐◄──────────┘      │      ┌────────────────┐│          │
//! │      │ Rejected │                  └──────│ ScheduledClear │┘          │
//! │      └──────────┘                         └────────────────┘           │
//! │                                       delay elapsed (or cancelled)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only one clear is ever pending. A scheduled clear carries a generation
//! token; a clear whose token no longer matches (because it was cancelled
//! or replaced) does nothing when it fires.

use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::debug;

/// Where the checkout flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Idle,
    Processing,
    Success,
    ScheduledClear,
    Rejected,
}

impl CheckoutState {
    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(self, next: CheckoutState) -> bool {
        use CheckoutState::*;
        matches!(
            (self, next),
            (Idle, Processing)
                | (ScheduledClear, Processing)
                | (Processing, Success)
                | (Processing, Rejected)
                | (Success, ScheduledClear)
                | (ScheduledClear, Idle)
                | (Rejected, Idle)
        )
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckoutState::Idle => write!(f, "idle"),
            CheckoutState::Processing => write!(f, "processing"),
            CheckoutState::Success => write!(f, "success"),
            CheckoutState::ScheduledClear => write!(f, "scheduled_clear"),
            CheckoutState::Rejected => write!(f, "rejected"),
        }
    }
}

/// Token identifying one scheduled clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearToken(u64);

/// The checkout state plus the handle of the pending clear, if any.
#[derive(Debug, Default)]
pub struct CheckoutMachine {
    state: CheckoutState,
    generation: u64,
    pending: Option<AbortHandle>,
}

impl CheckoutMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Returns true while a delayed clear is waiting to fire.
    pub fn has_pending_clear(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a checkout. A clear still pending from an earlier checkout is
    /// dropped so that at most one is ever scheduled.
    pub fn begin(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            self.generation += 1;
            debug!("Replacing pending clear with new checkout");
        }
        self.transition(CheckoutState::Processing);
    }

    /// The cart was empty: Processing → Rejected → Idle.
    pub fn reject(&mut self) {
        self.transition(CheckoutState::Rejected);
        self.transition(CheckoutState::Idle);
    }

    /// The purchase went through. Returns the token the delayed clear must
    /// present when it fires.
    pub fn succeed(&mut self) -> ClearToken {
        self.transition(CheckoutState::Success);
        self.generation += 1;
        ClearToken(self.generation)
    }

    /// Records the task that will perform the delayed clear.
    pub fn schedule(&mut self, token: ClearToken, handle: AbortHandle) {
        debug_assert_eq!(token.0, self.generation);
        self.pending = Some(handle);
        self.transition(CheckoutState::ScheduledClear);
    }

    /// Called by the delayed clear when it fires. Returns false if the
    /// clear was cancelled or replaced and must not touch the cart.
    pub fn finish_clear(&mut self, token: ClearToken) -> bool {
        if token.0 != self.generation || self.state != CheckoutState::ScheduledClear {
            debug!(token = token.0, current = self.generation, "Stale clear ignored");
            return false;
        }

        self.pending = None;
        self.transition(CheckoutState::Idle);
        true
    }

    /// Cancels the pending clear, if any. Returns whether one was cancelled.
    pub fn cancel_pending(&mut self) -> bool {
        let Some(handle) = self.pending.take() else {
            return false;
        };

        handle.abort();
        self.generation += 1;
        self.transition(CheckoutState::Idle);
        true
    }

    fn transition(&mut self, next: CheckoutState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal checkout transition {} -> {}",
            self.state,
            next
        );
        debug!(from = %self.state, to = %next, "Checkout transition");
        self.state = next;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
