//! # Error Types
//!
//! Domain-specific error types for basket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  basket-core errors (this file)                                        │
//! │  ├── CartError        - What a cart/checkout operation reports         │
//! │  └── ValidationError  - Why an input was rejected                      │
//! │                                                                         │
//! │  basket-session errors (separate crate)                                │
//! │  └── SessionError     - Configuration loading failures                 │
//! │                                                                         │
//! │  Flow: ValidationError → CartError::InvalidInput → error notification  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, field, value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors raised by cart and checkout operations.
///
/// All of these are expected, recoverable conditions. A failed operation
/// never changes cart state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Malformed name, price or quantity.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The operation targets an entry that is not in the cart.
    #[error("{name} is not in the cart")]
    NotFound { name: String },

    /// Checkout (or a similar operation) was attempted on an empty cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Click "Checkout" with nothing in the cart
    ///      │
    ///      ▼
    /// CartError::EmptyCart
    ///      │
    ///      ▼
    /// Error notification: "Your cart is empty"
    /// ```
    #[error("Your cart is empty")]
    EmptyCart,
}

impl CartError {
    /// Stable machine-readable code, handy for front ends and log filters.
    pub fn code(&self) -> ErrorKind {
        match self {
            CartError::InvalidInput(_) => ErrorKind::InvalidInput,
            CartError::NotFound { .. } => ErrorKind::NotFound,
            CartError::EmptyCart => ErrorKind::EmptyCart,
        }
    }
}

/// The three error kinds, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    EmptyCart,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when renderer input doesn't meet requirements and are
/// checked before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Whole-number field outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Amount above its ceiling.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// NaN or infinite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Raw text could not be read as a number.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// Raw text is a number but has a fractional part.
    #[error("{field} must be a whole number, got '{value}'")]
    NotAWholeNumber { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
