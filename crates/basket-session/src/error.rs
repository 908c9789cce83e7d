//! # Session Error Types
//!
//! Errors raised while setting up a session. Cart operations themselves
//! report `basket_core::CartError`; nothing here is produced by a user
//! intent.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Loading      │  │      Runtime            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  ConfigLoad     │  │  NoRuntime              │ │
//! │  │                 │  │  ConfigParse    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for session setup.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session setup error.
#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// A configuration value is out of range.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(#[from] std::io::Error),

    /// Config file is not valid TOML for `SessionConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParseFailed(#[from] toml::de::Error),

    // =========================================================================
    // Runtime Errors
    // =========================================================================
    /// The session was created outside a Tokio runtime, so timers cannot
    /// be scheduled.
    #[error("A Tokio runtime is required to schedule session timers")]
    NoRuntime,
}

// =============================================================================
// Unit Tests
// =============================================================================
