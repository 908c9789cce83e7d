//! # Session Configuration
//!
//! Timer durations and the delayed-clear cancellation policy.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BASKET_NOTIFY_TTL_MS=3000                                          │
//! │     BASKET_CLEAR_DELAY_MS=2000                                         │
//! │     BASKET_CANCEL_CLEAR_ON_MUTATION=true                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/basket/session.toml (Linux)                              │
//! │     ~/Library/Application Support/com.basket.cart/session.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     3000 ms toasts, 2000 ms delayed clear, no cancellation             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # session.toml
//! [notifier]
//! ttl_ms = 3000
//!
//! [checkout]
//! clear_delay_ms = 2000
//! cancel_clear_on_mutation = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use basket_core::{CHECKOUT_CLEAR_DELAY_MS, NOTIFICATION_TTL_MS};

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Notifier Settings
// =============================================================================

/// Settings for user-facing notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierSettings {
    /// How long a notification stays visible.
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_ttl_ms() -> u64 {
    NOTIFICATION_TTL_MS
}

impl Default for NotifierSettings {
    fn default() -> Self {
        NotifierSettings {
            ttl_ms: default_ttl_ms(),
        }
    }
}

// =============================================================================
// Checkout Settings
// =============================================================================

/// Settings for the checkout flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Delay between a successful checkout and the cart being cleared.
    #[serde(default = "default_clear_delay_ms")]
    pub clear_delay_ms: u64,

    /// When true, any cart mutation while a clear is pending cancels it.
    ///
    /// Off by default: the pending clear fires even if the cart was
    /// repopulated in the meantime.
    #[serde(default)]
    pub cancel_clear_on_mutation: bool,
}

fn default_clear_delay_ms() -> u64 {
    CHECKOUT_CLEAR_DELAY_MS
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            clear_delay_ms: default_clear_delay_ms(),
            cancel_clear_on_mutation: false,
        }
    }
}

// =============================================================================
// Main Session Configuration
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub notifier: NotifierSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (session.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        if self.notifier.ttl_ms == 0 {
            return Err(SessionError::InvalidConfig(
                "notifier.ttl_ms must be greater than 0".into(),
            ));
        }

        if self.checkout.clear_delay_ms == 0 {
            return Err(SessionError::InvalidConfig(
                "checkout.clear_delay_ms must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BASKET_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable values are
    /// logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ttl) = lookup("BASKET_NOTIFY_TTL_MS") {
            match ttl.parse::<u64>() {
                Ok(ms) => {
                    debug!(ttl_ms = ms, "Overriding notification ttl from environment");
                    self.notifier.ttl_ms = ms;
                }
                Err(_) => warn!(value = %ttl, "Ignoring invalid BASKET_NOTIFY_TTL_MS"),
            }
        }

        if let Some(delay) = lookup("BASKET_CLEAR_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => {
                    debug!(clear_delay_ms = ms, "Overriding clear delay from environment");
                    self.checkout.clear_delay_ms = ms;
                }
                Err(_) => warn!(value = %delay, "Ignoring invalid BASKET_CLEAR_DELAY_MS"),
            }
        }

        if let Some(flag) = lookup("BASKET_CANCEL_CLEAR_ON_MUTATION") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.checkout.cancel_clear_on_mutation = true,
                "0" | "false" | "no" | "off" => self.checkout.cancel_clear_on_mutation = false,
                _ => warn!(value = %flag, "Ignoring invalid BASKET_CANCEL_CLEAR_ON_MUTATION"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "basket", "cart")
            .map(|dirs| dirs.config_dir().join("session.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notifier.ttl_ms)
    }

    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.clear_delay_ms)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
