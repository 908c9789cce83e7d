//! # Basket Demo Library
//!
//! Wires a [`CartSession`] to the terminal and replays a script of
//! renderer intents through it.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging)
//! 2. Load session configuration (defaults → TOML → env)
//! 3. Create the session with terminal renderer and notification surface
//! 4. Parse the intent script (built-in or from a file)
//! 5. Dispatch every intent, then wait for pending timers to run out
//!
//! ## Script Format
//! ```json
//! [
//!   {"type": "add", "name": "Widget", "price": 9.99},
//!   {"type": "set_quantity", "name": "Widget", "quantity": "3"},
//!   {"type": "checkout"}
//! ]
//! ```

pub mod error;
pub mod terminal;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use basket_core::CartIntent;
use basket_session::{CartSession, SessionConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use error::{DemoError, DemoResult};
use terminal::{TerminalRenderer, TerminalSurface};

/// Script replayed when no file is given.
pub const DEMO_SCRIPT: &str = r#"[
    {"type": "add", "name": "Widget", "price": 9.99},
    {"type": "add", "name": "Widget", "price": 9.99},
    {"type": "add", "name": "Gadget", "price": 5.005},
    {"type": "set_quantity", "name": "Widget", "quantity": "3"},
    {"type": "set_quantity", "name": "Gadget", "quantity": "two"},
    {"type": "remove", "name": "Gizmo"},
    {"type": "remove", "name": "Gadget"},
    {"type": "checkout"},
    {"type": "checkout"}
]"#;

/// Extra wait after the longest timer so its task gets to run.
const SETTLE_MARGIN: Duration = Duration::from_millis(100);

/// Runs the demo to completion.
pub async fn run(script_path: Option<PathBuf>) -> DemoResult<()> {
    init_tracing();

    let config = SessionConfig::load_or_default(None);
    let session = CartSession::with_outputs(
        config,
        Arc::new(TerminalRenderer),
        Arc::new(TerminalSurface),
    )?;

    let script = match &script_path {
        Some(path) => {
            info!(path = %path.display(), "Loading intent script");
            std::fs::read_to_string(path)?
        }
        None => DEMO_SCRIPT.to_string(),
    };
    let intents = parse_script(&script)?;

    let failed = replay(&session, intents);
    info!(failed, "Script finished, waiting for timers");

    tokio::time::sleep(settle_time(session.config())).await;

    let snapshot = session.snapshot();
    info!(
        items = snapshot.entries.len(),
        total = %snapshot.grand_total,
        consistent = session.validate(),
        "Demo complete"
    );
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Respects `RUST_LOG`; defaults to `info,basket=debug`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,basket=debug"));

    // A second init (tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Parses a JSON array of intents.
pub fn parse_script(script: &str) -> DemoResult<Vec<CartIntent>> {
    Ok(serde_json::from_str(script)?)
}

/// Dispatches each intent in order and returns how many were rejected.
///
/// Rejections do not stop the replay; the session has already shown them
/// as error notifications.
pub fn replay(session: &CartSession, intents: Vec<CartIntent>) -> usize {
    let mut failed = 0;
    for intent in intents {
        debug!(?intent, "Dispatching");
        if session.dispatch(intent).is_err() {
            failed += 1;
        }
    }
    failed
}

/// Time after which every timer started by the script has fired.
///
/// The delayed clear posts its own notification, so the last one can
/// disappear as late as `clear_delay + ttl`.
pub fn settle_time(config: &SessionConfig) -> Duration {
    config.clear_delay() + config.notification_ttl() + SETTLE_MARGIN
}
