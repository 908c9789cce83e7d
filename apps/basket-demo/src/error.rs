//! # Demo Error Type
//!
//! What can stop the demo before it replays its script. Cart errors are
//! not here: the session reports those itself and the script carries on.

use basket_session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    /// Session could not be created.
    #[error("Session setup failed: {0}")]
    Session(#[from] SessionError),

    /// The intent script file could not be read.
    #[error("Failed to read intent script: {0}")]
    ScriptRead(#[from] std::io::Error),

    /// The intent script is not valid JSON for `CartIntent`.
    #[error("Invalid intent script: {0}")]
    Script(#[from] serde_json::Error),
}

pub type DemoResult<T> = Result<T, DemoError>;
