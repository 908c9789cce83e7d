//! # Basket Demo Entry Point
//!
//! Replays a cart script against a terminal-backed session.
//!
//! ```text
//! basket-demo                 # built-in script
//! basket-demo intents.json    # script from a file
//! RUST_LOG=basket=trace basket-demo
//! ```
//!
//! The actual setup is in lib.rs for better testability.

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let script_path = std::env::args().nth(1).map(std::path::PathBuf::from);

    match basket_demo::run(script_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("basket-demo: {}", e);
            ExitCode::FAILURE
        }
    }
}
