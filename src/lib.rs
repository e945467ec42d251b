//! Library root for `bump-bot`.
//!
//! Bump-bot is a single-channel Discord companion that keeps a server's
//! bump cadence alive:
//! - Tracks `/bump` usage and third-party bump-bot completions
//! - Schedules a one-shot reminder after the 120-minute cooldown
//! - Resumes its schedule after a restart by scanning recent history
//! - Answers `!cooldown` and `!help` in the monitored channel
//!
//! The bot integrates with Discord for chat and exposes a small keep-alive
//! HTTP surface for hosting platforms. The architecture is built around an
//! extensible chat trait that allows different implementations of the
//! gateway to be swapped in (and mocked in tests).

#[deny(missing_docs)]
pub mod base;
pub mod interaction;
pub mod runtime;
pub mod service;
pub mod tracker;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the bump-bot runtime:
/// - Creates the runtime context with the tracker and chat client
/// - Spawns the keep-alive HTTP listener
/// - Starts the gateway event loop
pub async fn start(config: Config) -> Void {
    info!("Starting bump-bot ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config).await?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
