//! Event handling and user interactions for bump-bot.
//!
//! This module provides functionality for handling chat and command events:
//! - Recording bumps from `/bump` and from bump-integration completions
//! - Answering `!cooldown` and `!help` in the monitored channel
//! - Coordinating responses between the tracker and the chat client

pub mod bump_event;
pub mod command;
