//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services used by bump-bot:
//! - Chat services (e.g., Discord)
//! - The keep-alive HTTP endpoints
//!
//! The chat module defines both a generic trait and a concrete
//! implementation, allowing for extensibility and easy testing.

pub mod chat;
pub mod keepalive;
