//! Core components, types, and utilities for the bump-bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Bump-integration detection patterns and canned notification content.
//! - Common types and result handling.

pub mod config;
pub mod notify;
pub mod patterns;
pub mod types;
