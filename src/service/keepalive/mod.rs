//! Keep-alive HTTP endpoints.
//!
//! Hosting platforms that sleep idle services expect a reachable web
//! server; this module serves `GET /` (uptime/status) and `GET /health`
//! (gateway connectivity). It is outside the tracker core and never affects
//! the bump cycle.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use axum::{Json, Router, extract::State, routing::get};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use crate::base::types::Void;

/// Shared state for the keep-alive endpoints.
#[derive(Clone)]
pub struct KeepAliveState {
    started_at: Instant,
    connected: Arc<AtomicBool>,
}

impl KeepAliveState {
    pub fn new(connected: Arc<AtomicBool>) -> Self {
        Self {
            started_at: Instant::now(),
            connected,
        }
    }
}

/// Serve the keep-alive endpoints until the process exits.
pub async fn serve(port: u16, state: KeepAliveState) -> Void {
    let router = Router::new().route("/", get(status)).route("/health", get(health)).with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!("Keep-alive server running on port {}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

/// `GET /` — process status and uptime.
async fn status(State(state): State<KeepAliveState>) -> Json<Value> {
    Json(json!({
        "status": "Bot is running!",
        "uptime": state.started_at.elapsed().as_secs(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// `GET /health` — gateway connectivity.
async fn health(State(state): State<KeepAliveState>) -> Json<Value> {
    let bot = if state.connected.load(Ordering::SeqCst) { "connected" } else { "disconnected" };

    Json(json!({
        "status": "healthy",
        "bot": bot,
    }))
}
