//! Runtime services and shared state for the bump-bot.

use std::sync::{Arc, atomic::AtomicBool};

use tracing::{error, instrument};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    service::{
        chat::ChatClient,
        keepalive::{self, KeepAliveState},
    },
    tracker::BumpTracker,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the tracker, the chat client, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The bump cycle tracker instance.
    pub tracker: BumpTracker,
    /// The chat client instance.
    pub chat: ChatClient,
    /// Gateway connectivity flag shared with the keep-alive endpoints.
    connected: Arc<AtomicBool>,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        let connected = Arc::new(AtomicBool::new(false));

        // Initialize the tracker.
        let tracker = BumpTracker::new(config.clone());

        // Initialize the Discord client.
        let chat = ChatClient::discord(&config, tracker.clone(), connected.clone()).await?;

        Ok(Self {
            config,
            tracker,
            chat,
            connected,
        })
    }

    pub async fn start(&self) -> Void {
        // The keep-alive listener runs beside the gateway; a failure there
        // is logged but never fatal to the bot.
        let state = KeepAliveState::new(self.connected.clone());
        let port = self.config.http_port;

        tokio::spawn(async move {
            if let Err(err) = keepalive::serve(port, state).await {
                error!("Keep-alive server failed: {}", err);
            }
        });

        self.chat.start().await
    }
}
