pub mod discord;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{MessageRecord, Notification, Res, Void};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the core functionality for interacting with chat
/// platforms like Discord, scoped to the single monitored channel.
/// Implementing this trait allows different chat services to be used with
/// the bump-bot, and lets tests drive the tracker against a mock.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Get the bot's own user ID.
    ///
    /// Used to recognize the bot's previously sent reminders in channel
    /// history during startup reconciliation.
    fn bot_user_id(&self) -> u64;

    /// Start the chat client listener.
    ///
    /// This sets up event listeners for the chat platform and begins
    /// processing incoming messages and interactions.
    async fn start(&self) -> Void;

    /// Post a notification to the monitored channel.
    async fn send_notification(&self, notification: &Notification) -> Void;

    /// Fetch the most recent messages from the monitored channel, newest
    /// first, up to `limit`.
    async fn fetch_recent_messages(&self, limit: u8) -> Res<Vec<MessageRecord>>;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
