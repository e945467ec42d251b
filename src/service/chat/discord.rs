//! Chat service integration for bump-bot.
//!
//! This module provides the Discord implementation of the chat trait:
//! - Receiving message and slash-command events for the monitored channel
//! - Posting notifications (content + embed)
//! - Fetching recent channel history for startup reconciliation
//!
//! Everything outside the configured channel is ignored.

use std::{
    ops::Deref,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use serenity::{
    all::{
        ChannelId, Client, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, EventHandler, GatewayIntents, GetMessages,
        Interaction, Message, Ready, Timestamp,
    },
    http::Http,
};
use tracing::{error, info, instrument};

use crate::{
    base::{
        config::Config,
        patterns,
        types::{EmbedRecord, MessageRecord, Notification, Res, Void},
    },
    interaction,
    tracker::BumpTracker,
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the Discord implementation.

impl ChatClient {
    /// Creates a new Discord chat client.
    pub async fn discord(config: &Config, tracker: BumpTracker, connected: Arc<AtomicBool>) -> Res<Self> {
        let client = DiscordChatClient::new(config, tracker, connected).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

impl From<DiscordChatClient> for ChatClient {
    fn from(client: DiscordChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Structs.

/// Discord client implementation.
#[derive(Clone)]
struct DiscordChatClient {
    config: Config,
    http: Arc<Http>,
    channel_id: ChannelId,
    bot_user_id: u64,
    tracker: BumpTracker,
    connected: Arc<AtomicBool>,
}

impl Deref for DiscordChatClient {
    type Target = Http;

    fn deref(&self) -> &Self::Target {
        &self.http
    }
}

impl DiscordChatClient {
    /// Create a new Discord chat client.
    #[instrument(name = "DiscordChatClient::new", skip_all)]
    pub async fn new(config: &Config, tracker: BumpTracker, connected: Arc<AtomicBool>) -> Res<Self> {
        let http = Arc::new(Http::new(&config.discord_token));

        // Resolve the bot's own user ID up front; the reminder-dedup
        // heuristic needs it before the gateway connects.
        let bot_user = http.get_current_user().await?;
        let bot_user_id = bot_user.id.get();

        info!("Discord bot user ID: {}", bot_user_id);

        Ok(Self {
            config: config.clone(),
            http,
            channel_id: ChannelId::new(config.bump_channel_id),
            bot_user_id,
            tracker,
            connected,
        })
    }
}

#[async_trait]
impl GenericChatClient for DiscordChatClient {
    fn bot_user_id(&self) -> u64 {
        self.bot_user_id
    }

    async fn start(&self) -> Void {
        let intents = GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

        let handler = DiscordEventHandler {
            config: self.config.clone(),
            chat: ChatClient::from(self.clone()),
            tracker: self.tracker.clone(),
            connected: self.connected.clone(),
            channel_id: self.channel_id,
            bot_user_id: self.bot_user_id,
        };

        let mut client = Client::builder(&self.config.discord_token, intents).event_handler(handler).await?;

        client.start().await?;

        Ok(())
    }

    #[instrument(skip(self, notification))]
    async fn send_notification(&self, notification: &Notification) -> Void {
        let message = build_message(notification);

        let _ = self
            .channel_id
            .send_message(&self.http, message)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_recent_messages(&self, limit: u8) -> Res<Vec<MessageRecord>> {
        let messages = self
            .channel_id
            .messages(&self.http, GetMessages::new().limit(limit))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to fetch channel history: {}", e))?;

        // Discord returns newest first, which is the order the tracker expects.
        Ok(messages.iter().map(message_record).collect())
    }
}

// Gateway event handler.

/// Event handler state for the Discord gateway.
struct DiscordEventHandler {
    config: Config,
    chat: ChatClient,
    tracker: BumpTracker,
    connected: Arc<AtomicBool>,
    channel_id: ChannelId,
    bot_user_id: u64,
}

#[serenity::async_trait]
impl EventHandler for DiscordEventHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!("{} is connected to Discord!", ready.user.name);
        self.connected.store(true, Ordering::SeqCst);

        // Rebuild cycle state from recent channel history. A failure here
        // leaves the tracker idle.
        let tracker = self.tracker.clone();
        let chat = self.chat.clone();

        tokio::spawn(async move {
            if let Err(err) = tracker.reconcile_on_startup(&chat).await {
                error!("Startup reconciliation failed; staying idle: {}", err);
            }
        });
    }

    async fn message(&self, _ctx: Context, message: Message) {
        // Only the designated bump channel is monitored.
        if message.channel_id != self.channel_id {
            return;
        }

        if message.author.bot {
            // Third-party bump integrations announce completed bumps with a
            // recognizable message; treat those as bumps.
            if message.author.id.get() != self.bot_user_id {
                let record = message_record(&message);

                if patterns::is_completion(&record) {
                    interaction::bump_event::handle_completion_message(record, self.tracker.clone(), self.chat.clone());
                }
            }

            return;
        }

        if message.content.starts_with('!') {
            interaction::command::handle_command(message.content.clone(), self.config.clone(), self.tracker.clone(), self.chat.clone());
        }
    }

    async fn interaction_create(&self, _ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        if command.channel_id != self.channel_id || command.data.name != "bump" {
            return;
        }

        info!("/bump used by {}", command.user.tag());

        interaction::bump_event::handle_slash_bump(command.user.id.get(), self.tracker.clone(), self.chat.clone());
    }
}

// Conversions.

/// Convert a gateway message into the tracker's platform-neutral record.
fn message_record(message: &Message) -> MessageRecord {
    MessageRecord {
        id: message.id.get(),
        author_id: message.author.id.get(),
        author_is_bot: message.author.bot,
        content: message.content.clone(),
        embeds: message
            .embeds
            .iter()
            .map(|embed| EmbedRecord {
                title: embed.title.clone(),
                description: embed.description.clone(),
            })
            .collect(),
        created_at: chrono::DateTime::from_timestamp(message.timestamp.unix_timestamp(), 0).unwrap_or_else(chrono::Utc::now),
    }
}

/// Convert a platform-neutral notification into a Discord message.
fn build_message(notification: &Notification) -> CreateMessage {
    let mut message = CreateMessage::new();

    if let Some(content) = &notification.content {
        message = message.content(content.clone());
    }

    if let Some(embed) = &notification.embed {
        let mut create = CreateEmbed::new()
            .title(embed.title.clone())
            .description(embed.description.clone())
            .color(embed.color)
            .timestamp(Timestamp::now());

        for field in &embed.fields {
            create = create.field(field.name.clone(), field.value.clone(), field.inline);
        }

        if let Some(footer) = &embed.footer {
            create = create.footer(CreateEmbedFooter::new(footer.clone()));
        }

        message = message.embed(create);
    }

    message
}
