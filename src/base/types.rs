//! Common types and result aliases shared across the crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Crate-wide error type.
pub type Err = anyhow::Error;
/// Crate-wide result type.
pub type Res<T> = Result<T, Err>;
/// Result type for operations that return no value.
pub type Void = Res<()>;

/// A channel message as seen by the tracker, decoupled from the gateway's
/// own message type so the core can be exercised against a mock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Message ID.
    pub id: u64,
    /// ID of the message author.
    pub author_id: u64,
    /// Whether the author is a bot account.
    pub author_is_bot: bool,
    /// Plain-text message content.
    pub content: String,
    /// Embeds attached to the message.
    pub embeds: Vec<EmbedRecord>,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
}

/// The subset of an incoming embed the detection heuristics care about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedRecord {
    /// Embed title, if any.
    pub title: Option<String>,
    /// Embed description, if any.
    pub description: Option<String>,
}

/// An outgoing channel notification: optional plain content plus an
/// optional rich embed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Notification {
    /// Optional plain-text content.
    pub content: Option<String>,
    /// Optional rich embed.
    pub embed: Option<Embed>,
}

/// Platform-neutral embed body; the chat implementation translates this
/// into its native builder.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Embed {
    /// Embed title.
    pub title: String,
    /// Embed description.
    pub description: String,
    /// Accent color as an RGB integer.
    pub color: u32,
    /// Name/value fields shown in the embed body.
    pub fields: Vec<EmbedField>,
    /// Optional footer text.
    pub footer: Option<String>,
}

/// A single name/value field within an [`Embed`].
#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: String,
    /// Whether the field renders inline.
    pub inline: bool,
}

impl EmbedField {
    /// Creates a new embed field.
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }
}
