//! Canned notification bodies for every message the bot sends.
//!
//! Titles, colors, and field layout follow the embeds the community already
//! knows; `REMINDER_TITLE` doubles as the marker the startup reconciliation
//! uses to detect a reminder it sent before a restart.

use chrono::{DateTime, Utc};

use super::types::{Embed, EmbedField, Notification};

/// Title of the reminder embed. Also used to recognize prior reminders in
/// channel history, so changing it resets that heuristic.
pub const REMINDER_TITLE: &str = "🔔 Bump Reminder!";

const GREEN: u32 = 0x00FF00;
const ORANGE: u32 = 0xFFA500;
const RED: u32 = 0xFF4444;
const REMINDER_ORANGE: u32 = 0xFF6B35;
const BLUE: u32 = 0x4A90E2;

/// Confirmation posted right after a bump is recorded.
pub fn bump_confirmation(bumped_by: &str, next_available: DateTime<Utc>) -> Notification {
    Notification {
        content: None,
        embed: Some(Embed {
            title: "✅ Bump Detected!".to_string(),
            description: "Server has been bumped successfully!".to_string(),
            color: GREEN,
            fields: vec![
                EmbedField::new("⏰ Next Bump Available", format!("<t:{}:R>", next_available.timestamp()), true),
                EmbedField::new("👤 Bumped By", bumped_by, true),
            ],
            footer: Some("Bump Cooldown Tracker".to_string()),
        }),
    }
}

/// The role-mention reminder sent when the cooldown elapses.
pub fn bump_reminder(role_id: u64) -> Notification {
    Notification {
        content: Some(format!("<@&{role_id}> Time to bump! 🚀")),
        embed: Some(Embed {
            title: REMINDER_TITLE.to_string(),
            description: "It's time to bump the server again!".to_string(),
            color: REMINDER_ORANGE,
            fields: vec![
                EmbedField::new("📝 How to Bump", "Use `/bump` command to bump the server", false),
                EmbedField::new("⏱️ Cooldown", "120 minutes from last bump", true),
            ],
            footer: Some("Don't forget to bump! 🚀".to_string()),
        }),
    }
}

/// `!cooldown` reply when no bump has been recorded yet.
pub fn no_recent_bump() -> Notification {
    Notification {
        content: None,
        embed: Some(Embed {
            title: "⚠️ No Recent Bump".to_string(),
            description: "No bump command has been detected yet.".to_string(),
            color: ORANGE,
            fields: vec![EmbedField::new("📝 Next Step", "Use `/bump` to start the cooldown timer", false)],
            footer: None,
        }),
    }
}

/// `!cooldown` reply once the cooldown has fully elapsed.
pub fn cooldown_ready() -> Notification {
    Notification {
        content: None,
        embed: Some(Embed {
            title: "✅ Bump Available!".to_string(),
            description: "The server is ready to be bumped again!".to_string(),
            color: GREEN,
            fields: vec![EmbedField::new("📝 Action", "Use `/bump` command now", false)],
            footer: None,
        }),
    }
}

/// `!cooldown` reply while the cooldown is still running.
pub fn cooldown_active(next_available: DateTime<Utc>) -> Notification {
    let ts = next_available.timestamp();

    Notification {
        content: None,
        embed: Some(Embed {
            title: "⏰ Bump Cooldown Active".to_string(),
            description: "The server is still on cooldown.".to_string(),
            color: RED,
            fields: vec![
                EmbedField::new("⏱️ Time Remaining", format!("<t:{ts}:R>"), true),
                EmbedField::new("🕐 Available At", format!("<t:{ts}:F>"), true),
            ],
            footer: None,
        }),
    }
}

/// `!help` reply summarizing the available commands.
pub fn help(channel_id: u64) -> Notification {
    Notification {
        content: None,
        embed: Some(Embed {
            title: "🤖 Bump Bot Help".to_string(),
            description: "Here are the available commands and features:".to_string(),
            color: BLUE,
            fields: vec![
                EmbedField::new("🚀 `/bump`", "Bump the server (slash command)", false),
                EmbedField::new("⏰ `!cooldown`", "Check remaining cooldown time", false),
                EmbedField::new("❓ `!help`", "Show this help message", false),
                EmbedField::new(
                    "🔄 **Auto Features**",
                    "• Automatic bump detection\n• 120-minute cooldown tracking\n• Reminder notifications",
                    false,
                ),
                EmbedField::new("📍 **Channel**", format!("This bot only works in <#{channel_id}>"), false),
            ],
            footer: Some("Bump Bot v1.0".to_string()),
        }),
    }
}
