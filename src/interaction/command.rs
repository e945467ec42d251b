//! `!`-prefixed chat commands in the monitored channel.

use tracing::{Instrument, error, instrument};

use crate::{
    base::{config::Config, notify, types::Void},
    service::chat::ChatClient,
    tracker::{BumpTracker, CooldownStatus},
};

/// A recognized `!` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Cooldown,
    Help,
}

/// Parse the body of a `!`-prefixed message.
///
/// Unrecognized commands yield `None` and produce no reply. The command word
/// is case-insensitive and trailing arguments are ignored.
pub fn parse(content: &str) -> Option<Command> {
    let body = content.strip_prefix('!')?;
    let word = body.trim().split_whitespace().next()?;

    match word.to_ascii_lowercase().as_str() {
        "cooldown" => Some(Command::Cooldown),
        "help" => Some(Command::Help),
        _ => None,
    }
}

/// Handle a `!`-prefixed message from a channel member.
#[instrument(skip_all)]
pub fn handle_command(content: String, config: Config, tracker: BumpTracker, chat: ChatClient) {
    let Some(command) = parse(&content) else {
        return;
    };

    tokio::spawn(async move {
        // Process the command.
        let result = handle_command_internal(command, &config, &tracker, &chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

#[instrument(skip(config, tracker, chat))]
async fn handle_command_internal(command: Command, config: &Config, tracker: &BumpTracker, chat: &ChatClient) -> Void {
    let notification = match command {
        Command::Cooldown => match tracker.cooldown_status().await {
            CooldownStatus::NoBump => notify::no_recent_bump(),
            CooldownStatus::Ready => notify::cooldown_ready(),
            CooldownStatus::Active { next_available } => notify::cooldown_active(next_available),
        },
        Command::Help => notify::help(config.bump_channel_id),
    };

    chat.send_notification(&notification).await?;

    Ok(())
}
