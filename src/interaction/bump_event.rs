//! Bump events: the `/bump` slash command and live bump-integration
//! completion messages.

use tracing::{Instrument, error, info, instrument};

use crate::{
    base::{notify, types::{MessageRecord, Void}},
    service::chat::ChatClient,
    tracker::{BumpTracker, CooldownStatus},
};

/// Handle a `/bump` slash-command interaction.
#[instrument(skip(tracker, chat))]
pub fn handle_slash_bump(user_id: u64, tracker: BumpTracker, chat: ChatClient) {
    tokio::spawn(async move {
        // Process the event.
        let result = record_and_confirm(format!("<@{user_id}>"), None, &tracker, &chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

/// Handle a bump-completion message from a third-party integration.
#[instrument(skip_all)]
pub fn handle_completion_message(message: MessageRecord, tracker: BumpTracker, chat: ChatClient) {
    tokio::spawn(async move {
        // Process the event.
        let bumped_by = format!("<@{}>", message.author_id);
        let result = record_and_confirm(bumped_by, Some(message.id), &tracker, &chat).in_current_span().await;

        // Log any errors.
        if let Err(err) = &result {
            error!("Error while handling: {}", err);
        }
    });
}

#[instrument(skip_all)]
async fn record_and_confirm(bumped_by: String, source_message_id: Option<u64>, tracker: &BumpTracker, chat: &ChatClient) -> Void {
    if !tracker.record_bump(chat, source_message_id).await {
        info!("Bump already recorded; skipping confirmation.");
        return Ok(());
    }

    if let CooldownStatus::Active { next_available } = tracker.cooldown_status().await {
        chat.send_notification(&notify::bump_confirmation(&bumped_by, next_available)).await?;
    }

    Ok(())
}
