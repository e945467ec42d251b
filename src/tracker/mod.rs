//! The bump cycle tracker.
//!
//! This is the core of the bot: a small state machine that records when a
//! bump occurred, schedules a one-shot reminder for the end of the fixed
//! cooldown, resumes that schedule after a restart by scanning recent
//! channel history, and suppresses duplicate reminders.
//!
//! A cycle transitions `idle → active (bump recorded) → reminded (timer
//! fires, or reconciliation finds an expired cooldown) → idle`. Any new bump
//! while active or reminded restarts the cycle and cancels the pending
//! timer, so at most one timer is ever pending.

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{Instrument, debug, error, info, instrument};

use crate::{
    base::{config::Config, notify, patterns, types::Void},
    service::chat::ChatClient,
};

/// Fixed cooldown between bumps.
pub const COOLDOWN: Duration = Duration::from_secs(120 * 60);

/// How many recent messages startup reconciliation scans for bump activity.
pub const HISTORY_WINDOW: u8 = 50;

/// In-memory record of the current bump cycle. Owned exclusively by the
/// tracker; lost on restart apart from what reconciliation can rebuild.
#[derive(Default)]
struct BumpCycle {
    last_bump_time: Option<DateTime<Utc>>,
    reminder_sent: bool,
    last_bump_message_id: Option<u64>,
    pending_timer: Option<JoinHandle<()>>,
}

/// Where the current cycle stands relative to the cooldown; consumed by the
/// `!cooldown` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownStatus {
    /// No bump recorded in the current cycle.
    NoBump,
    /// The cooldown has elapsed; the server can be bumped again.
    Ready,
    /// The cooldown is still running.
    Active { next_available: DateTime<Utc> },
}

/// The bump cycle tracker.
///
/// Trivially cloneable; clones share the same cycle state.
#[derive(Clone)]
pub struct BumpTracker {
    config: Config,
    cycle: Arc<Mutex<BumpCycle>>,
}

impl BumpTracker {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cycle: Arc::new(Mutex::new(BumpCycle::default())),
        }
    }

    /// Record a bump and (re)start the cooldown timer.
    ///
    /// Returns `false` when the triggering message was already recorded
    /// (duplicate delivery), in which case nothing changes.
    #[instrument(skip(self, chat))]
    pub async fn record_bump(&self, chat: &ChatClient, source_message_id: Option<u64>) -> bool {
        let mut cycle = self.cycle.lock().await;

        if source_message_id.is_some() && source_message_id == cycle.last_bump_message_id {
            debug!("Ignoring already-recorded bump message.");
            return false;
        }

        cycle.last_bump_time = Some(Utc::now());
        cycle.reminder_sent = false;
        cycle.last_bump_message_id = source_message_id;

        self.replace_timer(&mut cycle, chat, COOLDOWN);

        info!("Bump recorded; reminder due in {} minutes.", COOLDOWN.as_secs() / 60);

        true
    }

    /// Send the role-mention reminder, once per cycle.
    ///
    /// A no-op if a reminder has already gone out for this cycle. On success
    /// the cycle returns to idle, with `reminder_sent` held until the next
    /// bump so a racing caller cannot re-send.
    #[instrument(skip_all)]
    pub async fn dispatch_reminder(&self, chat: &ChatClient) -> Void {
        // The lock is held across the send; two racing dispatches cannot
        // both get past the `reminder_sent` check.
        let mut cycle = self.cycle.lock().await;

        if cycle.reminder_sent {
            debug!("Reminder already sent for this cycle; skipping.");
            return Ok(());
        }

        chat.send_notification(&notify::bump_reminder(self.config.bump_role_id)).await?;

        info!("Bump reminder sent.");

        cycle.reminder_sent = true;
        cycle.last_bump_time = None;
        // Drop rather than abort: when the timer itself dispatched, this is
        // the currently running task's own handle.
        cycle.pending_timer = None;

        Ok(())
    }

    /// Rebuild cycle state from recent channel history after a restart.
    ///
    /// Scans the newest [`HISTORY_WINDOW`] messages for a bump-completion
    /// announcement from a known integration. Within the cooldown, the cycle
    /// resumes with a timer for the remaining duration; past it, a reminder
    /// goes out immediately unless one is already visible near the top of
    /// the history. With no match at all the tracker stays idle.
    #[instrument(skip_all)]
    pub async fn reconcile_on_startup(&self, chat: &ChatClient) -> Void {
        let messages = chat.fetch_recent_messages(HISTORY_WINDOW).await?;

        let Some(completion) = patterns::find_latest_completion(&messages) else {
            info!("No recent bump activity found; starting idle.");
            return Ok(());
        };

        let bumped_at = completion.created_at;
        let message_id = completion.id;
        let elapsed = (Utc::now() - bumped_at).to_std().unwrap_or_default();

        if elapsed < COOLDOWN {
            let remaining = COOLDOWN - elapsed;

            let mut cycle = self.cycle.lock().await;
            cycle.last_bump_time = Some(bumped_at);
            cycle.reminder_sent = false;
            cycle.last_bump_message_id = Some(message_id);
            self.replace_timer(&mut cycle, chat, remaining);

            info!("Resumed bump cycle; reminder due in {} minutes.", remaining.as_secs() / 60);
            return Ok(());
        }

        // The cooldown expired while we were down. Only remind if we did not
        // already do so before the restart.
        if patterns::has_recent_reminder(&messages, chat.bot_user_id()) {
            let mut cycle = self.cycle.lock().await;
            cycle.reminder_sent = true;
            cycle.last_bump_time = None;
            cycle.last_bump_message_id = Some(message_id);

            info!("Cooldown expired, but a reminder is already in the channel; staying quiet.");
            return Ok(());
        }

        {
            let mut cycle = self.cycle.lock().await;
            cycle.last_bump_time = Some(bumped_at);
            cycle.reminder_sent = false;
            cycle.last_bump_message_id = Some(message_id);
        }

        info!("Cooldown expired while offline; sending reminder now.");
        self.dispatch_reminder(chat).await
    }

    /// Where the current cycle stands, for the `!cooldown` command.
    pub async fn cooldown_status(&self) -> CooldownStatus {
        let cycle = self.cycle.lock().await;

        let Some(last_bump) = cycle.last_bump_time else {
            return CooldownStatus::NoBump;
        };

        let next_available = last_bump + chrono::Duration::seconds(COOLDOWN.as_secs() as i64);

        if Utc::now() >= next_available {
            CooldownStatus::Ready
        } else {
            CooldownStatus::Active { next_available }
        }
    }

    /// Whether a reminder has already been dispatched for the current cycle.
    pub async fn reminder_sent(&self) -> bool {
        self.cycle.lock().await.reminder_sent
    }

    /// Whether a reminder timer is currently pending.
    pub async fn has_pending_timer(&self) -> bool {
        self.cycle.lock().await.pending_timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }

    /// Wall-clock time left in the current cooldown, if a cycle is active.
    pub async fn remaining_cooldown(&self) -> Option<Duration> {
        let cycle = self.cycle.lock().await;
        let last_bump = cycle.last_bump_time?;

        let next_available = last_bump + chrono::Duration::seconds(COOLDOWN.as_secs() as i64);
        (next_available - Utc::now()).to_std().ok()
    }

    /// Abort any pending timer and schedule a new one for `delay`, upholding
    /// the at-most-one-timer invariant.
    fn replace_timer(&self, cycle: &mut BumpCycle, chat: &ChatClient, delay: Duration) {
        if let Some(timer) = cycle.pending_timer.take() {
            timer.abort();
        }

        let tracker = self.clone();
        let chat = chat.clone();
        // Anchor the deadline here rather than inside the task, so the delay
        // is measured from scheduling time, not the task's first poll.
        let deadline = tokio::time::Instant::now() + delay;

        cycle.pending_timer = Some(tokio::spawn(
            async move {
                tokio::time::sleep_until(deadline).await;

                if let Err(err) = tracker.dispatch_reminder(&chat).await {
                    error!("Error while dispatching reminder: {}", err);
                }
            }
            .in_current_span(),
        ));
    }
}
