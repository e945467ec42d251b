#![cfg(test)]

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use bump_bot::{
    base::{
        config::{Config, ConfigInner},
        notify,
        types::{EmbedRecord, MessageRecord, Notification, Res, Void},
    },
    interaction::command,
    service::chat::{ChatClient, GenericChatClient},
    tracker::{BumpTracker, COOLDOWN, CooldownStatus},
};
use chrono::Utc;
use mockall::mock;

// Mocks.

// Mock chat client for testing.

mock! {
    pub Chat {}

    #[async_trait]
    impl GenericChatClient for Chat {
        fn bot_user_id(&self) -> u64;
        async fn start(&self) -> Void;
        async fn send_notification(&self, notification: &Notification) -> Void;
        async fn fetch_recent_messages(&self, limit: u8) -> Res<Vec<MessageRecord>>;
    }
}

const BOT_USER_ID: u64 = 999;
const BUMP_ROLE_ID: u64 = 456;
const DISBOARD_ID: u64 = 716390085896962058;

fn test_config() -> Config {
    Config {
        inner: Arc::new(ConfigInner {
            discord_token: "test-token".to_string(),
            bump_channel_id: 123,
            bump_role_id: BUMP_ROLE_ID,
            ..Default::default()
        }),
    }
}

/// A mock chat client that expects no traffic at all.
fn quiet_chat() -> MockChat {
    let mut mock = MockChat::new();
    mock.expect_bot_user_id().return_const(BOT_USER_ID);
    mock
}

/// A bump-completion announcement from a known integration, `minutes_ago`
/// minutes in the past.
fn completion_message(id: u64, minutes_ago: i64) -> MessageRecord {
    MessageRecord {
        id,
        author_id: DISBOARD_ID,
        author_is_bot: true,
        content: String::new(),
        embeds: vec![EmbedRecord {
            title: Some("DISBOARD".to_string()),
            description: Some("Bump done! :thumbsup:".to_string()),
        }],
        created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
    }
}

/// One of the bot's own reminder messages, `minutes_ago` minutes in the past.
fn reminder_message(id: u64, minutes_ago: i64) -> MessageRecord {
    MessageRecord {
        id,
        author_id: BOT_USER_ID,
        author_is_bot: true,
        content: format!("<@&{BUMP_ROLE_ID}> Time to bump! 🚀"),
        embeds: vec![EmbedRecord {
            title: Some(notify::REMINDER_TITLE.to_string()),
            description: None,
        }],
        created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
    }
}

fn chatter_message(id: u64, minutes_ago: i64) -> MessageRecord {
    MessageRecord {
        id,
        author_id: 555,
        author_is_bot: false,
        content: "hello there".to_string(),
        embeds: vec![],
        created_at: Utc::now() - chrono::Duration::minutes(minutes_ago),
    }
}

/// Let spawned tracker tasks run until the reminder lands (or give up).
async fn wait_for_reminder(tracker: &BumpTracker) -> bool {
    for _ in 0..1000 {
        if tracker.reminder_sent().await {
            return true;
        }
        tokio::task::yield_now().await;
    }

    false
}

// Tracker state machine.

#[tokio::test]
async fn record_bump_arms_a_single_timer() {
    let tracker = BumpTracker::new(test_config());
    let chat = ChatClient::new(Arc::new(quiet_chat()));

    assert!(tracker.record_bump(&chat, None).await);

    assert!(!tracker.reminder_sent().await);
    assert!(tracker.has_pending_timer().await);

    let remaining = tracker.remaining_cooldown().await.expect("cycle should be active");
    assert!(remaining <= COOLDOWN);
    assert!(remaining > COOLDOWN - Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn rebump_cancels_the_previous_timer() {
    let tracker = BumpTracker::new(test_config());

    let mut mock = quiet_chat();
    // Two bumps in a row must produce exactly one reminder.
    mock.expect_send_notification().times(1).returning(|_| Ok(()));
    let chat = ChatClient::new(Arc::new(mock));

    assert!(tracker.record_bump(&chat, None).await);
    assert!(tracker.record_bump(&chat, None).await);
    assert!(tracker.has_pending_timer().await);

    tokio::time::advance(COOLDOWN + Duration::from_secs(1)).await;

    assert!(wait_for_reminder(&tracker).await, "reminder should fire after the cooldown");
    assert!(!tracker.has_pending_timer().await);
}

#[tokio::test]
async fn dispatch_reminder_is_once_per_cycle() {
    let tracker = BumpTracker::new(test_config());

    let mut mock = quiet_chat();
    mock.expect_send_notification()
        .times(1)
        .withf(|n| n.content.as_deref().is_some_and(|c| c.contains(&format!("<@&{BUMP_ROLE_ID}>"))))
        .returning(|_| Ok(()));
    let chat = ChatClient::new(Arc::new(mock));

    tracker.dispatch_reminder(&chat).await.unwrap();
    tracker.dispatch_reminder(&chat).await.unwrap();

    assert!(tracker.reminder_sent().await);
}

#[tokio::test]
async fn duplicate_bump_message_is_a_noop() {
    let tracker = BumpTracker::new(test_config());
    let chat = ChatClient::new(Arc::new(quiet_chat()));

    assert!(tracker.record_bump(&chat, Some(42)).await);
    assert!(!tracker.record_bump(&chat, Some(42)).await);
    assert!(tracker.has_pending_timer().await);

    // A different message restarts the cycle as usual.
    assert!(tracker.record_bump(&chat, Some(43)).await);
}

#[tokio::test]
async fn cooldown_status_tracks_the_cycle() {
    let tracker = BumpTracker::new(test_config());
    let chat = ChatClient::new(Arc::new(quiet_chat()));

    assert_eq!(tracker.cooldown_status().await, CooldownStatus::NoBump);

    tracker.record_bump(&chat, None).await;

    match tracker.cooldown_status().await {
        CooldownStatus::Active { next_available } => {
            let until = next_available - Utc::now();
            assert!(until.num_minutes() >= 119 && until.num_minutes() <= 120);
        }
        other => panic!("expected an active cooldown, got {other:?}"),
    }
}

// Startup reconciliation.

#[tokio::test]
async fn reconcile_resumes_an_active_cycle() {
    let tracker = BumpTracker::new(test_config());

    let mut mock = quiet_chat();
    let history = vec![chatter_message(3, 5), completion_message(2, 30), chatter_message(1, 200)];
    mock.expect_fetch_recent_messages().times(1).returning(move |_| Ok(history.clone()));
    // No send expectation: resuming mid-cooldown must not post anything.
    let chat = ChatClient::new(Arc::new(mock));

    tracker.reconcile_on_startup(&chat).await.unwrap();

    assert!(!tracker.reminder_sent().await);
    assert!(tracker.has_pending_timer().await);

    let remaining = tracker.remaining_cooldown().await.expect("cycle should be active");
    assert!(remaining > Duration::from_secs(89 * 60));
    assert!(remaining < Duration::from_secs(91 * 60));
}

#[tokio::test]
async fn reconcile_reminds_immediately_when_cooldown_expired() {
    let tracker = BumpTracker::new(test_config());

    let mut mock = quiet_chat();
    let history = vec![chatter_message(3, 5), chatter_message(2, 60), completion_message(1, 150)];
    mock.expect_fetch_recent_messages().times(1).returning(move |_| Ok(history.clone()));
    mock.expect_send_notification()
        .times(1)
        .withf(|n| n.content.as_deref().is_some_and(|c| c.contains(&format!("<@&{BUMP_ROLE_ID}>"))))
        .returning(|_| Ok(()));
    let chat = ChatClient::new(Arc::new(mock));

    tracker.reconcile_on_startup(&chat).await.unwrap();

    assert!(tracker.reminder_sent().await);
    assert!(!tracker.has_pending_timer().await);
    assert_eq!(tracker.cooldown_status().await, CooldownStatus::NoBump);
}

#[tokio::test]
async fn reconcile_suppresses_an_already_sent_reminder() {
    let tracker = BumpTracker::new(test_config());

    let mut mock = quiet_chat();
    let history = vec![chatter_message(3, 5), reminder_message(2, 25), completion_message(1, 150)];
    mock.expect_fetch_recent_messages().times(1).returning(move |_| Ok(history.clone()));
    // No send expectation: the reminder already in history must not repeat.
    let chat = ChatClient::new(Arc::new(mock));

    tracker.reconcile_on_startup(&chat).await.unwrap();

    assert!(tracker.reminder_sent().await);
    assert!(!tracker.has_pending_timer().await);
}

#[tokio::test]
async fn reconcile_stays_idle_without_bump_activity() {
    let tracker = BumpTracker::new(test_config());

    let mut mock = quiet_chat();
    let history = vec![chatter_message(2, 5), chatter_message(1, 90)];
    mock.expect_fetch_recent_messages().times(1).returning(move |_| Ok(history.clone()));
    let chat = ChatClient::new(Arc::new(mock));

    tracker.reconcile_on_startup(&chat).await.unwrap();

    assert!(!tracker.has_pending_timer().await);
    assert_eq!(tracker.cooldown_status().await, CooldownStatus::NoBump);
}

#[tokio::test]
async fn reconcile_fetch_failure_leaves_tracker_idle() {
    let tracker = BumpTracker::new(test_config());

    let mut mock = quiet_chat();
    mock.expect_fetch_recent_messages()
        .times(1)
        .returning(|_| Err(anyhow::anyhow!("channel unreachable")));
    let chat = ChatClient::new(Arc::new(mock));

    assert!(tracker.reconcile_on_startup(&chat).await.is_err());

    assert!(!tracker.has_pending_timer().await);
    assert_eq!(tracker.cooldown_status().await, CooldownStatus::NoBump);
}

// Commands.

#[tokio::test]
async fn recognized_command_posts_a_reply() {
    let config = test_config();
    let tracker = BumpTracker::new(config.clone());

    let mut mock = quiet_chat();
    mock.expect_send_notification()
        .times(1)
        .withf(|n| n.embed.as_ref().is_some_and(|e| e.title.contains("No Recent Bump")))
        .returning(|_| Ok(()));
    let chat = ChatClient::new(Arc::new(mock));

    command::handle_command("!cooldown".to_string(), config, tracker, chat);

    // Give the spawned handler a moment to run; the mock verifies the send
    // count on drop.
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn unrecognized_command_produces_no_reply() {
    let config = test_config();
    let tracker = BumpTracker::new(config.clone());

    // No send expectation: any traffic would flunk the mock.
    let chat = ChatClient::new(Arc::new(quiet_chat()));

    command::handle_command("!frobnicate the server".to_string(), config, tracker, chat);

    tokio::time::sleep(Duration::from_millis(100)).await;
}
