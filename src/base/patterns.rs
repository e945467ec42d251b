//! Heuristics for recognizing bump activity in channel history.
//!
//! Third-party bump integrations announce a completed bump with a short
//! confirmation message or embed. The author identities and wording below
//! are a fixed list; the matching is inherently brittle (it depends on the
//! integrations' exact phrasing) and is kept as a pattern list so new
//! integrations can be added in one place.

use std::sync::LazyLock;

use regex::RegexSet;

use super::{notify, types::MessageRecord};

/// Bot accounts whose messages are treated as bump completions.
pub const BUMP_INTEGRATION_IDS: &[u64] = &[716390085896962058, 302050872383242240];

/// How many of the most recent messages are inspected for an already-sent
/// reminder before re-sending one.
pub const REMINDER_LOOKBACK: usize = 10;

/// Phrases the known integrations use to confirm a completed bump.
static COMPLETION_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([r"(?i)bump done", r"(?i)bump successful", r"(?i)server bumped"]).expect("completion patterns are valid regexes")
});

/// Whether a message is a bump-completion announcement from a known
/// integration. Matches against the plain content and every embed's title
/// and description.
pub fn is_completion(message: &MessageRecord) -> bool {
    if !message.author_is_bot || !BUMP_INTEGRATION_IDS.contains(&message.author_id) {
        return false;
    }

    if COMPLETION_PATTERNS.is_match(&message.content) {
        return true;
    }

    message
        .embeds
        .iter()
        .flat_map(|embed| [embed.title.as_deref(), embed.description.as_deref()])
        .flatten()
        .any(|text| COMPLETION_PATTERNS.is_match(text))
}

/// The most recent bump completion in a newest-first message window.
pub fn find_latest_completion(messages: &[MessageRecord]) -> Option<&MessageRecord> {
    messages.iter().find(|message| is_completion(message))
}

/// Whether the head of a newest-first window already contains one of our own
/// reminder embeds, identified by its title.
pub fn has_recent_reminder(messages: &[MessageRecord], bot_user_id: u64) -> bool {
    messages.iter().take(REMINDER_LOOKBACK).any(|message| {
        message.author_id == bot_user_id && message.embeds.iter().any(|embed| embed.title.as_deref() == Some(notify::REMINDER_TITLE))
    })
}
