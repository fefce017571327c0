//! In-memory conversation store keyed by session identifier.
//!
//! Backed by `DashMap`: every mutation happens under the shard lock for its
//! session, so concurrent appends to the same session each land exactly
//! once. Reads clone the turn list so no guard outlives the call.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use parley_types::conversation::{Sender, Turn};

#[derive(Debug, Clone)]
struct SessionEntry {
    turns: Vec<Turn>,
    last_active: DateTime<Utc>,
}

impl SessionEntry {
    fn new() -> Self {
        Self {
            turns: Vec::new(),
            last_active: Utc::now(),
        }
    }
}

/// Mapping of session id to its ordered turn history.
///
/// Entries are created on the first message for a session and live until
/// cleared (or evicted, when an idle TTL is configured).
#[derive(Debug, Default)]
pub struct ConversationStore {
    sessions: DashMap<String, SessionEntry>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn to the session, creating the session if absent.
    ///
    /// Sender and text are not validated; empty text is stored as-is.
    pub fn add_message(&self, session_id: &str, sender: Sender, text: impl Into<String>) {
        let mut entry = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(SessionEntry::new);
        entry.turns.push(Turn::new(sender, text));
        entry.last_active = Utc::now();
    }

    /// Snapshot of the session's turns, or empty if the session is unknown.
    pub fn get_conversation(&self, session_id: &str) -> Vec<Turn> {
        self.sessions
            .get(session_id)
            .map(|entry| entry.turns.clone())
            .unwrap_or_default()
    }

    /// Remove the session entirely. Returns whether it existed.
    pub fn clear_conversation(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Whether the session has an entry.
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Number of sessions currently held.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Snapshot of all session ids.
    pub fn session_ids(&self) -> Vec<String> {
        self.sessions.iter().map(|r| r.key().clone()).collect()
    }

    /// Remove sessions with no activity for longer than `max_idle`.
    ///
    /// Returns the number of sessions removed.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        match Utc::now().checked_sub_signed(max_idle) {
            Some(cutoff) => self.evict_inactive_since(cutoff),
            None => 0,
        }
    }

    fn evict_inactive_since(&self, cutoff: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, entry| entry.last_active >= cutoff);
        before.saturating_sub(self.sessions.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn add_then_get_preserves_insertion_order() {
        let store = ConversationStore::new();
        store.add_message("s1", Sender::User, "Hi");
        store.add_message("s1", Sender::Ai, "Hello! How are you?");
        store.add_message("s1", Sender::User, "Good");

        assert_eq!(
            store.get_conversation("s1"),
            vec![
                Turn::user("Hi"),
                Turn::ai("Hello! How are you?"),
                Turn::user("Good"),
            ]
        );
    }

    #[test]
    fn unknown_session_is_empty_and_not_created() {
        let store = ConversationStore::new();
        assert!(store.get_conversation("nope").is_empty());
        assert!(!store.contains("nope"));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_text_is_recorded() {
        let store = ConversationStore::new();
        store.add_message("s1", Sender::User, "");
        assert_eq!(store.get_conversation("s1"), vec![Turn::user("")]);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = ConversationStore::new();
        store.add_message("a", Sender::User, "from a");
        store.add_message("b", Sender::User, "from b");

        assert_eq!(store.get_conversation("a"), vec![Turn::user("from a")]);
        assert_eq!(store.get_conversation("b"), vec![Turn::user("from b")]);
        assert_eq!(store.len(), 2);

        let mut ids = store.session_ids();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn clear_known_session_empties_it() {
        let store = ConversationStore::new();
        store.add_message("s1", Sender::User, "Hi");

        assert!(store.clear_conversation("s1"));
        assert!(store.get_conversation("s1").is_empty());
        assert!(!store.contains("s1"));
    }

    #[test]
    fn clear_unknown_session_is_noop() {
        let store = ConversationStore::new();
        store.add_message("keep", Sender::User, "x");

        assert!(!store.clear_conversation("missing"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_returns_snapshot_not_live_view() {
        let store = ConversationStore::new();
        store.add_message("s1", Sender::User, "one");
        let snapshot = store.get_conversation("s1");
        store.add_message("s1", Sender::User, "two");

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.get_conversation("s1").len(), 2);
    }

    #[test]
    fn evict_idle_removes_only_stale_sessions() {
        let store = ConversationStore::new();
        store.add_message("old", Sender::User, "x");
        store.add_message("fresh", Sender::User, "y");

        // Backdate one session past the TTL.
        store
            .sessions
            .get_mut("old")
            .unwrap()
            .last_active = Utc::now() - Duration::hours(2);

        assert_eq!(store.evict_idle(Duration::hours(1)), 1);
        assert!(!store.contains("old"));
        assert!(store.contains("fresh"));
    }

    #[test]
    fn evict_idle_with_unbounded_ttl_removes_nothing() {
        let store = ConversationStore::new();
        store.add_message("s1", Sender::User, "x");
        assert_eq!(store.evict_idle(Duration::MAX), 0);
        assert!(store.contains("s1"));
    }

    #[test]
    fn evict_idle_with_nothing_stale_removes_nothing() {
        let store = ConversationStore::new();
        store.add_message("s1", Sender::User, "x");
        assert_eq!(store.evict_idle(Duration::hours(1)), 0);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_appends_to_same_session_are_not_lost() {
        let store = Arc::new(ConversationStore::new());
        let mut handles = Vec::new();

        for task in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                for i in 0..50 {
                    store.add_message("shared", Sender::User, format!("{task}-{i}"));
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let turns = store.get_conversation("shared");
        assert_eq!(turns.len(), 400);

        // Per-task order survives interleaving.
        for task in 0..8 {
            let prefix = format!("{task}-");
            let seq: Vec<usize> = turns
                .iter()
                .filter_map(|t| t.text.strip_prefix(&prefix))
                .map(|n| n.parse().unwrap())
                .collect();
            assert_eq!(seq, (0..50).collect::<Vec<_>>());
        }
    }
}
