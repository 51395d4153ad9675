use crate::memory::history::{ConversationHistory, ConversationTurn, SessionId, HISTORY_CAPACITY};
use std::collections::HashMap;
use std::sync::RwLock;

/// Keyed session history storage.
///
/// The eviction rule lives in `ConversationHistory`; the store only decides where the
/// window is kept and how concurrent access to one session is serialized.
pub trait HistoryStore: Send + Sync {
    /// Full current window for the session, oldest first. Empty for unknown sessions.
    fn get_history(&self, session: &SessionId) -> Vec<ConversationTurn>;
    fn append_turn(&self, session: &SessionId, turn: ConversationTurn);
    /// Session teardown.
    fn clear(&self, session: &SessionId);
}

/// Process-local store. Sessions are created empty on first append.
pub struct InMemoryHistoryStore {
    sessions: RwLock<HashMap<SessionId, ConversationHistory>>,
    capacity: usize,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get_history(&self, session: &SessionId) -> Vec<ConversationTurn> {
        match self.sessions.read() {
            Ok(sessions) => sessions.get(session).map(|h| h.turns()).unwrap_or_default(),
            Err(poisoned) => poisoned
                .into_inner()
                .get(session)
                .map(|h| h.turns())
                .unwrap_or_default(),
        }
    }

    fn append_turn(&self, session: &SessionId, turn: ConversationTurn) {
        let mut sessions = self.sessions.write().unwrap_or_else(|p| p.into_inner());
        sessions
            .entry(session.clone())
            .or_insert_with(|| ConversationHistory::with_capacity(self.capacity))
            .append(turn);
    }

    fn clear(&self, session: &SessionId) {
        let mut sessions = self.sessions.write().unwrap_or_else(|p| p.into_inner());
        sessions.remove(session);
    }
}
