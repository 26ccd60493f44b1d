//! In-memory session store backed by `DashMap`.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{HistoryEntry, Intent, SessionStore};

/// In-memory [`SessionStore`]. Not persistent; for the CLI, the server and tests.
///
/// Each map is sharded by `DashMap`, so runs for different sessions do not contend.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    history: DashMap<String, Vec<HistoryEntry>>,
    context_ids: DashMap<(String, String), String>,
    intents: DashMap<String, Intent>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn history(&self, session_id: &str) -> Vec<HistoryEntry> {
        self.history
            .get(session_id)
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    async fn append(&self, session_id: &str, entry: HistoryEntry) {
        self.history
            .entry(session_id.to_string())
            .or_default()
            .push(entry);
    }

    async fn context_id(&self, session_id: &str, specialist: &str) -> Option<String> {
        self.context_ids
            .get(&(session_id.to_string(), specialist.to_string()))
            .map(|id| id.clone())
    }

    async fn set_context_id(&self, session_id: &str, specialist: &str, context_id: String) {
        self.context_ids
            .insert((session_id.to_string(), specialist.to_string()), context_id);
    }

    async fn intent(&self, session_id: &str) -> Option<Intent> {
        self.intents.get(session_id).map(|intent| *intent)
    }

    async fn set_intent(&self, session_id: &str, intent: Intent) {
        self.intents.insert(session_id.to_string(), intent);
    }
}
