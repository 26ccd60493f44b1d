//! Per-session conversation history, specialist context ids and carried intent.
//!
//! The router appends every user turn and every assistant fragment here, the A2A
//! client remembers one `contextId` per (session, specialist), and the follow-up
//! logic reads the intent of the last turn that had one. Storage is behind
//! [`SessionStore`] so a persistent backend can replace [`InMemorySessionStore`].

mod in_memory;

pub use in_memory::InMemorySessionStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Speaker of a history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in a session's history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Intent flags of the last user turn that expressed any.
///
/// A follow-up like "how about Long Beach instead?" names a new place but no intent;
/// the router fills the gap from this.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub need_weather: bool,
    pub need_secondary: bool,
}

impl Intent {
    /// True when at least one flag is set.
    pub fn is_any(&self) -> bool {
        self.need_weather || self.need_secondary
    }
}

/// Session-scoped storage used by the router and the specialist client.
///
/// Unknown sessions read as empty; writes create them. Implementations must be safe to
/// share across concurrent runs of different sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Full history of `session_id`, oldest first.
    async fn history(&self, session_id: &str) -> Vec<HistoryEntry>;

    async fn append(&self, session_id: &str, entry: HistoryEntry);

    /// Remote conversation id previously returned by `specialist` for this session.
    async fn context_id(&self, session_id: &str, specialist: &str) -> Option<String>;

    async fn set_context_id(&self, session_id: &str, specialist: &str, context_id: String);

    /// Intent of the last turn in this session that expressed one.
    async fn intent(&self, session_id: &str) -> Option<Intent>;

    async fn set_intent(&self, session_id: &str, intent: Intent);
}
