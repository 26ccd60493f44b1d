//! Remote specialists: the client seam, the capability directory and A2A payloads.
//!
//! Policy stages never name a specialist directly. They ask the
//! [`SpecialistDirectory`] for the specialist serving a [`Capability`] and send the
//! prompt through a [`SpecialistClient`]. `A2aClient` talks JSON-RPC over HTTP
//! (feature `a2a`); [`MockSpecialistClient`] replays scripted replies in tests.

#[cfg(feature = "a2a")]
mod a2a;
mod directory;
mod mock;
mod task;

#[cfg(feature = "a2a")]
pub use a2a::{A2aClient, HttpTimeouts};
pub use directory::{AgentCard, SpecialistDirectory, SpecialistSummary};
pub use mock::{MockCall, MockReply, MockSpecialistClient};
pub use task::{extract_text, FileContent, Part, Task, TaskMessage, TaskState, TaskStatus};

use async_trait::async_trait;
use thiserror::Error;

/// What a specialist is consulted for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Forecasts for a destination.
    Weather,
    /// The action gated by the weather check (rental and lodging ideas).
    Secondary,
}

/// Errors from talking to a specialist.
///
/// The fetch stages treat recoverable errors like an empty reply (a user-facing
/// "could not retrieve" line); anything else fails the run.
#[derive(Debug, Clone, Error)]
pub enum SpecialistError {
    /// No connection is registered under this name.
    #[error("unknown specialist: {0}")]
    UnknownSpecialist(String),

    /// Connection, timeout or request-building failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status.
    #[error("specialist returned HTTP {0}")]
    Status(u16),

    /// JSON-RPC error object in the response.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response body did not match the protocol.
    #[error("decode error: {0}")]
    Decode(String),

    /// A scripted client ran out of replies for this specialist.
    #[error("no scripted replies left for {0}")]
    Exhausted(String),
}

impl SpecialistError {
    /// True for failures a stage should absorb into state instead of failing the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SpecialistError::UnknownSpecialist(_)
                | SpecialistError::Transport(_)
                | SpecialistError::Status(_)
                | SpecialistError::Rpc { .. }
        )
    }
}

/// Sends one prompt to a named specialist.
///
/// `Ok(None)` means the specialist answered with something other than a task (for
/// example a bare message); callers read that as an empty reply.
///
/// **Interaction**: Called by `FetchWeatherNode` and `FetchSecondaryNode`; the
/// specialist name comes from [`SpecialistDirectory::resolve`].
#[async_trait]
pub trait SpecialistClient: Send + Sync {
    async fn send(
        &self,
        specialist: &str,
        prompt: &str,
        session_id: &str,
    ) -> Result<Option<Task>, SpecialistError>;
}
