//! Builds the live host context: A2A client, discovered directory, session store.

use std::sync::Arc;

use crate::config::HostConfig;
use crate::policy::Collaborators;
use crate::session::{InMemorySessionStore, SessionStore};
use crate::specialist::{A2aClient, SpecialistError};

/// Collaborators and session store sharing one [`InMemorySessionStore`].
pub struct HostContext {
    pub collaborators: Collaborators,
    pub sessions: Arc<dyn SessionStore>,
}

/// Discovers the specialists listed in `config` and wires the A2A client.
///
/// Unreachable specialists are skipped (and logged); the policy then runs in its
/// degraded modes for the missing capability.
pub async fn build_host_context(config: &HostConfig) -> Result<HostContext, SpecialistError> {
    let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let client = A2aClient::new(config.timeouts(), Arc::clone(&sessions))?;
    let directory = client.discover(&config.specialist_urls).await;
    if directory.is_empty() {
        tracing::warn!("No specialists reachable; replies will be policy-only");
    }
    Ok(HostContext {
        collaborators: Collaborators::new(directory, Arc::new(client)),
        sessions,
    })
}
