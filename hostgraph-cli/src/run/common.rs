//! Shared run logic: build the host router and route messages through it.
//!
//! Used by [`run_with_config`](super::run_with_config) and by tests that inject
//! `MockSpecialistClient`. Interacts with [`policy_graph`](hostgraph::policy::policy_graph)
//! and [`HostRouter`](hostgraph::HostRouter).

use std::sync::Arc;

use hostgraph::policy::policy_graph;
use hostgraph::{Collaborators, HostRouter, SessionStore};

use crate::middleware::WithNodeLogging;

use super::{Error, Turn};

/// Compiles the policy graph for `collab`, with stage logging when `verbose`.
pub(crate) fn build_router(
    collab: &Collaborators,
    sessions: Arc<dyn SessionStore>,
    verbose: bool,
) -> Result<HostRouter, Error> {
    let graph = policy_graph(collab);
    let graph = if verbose {
        graph.with_node_logging()
    } else {
        graph
    };
    Ok(HostRouter::from_graph(
        graph,
        sessions,
        Arc::clone(&collab.directory),
    )?)
}

/// Routes `messages` in order within `session_id`; stops at the first failed run.
pub(crate) async fn run_host_router(
    router: &HostRouter,
    session_id: &str,
    messages: &[String],
) -> Result<Vec<Turn>, Error> {
    let mut turns = Vec::with_capacity(messages.len());
    for message in messages {
        let responses = router.handle_request(message, session_id).await?;
        turns.push(Turn {
            message: message.clone(),
            responses,
        });
    }
    Ok(turns)
}
