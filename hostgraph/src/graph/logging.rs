//! Logging utilities for graph execution.
//!
//! Structured `tracing` events for graph start/finish, stage start/finish, state
//! replacement and errors. `LoggingNodeMiddleware` emits the stage events from
//! a middleware slot instead of the run loop's own calls.

use async_trait::async_trait;

use crate::error::AgentError;

use super::node_middleware::{NodeFuture, NodeMiddleware};
use super::Next;

/// Log stage execution start.
pub fn log_node_start(node_id: &str) {
    tracing::debug!(node_id = node_id, "Starting stage");
}

/// Log stage completion and the chosen transition.
pub fn log_node_complete(node_id: &str, next: &Next) {
    tracing::debug!(node_id = node_id, next = %next, "Stage complete");
}

/// Log that a stage replaced the state.
pub fn log_state_update(node_id: &str) {
    tracing::trace!(node_id = node_id, "State replaced");
}

/// Log graph execution start.
pub fn log_graph_start(entry: &str) {
    tracing::info!(entry = entry, "Starting graph execution");
}

/// Log graph execution completion.
pub fn log_graph_complete(steps: usize) {
    tracing::info!(steps = steps, "Graph execution complete");
}

/// Log graph execution error.
pub fn log_graph_error(error: &AgentError) {
    tracing::error!(%error, "Graph execution error");
}

/// Middleware that records each stage's outcome at info level.
///
/// The run loop already logs at debug; attach this when stage-level lines are wanted
/// in normal (info) output.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNodeMiddleware;

#[async_trait]
impl<S> NodeMiddleware<S> for LoggingNodeMiddleware
where
    S: Clone + Send + Sync + 'static,
{
    async fn around_run<'a>(
        &self,
        node_id: &str,
        _state: &'a S,
        inner: NodeFuture<'a, S>,
    ) -> Result<Option<S>, AgentError> {
        tracing::info!(node_id = node_id, "enter stage");
        let result = inner.await;
        match &result {
            Ok(update) => tracing::info!(
                node_id = node_id,
                replaced = update.is_some(),
                "exit stage"
            ),
            Err(e) => tracing::warn!(node_id = node_id, error = %e, "stage failed"),
        }
        result
    }
}
