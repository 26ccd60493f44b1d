//! Logging middleware that prints stage enter/exit around each stage run.

use async_trait::async_trait;

use hostgraph::graph::NodeFuture;
use hostgraph::{AgentError, HostState, NodeMiddleware};

/// Middleware that logs stage enter/exit around each `Node::run` call.
///
/// Logs to stderr so that normal output (assistant fragments) can be redirected separately.
pub struct LoggingMiddleware;

#[async_trait]
impl NodeMiddleware<HostState> for LoggingMiddleware {
    async fn around_run<'a>(
        &self,
        node_id: &str,
        _state: &'a HostState,
        inner: NodeFuture<'a, HostState>,
    ) -> Result<Option<HostState>, AgentError> {
        eprintln!("[stage] enter stage={}", node_id);
        let result = inner.await;
        match &result {
            Ok(Some(state)) => eprintln!(
                "[stage] exit stage={} route={:?} fragments={}",
                node_id,
                state.policy_route.map(|r| r.as_str()),
                state.response_chunks.len()
            ),
            Ok(None) => eprintln!("[stage] exit stage={} unchanged", node_id),
            Err(e) => eprintln!("[stage] exit stage={} error={}", node_id, e),
        }
        result
    }
}
