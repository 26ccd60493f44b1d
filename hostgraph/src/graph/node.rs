//! Stage trait: read the state, return a full replacement or nothing.

use async_trait::async_trait;

use crate::error::AgentError;

/// One named stage of a graph.
///
/// `run` receives a read-only view of the current state. Returning `Ok(Some(s))`
/// replaces the executor's state with `s` wholesale (no per-field merge), so a stage
/// must carry forward every field it wants to keep, typically via
/// `S { changed: .., ..state.clone() }`. Returning `Ok(None)` leaves the state untouched.
///
/// Stages may await I/O; the executor awaits each stage before choosing the next one.
///
/// **Interaction**: Registered with `StateGraph::add_node` as `Arc<dyn Node<S>>`;
/// driven by `CompiledStateGraph::invoke` / `stream`.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    /// Stage id, used in logs and stream events.
    fn id(&self) -> &str;

    /// Runs one step.
    async fn run(&self, state: &S) -> Result<Option<S>, AgentError>;
}
