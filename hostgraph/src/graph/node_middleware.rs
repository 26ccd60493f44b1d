//! Node middleware: wraps every stage invocation of a compiled graph.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::error::AgentError;

/// The pending stage invocation handed to middleware. Nothing runs until it is awaited.
pub type NodeFuture<'a, S> =
    Pin<Box<dyn Future<Output = Result<Option<S>, AgentError>> + Send + 'a>>;

/// Wraps each `Node::run` call made by the executor.
///
/// Implementations usually log or time around `inner.await` and return its result.
/// A middleware may also short-circuit by returning without awaiting `inner`; the
/// stage is then not run and the returned value is used in its place.
///
/// **Interaction**: Attached with `StateGraph::with_middleware`; stored in the
/// compiled graph and applied by `CompiledStateGraph::invoke` and `stream`.
#[async_trait]
pub trait NodeMiddleware<S>: Send + Sync
where
    S: Clone + Send + Sync + 'static,
{
    async fn around_run<'a>(
        &self,
        node_id: &str,
        state: &'a S,
        inner: NodeFuture<'a, S>,
    ) -> Result<Option<S>, AgentError>;
}
