//! Stage backed by a synchronous closure.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;

use super::Node;

/// Closure signature accepted by [`FnNode`].
pub type StageFn<S> = Arc<dyn Fn(&S) -> Result<Option<S>, AgentError> + Send + Sync>;

/// Stage that runs a plain function of the state.
///
/// For pure stages that never suspend (e.g. composing a reply from accumulated
/// state). Stages that call remote services implement [`Node`] directly.
///
/// ```rust
/// use std::sync::Arc;
/// use hostgraph::graph::{FnNode, StateGraph, END};
///
/// let mut graph = StateGraph::<i32>::new();
/// graph
///     .add_node("double", Arc::new(FnNode::new("double", |s: &i32| Ok(Some(s * 2)))))
///     .set_entry("double")
///     .add_edge("double", END);
/// let compiled = graph.compile().unwrap();
/// ```
pub struct FnNode<S> {
    id: String,
    f: StageFn<S>,
}

impl<S> FnNode<S> {
    pub fn new<F>(id: impl Into<String>, f: F) -> Self
    where
        F: Fn(&S) -> Result<Option<S>, AgentError> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            f: Arc::new(f),
        }
    }
}

#[async_trait]
impl<S> Node<S> for FnNode<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: &S) -> Result<Option<S>, AgentError> {
        (self.f)(state)
    }
}
