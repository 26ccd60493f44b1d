//! Pass-through stage that leaves the state unchanged.

use async_trait::async_trait;

use crate::error::AgentError;

use super::Node;

/// Stage that always returns `None` ("no change").
///
/// Useful as a junction in a graph (a place to hang a conditional edge) and in tests
/// of the replace-not-merge contract.
pub struct NameNode {
    id: String,
}

impl NameNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl<S> Node<S> for NameNode
where
    S: Clone + Send + Sync + 'static,
{
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, _state: &S) -> Result<Option<S>, AgentError> {
        Ok(None)
    }
}
