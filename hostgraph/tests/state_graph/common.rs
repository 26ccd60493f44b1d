//! Shared state and stages for the StateGraph integration tests.

use async_trait::async_trait;
use hostgraph::{AgentError, Node};

/// Records which stages ran and carries a counter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trail {
    pub count: i32,
    pub visited: Vec<String>,
    pub label: Option<String>,
}

/// Appends its id to `visited` and adds `delta` to `count`.
pub struct StepNode {
    id: String,
    delta: i32,
}

impl StepNode {
    pub fn new(id: &str, delta: i32) -> Self {
        Self {
            id: id.to_string(),
            delta,
        }
    }
}

#[async_trait]
impl Node<Trail> for StepNode {
    fn id(&self) -> &str {
        &self.id
    }

    async fn run(&self, state: &Trail) -> Result<Option<Trail>, AgentError> {
        let mut next = state.clone();
        next.count += self.delta;
        next.visited.push(self.id.clone());
        Ok(Some(next))
    }
}
