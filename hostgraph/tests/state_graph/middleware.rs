//! StateGraph middleware: ordering around stages and short-circuiting.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use hostgraph::graph::{LoggingNodeMiddleware, NodeFuture};
use hostgraph::{AgentError, NodeMiddleware, StateGraph, END};

use crate::common::{StepNode, Trail};

struct RecordingMiddleware {
    events: Mutex<Vec<String>>,
}

#[async_trait]
impl NodeMiddleware<Trail> for RecordingMiddleware {
    async fn around_run<'a>(
        &self,
        node_id: &str,
        _state: &'a Trail,
        inner: NodeFuture<'a, Trail>,
    ) -> Result<Option<Trail>, AgentError> {
        self.events.lock().unwrap().push(format!("enter:{}", node_id));
        let result = inner.await;
        self.events.lock().unwrap().push(format!("exit:{}", node_id));
        result
    }
}

/// Skips the stage named `skip` and returns the state unchanged instead.
struct SkipMiddleware;

#[async_trait]
impl NodeMiddleware<Trail> for SkipMiddleware {
    async fn around_run<'a>(
        &self,
        node_id: &str,
        _state: &'a Trail,
        inner: NodeFuture<'a, Trail>,
    ) -> Result<Option<Trail>, AgentError> {
        if node_id == "skip" {
            return Ok(None);
        }
        inner.await
    }
}

fn two_stage_graph() -> StateGraph<Trail> {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("first", Arc::new(StepNode::new("first", 1)))
        .add_node("skip", Arc::new(StepNode::new("skip", 100)))
        .set_entry("first")
        .add_edge("first", "skip")
        .add_edge("skip", END);
    graph
}

#[tokio::test]
async fn middleware_sees_enter_and_exit_per_stage() {
    let mw = Arc::new(RecordingMiddleware {
        events: Mutex::new(Vec::new()),
    });
    let compiled = two_stage_graph()
        .with_middleware(mw.clone())
        .compile()
        .unwrap();
    let out = compiled.invoke(Trail::default()).await.unwrap();
    assert_eq!(out.count, 101);
    assert_eq!(
        *mw.events.lock().unwrap(),
        vec!["enter:first", "exit:first", "enter:skip", "exit:skip"]
    );
}

/// **Scenario**: Middleware that returns without awaiting the stage keeps it from running.
#[tokio::test]
async fn middleware_can_short_circuit() {
    let compiled = two_stage_graph()
        .with_middleware(Arc::new(SkipMiddleware))
        .compile()
        .unwrap();
    let out = compiled.invoke(Trail::default()).await.unwrap();
    assert_eq!(out.count, 1);
    assert_eq!(out.visited, vec!["first"]);
}

#[tokio::test]
async fn logging_middleware_is_transparent() {
    let compiled = two_stage_graph()
        .with_middleware(Arc::new(LoggingNodeMiddleware))
        .compile()
        .unwrap();
    let out = compiled.invoke(Trail::default()).await.unwrap();
    assert_eq!(out.count, 101);
}
