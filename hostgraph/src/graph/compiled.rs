//! Compiled state graph: immutable, supports invoke and stream.
//!
//! Built by `StateGraph::compile` or `compile_checked`. Holds the stage table, static
//! and conditional edges, the entry stage and optional middleware / step limit. All
//! tables sit behind `Arc`, so clones are cheap and one compiled graph serves any
//! number of concurrent runs, each with its own state.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::error::AgentError;
use crate::stream::{StreamEvent, StreamMode};

use super::conditional::ConditionalRouter;
use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update,
};
use super::node_middleware::NodeMiddleware;
use super::{Next, Node};

/// Sink for stream events plus the modes the caller asked for.
struct EventSink<'a, S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    tx: &'a mpsc::Sender<StreamEvent<S>>,
    modes: &'a HashSet<StreamMode>,
}

/// Compiled graph: immutable structure, supports invoke and stream.
#[derive(Clone)]
pub struct CompiledStateGraph<S> {
    pub(super) nodes: Arc<HashMap<String, Arc<dyn Node<S>>>>,
    pub(super) edges: Arc<HashMap<String, Next>>,
    pub(super) conditional: Arc<HashMap<String, ConditionalRouter<S>>>,
    pub(super) entry: String,
    pub(super) middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    pub(super) step_limit: Option<usize>,
}

impl<S> CompiledStateGraph<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Stage the run starts from.
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Registered stage ids, sorted.
    pub fn stage_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Transition taken after `node_id` given the state it produced.
    ///
    /// Conditional edge first (unknown route key → END), then static edge, else END.
    pub fn next_after(&self, node_id: &str, state: &S) -> Next {
        if let Some(router) = self.conditional.get(node_id) {
            return router.resolve(state);
        }
        self.edges.get(node_id).cloned().unwrap_or(Next::End)
    }

    /// Shared run loop used by invoke() and stream(): one stage per iteration until END.
    async fn run_loop_inner(
        &self,
        mut state: S,
        sink: Option<EventSink<'_, S>>,
    ) -> Result<S, AgentError> {
        log_graph_start(&self.entry);
        let mut current = Next::Node(self.entry.clone());
        let mut steps = 0usize;

        while let Next::Node(node_id) = current {
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    return Err(AgentError::StepLimitExceeded(limit));
                }
            }
            let node = self
                .nodes
                .get(&node_id)
                .ok_or_else(|| AgentError::MissingStage(node_id.clone()))?;
            steps += 1;
            log_node_start(&node_id);

            let update = match &self.middleware {
                Some(middleware) => {
                    middleware
                        .around_run(&node_id, &state, node.run(&state))
                        .await?
                }
                None => node.run(&state).await?,
            };
            if let Some(new_state) = update {
                state = new_state;
                log_state_update(&node_id);
            }

            if let Some(sink) = &sink {
                if sink.modes.contains(&StreamMode::Values) {
                    let _ = sink.tx.send(StreamEvent::Values(state.clone())).await;
                }
                if sink.modes.contains(&StreamMode::Updates) {
                    let _ = sink
                        .tx
                        .send(StreamEvent::Updates {
                            node_id: node_id.clone(),
                            state: state.clone(),
                        })
                        .await;
                }
            }

            current = self.next_after(&node_id, &state);
            log_node_complete(&node_id, &current);
        }

        log_graph_complete(steps);
        Ok(state)
    }

    /// Runs the graph from the entry stage until a transition resolves to END and
    /// returns the final state.
    ///
    /// The run owns `state`; each stage sees it read-only and may replace it. Errors
    /// from stages, middleware or a missing stage end the run and are returned as-is.
    pub async fn invoke(&self, state: S) -> Result<S, AgentError> {
        let result = self.run_loop_inner(state, None).await;
        if let Err(e) = &result {
            log_graph_error(e);
        }
        result
    }

    /// Streams graph execution, emitting events via channel-backed Stream.
    ///
    /// Emits `Values` and/or `Updates` after every stage, per `stream_mode`. If the run
    /// fails the stream just ends; the error is logged.
    pub fn stream(
        &self,
        state: S,
        stream_mode: impl Into<HashSet<StreamMode>>,
    ) -> ReceiverStream<StreamEvent<S>> {
        let (tx, rx) = mpsc::channel(128);
        let graph = self.clone();
        let modes: HashSet<StreamMode> = stream_mode.into();

        tokio::spawn(async move {
            let sink = EventSink {
                tx: &tx,
                modes: &modes,
            };
            if let Err(e) = graph.run_loop_inner(state, Some(sink)).await {
                log_graph_error(&e);
            }
        });

        ReceiverStream::new(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio_stream::StreamExt;

    use crate::graph::{FnNode, NameNode, NodeFuture, StateGraph, END};

    #[derive(Clone)]
    struct AddNode {
        id: &'static str,
        delta: i32,
    }

    #[async_trait]
    impl Node<i32> for AddNode {
        fn id(&self) -> &str {
            self.id
        }

        async fn run(&self, state: &i32) -> Result<Option<i32>, AgentError> {
            tokio::task::yield_now().await;
            Ok(Some(state + self.delta))
        }
    }

    fn build_two_step_graph() -> CompiledStateGraph<i32> {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("first", Arc::new(AddNode { id: "first", delta: 1 }))
            .add_node("second", Arc::new(AddNode { id: "second", delta: 2 }))
            .set_entry("first")
            .add_edge("first", "second")
            .add_edge("second", END);
        graph.compile().expect("graph compiles")
    }

    /// **Scenario**: A linear two-stage graph applies both stages in order.
    #[tokio::test]
    async fn invoke_runs_linear_chain() {
        let out = build_two_step_graph().invoke(0).await.unwrap();
        assert_eq!(out, 3);
    }

    /// **Scenario**: A stage with no outgoing edge ends the run (implicit terminal).
    #[tokio::test]
    async fn stage_without_edge_ends_run() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("only", Arc::new(AddNode { id: "only", delta: 7 }))
            .set_entry("only");
        let out = graph.compile().unwrap().invoke(1).await.unwrap();
        assert_eq!(out, 8);
    }

    /// **Scenario**: A static edge to an unregistered stage fails the run with MissingStage.
    #[tokio::test]
    async fn dangling_edge_fails_with_missing_stage() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("first", Arc::new(AddNode { id: "first", delta: 1 }))
            .set_entry("first")
            .add_edge("first", "secnod");
        let result = graph.compile().unwrap().invoke(0).await;
        match result {
            Err(AgentError::MissingStage(id)) => assert_eq!(id, "secnod"),
            other => panic!("expected MissingStage, got {:?}", other),
        }
    }

    /// **Scenario**: A conditional edge loops back until the router picks the exit.
    #[tokio::test]
    async fn conditional_cycle_runs_until_router_exits() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("inc", Arc::new(AddNode { id: "inc", delta: 1 }))
            .set_entry("inc")
            .add_conditional_edges(
                "inc",
                |s: &i32| if *s < 5 { "again".into() } else { "done".into() },
                [("again", Next::from("inc")), ("done", END)],
            );
        let out = graph.compile().unwrap().invoke(0).await.unwrap();
        assert_eq!(out, 5);
    }

    /// **Scenario**: A conditional edge wins over a static edge from the same stage.
    #[tokio::test]
    async fn conditional_edge_takes_precedence_over_static() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("a", Arc::new(AddNode { id: "a", delta: 1 }))
            .add_node("b", Arc::new(AddNode { id: "b", delta: 10 }))
            .add_node("c", Arc::new(AddNode { id: "c", delta: 100 }))
            .set_entry("a")
            .add_edge("a", "b")
            .add_edge("b", END)
            .add_edge("c", END)
            .add_conditional_edges("a", |_: &i32| "c".into(), [("c", "c")]);
        let out = graph.compile().unwrap().invoke(0).await.unwrap();
        assert_eq!(out, 101);
    }

    /// **Scenario**: A route key missing from the route map ends the run instead of failing.
    #[tokio::test]
    async fn unknown_route_key_terminates_run() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("a", Arc::new(AddNode { id: "a", delta: 1 }))
            .add_node("b", Arc::new(AddNode { id: "b", delta: 10 }))
            .set_entry("a")
            .add_conditional_edges("a", |_: &i32| "unmapped".into(), [("to_b", "b")]);
        let out = graph.compile().unwrap().invoke(0).await.unwrap();
        assert_eq!(out, 1);
    }

    /// **Scenario**: A stage returning None leaves the state exactly as it was.
    #[tokio::test]
    async fn none_update_keeps_state() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("noop", Arc::new(NameNode::new("noop")))
            .set_entry("noop")
            .add_edge("noop", END);
        let out = graph.compile().unwrap().invoke(42).await.unwrap();
        assert_eq!(out, 42);
    }

    /// **Scenario**: The step limit stops a cycle that never reaches END.
    #[tokio::test]
    async fn step_limit_stops_endless_cycle() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("spin", Arc::new(AddNode { id: "spin", delta: 1 }))
            .set_entry("spin")
            .add_edge("spin", "spin");
        let compiled = graph.with_step_limit(10).compile().unwrap();
        match compiled.invoke(0).await {
            Err(AgentError::StepLimitExceeded(n)) => assert_eq!(n, 10),
            other => panic!("expected StepLimitExceeded, got {:?}", other),
        }
    }

    /// **Scenario**: A stage error propagates out of invoke and later stages do not run.
    #[tokio::test]
    async fn stage_error_propagates() {
        let ran_after = Arc::new(AtomicUsize::new(0));
        let ran_after_clone = Arc::clone(&ran_after);
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node(
                "fail",
                Arc::new(FnNode::new("fail", |_: &i32| {
                    Err(AgentError::ExecutionFailed("classifier down".into()))
                })),
            )
            .add_node(
                "after",
                Arc::new(FnNode::new("after", move |_: &i32| {
                    ran_after_clone.fetch_add(1, Ordering::SeqCst);
                    Ok(None)
                })),
            )
            .set_entry("fail")
            .add_edge("fail", "after");
        let result = graph.compile().unwrap().invoke(0).await;
        assert!(matches!(result, Err(AgentError::ExecutionFailed(ref m)) if m == "classifier down"));
        assert_eq!(ran_after.load(Ordering::SeqCst), 0);
    }

    struct CountingMiddleware {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl NodeMiddleware<i32> for CountingMiddleware {
        async fn around_run<'a>(
            &self,
            _node_id: &str,
            _state: &'a i32,
            inner: NodeFuture<'a, i32>,
        ) -> Result<Option<i32>, AgentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            inner.await
        }
    }

    /// **Scenario**: Middleware wraps every stage invocation and does not alter results.
    #[tokio::test]
    async fn middleware_wraps_each_stage() {
        let mw = Arc::new(CountingMiddleware {
            calls: AtomicUsize::new(0),
        });
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("first", Arc::new(AddNode { id: "first", delta: 1 }))
            .add_node("second", Arc::new(AddNode { id: "second", delta: 2 }))
            .set_entry("first")
            .add_edge("first", "second")
            .add_edge("second", END);
        let compiled = graph
            .with_middleware(mw.clone() as Arc<dyn NodeMiddleware<i32>>)
            .compile()
            .unwrap();
        assert_eq!(compiled.invoke(0).await.unwrap(), 3);
        assert_eq!(mw.calls.load(Ordering::SeqCst), 2);
    }

    /// **Scenario**: stream(values) emits state snapshots per stage and ends with final state.
    #[tokio::test]
    async fn stream_values_emits_states() {
        let graph = build_two_step_graph();
        let stream = graph.stream(0, HashSet::from_iter([StreamMode::Values]));
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 2);
        assert!(
            matches!(events.last(), Some(StreamEvent::Values(v)) if *v == 3),
            "last event should be final state 3"
        );
    }

    /// **Scenario**: stream(updates) emits Updates with stage ids in order.
    #[tokio::test]
    async fn stream_updates_emit_node_ids_in_order() {
        let graph = build_two_step_graph();
        let stream = graph.stream(0, HashSet::from_iter([StreamMode::Updates]));
        let events: Vec<_> = stream.collect().await;
        let ids: Vec<_> = events
            .iter()
            .map(|e| match e {
                StreamEvent::Updates { node_id, .. } => node_id.clone(),
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(ids, vec!["first".to_string(), "second".to_string()]);
    }

    /// **Scenario**: A failing run ends the stream after the events emitted so far.
    #[tokio::test]
    async fn stream_ends_on_error() {
        let mut graph = StateGraph::<i32>::new();
        graph
            .add_node("first", Arc::new(AddNode { id: "first", delta: 1 }))
            .set_entry("first")
            .add_edge("first", "missing");
        let stream = graph
            .compile()
            .unwrap()
            .stream(0, HashSet::from_iter([StreamMode::Values]));
        let events: Vec<_> = stream.collect().await;
        assert_eq!(events.len(), 1);
    }

    /// **Scenario**: next_after reports the transition without running anything.
    #[test]
    fn next_after_reports_transitions() {
        let graph = build_two_step_graph();
        assert_eq!(graph.next_after("first", &0), Next::from("second"));
        assert_eq!(graph.next_after("second", &0), Next::End);
        assert_eq!(graph.next_after("unknown", &0), Next::End);
        assert_eq!(graph.entry(), "first");
        assert_eq!(graph.stage_ids(), vec!["first", "second"]);
    }
}
