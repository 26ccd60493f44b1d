//! StateGraph invoke: replacement law, static and conditional routing, cycles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hostgraph::{AgentError, FnNode, NameNode, Next, StateGraph, END};

use crate::common::{StepNode, Trail};

/// **Scenario**: Each stage's returned state replaces the previous one entirely.
#[tokio::test]
async fn returned_state_replaces_whole_state() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("label", Arc::new(FnNode::new("label", |s: &Trail| {
            Ok(Some(Trail {
                label: Some("set".into()),
                ..s.clone()
            }))
        })))
        .add_node(
            "reset",
            Arc::new(FnNode::new("reset", |_: &Trail| Ok(Some(Trail::default())))),
        )
        .set_entry("label")
        .add_edge("label", "reset")
        .add_edge("reset", END);

    let initial = Trail {
        count: 5,
        visited: vec!["before".into()],
        label: None,
    };
    let out = graph.compile().unwrap().invoke(initial).await.unwrap();
    assert_eq!(out, Trail::default(), "reset must drop every earlier field");
}

/// **Scenario**: A stage returning None leaves the state untouched.
#[tokio::test]
async fn none_keeps_state() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("step", Arc::new(StepNode::new("step", 2)))
        .add_node("noop", Arc::new(NameNode::new("noop")))
        .set_entry("step")
        .add_edge("step", "noop")
        .add_edge("noop", END);
    let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
    assert_eq!(out.count, 2);
    assert_eq!(out.visited, vec!["step"]);
}

/// **Scenario**: A stage named like a sentinel is an ordinary stage.
#[tokio::test]
async fn sentinel_like_stage_name_is_a_stage() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("start", Arc::new(StepNode::new("start", 1)))
        .add_node("__end__", Arc::new(StepNode::new("__end__", 10)))
        .set_entry("start")
        .add_edge("start", "__end__")
        .add_edge("__end__", END);
    let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
    assert_eq!(out.visited, vec!["start", "__end__"]);
}

/// **Scenario**: An unmapped route key completes the run with the state so far.
#[tokio::test]
async fn unknown_route_key_completes_run() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("a", Arc::new(StepNode::new("a", 1)))
        .add_node("b", Arc::new(StepNode::new("b", 1)))
        .set_entry("a")
        .add_conditional_edges("a", |_: &Trail| "sideways".to_string(), [("to_b", "b")]);
    let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
    assert_eq!(out.visited, vec!["a"]);
}

/// **Scenario**: A route-map target that is not registered fails with MissingStage.
#[tokio::test]
async fn dangling_route_target_fails_run() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("a", Arc::new(StepNode::new("a", 1)))
        .set_entry("a")
        .add_conditional_edges("a", |_: &Trail| "go".to_string(), [("go", "nowhere")]);
    match graph.compile().unwrap().invoke(Trail::default()).await {
        Err(AgentError::MissingStage(id)) => assert_eq!(id, "nowhere"),
        other => panic!("expected MissingStage, got {:?}", other),
    }
}

/// **Scenario**: A bounded cycle visits the loop stage the expected number of times.
#[tokio::test]
async fn bounded_cycle_visits_in_order() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("check", Arc::new(NameNode::new("check")))
        .add_node("work", Arc::new(StepNode::new("work", 1)))
        .add_node("done", Arc::new(StepNode::new("done", 0)))
        .set_entry("check")
        .add_conditional_edges(
            "check",
            |s: &Trail| if s.count < 3 { "more".into() } else { "stop".into() },
            [("more", Next::from("work")), ("stop", Next::from("done"))],
        )
        .add_edge("work", "check")
        .add_edge("done", END);
    let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
    assert_eq!(out.count, 3);
    assert_eq!(out.visited, vec!["work", "work", "work", "done"]);
}

/// **Scenario**: Invoking the same compiled graph twice with the same input gives identical results.
#[tokio::test]
async fn invoke_is_deterministic_and_reusable() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("a", Arc::new(StepNode::new("a", 1)))
        .add_node("b", Arc::new(StepNode::new("b", 2)))
        .set_entry("a")
        .add_edge("a", "b")
        .add_edge("b", END);
    let compiled = graph.compile().unwrap();
    let first = compiled.invoke(Trail::default()).await.unwrap();
    let second = compiled.invoke(Trail::default()).await.unwrap();
    assert_eq!(first, second);
}

/// **Scenario**: Concurrent runs on one compiled graph keep their own state.
#[tokio::test]
async fn concurrent_runs_are_isolated() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("a", Arc::new(StepNode::new("a", 1)))
        .set_entry("a")
        .add_edge("a", END);
    let compiled = graph.compile().unwrap();
    let runs = (0..8).map(|i| {
        let g = compiled.clone();
        tokio::spawn(async move {
            g.invoke(Trail {
                count: i * 100,
                ..Trail::default()
            })
            .await
        })
    });
    let handles: Vec<_> = runs.collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let out = handle.await.unwrap().unwrap();
        assert_eq!(out.count, i as i32 * 100 + 1);
        assert_eq!(out.visited, vec!["a"]);
    }
}

/// **Scenario**: Each iteration invokes exactly one stage; the counter matches the visit trail.
#[tokio::test]
async fn one_invocation_per_iteration() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_node = Arc::clone(&calls);
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node(
            "tick",
            Arc::new(FnNode::new("tick", move |s: &Trail| {
                calls_in_node.fetch_add(1, Ordering::SeqCst);
                let mut next = s.clone();
                next.count += 1;
                Ok(Some(next))
            })),
        )
        .set_entry("tick")
        .add_conditional_edges(
            "tick",
            |s: &Trail| if s.count < 4 { "again".into() } else { "end".into() },
            [("again", Next::from("tick")), ("end", END)],
        );
    let out = graph.compile().unwrap().invoke(Trail::default()).await.unwrap();
    assert_eq!(out.count, 4);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}
