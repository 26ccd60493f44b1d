//! StateGraph compile failure cases: missing entry, unknown stage names.

use std::sync::Arc;

use hostgraph::{CompilationError, Next, StateGraph, END};

use crate::common::{StepNode, Trail};

#[test]
fn compile_fails_without_entry() {
    let mut graph = StateGraph::<Trail>::new();
    graph.add_node("a", Arc::new(StepNode::new("a", 1)));
    graph.add_edge("a", END);

    match graph.compile() {
        Err(CompilationError::MissingEntry) => {}
        _ => panic!("expected MissingEntry"),
    }
}

#[test]
fn compile_checked_fails_when_edge_refers_to_unknown_stage() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("echo", Arc::new(StepNode::new("echo", 0)))
        .set_entry("echo")
        .add_edge("echo", "missing");

    match graph.compile_checked() {
        Err(CompilationError::NodeNotFound(id)) => assert_eq!(id, "missing"),
        _ => panic!("expected NodeNotFound"),
    }
}

/// **Scenario**: An edge whose source stage is never registered is also rejected.
#[test]
fn compile_checked_fails_on_unknown_edge_source() {
    let mut graph = StateGraph::<Trail>::new();
    graph
        .add_node("a", Arc::new(StepNode::new("a", 0)))
        .set_entry("a")
        .add_edge("a", END)
        .add_edge("ghost", Next::from("a"));

    assert_eq!(
        graph.compile_checked().err(),
        Some(CompilationError::NodeNotFound("ghost".into()))
    );
}

/// **Scenario**: The missing-entry error message names the missing entry stage.
#[test]
fn missing_entry_message() {
    let graph = StateGraph::<Trail>::new();
    let err = graph.compile().err().expect("compile must fail");
    assert!(err.to_string().contains("entry"), "{}", err);
}
