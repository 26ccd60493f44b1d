//! Integration tests for StateGraph: compile validation, invoke semantics, middleware.
//!
//! Tests are split into modules under `state_graph/`:
//! - `common`: shared state and stages (Trail, StepNode)
//! - `compile_fail`: compile error cases
//! - `invoke`: replacement law, routing, cycles, determinism
//! - `middleware`: with_middleware and LoggingNodeMiddleware

#[path = "state_graph/common.rs"]
mod common;

#[path = "state_graph/compile_fail.rs"]
mod compile_fail;

#[path = "state_graph/invoke.rs"]
mod invoke;

#[path = "state_graph/middleware.rs"]
mod middleware;
