//! State graph: stages, static and conditional edges, compile and invoke.
//!
//! Build a `StateGraph`, register stages implementing `Node`, wire edges (`END` is the
//! terminal), compile, then `invoke` or `stream` with an initial state. Each stage
//! returns either a whole replacement state or nothing.

mod compile_error;
mod compiled;
mod conditional;
mod fn_node;
mod logging;
mod name_node;
mod next;
mod node;
mod node_middleware;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::{ConditionalRouter, RouterFn};
pub use fn_node::{FnNode, StageFn};
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update, LoggingNodeMiddleware,
};
pub use name_node::NameNode;
pub use next::{Next, END};
pub use node::Node;
pub use node_middleware::{NodeFuture, NodeMiddleware};
pub use state_graph::StateGraph;
