//! Graph compilation error.
//!
//! Returned by `StateGraph::compile` when no entry stage was set, and by
//! `StateGraph::compile_checked` when a stage name used by the graph is not registered.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// `compile()` only checks that an entry stage exists; dangling edge targets are
/// left to surface at run time as `AgentError::MissingStage`. `compile_checked()`
/// additionally rejects any unregistered name used as entry, edge source or target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompilationError {
    /// `set_entry` was never called.
    #[error("graph requires an entry stage before compile()")]
    MissingEntry,

    /// A stage name used by the entry, an edge or a route map was not registered via `add_node`.
    #[error("stage not found: {0}")]
    NodeNotFound(String),
}
