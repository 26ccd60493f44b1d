//! Stage execution error types.
//!
//! Returned by `Node::run`, `NodeMiddleware::around_run` and `CompiledStateGraph::invoke`.

use thiserror::Error;

/// Error raised while running a compiled graph.
///
/// The executor never catches these: an error from a stage, a middleware or a
/// missing stage lookup ends the run and is returned to the caller as-is.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A stage failed (e.g. a collaborator failed in a way the stage does not handle).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// An edge or route pointed at a stage name that is not registered.
    #[error("stage not found: {0}")]
    MissingStage(String),

    /// The run made more stage invocations than the graph's configured step limit.
    #[error("step limit of {0} stage invocations exceeded")]
    StepLimitExceeded(usize),
}
