//! Streaming types for graph runs.
//!
//! Stream modes and events emitted by `CompiledStateGraph::stream` after each stage.

use std::fmt::Debug;

/// Stream mode selector: which kinds of events to emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamMode {
    /// Emit full state after each stage completes.
    Values,
    /// Emit the stage id together with the state after that stage.
    Updates,
}

/// Streamed event emitted while running a graph.
#[derive(Clone, Debug)]
pub enum StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Full state snapshot after a stage finishes.
    Values(S),
    /// Stage id and the state after that stage.
    Updates { node_id: String, state: S },
}

impl<S> StreamEvent<S>
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// State carried by the event, whichever mode produced it.
    pub fn state(&self) -> &S {
        match self {
            StreamEvent::Values(state) => state,
            StreamEvent::Updates { state, .. } => state,
        }
    }
}
