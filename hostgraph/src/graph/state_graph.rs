//! State graph: stages + static edges + conditional edges + one entry stage.
//!
//! Register stages with `add_node`, pick the first one with `set_entry`, wire
//! transitions with `add_edge(from, to)` (use `END` as the terminal) and
//! `add_conditional_edges(from, router, route_map)`, then `compile` to get a
//! `CompiledStateGraph`. Cycles are allowed.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::graph::compile_error::CompilationError;
use crate::graph::compiled::CompiledStateGraph;
use crate::graph::conditional::ConditionalRouter;
use crate::graph::next::Next;
use crate::graph::node::Node;
use crate::graph::node_middleware::NodeMiddleware;

/// Mutable graph definition, generic over the state type `S`.
///
/// Nothing is validated while building: `add_node` overwrites silently (last write
/// wins) and edges may name stages that are registered later, or never. `compile()`
/// only requires an entry stage; `compile_checked()` also resolves every name.
///
/// **Interaction**: Accepts `Arc<dyn Node<S>>`; produces `CompiledStateGraph<S>`.
pub struct StateGraph<S> {
    nodes: HashMap<String, Arc<dyn Node<S>>>,
    /// Static edges: at most one per source stage (a later `add_edge` replaces it).
    edges: HashMap<String, Next>,
    /// Conditional edges: take precedence over a static edge from the same stage.
    conditional: HashMap<String, ConditionalRouter<S>>,
    entry: Option<String>,
    middleware: Option<Arc<dyn NodeMiddleware<S>>>,
    step_limit: Option<usize>,
}

impl<S> Default for StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> StateGraph<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            conditional: HashMap::new(),
            entry: None,
            middleware: None,
            step_limit: None,
        }
    }

    /// Registers a stage under `id`, replacing any stage already registered under it.
    pub fn add_node(&mut self, id: impl Into<String>, node: Arc<dyn Node<S>>) -> &mut Self {
        self.nodes.insert(id.into(), node);
        self
    }

    /// Records the stage the run starts from. Existence is checked at compile time.
    pub fn set_entry(&mut self, id: impl Into<String>) -> &mut Self {
        self.entry = Some(id.into());
        self
    }

    /// Adds (or replaces) the static edge leaving `from_id`.
    ///
    /// `to` is a stage name or `END`.
    pub fn add_edge(&mut self, from_id: impl Into<String>, to: impl Into<Next>) -> &mut Self {
        self.edges.insert(from_id.into(), to.into());
        self
    }

    /// Adds (or replaces) the conditional edge leaving `from_id`.
    ///
    /// After `from_id` runs, `router` is called with the updated state and its key is
    /// looked up in `route_map`; unmapped keys end the run.
    pub fn add_conditional_edges<F, I, K, V>(
        &mut self,
        from_id: impl Into<String>,
        router: F,
        route_map: I,
    ) -> &mut Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Next>,
    {
        self.conditional
            .insert(from_id.into(), ConditionalRouter::new(router, route_map));
        self
    }

    /// Wraps every stage invocation of the compiled graph with `middleware`.
    pub fn with_middleware(self, middleware: Arc<dyn NodeMiddleware<S>>) -> Self {
        Self {
            middleware: Some(middleware),
            ..self
        }
    }

    /// Caps the number of stage invocations per run. Without it the executor loops
    /// for as long as the graph keeps routing to stages.
    pub fn with_step_limit(self, max_steps: usize) -> Self {
        Self {
            step_limit: Some(max_steps),
            ..self
        }
    }

    /// Freezes the definition into an executable graph.
    ///
    /// Fails with `CompilationError::MissingEntry` when `set_entry` was never called.
    /// Edge targets are not checked; a dangling one fails the run that reaches it.
    pub fn compile(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let entry = self.entry.clone().ok_or(CompilationError::MissingEntry)?;
        Ok(self.freeze(entry))
    }

    /// Like [`compile`](Self::compile), and also fails with
    /// `CompilationError::NodeNotFound` when the entry, an edge source, an edge
    /// target or a route-map target is not a registered stage.
    ///
    /// Names are checked in sorted order so the reported name is stable.
    pub fn compile_checked(self) -> Result<CompiledStateGraph<S>, CompilationError> {
        let entry = self.entry.clone().ok_or(CompilationError::MissingEntry)?;

        let mut referenced = BTreeSet::new();
        referenced.insert(entry.as_str());
        for (from, to) in &self.edges {
            referenced.insert(from.as_str());
            if let Some(id) = to.stage() {
                referenced.insert(id);
            }
        }
        for (from, router) in &self.conditional {
            referenced.insert(from.as_str());
            referenced.extend(router.targets().filter_map(|t| t.stage()));
        }
        if let Some(missing) = referenced.iter().find(|id| !self.nodes.contains_key(**id)) {
            return Err(CompilationError::NodeNotFound(missing.to_string()));
        }

        Ok(self.freeze(entry))
    }

    fn freeze(self, entry: String) -> CompiledStateGraph<S> {
        CompiledStateGraph {
            nodes: Arc::new(self.nodes),
            edges: Arc::new(self.edges),
            conditional: Arc::new(self.conditional),
            entry,
            middleware: self.middleware,
            step_limit: self.step_limit,
        }
    }
}
