//! Conditional edge: a router over the state plus a route-key map.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Next;

/// Router signature: inspects the state and returns a symbolic route key.
///
/// Routers are synchronous; the executor calls them right after the stage that owns
/// the conditional edge, with the state that stage produced.
pub type RouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Router plus the mapping from route keys to targets.
///
/// A key missing from the map resolves to [`Next::End`]: an unexpected key ends the
/// run instead of failing it. Callers that want strict routing check
/// [`route_keys`](Self::route_keys) against what their router can return.
pub struct ConditionalRouter<S> {
    router: RouterFn<S>,
    route_map: HashMap<String, Next>,
}

impl<S> Clone for ConditionalRouter<S> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            route_map: self.route_map.clone(),
        }
    }
}

impl<S> fmt::Debug for ConditionalRouter<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionalRouter")
            .field("router", &"<fn>")
            .field("route_map", &self.route_map)
            .finish()
    }
}

impl<S> ConditionalRouter<S> {
    pub fn new<F, I, K, V>(router: F, route_map: I) -> Self
    where
        F: Fn(&S) -> String + Send + Sync + 'static,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Next>,
    {
        Self {
            router: Arc::new(router),
            route_map: route_map
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Runs the router and looks its key up in the route map.
    pub fn resolve(&self, state: &S) -> Next {
        let key = (self.router)(state);
        self.target(&key)
    }

    /// Target for a route key; unknown keys fall back to [`Next::End`].
    pub fn target(&self, key: &str) -> Next {
        self.route_map.get(key).cloned().unwrap_or(Next::End)
    }

    /// Route keys with an explicit entry, sorted.
    pub fn route_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.route_map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub(super) fn targets(&self) -> impl Iterator<Item = &Next> {
        self.route_map.values()
    }
}
