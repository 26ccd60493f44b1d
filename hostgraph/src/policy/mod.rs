//! Travel policy automaton: weather must be checked before rental ideas are shared.
//!
//! Five stages on a [`StateGraph`](crate::graph::StateGraph) over [`HostState`]:
//! classify the request, evaluate the policy (looping through the weather fetch as
//! needed), optionally fetch rental ideas, then compose the reply. [`HostRouter`] is
//! the entry point.

mod classifier;
mod classify_node;
mod compose_node;
mod evaluate_node;
mod fetch_secondary_node;
mod fetch_weather_node;
mod runner;
mod state;

pub use classifier::{
    is_follow_up, location_hint, Classifier, HazardDetector, KeywordClassifier,
    KeywordHazardDetector, PolicyClassification,
};
pub use classify_node::ClassifyNode;
pub use compose_node::{closing_summary, ComposeNode};
pub use evaluate_node::{EvaluatePolicyNode, MAX_WEATHER_ATTEMPTS};
pub use fetch_secondary_node::FetchSecondaryNode;
pub use fetch_weather_node::FetchWeatherNode;
pub use runner::{
    policy_graph, route_policy, Collaborators, HostRouter, RunError, FALLBACK_RESPONSE,
};
pub use state::{Decision, HostState, PolicyRoute};

/// Stage ids of the policy graph.
pub mod stage {
    pub const CLASSIFY_REQUEST: &str = "classify_request";
    pub const EVALUATE_POLICY: &str = "evaluate_policy";
    pub const FETCH_WEATHER: &str = "fetch_weather";
    pub const FETCH_SECONDARY: &str = "fetch_secondary";
    pub const COMPOSE_RESPONSE: &str = "compose_response";

    pub const ALL: [&str; 5] = [
        CLASSIFY_REQUEST,
        EVALUATE_POLICY,
        FETCH_WEATHER,
        FETCH_SECONDARY,
        COMPOSE_RESPONSE,
    ];
}
