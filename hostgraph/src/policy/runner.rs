//! Policy graph wiring and the session-aware router in front of it.
//!
//! `policy_graph` registers the five stages and their edges; `HostRouter` compiles it
//! once and runs it per request with a fresh [`HostState`], keeping history and the
//! follow-up intent in a [`SessionStore`].

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::error::AgentError;
use crate::graph::{CompilationError, CompiledStateGraph, Next, StateGraph, END};
use crate::session::{HistoryEntry, SessionStore};
use crate::specialist::{SpecialistClient, SpecialistDirectory, SpecialistSummary};

use super::classifier::{is_follow_up, Classifier, HazardDetector, KeywordClassifier, KeywordHazardDetector};
use super::classify_node::ClassifyNode;
use super::compose_node::ComposeNode;
use super::evaluate_node::EvaluatePolicyNode;
use super::fetch_secondary_node::FetchSecondaryNode;
use super::fetch_weather_node::FetchWeatherNode;
use super::state::{HostState, PolicyRoute};
use super::stage;

/// Returned when a run produced no fragments at all.
pub const FALLBACK_RESPONSE: &str = "I'm not sure how to help with that just yet.";

/// Error from [`HostRouter`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error("policy graph failed to compile: {0}")]
    Compilation(#[from] CompilationError),
    #[error("policy run failed: {0}")]
    Execution(#[from] AgentError),
}

/// Everything the policy stages call out to.
#[derive(Clone)]
pub struct Collaborators {
    pub directory: Arc<SpecialistDirectory>,
    pub client: Arc<dyn SpecialistClient>,
    pub classifier: Arc<dyn Classifier>,
    pub hazards: Arc<dyn HazardDetector>,
}

impl Collaborators {
    /// Keyword classifier and hazard detector by default.
    pub fn new(directory: SpecialistDirectory, client: Arc<dyn SpecialistClient>) -> Self {
        Self {
            directory: Arc::new(directory),
            client,
            classifier: Arc::new(KeywordClassifier),
            hazards: Arc::new(KeywordHazardDetector),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_hazard_detector(mut self, hazards: Arc<dyn HazardDetector>) -> Self {
        self.hazards = hazards;
        self
    }
}

/// Router for the conditional edge leaving `evaluate_policy`.
pub fn route_policy(state: &HostState) -> String {
    state
        .policy_route
        .unwrap_or(PolicyRoute::Respond)
        .as_str()
        .to_string()
}

/// The policy graph, not yet compiled (so callers can attach middleware first).
///
/// classify_request → evaluate_policy ⇄ fetch_weather; evaluate_policy →
/// fetch_secondary → compose_response → END; deny and respond routes go straight to
/// compose_response.
pub fn policy_graph(collab: &Collaborators) -> StateGraph<HostState> {
    let mut graph = StateGraph::<HostState>::new();
    graph
        .add_node(
            stage::CLASSIFY_REQUEST,
            Arc::new(ClassifyNode::new(Arc::clone(&collab.classifier))),
        )
        .add_node(
            stage::EVALUATE_POLICY,
            Arc::new(EvaluatePolicyNode::new(
                Arc::clone(&collab.directory),
                Arc::clone(&collab.hazards),
            )),
        )
        .add_node(
            stage::FETCH_WEATHER,
            Arc::new(FetchWeatherNode::new(
                Arc::clone(&collab.directory),
                Arc::clone(&collab.client),
            )),
        )
        .add_node(
            stage::FETCH_SECONDARY,
            Arc::new(FetchSecondaryNode::new(
                Arc::clone(&collab.directory),
                Arc::clone(&collab.client),
            )),
        )
        .add_node(stage::COMPOSE_RESPONSE, Arc::new(ComposeNode))
        .set_entry(stage::CLASSIFY_REQUEST)
        .add_edge(stage::CLASSIFY_REQUEST, stage::EVALUATE_POLICY)
        .add_conditional_edges(
            stage::EVALUATE_POLICY,
            route_policy,
            [
                (PolicyRoute::FetchWeather.as_str(), Next::from(stage::FETCH_WEATHER)),
                (PolicyRoute::FetchSecondary.as_str(), Next::from(stage::FETCH_SECONDARY)),
                (PolicyRoute::DenySecondary.as_str(), Next::from(stage::COMPOSE_RESPONSE)),
                (PolicyRoute::Respond.as_str(), Next::from(stage::COMPOSE_RESPONSE)),
            ],
        )
        .add_edge(stage::FETCH_WEATHER, stage::EVALUATE_POLICY)
        .add_edge(stage::FETCH_SECONDARY, stage::COMPOSE_RESPONSE)
        .add_edge(stage::COMPOSE_RESPONSE, END);
    graph
}

/// Host entry point: one compiled policy graph shared by every request.
///
/// **Interaction**: Used by the CLI and the HTTP server; reads and writes the
/// [`SessionStore`], lists the [`SpecialistDirectory`].
pub struct HostRouter {
    graph: CompiledStateGraph<HostState>,
    sessions: Arc<dyn SessionStore>,
    directory: Arc<SpecialistDirectory>,
}

impl HostRouter {
    /// Builds and strictly compiles the policy graph for `collab`.
    pub fn new(collab: &Collaborators, sessions: Arc<dyn SessionStore>) -> Result<Self, RunError> {
        Self::from_graph(policy_graph(collab), sessions, Arc::clone(&collab.directory))
    }

    /// Compiles a prepared graph (e.g. `policy_graph` with middleware attached).
    pub fn from_graph(
        graph: StateGraph<HostState>,
        sessions: Arc<dyn SessionStore>,
        directory: Arc<SpecialistDirectory>,
    ) -> Result<Self, RunError> {
        Ok(Self {
            graph: graph.compile_checked()?,
            sessions,
            directory,
        })
    }

    pub fn graph(&self) -> &CompiledStateGraph<HostState> {
        &self.graph
    }

    /// Runs one message through the policy graph and returns the response fragments.
    ///
    /// The user turn is recorded before the run. On success each fragment (or the
    /// single fallback) is recorded as an assistant turn; on failure nothing else is.
    pub async fn handle_request(
        &self,
        message: &str,
        session_id: &str,
    ) -> Result<Vec<String>, RunError> {
        self.sessions
            .append(session_id, HistoryEntry::user(message))
            .await;

        let carried = if is_follow_up(message) {
            self.sessions.intent(session_id).await
        } else {
            None
        };
        let initial = HostState::new(message, session_id).with_carried_intent(carried);
        let final_state = self.graph.invoke(initial).await?;

        let intent = final_state.intent();
        if intent.is_any() {
            self.sessions.set_intent(session_id, intent).await;
        }

        let responses = if final_state.response_chunks.is_empty() {
            vec![FALLBACK_RESPONSE.to_string()]
        } else {
            final_state.response_chunks
        };
        for fragment in &responses {
            self.sessions
                .append(session_id, HistoryEntry::assistant(fragment.as_str()))
                .await;
        }
        info!(
            session_id = session_id,
            fragments = responses.len(),
            decision = ?final_state.final_decision,
            "Handled request"
        );
        Ok(responses)
    }

    pub async fn history(&self, session_id: &str) -> Vec<HistoryEntry> {
        self.sessions.history(session_id).await
    }

    /// Registered specialists in registration order.
    pub fn specialists(&self) -> Vec<SpecialistSummary> {
        self.directory.list()
    }
}
