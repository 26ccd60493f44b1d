//! Classify stage: seeds the run's intent, notes and opening fragment.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::Node;

use super::classifier::Classifier;
use super::state::HostState;
use super::stage;

pub const OPENING_SECONDARY: &str =
    "Policy check: I'll review the weather before sharing rental ideas.";
pub const OPENING_WEATHER: &str = "Policy check: looping in the weather specialist for you.";

/// First stage of the policy graph.
///
/// Classifies `user_message` (falling back to `carried_intent` for follow-ups) and
/// starts a clean state: only the message, session and carried intent survive from
/// the input.
///
/// **Interaction**: Implements `Node<HostState>`; static edge to `evaluate_policy`.
pub struct ClassifyNode {
    classifier: Arc<dyn Classifier>,
}

impl ClassifyNode {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }
}

#[async_trait]
impl Node<HostState> for ClassifyNode {
    fn id(&self) -> &str {
        stage::CLASSIFY_REQUEST
    }

    async fn run(&self, state: &HostState) -> Result<Option<HostState>, AgentError> {
        let classification = self
            .classifier
            .classify(&state.user_message)
            .or_carried(state.carried_intent);
        debug!(
            need_weather = classification.need_weather,
            need_secondary = classification.need_secondary_action,
            location = ?classification.location_hint,
            "Classified request"
        );

        let mut next = HostState {
            user_message: state.user_message.clone(),
            session_id: state.session_id.clone(),
            carried_intent: state.carried_intent,
            need_weather: classification.need_weather,
            need_secondary_action: classification.need_secondary_action,
            location_hint: classification.location_hint,
            ..Default::default()
        };
        next.policy_notes.extend(classification.note);
        if next.need_secondary_action {
            next.response_chunks.push(OPENING_SECONDARY.to_string());
        } else if next.need_weather {
            next.response_chunks.push(OPENING_WEATHER.to_string());
        }
        Ok(Some(next))
    }
}
