//! Compose stage: closing summary plus the policy notes.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::Node;

use super::state::{Decision, HostState};
use super::stage;

pub const SUMMARY_DENIED: &str = "Because the forecast includes hazardous conditions, I'm pausing rental recommendations. Consider alternate dates or destinations.";
pub const SUMMARY_ALLOWED: &str = "Here are some rental ideas that align with the current forecast.";
pub const SUMMARY_WEATHER: &str =
    "Let me know if you need help planning activities around this weather outlook.";
pub const SUMMARY_NEUTRAL: &str =
    "I can coordinate weather checks and rental planning whenever you're ready.";

/// Closing fragment for the accumulated state.
///
/// One closing line chosen by outcome, then "Policy summary:" and one "- note" line per
/// policy note, all joined with newlines into a single fragment.
pub fn closing_summary(state: &HostState) -> String {
    let has = |o: &Option<String>| o.as_deref().is_some_and(|s| !s.is_empty());

    let closing = if state.need_secondary_action
        && state.final_decision == Some(Decision::DenySecondary)
    {
        SUMMARY_DENIED
    } else if state.need_secondary_action && has(&state.secondary_output) {
        SUMMARY_ALLOWED
    } else if has(&state.weather_output) {
        SUMMARY_WEATHER
    } else {
        SUMMARY_NEUTRAL
    };

    let mut lines = vec![closing.to_string()];
    if !state.policy_notes.is_empty() {
        lines.push("Policy summary:".to_string());
        lines.extend(state.policy_notes.iter().map(|n| format!("- {}", n)));
    }
    lines.join("\n")
}

/// Final stage: appends [`closing_summary`]. Makes no collaborator calls.
///
/// **Interaction**: Implements `Node<HostState>`; static edge to `END`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComposeNode;

#[async_trait]
impl Node<HostState> for ComposeNode {
    fn id(&self) -> &str {
        stage::COMPOSE_RESPONSE
    }

    async fn run(&self, state: &HostState) -> Result<Option<HostState>, AgentError> {
        let mut next = state.clone();
        next.response_chunks.push(closing_summary(state));
        Ok(Some(next))
    }
}
