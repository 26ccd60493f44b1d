//! Evaluate stage: the policy decision point.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AgentError;
use crate::graph::Node;
use crate::specialist::{Capability, SpecialistDirectory};

use super::classifier::HazardDetector;
use super::state::{Decision, HostState, PolicyRoute};
use super::stage;

/// Weather specialist calls allowed per run.
pub const MAX_WEATHER_ATTEMPTS: u32 = 2;

pub const NOTE_WEATHER_UNAVAILABLE: &str =
    "Policy fallback: weather specialist unavailable; responding directly.";
pub const NOTE_AWAITING_WEATHER: &str =
    "Policy: awaiting weather data before continuing with the plan.";
pub const NOTE_WEATHER_RETRY: &str =
    "Policy: weather result missing, re-requesting from specialist.";
pub const NOTE_WEATHER_INCOMPLETE: &str =
    "Policy: weather check could not be completed, pausing rental guidance.";
pub const NOTE_HAZARD: &str = "Policy: hazardous conditions detected, pausing rental guidance.";
pub const NOTE_SECONDARY_UNAVAILABLE: &str =
    "Policy fallback: rental specialist unavailable, sharing weather only.";
pub const NOTE_SECONDARY_CLEARED: &str =
    "Policy: weather looks acceptable, gathering rental suggestions.";

/// Decides the next route from the intent flags and what has been fetched so far.
///
/// First match wins:
/// 1. weather needed and not fetched yet: `fetch_weather`, or `respond` when no weather
///    specialist is known;
/// 2. secondary action needed: re-fetch an empty weather result (bounded by
///    [`MAX_WEATHER_ATTEMPTS`]), deny on hazardous weather, otherwise allow and
///    `fetch_secondary` (or `respond` when no secondary specialist is known);
/// 3. otherwise `respond`.
///
/// Every branch appends one policy note except the last.
///
/// **Interaction**: Implements `Node<HostState>`; writes `policy_route`, which
/// [`route_policy`](super::route_policy) reads for the conditional edge.
pub struct EvaluatePolicyNode {
    directory: Arc<SpecialistDirectory>,
    hazards: Arc<dyn HazardDetector>,
}

impl EvaluatePolicyNode {
    pub fn new(directory: Arc<SpecialistDirectory>, hazards: Arc<dyn HazardDetector>) -> Self {
        Self { directory, hazards }
    }

    fn decide(&self, state: &HostState) -> (PolicyRoute, Option<&'static str>, Option<Decision>) {
        if state.need_weather && state.weather_output.is_none() {
            return if self.directory.resolve(Capability::Weather).is_none() {
                (PolicyRoute::Respond, Some(NOTE_WEATHER_UNAVAILABLE), state.final_decision)
            } else {
                (PolicyRoute::FetchWeather, Some(NOTE_AWAITING_WEATHER), state.final_decision)
            };
        }

        if state.need_secondary_action {
            let weather = state.weather_output.as_deref().unwrap_or("");
            if weather.is_empty() {
                return if state.weather_attempts < MAX_WEATHER_ATTEMPTS {
                    (PolicyRoute::FetchWeather, Some(NOTE_WEATHER_RETRY), state.final_decision)
                } else {
                    (PolicyRoute::Respond, Some(NOTE_WEATHER_INCOMPLETE), state.final_decision)
                };
            }
            if self.hazards.is_hazardous(weather) {
                return (
                    PolicyRoute::DenySecondary,
                    Some(NOTE_HAZARD),
                    Some(Decision::DenySecondary),
                );
            }
            if self.directory.resolve(Capability::Secondary).is_none() {
                return (
                    PolicyRoute::Respond,
                    Some(NOTE_SECONDARY_UNAVAILABLE),
                    Some(Decision::AllowSecondary),
                );
            }
            return (
                PolicyRoute::FetchSecondary,
                Some(NOTE_SECONDARY_CLEARED),
                Some(Decision::AllowSecondary),
            );
        }

        (PolicyRoute::Respond, None, state.final_decision)
    }
}

#[async_trait]
impl Node<HostState> for EvaluatePolicyNode {
    fn id(&self) -> &str {
        stage::EVALUATE_POLICY
    }

    async fn run(&self, state: &HostState) -> Result<Option<HostState>, AgentError> {
        let (route, note, decision) = self.decide(state);
        debug!(route = route.as_str(), decision = ?decision, "Policy evaluated");

        let mut next = state.clone();
        next.policy_notes.extend(note.map(str::to_string));
        next.policy_route = Some(route);
        next.final_decision = decision;
        Ok(Some(next))
    }
}
