//! Workflow state for the travel policy automaton.

use serde::{Deserialize, Serialize};

use crate::session::Intent;

/// Route key written by `EvaluatePolicyNode` and read by [`route_policy`](super::route_policy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyRoute {
    FetchWeather,
    FetchSecondary,
    DenySecondary,
    Respond,
}

impl PolicyRoute {
    pub const ALL: [PolicyRoute; 4] = [
        PolicyRoute::FetchWeather,
        PolicyRoute::FetchSecondary,
        PolicyRoute::DenySecondary,
        PolicyRoute::Respond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyRoute::FetchWeather => "fetch_weather",
            PolicyRoute::FetchSecondary => "fetch_secondary",
            PolicyRoute::DenySecondary => "deny_secondary",
            PolicyRoute::Respond => "respond",
        }
    }
}

/// Outcome of the weather gate for the secondary action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    AllowSecondary,
    DenySecondary,
}

/// State flowing through the policy graph. Created fresh for every request.
///
/// `weather_output` distinguishes "not fetched yet" (`None`) from "fetched, nothing
/// usable came back" (`Some("")`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HostState {
    pub user_message: String,
    pub session_id: String,
    /// User-facing fragments, in order.
    pub response_chunks: Vec<String>,
    pub policy_notes: Vec<String>,
    pub need_weather: bool,
    pub need_secondary_action: bool,
    pub location_hint: Option<String>,
    pub weather_output: Option<String>,
    pub secondary_output: Option<String>,
    pub policy_route: Option<PolicyRoute>,
    pub final_decision: Option<Decision>,
    /// Weather specialist calls made in this run.
    pub weather_attempts: u32,
    /// Intent of an earlier turn, offered when this message is a follow-up.
    pub carried_intent: Option<Intent>,
}

impl HostState {
    pub fn new(user_message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            session_id: session_id.into(),
            ..Default::default()
        }
    }

    pub fn with_carried_intent(mut self, intent: Option<Intent>) -> Self {
        self.carried_intent = intent;
        self
    }

    /// Intent flags this run acted on.
    pub fn intent(&self) -> Intent {
        Intent {
            need_weather: self.need_weather,
            need_secondary: self.need_secondary_action,
        }
    }

    /// " for <location>" when a location hint is known, else empty.
    pub(crate) fn location_suffix(&self) -> String {
        self.location_hint
            .as_deref()
            .map(|l| format!(" for {}", l))
            .unwrap_or_default()
    }
}
