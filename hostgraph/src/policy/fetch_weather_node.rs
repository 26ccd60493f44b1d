//! Fetch-weather stage: asks the weather specialist for a forecast.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::Node;
use crate::specialist::{extract_text, Capability, SpecialistClient, SpecialistDirectory};

use super::state::HostState;
use super::stage;

pub const WEATHER_OFFLINE: &str = "Weather specialist is offline right now.";

pub(crate) fn weather_prompt(user_message: &str) -> String {
    format!(
        "You are assisting a travel policy review. Provide a concise forecast highlighting any safety risks.\nUser request:\n{}",
        user_message
    )
}

/// Calls the weather specialist and records its reply.
///
/// A recoverable specialist error counts as an empty reply; other errors fail the run.
/// `weather_output` is always `Some` afterwards (empty when nothing usable came back).
///
/// **Interaction**: Implements `Node<HostState>`; static edge back to `evaluate_policy`.
pub struct FetchWeatherNode {
    directory: Arc<SpecialistDirectory>,
    client: Arc<dyn SpecialistClient>,
}

impl FetchWeatherNode {
    pub fn new(directory: Arc<SpecialistDirectory>, client: Arc<dyn SpecialistClient>) -> Self {
        Self { directory, client }
    }
}

#[async_trait]
impl Node<HostState> for FetchWeatherNode {
    fn id(&self) -> &str {
        stage::FETCH_WEATHER
    }

    async fn run(&self, state: &HostState) -> Result<Option<HostState>, AgentError> {
        let mut next = state.clone();
        let Some(specialist) = self.directory.resolve(Capability::Weather) else {
            next.response_chunks.push(WEATHER_OFFLINE.to_string());
            next.weather_output = Some(String::new());
            return Ok(Some(next));
        };

        next.weather_attempts += 1;
        let prompt = weather_prompt(&state.user_message);
        let output = match self.client.send(specialist, &prompt, &state.session_id).await {
            Ok(task) => extract_text(task.as_ref()),
            Err(e) if e.is_recoverable() => {
                warn!(specialist = specialist, error = %e, "Weather specialist call failed");
                String::new()
            }
            Err(e) => {
                return Err(AgentError::ExecutionFailed(format!(
                    "weather specialist {}: {}",
                    specialist, e
                )))
            }
        };
        let output = output.trim().to_string();
        debug!(specialist = specialist, output_len = output.len(), attempt = next.weather_attempts, "Weather fetched");

        let location = state.location_suffix();
        if output.is_empty() {
            next.response_chunks
                .push(format!("I could not retrieve a weather update{}.", location));
        } else {
            next.response_chunks
                .push(format!("Weather outlook{}:\n{}", location, output));
        }
        next.weather_output = Some(output);
        Ok(Some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialist::{AgentCard, MockReply, MockSpecialistClient, SpecialistError};

    fn directory() -> Arc<SpecialistDirectory> {
        Arc::new(SpecialistDirectory::from_cards([AgentCard::new(
            "Weather Specialist",
            "",
        )]))
    }

    fn state() -> HostState {
        let mut s = HostState::new("Weather in Austin?", "sess");
        s.location_hint = Some("Austin".into());
        s
    }

    /// **Scenario**: A reply becomes a "Weather outlook for X" fragment and the trimmed output.
    #[tokio::test]
    async fn success_appends_outlook() {
        let client = Arc::new(MockSpecialistClient::new().with_texts("Weather Specialist", ["  Hot and dry  "]));
        let node = FetchWeatherNode::new(directory(), client.clone());
        let out = node.run(&state()).await.unwrap().unwrap();
        assert_eq!(out.weather_output.as_deref(), Some("Hot and dry"));
        assert_eq!(out.response_chunks, vec!["Weather outlook for Austin:\nHot and dry".to_string()]);
        assert_eq!(out.weather_attempts, 1);
        let calls = client.calls();
        assert_eq!(calls[0].session_id, "sess");
        assert!(calls[0].prompt.ends_with("User request:\nWeather in Austin?"));
    }

    /// **Scenario**: A transport failure is absorbed into a "could not retrieve" fragment.
    #[tokio::test]
    async fn recoverable_failure_reports_missing_update() {
        let client = Arc::new(MockSpecialistClient::new().with_replies(
            "Weather Specialist",
            [MockReply::Error(SpecialistError::Transport("refused".into()))],
        ));
        let out = FetchWeatherNode::new(directory(), client)
            .run(&state())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out.weather_output.as_deref(), Some(""));
        assert_eq!(
            out.response_chunks,
            vec!["I could not retrieve a weather update for Austin.".to_string()]
        );
    }

    /// **Scenario**: A non-recoverable failure fails the stage.
    #[tokio::test]
    async fn unrecoverable_failure_propagates() {
        let client = Arc::new(MockSpecialistClient::new());
        let result = FetchWeatherNode::new(directory(), client).run(&state()).await;
        assert!(matches!(result, Err(AgentError::ExecutionFailed(_))));
    }

    /// **Scenario**: Without a weather specialist the stage reports it offline and makes no call.
    #[tokio::test]
    async fn offline_without_specialist() {
        let client = Arc::new(MockSpecialistClient::new());
        let node = FetchWeatherNode::new(Arc::new(SpecialistDirectory::new()), client.clone());
        let out = node.run(&state()).await.unwrap().unwrap();
        assert_eq!(out.response_chunks, vec![WEATHER_OFFLINE.to_string()]);
        assert_eq!(out.weather_output.as_deref(), Some(""));
        assert!(client.calls().is_empty());
    }
}
