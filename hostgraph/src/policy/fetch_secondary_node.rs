//! Fetch-secondary stage: asks the rental specialist for ideas once weather cleared.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::AgentError;
use crate::graph::Node;
use crate::specialist::{extract_text, Capability, SpecialistClient, SpecialistDirectory};

use super::state::HostState;
use super::stage;

pub const SECONDARY_OFFLINE: &str = "Rental specialist is offline right now.";
pub const SECONDARY_EMPTY: &str = "The rental specialist did not return any options.";

pub(crate) fn secondary_prompt(weather_summary: Option<&str>, user_message: &str) -> String {
    let weather = weather_summary
        .filter(|w| !w.is_empty())
        .unwrap_or("Not available");
    format!(
        "The host assistant cleared the weather policy check and now needs rental ideas. \
         Use the weather summary below to tailor your reply.\n\
         Weather summary:\n{}\nUser request:\n{}",
        weather, user_message
    )
}

/// Calls the rental specialist with the weather summary and the user request.
///
/// **Interaction**: Implements `Node<HostState>`; static edge to `compose_response`.
pub struct FetchSecondaryNode {
    directory: Arc<SpecialistDirectory>,
    client: Arc<dyn SpecialistClient>,
}

impl FetchSecondaryNode {
    pub fn new(directory: Arc<SpecialistDirectory>, client: Arc<dyn SpecialistClient>) -> Self {
        Self { directory, client }
    }
}

#[async_trait]
impl Node<HostState> for FetchSecondaryNode {
    fn id(&self) -> &str {
        stage::FETCH_SECONDARY
    }

    async fn run(&self, state: &HostState) -> Result<Option<HostState>, AgentError> {
        let mut next = state.clone();
        let Some(specialist) = self.directory.resolve(Capability::Secondary) else {
            next.response_chunks.push(SECONDARY_OFFLINE.to_string());
            next.secondary_output = Some(String::new());
            return Ok(Some(next));
        };

        let prompt = secondary_prompt(state.weather_output.as_deref(), &state.user_message);
        let output = match self.client.send(specialist, &prompt, &state.session_id).await {
            Ok(task) => extract_text(task.as_ref()),
            Err(e) if e.is_recoverable() => {
                warn!(specialist = specialist, error = %e, "Rental specialist call failed");
                String::new()
            }
            Err(e) => {
                return Err(AgentError::ExecutionFailed(format!(
                    "rental specialist {}: {}",
                    specialist, e
                )))
            }
        };
        let output = output.trim().to_string();
        debug!(specialist = specialist, output_len = output.len(), "Rental ideas fetched");

        if output.is_empty() {
            next.response_chunks.push(SECONDARY_EMPTY.to_string());
        } else {
            next.response_chunks.push(format!("Rental ideas:\n{}", output));
        }
        next.secondary_output = Some(output);
        Ok(Some(next))
    }
}
