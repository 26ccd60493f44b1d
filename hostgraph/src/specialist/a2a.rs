//! A2A specialist client: JSON-RPC `message/send` over HTTP.
//!
//! Specialists publish an agent card at `<base>/.well-known/agent.json`; `discover`
//! fetches those cards, registers each endpoint and builds the
//! [`SpecialistDirectory`]. `send` posts one text part per call and threads the
//! remote `contextId` through the [`SessionStore`] so follow-up messages land in the
//! same remote conversation.
//!
//! **Interaction**: Implements [`SpecialistClient`]; built by `build_host_context`
//! from `HostConfig`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::session::SessionStore;

use super::{AgentCard, SpecialistClient, SpecialistDirectory, SpecialistError, Task};

const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

/// Request and connect timeouts for specialist HTTP calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request: Duration,
    pub connect: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(120),
            connect: Duration::from_secs(30),
        }
    }
}

/// JSON-RPC error object in response body.
#[derive(Debug, Deserialize)]
struct JsonRpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC response body (result or error).
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcErrorBody>,
}

/// HTTP client for A2A specialists.
pub struct A2aClient {
    http: Client,
    /// Specialist name → JSON-RPC endpoint.
    endpoints: DashMap<String, String>,
    sessions: Arc<dyn SessionStore>,
}

impl A2aClient {
    pub fn new(
        timeouts: HttpTimeouts,
        sessions: Arc<dyn SessionStore>,
    ) -> Result<Self, SpecialistError> {
        let http = Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(|e| SpecialistError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            endpoints: DashMap::new(),
            sessions,
        })
    }

    /// Makes `card.name` reachable at `card.url`.
    pub fn register(&self, card: &AgentCard) {
        self.endpoints.insert(card.name.clone(), card.url.clone());
    }

    /// Fetches the agent card published under `base_url`.
    ///
    /// A card without its own `url` is served at `base_url`.
    pub async fn fetch_card(&self, base_url: &str) -> Result<AgentCard, SpecialistError> {
        let base = base_url.trim_end_matches('/');
        let resp = self
            .http
            .get(format!("{}{}", base, AGENT_CARD_PATH))
            .send()
            .await
            .map_err(|e| SpecialistError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SpecialistError::Status(status.as_u16()));
        }
        let mut card: AgentCard = resp
            .json()
            .await
            .map_err(|e| SpecialistError::Decode(format!("agent card: {}", e)))?;
        if card.url.is_empty() {
            card.url = base.to_string();
        }
        Ok(card)
    }

    /// Fetches, registers and tracks the card of every base URL, in order.
    ///
    /// Unreachable or malformed cards are logged and skipped.
    pub async fn discover<I, U>(&self, base_urls: I) -> SpecialistDirectory
    where
        I: IntoIterator<Item = U>,
        U: AsRef<str>,
    {
        let mut directory = SpecialistDirectory::new();
        for base_url in base_urls {
            let base_url = base_url.as_ref();
            match self.fetch_card(base_url).await {
                Ok(card) => {
                    tracing::info!(specialist = %card.name, url = %card.url, "Registered specialist");
                    self.register(&card);
                    directory.track(card);
                }
                Err(e) => {
                    tracing::warn!(url = base_url, error = %e, "Skipping unreachable specialist");
                }
            }
        }
        directory
    }
}

#[async_trait]
impl SpecialistClient for A2aClient {
    async fn send(
        &self,
        specialist: &str,
        prompt: &str,
        session_id: &str,
    ) -> Result<Option<Task>, SpecialistError> {
        let url = self
            .endpoints
            .get(specialist)
            .map(|u| u.value().clone())
            .ok_or_else(|| SpecialistError::UnknownSpecialist(specialist.to_string()))?;

        let message_id = uuid::Uuid::new_v4().simple().to_string();
        let mut message = json!({
            "role": "user",
            "parts": [{ "kind": "text", "text": prompt }],
            "messageId": message_id,
        });
        if let Some(context_id) = self.sessions.context_id(session_id, specialist).await {
            message["contextId"] = Value::String(context_id);
        }
        let request = json!({
            "jsonrpc": "2.0",
            "id": message_id,
            "method": "message/send",
            "params": { "message": message },
        });

        tracing::debug!(specialist = specialist, prompt_len = prompt.len(), "Sending message/send");
        let resp = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SpecialistError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            tracing::error!(specialist = specialist, status = status.as_u16(), "Received non-success response");
            return Err(SpecialistError::Status(status.as_u16()));
        }
        let body: JsonRpcResponse = resp
            .json()
            .await
            .map_err(|e| SpecialistError::Decode(e.to_string()))?;
        if let Some(err) = body.error {
            tracing::error!(specialist = specialist, code = err.code, "Received JSON-RPC error");
            return Err(SpecialistError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let result = body.result.unwrap_or(Value::Null);
        if result.get("kind").and_then(Value::as_str) != Some("task") {
            tracing::warn!(specialist = specialist, "Received non-task response");
            return Ok(None);
        }
        let task: Task =
            serde_json::from_value(result).map_err(|e| SpecialistError::Decode(e.to_string()))?;
        self.sessions
            .set_context_id(session_id, specialist, task.context_id.clone())
            .await;
        Ok(Some(task))
    }
}
