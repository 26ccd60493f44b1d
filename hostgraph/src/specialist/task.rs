//! A2A task payloads returned by `message/send`, and text extraction from them.
//!
//! Only the fields the host reads are modelled; unknown fields are ignored and
//! unknown part kinds or task states deserialize to an `Unknown` variant.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of a `message/send` call that the remote agent turned into a task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    /// Remote conversation id; sent back on the next message to the same specialist.
    pub context_id: String,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub state: TaskState,
    #[serde(default)]
    pub message: Option<TaskMessage>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    InputRequired,
    Completed,
    Canceled,
    Failed,
    Rejected,
    AuthRequired,
    #[serde(other)]
    Unknown,
}

/// Message attached to a task status; the specialist's reply lives in its parts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMessage {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub message_id: Option<String>,
}

impl TaskMessage {
    /// Agent message with a single text part.
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self {
            role: "agent".to_string(),
            parts: vec![Part::Text { text: text.into() }],
            message_id: None,
        }
    }
}

/// One content part, tagged by `kind` on the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
    Data { data: Value },
    File { file: FileContent },
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Part {
    /// Text rendering of one part; empty for parts with nothing to show.
    pub fn to_text(&self) -> String {
        match self {
            Part::Text { text } => text.clone(),
            Part::Data { data } => serde_json::to_string_pretty(data).unwrap_or_default(),
            Part::File { file } => format!(
                "Received file content ({}).",
                file.mime_type.as_deref().unwrap_or("unknown mime type")
            ),
            Part::Unknown => String::new(),
        }
    }
}

/// Text of the task's status message: non-empty parts joined with newlines.
///
/// A missing task, status, message or part list all yield an empty string.
pub fn extract_text(task: Option<&Task>) -> String {
    let Some(message) = task
        .and_then(|t| t.status.as_ref())
        .and_then(|s| s.message.as_ref())
    else {
        return String::new();
    };
    message
        .parts
        .iter()
        .map(Part::to_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
