//! Scripted specialist client for tests and offline runs.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{SpecialistClient, SpecialistError, Task, TaskMessage, TaskState, TaskStatus};

/// One scripted reply.
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Completed task whose status message has one text part.
    Text(String),
    /// Non-task reply (`Ok(None)`).
    Empty,
    /// Failure returned as-is.
    Error(SpecialistError),
}

/// A recorded `send` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockCall {
    pub specialist: String,
    pub prompt: String,
    pub session_id: String,
}

/// Client that pops scripted replies per specialist and records every call.
///
/// A call for a specialist with no replies left fails with
/// [`SpecialistError::Exhausted`], which the fetch stages do not absorb: an
/// unexpected extra call fails the run.
#[derive(Debug, Default)]
pub struct MockSpecialistClient {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockSpecialistClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues text replies for `specialist` (builder style).
    pub fn with_texts<I, T>(self, specialist: &str, texts: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.with_replies(specialist, texts.into_iter().map(|t| MockReply::Text(t.into())))
    }

    /// Queues arbitrary replies for `specialist` (builder style).
    pub fn with_replies(self, specialist: &str, replies: impl IntoIterator<Item = MockReply>) -> Self {
        if let Ok(mut map) = self.replies.lock() {
            map.entry(specialist.to_string()).or_default().extend(replies);
        }
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self, specialist: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.specialist == specialist)
            .count()
    }

    fn task_for(specialist: &str, text: String, remaining: usize) -> Task {
        Task {
            id: format!("task-{}-{}", specialist, remaining),
            context_id: format!("ctx-{}", specialist),
            status: Some(TaskStatus {
                state: TaskState::Completed,
                message: Some(TaskMessage::agent_text(text)),
            }),
        }
    }
}

#[async_trait]
impl SpecialistClient for MockSpecialistClient {
    async fn send(
        &self,
        specialist: &str,
        prompt: &str,
        session_id: &str,
    ) -> Result<Option<Task>, SpecialistError> {
        self.calls
            .lock()
            .map_err(|e| SpecialistError::Transport(e.to_string()))?
            .push(MockCall {
                specialist: specialist.to_string(),
                prompt: prompt.to_string(),
                session_id: session_id.to_string(),
            });

        let (reply, remaining) = {
            let mut map = self
                .replies
                .lock()
                .map_err(|e| SpecialistError::Transport(e.to_string()))?;
            let queue = map.entry(specialist.to_string()).or_default();
            (queue.pop_front(), queue.len())
        };

        match reply {
            Some(MockReply::Text(text)) => Ok(Some(Self::task_for(specialist, text, remaining))),
            Some(MockReply::Empty) => Ok(None),
            Some(MockReply::Error(e)) => Err(e),
            None => Err(SpecialistError::Exhausted(specialist.to_string())),
        }
    }
}
