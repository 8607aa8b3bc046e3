//! Chat simulation for the assistant viewer.
//!
//! ARCHITECTURE
//! ============
//! Each viewer visit opens a `ChatSession` seeded with the assistant's
//! welcome message. A session is `Idle` or `Pending`:
//!
//! ```text
//! Idle --(non-empty message)--> Pending --(reply latency)--> Idle
//! ```
//!
//! Accepting a message appends the user message synchronously, claims the
//! session's `PendingGate`, and spawns a `PendingTask` that appends the
//! backend reply and releases the gate. Sends that arrive while the gate is
//! held are dropped, so replies always land directly after their own user
//! message.
//!
//! A pending reply is applied even when nobody is looking at the session
//! anymore. Only the idle sweeper aborts it, when it evicts the session.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use uuid::Uuid;

use super::latency::{PendingGate, PendingTask};
use super::mock::AssistantBackend;
use crate::state::AssistantProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub sender: Sender,
    pub content: String,
    /// Unix time in milliseconds.
    pub timestamp: i64,
}

/// Outcome of a send request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendOutcome {
    Accepted,
    IgnoredEmpty,
    IgnoredPending,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat session {0} not found")]
    NotFound(Uuid),
}

/// Read-only copy of a session for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSnapshot {
    pub id: Uuid,
    pub assistant: AssistantProfile,
    pub messages: Vec<ChatMessage>,
    pub pending: bool,
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    assistant: AssistantProfile,
    messages: Vec<ChatMessage>,
    gate: PendingGate,
    reply_task: Option<PendingTask>,
    last_active: Instant,
}

impl ChatSession {
    fn new(id: Uuid, assistant: AssistantProfile) -> Self {
        let mut session = Self {
            id,
            messages: Vec::new(),
            gate: PendingGate::new(),
            reply_task: None,
            last_active: Instant::now(),
            assistant,
        };
        let welcome = session.assistant.welcome_message.clone();
        session.push(Sender::Assistant, welcome);
        session
    }

    fn push(&mut self, sender: Sender, content: String) {
        let id = (self.messages.len() + 1).to_string();
        self.messages.push(ChatMessage { id, sender, content, timestamp: now_millis() });
    }

    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            id: self.id,
            assistant: self.assistant.clone(),
            messages: self.messages.clone(),
            pending: self.gate.is_pending(),
        }
    }
}

fn now_millis() -> i64 {
    let nanos = time::OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(i64::MAX)
}

// =============================================================================
// REGISTRY
// =============================================================================

/// All live chat sessions, keyed by session id.
#[derive(Clone, Default)]
pub struct ChatRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Mutex<ChatSession>>>>>,
}

impl ChatRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh transcript for `assistant`.
    pub async fn open(&self, assistant: AssistantProfile) -> Uuid {
        let id = Uuid::new_v4();
        let session = ChatSession::new(id, assistant);
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        id
    }

    pub async fn snapshot(&self, id: Uuid) -> Option<ChatSnapshot> {
        let session = self.get(id).await?;
        let guard = session.lock().await;
        Some(guard.snapshot())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn get(&self, id: Uuid) -> Option<Arc<Mutex<ChatSession>>> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// Send `text` as the user.
    ///
    /// Blank text and sends during a pending reply are ignored. Otherwise the
    /// user message is appended before this returns and the reply follows
    /// once the backend answers.
    pub async fn send_message(
        &self,
        id: Uuid,
        text: &str,
        backend: Arc<dyn AssistantBackend>,
    ) -> Result<SendOutcome, ChatError> {
        let session = self.get(id).await.ok_or(ChatError::NotFound(id))?;
        let mut guard = session.lock().await;
        guard.last_active = Instant::now();

        if text.trim().is_empty() {
            return Ok(SendOutcome::IgnoredEmpty);
        }
        let Some(pending) = guard.gate.try_begin() else {
            tracing::debug!(session = %id, "send dropped while reply pending");
            return Ok(SendOutcome::IgnoredPending);
        };

        guard.push(Sender::User, text.to_owned());

        let assistant_id = guard.assistant.id.clone();
        let message = text.to_owned();
        let task_session = Arc::clone(&session);
        let task = PendingTask::spawn(async move {
            let reply = backend.reply(&assistant_id, &message).await;
            let mut guard = task_session.lock().await;
            match reply {
                Ok(content) => guard.push(Sender::Assistant, content),
                Err(e) => tracing::warn!(error = %e, session = %id, "assistant reply failed"),
            }
            guard.reply_task = None;
            guard.last_active = Instant::now();
            drop(pending);
        });
        guard.reply_task = Some(task);

        Ok(SendOutcome::Accepted)
    }

    /// Evict sessions idle for longer than `ttl`, aborting pending replies.
    /// Returns the number of evicted sessions.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let candidates: Vec<(Uuid, Arc<Mutex<ChatSession>>)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, s)| (*id, Arc::clone(s)))
            .collect();

        let mut expired = Vec::new();
        for (id, session) in candidates {
            let guard = session.lock().await;
            if guard.last_active.elapsed() > ttl {
                if let Some(task) = &guard.reply_task {
                    task.abort();
                }
                expired.push(id);
            }
        }

        if !expired.is_empty() {
            let mut sessions = self.sessions.write().await;
            for id in &expired {
                sessions.remove(id);
            }
        }
        expired.len()
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
