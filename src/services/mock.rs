//! Mock data providers standing in for a real assistant backend.
//!
//! DESIGN
//! ======
//! Routes and services talk to `AssistantBackend`, never to fixtures
//! directly, so a real backend can replace `MockBackend` without changing
//! caller contracts. The mock serves a static fixture list, a generic
//! profile for any id, and canned chat replies, with simulated latency on
//! the operations that would be round-trips.
//!
//! The fixture is static: assistants published through the creation form
//! never show up in `list_assistants`.
//!
//! `BackendError` is the failure contract of the trait. The mock never
//! fails, so only alternative backends construct it.

use rand::Rng;

use super::draft::AssistantFormData;
use super::latency::SimulatedLatency;
use crate::config::AppConfig;
use crate::state::{Assistant, AssistantProfile, AssistantStatus, share_url};

/// Replies the mock assistant picks from, uniformly at random.
pub const CANNED_REPLIES: [&str; 4] = [
    "Thanks for reaching out! I'd be happy to help you sort this out.",
    "Great question! Let me walk you through it in detail.",
    "I understand what you mean. Here is how I can help.",
    "Certainly! I can help with that. Here is the information you need.",
];

const ASSISTANT_ID_PREFIX: &str = "ast-";
const ASSISTANT_ID_SUFFIX_LEN: usize = 9;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[cfg_attr(not(test), allow(dead_code))]
    #[error("assistant backend unavailable: {0}")]
    Unavailable(String),
}

#[async_trait::async_trait]
pub trait AssistantBackend: Send + Sync {
    /// All assistants visible on the dashboard, in display order.
    async fn list_assistants(&self) -> Result<Vec<Assistant>, BackendError>;

    /// Viewer profile for `id`. Unknown ids still resolve.
    async fn fetch_assistant(&self, id: &str) -> Result<AssistantProfile, BackendError>;

    /// One assistant reply to `message`.
    async fn reply(&self, assistant_id: &str, message: &str) -> Result<String, BackendError>;

    async fn save_draft(&self, draft: &AssistantFormData) -> Result<(), BackendError>;

    /// Publish `draft`, returning the new assistant id.
    async fn publish(&self, draft: &AssistantFormData) -> Result<String, BackendError>;
}

// =============================================================================
// FIXTURES
// =============================================================================

/// Seed list shown on a fresh dashboard.
#[must_use]
pub fn fixture_assistants(origin: &str) -> Vec<Assistant> {
    let entry = |id: &str, name: &str, description: &str, status: AssistantStatus, views: u64, created_at: &str| Assistant {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        status,
        url: share_url(origin, id),
        views,
        created_at: created_at.to_owned(),
    };
    vec![
        entry(
            "ast-1",
            "Customer Service Assistant",
            "Smart assistant answering customer questions around the clock",
            AssistantStatus::Published,
            1234,
            "2025-01-15",
        ),
        entry(
            "ast-2",
            "Technical Support Assistant",
            "Helps solve technical problems and gives step-by-step guidance",
            AssistantStatus::Draft,
            0,
            "2025-01-20",
        ),
        entry(
            "ast-3",
            "Sales Assistant",
            "Supports the sales process and shares product information",
            AssistantStatus::Published,
            856,
            "2025-01-18",
        ),
    ]
}

/// Generic profile served for every id.
#[must_use]
pub fn mock_profile(id: &str) -> AssistantProfile {
    AssistantProfile {
        id: id.to_owned(),
        name: "Customer Service Assistant".to_owned(),
        description: "Smart assistant answering customer questions around the clock".to_owned(),
        welcome_message: "Hello! I'm the customer service assistant. How can I help you today?".to_owned(),
        primary_color: "#000000".to_owned(),
    }
}

pub fn pick_reply<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    CANNED_REPLIES[rng.random_range(0..CANNED_REPLIES.len())]
}

/// `ast-` followed by nine random base-36 characters.
pub fn generate_assistant_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(ASSISTANT_ID_PREFIX.len() + ASSISTANT_ID_SUFFIX_LEN);
    id.push_str(ASSISTANT_ID_PREFIX);
    for _ in 0..ASSISTANT_ID_SUFFIX_LEN {
        let digit = rng.random_range(0..36u32);
        id.push(char::from_digit(digit, 36).unwrap_or('0'));
    }
    id
}

// =============================================================================
// MOCK BACKEND
// =============================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct LatencyProfile {
    pub draft: SimulatedLatency,
    pub publish: SimulatedLatency,
    pub reply: SimulatedLatency,
}

pub struct MockBackend {
    origin: String,
    latency: LatencyProfile,
}

impl MockBackend {
    #[must_use]
    pub fn new(origin: impl Into<String>, latency: LatencyProfile) -> Self {
        Self { origin: origin.into(), latency }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let latency = LatencyProfile {
            draft: SimulatedLatency::new(config.delays.draft),
            publish: SimulatedLatency::new(config.delays.publish),
            reply: SimulatedLatency::new(config.delays.reply),
        };
        Self::new(config.public_origin.clone(), latency)
    }
}

#[async_trait::async_trait]
impl AssistantBackend for MockBackend {
    async fn list_assistants(&self) -> Result<Vec<Assistant>, BackendError> {
        Ok(fixture_assistants(&self.origin))
    }

    async fn fetch_assistant(&self, id: &str) -> Result<AssistantProfile, BackendError> {
        Ok(mock_profile(id))
    }

    async fn reply(&self, assistant_id: &str, _message: &str) -> Result<String, BackendError> {
        self.latency.reply.wait().await;
        let reply = pick_reply(&mut rand::rng());
        tracing::debug!(assistant_id, "mock reply chosen");
        Ok(reply.to_owned())
    }

    async fn save_draft(&self, draft: &AssistantFormData) -> Result<(), BackendError> {
        self.latency.draft.wait().await;
        tracing::debug!(name = %draft.name, "mock draft saved");
        Ok(())
    }

    async fn publish(&self, draft: &AssistantFormData) -> Result<String, BackendError> {
        self.latency.publish.wait().await;
        let id = generate_assistant_id(&mut rand::rng());
        tracing::debug!(%id, name = %draft.name, "mock assistant published");
        Ok(id)
    }
}

#[cfg(test)]
#[path = "mock_test.rs"]
mod tests;
