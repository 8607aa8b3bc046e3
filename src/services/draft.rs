//! Assistant creation form: draft state, field updates, save and publish.
//!
//! DESIGN
//! ======
//! A draft is mutated one `FieldUpdate` at a time. `save_draft` never
//! validates; `publish` requires a name and a description. Both go through
//! the backend (and its simulated latency) behind the slot's `PendingGate`,
//! so a second submit while one is in flight is rejected as busy.
//!
//! Tone and language are closed sets in the form UI only. Whatever value is
//! submitted is stored as-is.

use serde::{Deserialize, Serialize};

use super::latency::PendingGate;
use super::mock::{AssistantBackend, BackendError};
use crate::state::{Assistant, AssistantStatus, share_url};

pub const TONES: [(&str, &str); 4] = [
    ("friendly", "Friendly"),
    ("professional", "Professional"),
    ("casual", "Casual"),
    ("formal", "Formal"),
];

pub const LANGUAGES: [(&str, &str); 3] = [("ar", "Arabic"), ("en", "English"), ("fr", "French")];

pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! How can I help you today?";
pub const DEFAULT_MAX_RESPONSE_LENGTH: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantFormData {
    pub name: String,
    pub description: String,
    pub welcome_message: String,
    pub tone: String,
    pub language: String,
    pub enable_history: bool,
    pub max_response_length: u32,
    pub primary_color: String,
}

impl Default for AssistantFormData {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_owned(),
            tone: "friendly".to_owned(),
            language: "ar".to_owned(),
            enable_history: true,
            max_response_length: DEFAULT_MAX_RESPONSE_LENGTH,
            primary_color: "#000000".to_owned(),
        }
    }
}

/// One field-level edit to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Description(String),
    WelcomeMessage(String),
    Tone(String),
    Language(String),
    EnableHistory(bool),
    MaxResponseLength(u32),
    PrimaryColor(String),
}

impl AssistantFormData {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(v) => self.name = v,
            FieldUpdate::Description(v) => self.description = v,
            FieldUpdate::WelcomeMessage(v) => self.welcome_message = v,
            FieldUpdate::Tone(v) => self.tone = v,
            FieldUpdate::Language(v) => self.language = v,
            FieldUpdate::EnableHistory(v) => self.enable_history = v,
            FieldUpdate::MaxResponseLength(v) => self.max_response_length = v,
            FieldUpdate::PrimaryColor(v) => self.primary_color = v,
        }
    }

    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = FieldUpdate>) {
        for update in updates {
            self.apply(update);
        }
    }

    /// Name and description must be non-empty. Nothing else is checked.
    pub fn validate_for_publish(&self) -> Result<(), FormError> {
        if self.name.is_empty() || self.description.is_empty() {
            return Err(FormError::MissingRequired);
        }
        Ok(())
    }
}

// =============================================================================
// TABS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormTab {
    #[default]
    Basic,
    Behavior,
    Appearance,
}

impl FormTab {
    pub const ALL: [FormTab; 3] = [Self::Basic, Self::Behavior, Self::Appearance];

    /// Unknown names fall back to the first tab.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("behavior") => Self::Behavior,
            Some("appearance") => Self::Appearance,
            _ => Self::Basic,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Behavior => "behavior",
            Self::Appearance => "appearance",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Basic => "Basic settings",
            Self::Behavior => "Behavior & replies",
            Self::Appearance => "Appearance",
        }
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("please fill in all required fields")]
    MissingRequired,
    #[error("another save or publish is still in progress")]
    Busy,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Per-user draft plus its single-flight gate.
#[derive(Debug, Clone, Default)]
pub struct DraftSlot {
    pub form: AssistantFormData,
    pub gate: PendingGate,
}

/// Save without validation. Succeeds once the backend round-trip completes.
pub async fn save_draft(
    backend: &dyn AssistantBackend,
    gate: &PendingGate,
    form: &AssistantFormData,
) -> Result<(), FormError> {
    let _pending = gate.try_begin().ok_or(FormError::Busy)?;
    backend.save_draft(form).await?;
    Ok(())
}

/// Validate, then publish. Returns the new assistant id.
pub async fn publish(
    backend: &dyn AssistantBackend,
    gate: &PendingGate,
    form: &AssistantFormData,
) -> Result<String, FormError> {
    form.validate_for_publish()?;
    let _pending = gate.try_begin().ok_or(FormError::Busy)?;
    let id = backend.publish(form).await?;
    Ok(id)
}

/// Listing entry for a freshly published draft.
#[must_use]
pub fn published_assistant(id: String, form: &AssistantFormData, origin: &str, created_at: String) -> Assistant {
    Assistant {
        url: share_url(origin, &id),
        id,
        name: form.name.clone(),
        description: form.description.clone(),
        status: AssistantStatus::Published,
        views: 0,
        created_at,
    }
}

#[cfg(test)]
#[path = "draft_test.rs"]
mod tests;
