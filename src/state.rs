//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the configuration, the assistant backend, the session change
//! channel, and the per-user view state that outlives a single request:
//! dashboard lists and creation drafts keyed by session user id, plus the
//! live chat sessions.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock, broadcast};

use crate::config::AppConfig;
use crate::services::chat::ChatRegistry;
use crate::services::draft::DraftSlot;
use crate::services::listing::AssistantList;
use crate::services::mock::{AssistantBackend, BackendError, MockBackend};
use crate::services::session::{SessionEvent, SessionStore};

const SESSION_EVENT_CAPACITY: usize = 64;

// =============================================================================
// ASSISTANT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistantStatus {
    Draft,
    Published,
}

impl AssistantStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }
}

/// Dashboard listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assistant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: AssistantStatus,
    /// Always `share_url(origin, id)`.
    pub url: String,
    pub views: u64,
    pub created_at: String,
}

/// Public link for an assistant id.
#[must_use]
pub fn share_url(origin: &str, id: &str) -> String {
    format!("{origin}/assistant/{}", urlencoding::encode(id))
}

/// Detail record rendered by the assistant viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantProfile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub welcome_message: String,
    pub primary_color: String,
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn AssistantBackend>,
    pub session_events: broadcast::Sender<SessionEvent>,
    /// Dashboard lists, populated lazily on first visit per signed-in user.
    pub dashboards: Arc<RwLock<HashMap<String, AssistantList>>>,
    /// Creation drafts keyed by user id.
    pub drafts: Arc<Mutex<HashMap<String, DraftSlot>>>,
    pub chats: ChatRegistry,
}

impl AppState {
    /// State backed by the in-memory mock backend.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let backend = Arc::new(MockBackend::from_config(&config));
        Self::with_backend(config, backend)
    }

    #[must_use]
    pub fn with_backend(config: AppConfig, backend: Arc<dyn AssistantBackend>) -> Self {
        let (session_events, _) = broadcast::channel(SESSION_EVENT_CAPACITY);
        Self {
            config: Arc::new(config),
            backend,
            session_events,
            dashboards: Arc::new(RwLock::new(HashMap::new())),
            drafts: Arc::new(Mutex::new(HashMap::new())),
            chats: ChatRegistry::new(),
        }
    }

    /// Build the session store for one request's cookie jar.
    #[must_use]
    pub fn session_store(&self, jar: axum_extra::extract::cookie::CookieJar) -> SessionStore {
        SessionStore::new(jar, self.config.cookie_secure, self.session_events.clone())
    }

    #[must_use]
    pub fn subscribe_session_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.session_events.subscribe()
    }

    /// Run `f` against the user's dashboard list, fetching it from the
    /// backend on first use.
    ///
    /// The fetch happens outside the lock. Whatever list is present once the
    /// write lock is taken again wins, and `f` runs under that same lock.
    pub async fn with_dashboard<T>(
        &self,
        user_id: &str,
        f: impl FnOnce(&mut AssistantList) -> T,
    ) -> Result<T, BackendError> {
        {
            let mut dashboards = self.dashboards.write().await;
            if let Some(list) = dashboards.get_mut(user_id) {
                return Ok(f(list));
            }
        }
        let fetched = self.backend.list_assistants().await?;
        let mut dashboards = self.dashboards.write().await;
        let list = dashboards
            .entry(user_id.to_owned())
            .or_insert_with(|| AssistantList::new(fetched));
        Ok(f(list))
    }

    /// Drop everything held for a user whose session ended.
    pub async fn forget_user(&self, user_id: &str) {
        self.dashboards.write().await.remove(user_id);
        self.drafts.lock().await.remove(user_id);
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
