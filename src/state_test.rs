use std::time::Duration;

use super::*;
use crate::services::draft::{AssistantFormData, DraftSlot};

#[test]
fn share_url_is_derived_from_id() {
    assert_eq!(share_url("https://studio.test", "ast-1"), "https://studio.test/assistant/ast-1");
}

#[test]
fn assistant_serializes_camel_case_with_lowercase_status() {
    let mut a = test_helpers::dummy_assistant("ast-9", "Nine", "desc");
    a.status = AssistantStatus::Published;
    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["status"], "published");
    assert_eq!(json["createdAt"], "2025-01-01");
    assert_eq!(json["url"], "http://localhost:3000/assistant/ast-9");
}

#[test]
fn status_labels() {
    assert_eq!(AssistantStatus::Draft.label(), "Draft");
    assert_eq!(AssistantStatus::Published.label(), "Published");
}

#[tokio::test]
async fn dashboard_is_populated_once_from_backend() {
    let state = test_helpers::test_app_state();
    let first = state.with_dashboard("u1", |list| list.len()).await.unwrap();
    assert_eq!(first, 3);

    state
        .with_dashboard("u1", |list| list.delete("ast-1"))
        .await
        .unwrap();
    // Not re-fetched: the deletion sticks.
    let second = state.with_dashboard("u1", |list| list.len()).await.unwrap();
    assert_eq!(second, 2);
}

#[tokio::test]
async fn dashboards_are_per_user() {
    let state = test_helpers::test_app_state();
    state
        .with_dashboard("u1", |list| list.delete("ast-1"))
        .await
        .unwrap();
    let other = state.with_dashboard("u2", |list| list.len()).await.unwrap();
    assert_eq!(other, 3);
}

#[tokio::test]
async fn forget_user_drops_dashboard_and_draft() {
    let state = test_helpers::test_app_state();
    state.with_dashboard("u1", |_| ()).await.unwrap();
    state.drafts.lock().await.insert("u1".into(), DraftSlot::default());

    state.forget_user("u1").await;

    assert!(!state.dashboards.read().await.contains_key("u1"));
    assert!(!state.drafts.lock().await.contains_key("u1"));
}

/// Backend whose list fetch takes a while.
struct SlowListBackend(MockBackend);

#[async_trait::async_trait]
impl AssistantBackend for SlowListBackend {
    async fn list_assistants(&self) -> Result<Vec<Assistant>, BackendError> {
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.0.list_assistants().await
    }
    async fn fetch_assistant(&self, id: &str) -> Result<AssistantProfile, BackendError> {
        self.0.fetch_assistant(id).await
    }
    async fn reply(&self, assistant_id: &str, message: &str) -> Result<String, BackendError> {
        self.0.reply(assistant_id, message).await
    }
    async fn save_draft(&self, draft: &AssistantFormData) -> Result<(), BackendError> {
        self.0.save_draft(draft).await
    }
    async fn publish(&self, draft: &AssistantFormData) -> Result<String, BackendError> {
        self.0.publish(draft).await
    }
}

#[tokio::test(start_paused = true)]
async fn logout_during_first_fetch_still_yields_full_list() {
    let config = AppConfig::instant();
    let backend = Arc::new(SlowListBackend(MockBackend::from_config(&config)));
    let state = AppState::with_backend(config, backend);

    let visit = {
        let state = state.clone();
        tokio::spawn(async move { state.with_dashboard("u1", |list| list.len()).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    state.forget_user("u1").await;

    assert_eq!(visit.await.unwrap().unwrap(), 3);
    assert_eq!(state.with_dashboard("u1", |list| list.len()).await.unwrap(), 3);
}

#[test]
fn session_store_uses_shared_channel() {
    let state = test_helpers::test_app_state();
    let mut rx = state.subscribe_session_events();
    let mut store = state.session_store(axum_extra::extract::cookie::CookieJar::new());
    store.set_user(test_helpers::test_user());
    assert!(rx.try_recv().is_ok());
}
