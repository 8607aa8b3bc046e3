use super::*;
use crate::services::latency::SimulatedLatency;
use crate::services::mock::{BackendError, CANNED_REPLIES, LatencyProfile, MockBackend, mock_profile};
use crate::services::draft::AssistantFormData;

const REPLY_MS: u64 = 1500;

fn backend() -> Arc<dyn AssistantBackend> {
    let latency = LatencyProfile { reply: SimulatedLatency::new(Duration::from_millis(REPLY_MS)), ..Default::default() };
    Arc::new(MockBackend::new("http://studio.test", latency))
}

fn transcript(snapshot: &ChatSnapshot) -> Vec<(Sender, String)> {
    snapshot
        .messages
        .iter()
        .map(|m| (m.sender, m.content.clone()))
        .collect()
}

/// Backend whose replies always fail.
struct BrokenBackend;

#[async_trait::async_trait]
impl AssistantBackend for BrokenBackend {
    async fn list_assistants(&self) -> Result<Vec<crate::state::Assistant>, BackendError> {
        Ok(Vec::new())
    }
    async fn fetch_assistant(&self, id: &str) -> Result<AssistantProfile, BackendError> {
        Ok(mock_profile(id))
    }
    async fn reply(&self, _assistant_id: &str, _message: &str) -> Result<String, BackendError> {
        Err(BackendError::Unavailable("offline".into()))
    }
    async fn save_draft(&self, _draft: &AssistantFormData) -> Result<(), BackendError> {
        Ok(())
    }
    async fn publish(&self, _draft: &AssistantFormData) -> Result<String, BackendError> {
        Ok("ast-x".into())
    }
}

// =============================================================================
// open / snapshot
// =============================================================================

#[tokio::test]
async fn new_session_starts_with_welcome_message() {
    let chats = ChatRegistry::new();
    let profile = mock_profile("ast-1");
    let id = chats.open(profile.clone()).await;

    let snap = chats.snapshot(id).await.unwrap();
    assert_eq!(snap.assistant, profile);
    assert!(!snap.pending);
    assert_eq!(transcript(&snap), [(Sender::Assistant, profile.welcome_message)]);
    assert_eq!(snap.messages[0].id, "1");
}

#[tokio::test]
async fn each_open_is_a_fresh_transcript() {
    let chats = ChatRegistry::new();
    let a = chats.open(mock_profile("ast-1")).await;
    let b = chats.open(mock_profile("ast-1")).await;
    assert_ne!(a, b);
    assert_eq!(chats.session_count().await, 2);
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let chats = ChatRegistry::new();
    let missing = Uuid::new_v4();
    assert!(chats.snapshot(missing).await.is_none());
    assert_eq!(
        chats.send_message(missing, "hi", backend()).await,
        Err(ChatError::NotFound(missing))
    );
}

// =============================================================================
// send_message
// =============================================================================

#[tokio::test(start_paused = true)]
async fn blank_message_is_ignored() {
    let chats = ChatRegistry::new();
    let id = chats.open(mock_profile("ast-1")).await;

    for text in ["", "   ", "\n\t"] {
        assert_eq!(chats.send_message(id, text, backend()).await, Ok(SendOutcome::IgnoredEmpty));
    }
    let snap = chats.snapshot(id).await.unwrap();
    assert_eq!(snap.messages.len(), 1);
    assert!(!snap.pending);
}

#[tokio::test(start_paused = true)]
async fn user_message_is_appended_immediately_and_reply_after_delay() {
    let chats = ChatRegistry::new();
    let id = chats.open(mock_profile("ast-1")).await;

    assert_eq!(chats.send_message(id, "hello", backend()).await, Ok(SendOutcome::Accepted));
    let snap = chats.snapshot(id).await.unwrap();
    assert!(snap.pending);
    assert_eq!(snap.messages.len(), 2);
    assert_eq!(snap.messages[1].sender, Sender::User);
    assert_eq!(snap.messages[1].content, "hello");

    tokio::time::sleep(Duration::from_millis(REPLY_MS - 1)).await;
    assert_eq!(chats.snapshot(id).await.unwrap().messages.len(), 2);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let snap = chats.snapshot(id).await.unwrap();
    assert!(!snap.pending);
    assert_eq!(snap.messages.len(), 3);
    assert_eq!(snap.messages[2].sender, Sender::Assistant);
    assert!(CANNED_REPLIES.contains(&snap.messages[2].content.as_str()));
}

#[tokio::test(start_paused = true)]
async fn rapid_second_send_is_dropped_while_pending() {
    let chats = ChatRegistry::new();
    let id = chats.open(mock_profile("ast-1")).await;

    assert_eq!(chats.send_message(id, "user1", backend()).await, Ok(SendOutcome::Accepted));
    assert_eq!(chats.send_message(id, "user2", backend()).await, Ok(SendOutcome::IgnoredPending));

    tokio::time::sleep(Duration::from_millis(REPLY_MS + 1)).await;
    let snap = chats.snapshot(id).await.unwrap();
    let senders: Vec<Sender> = snap.messages.iter().map(|m| m.sender).collect();
    assert_eq!(senders, [Sender::Assistant, Sender::User, Sender::Assistant]);
    assert_eq!(snap.messages[1].content, "user1");
    assert!(snap.messages.iter().all(|m| m.content != "user2"));

    // Accepted again once the reply has landed.
    assert_eq!(chats.send_message(id, "user2", backend()).await, Ok(SendOutcome::Accepted));
    tokio::time::sleep(Duration::from_millis(REPLY_MS + 1)).await;
    let snap = chats.snapshot(id).await.unwrap();
    let senders: Vec<Sender> = snap.messages.iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        [Sender::Assistant, Sender::User, Sender::Assistant, Sender::User, Sender::Assistant]
    );
    assert_eq!(snap.messages[3].content, "user2");
}

#[tokio::test(start_paused = true)]
async fn message_ids_are_sequential() {
    let chats = ChatRegistry::new();
    let id = chats.open(mock_profile("ast-1")).await;
    chats.send_message(id, "one", backend()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(REPLY_MS + 1)).await;

    let snap = chats.snapshot(id).await.unwrap();
    let ids: Vec<&str> = snap.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[tokio::test(start_paused = true)]
async fn failed_reply_releases_the_gate() {
    let chats = ChatRegistry::new();
    let id = chats.open(mock_profile("ast-1")).await;
    let broken: Arc<dyn AssistantBackend> = Arc::new(BrokenBackend);

    assert_eq!(chats.send_message(id, "hi", Arc::clone(&broken)).await, Ok(SendOutcome::Accepted));
    tokio::time::sleep(Duration::from_millis(1)).await;

    let snap = chats.snapshot(id).await.unwrap();
    assert!(!snap.pending);
    assert_eq!(snap.messages.len(), 2);
    assert_eq!(chats.send_message(id, "again", broken).await, Ok(SendOutcome::Accepted));
}

// =============================================================================
// sweep_idle
// =============================================================================

#[tokio::test(start_paused = true)]
async fn sweep_evicts_only_idle_sessions() {
    let chats = ChatRegistry::new();
    let old = chats.open(mock_profile("ast-1")).await;
    tokio::time::sleep(Duration::from_secs(100)).await;
    let fresh = chats.open(mock_profile("ast-2")).await;

    assert_eq!(chats.sweep_idle(Duration::from_secs(50)).await, 1);
    assert!(chats.snapshot(old).await.is_none());
    assert!(chats.snapshot(fresh).await.is_some());
}

#[tokio::test(start_paused = true)]
async fn activity_keeps_session_alive() {
    let chats = ChatRegistry::new();
    let id = chats.open(mock_profile("ast-1")).await;
    tokio::time::sleep(Duration::from_secs(40)).await;
    chats.send_message(id, "", backend()).await.unwrap();
    tokio::time::sleep(Duration::from_secs(40)).await;

    assert_eq!(chats.sweep_idle(Duration::from_secs(50)).await, 0);
}

#[tokio::test(start_paused = true)]
async fn sweep_aborts_pending_reply() {
    let chats = ChatRegistry::new();
    let id = chats.open(mock_profile("ast-1")).await;
    chats.send_message(id, "hi", backend()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(chats.sweep_idle(Duration::from_millis(5)).await, 1);
    tokio::time::sleep(Duration::from_millis(REPLY_MS * 2)).await;
    assert_eq!(chats.session_count().await, 0);
}
