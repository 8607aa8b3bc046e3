//! Assistant viewer routes — open a chat, send messages, and the JSON chat API.

use std::sync::Arc;

use axum::Form;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::services::chat::{ChatError, ChatSnapshot, SendOutcome};
use crate::state::AppState;
use crate::views::{self, Notice, Page, layout};

/// Ids are opaque, so they are re-encoded as a single path segment.
fn chat_path(assistant_id: &str, session: Uuid) -> String {
    format!("/assistant/{}/chat/{session}", urlencoding::encode(assistant_id))
}

/// `GET /assistant/{id}` — start a fresh transcript and show it.
pub async fn open_chat(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect, AppError> {
    let profile = state.backend.fetch_assistant(&id).await?;
    let session = state.chats.open(profile).await;
    tracing::debug!(assistant_id = %id, %session, "chat opened");
    Ok(Redirect::to(&chat_path(&id, session)))
}

/// Snapshot of `session` if it belongs to assistant `id`.
async fn find_chat(state: &AppState, id: &str, session: Uuid) -> Option<ChatSnapshot> {
    state
        .chats
        .snapshot(session)
        .await
        .filter(|chat| chat.assistant.id == id)
}

fn chat_not_found(state: &AppState, jar: CookieJar, id: &str) -> Response {
    let user = state.session_store(jar).get_user();
    let body = format!(
        r#"<h1>Conversation not found</h1>
        <p class="muted">This conversation has ended.</p>
        <a class="button" href="/assistant/{}">Start a new conversation</a>"#,
        urlencoding::encode(id)
    );
    let page = layout(&Page::new("Not found", user.as_ref()), &body);
    (StatusCode::NOT_FOUND, Html(page)).into_response()
}

/// `GET /assistant/{id}/chat/{session}` — transcript; reloads while a reply is pending.
pub async fn chat_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((id, session)): Path<(String, Uuid)>,
) -> Response {
    let Some(chat) = find_chat(&state, &id, session).await else {
        return chat_not_found(&state, jar, &id);
    };
    let user = state.session_store(jar).get_user();
    Html(views::assistant::chat_page(user.as_ref(), &chat, None)).into_response()
}

#[derive(Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    message: String,
}

/// `POST /assistant/{id}/chat/{session}`
pub async fn send_message(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((id, session)): Path<(String, Uuid)>,
    Form(form): Form<MessageForm>,
) -> Response {
    if find_chat(&state, &id, session).await.is_none() {
        return chat_not_found(&state, jar, &id);
    }
    match state.chats.send_message(session, &form.message, Arc::clone(&state.backend)).await {
        Ok(SendOutcome::IgnoredPending) => {
            let Some(chat) = state.chats.snapshot(session).await else {
                return chat_not_found(&state, jar, &id);
            };
            let user = state.session_store(jar).get_user();
            let notice = Notice::info("Please wait for the reply before sending another message.");
            let page = views::assistant::chat_page(user.as_ref(), &chat, Some(&notice));
            (StatusCode::CONFLICT, Html(page)).into_response()
        }
        Ok(_) => Redirect::to(&chat_path(&id, session)).into_response(),
        Err(ChatError::NotFound(_)) => chat_not_found(&state, jar, &id),
    }
}

/// `GET /api/chats/{session}`
pub async fn api_chat(State(state): State<AppState>, Path(session): Path<Uuid>) -> Result<Json<ChatSnapshot>, AppError> {
    let chat = state
        .chats
        .snapshot(session)
        .await
        .ok_or(ChatError::NotFound(session))?;
    Ok(Json(chat))
}

#[derive(Deserialize)]
pub struct SendBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Serialize)]
pub struct SendResponse {
    pub outcome: SendOutcome,
    pub chat: ChatSnapshot,
}

/// `POST /api/chats/{session}/messages`
pub async fn api_send_message(
    State(state): State<AppState>,
    Path(session): Path<Uuid>,
    Json(body): Json<SendBody>,
) -> Result<Json<SendResponse>, AppError> {
    let outcome = state
        .chats
        .send_message(session, &body.message, Arc::clone(&state.backend))
        .await?;
    let chat = state
        .chats
        .snapshot(session)
        .await
        .ok_or(ChatError::NotFound(session))?;
    Ok(Json(SendResponse { outcome, chat }))
}

#[cfg(test)]
#[path = "assistant_test.rs"]
mod tests;
