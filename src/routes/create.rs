//! Assistant creation routes — tab switching, draft save, and publish.
//!
//! Each signed-in user has one `DraftSlot`. Handlers apply the posted tab
//! fields under the drafts lock, then release it before any backend call so
//! a slow save never blocks other users. The slot's `PendingGate` rejects a
//! second save or publish while one is in flight.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::routes::auth::AuthUser;
use crate::services::draft::{self, AssistantFormData, FieldUpdate, FormError, FormTab};
use crate::services::latency::PendingGate;
use crate::services::session::User;
use crate::state::AppState;
use crate::views::Notice;
use crate::views::create::{CreateView, create_page as render};

/// Fields posted by the creation form. Only the visible tab's fields are
/// present; absent fields leave the draft unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct CreateForm {
    pub tab: Option<String>,
    pub goto: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub welcome_message: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    /// Checkbox: present (any value) when checked.
    pub enable_history: Option<String>,
    /// Hidden marker telling an unchecked box apart from a tab without it.
    pub enable_history_present: Option<String>,
    pub max_response_length: Option<String>,
    pub primary_color: Option<String>,
}

impl CreateForm {
    /// Field updates carried by this post. An unparsable length is skipped.
    #[must_use]
    pub fn updates(&self) -> Vec<FieldUpdate> {
        let text = |v: &Option<String>, f: fn(String) -> FieldUpdate| v.clone().map(f);
        let mut updates: Vec<FieldUpdate> = [
            text(&self.name, FieldUpdate::Name),
            text(&self.description, FieldUpdate::Description),
            text(&self.welcome_message, FieldUpdate::WelcomeMessage),
            text(&self.tone, FieldUpdate::Tone),
            text(&self.language, FieldUpdate::Language),
            text(&self.primary_color, FieldUpdate::PrimaryColor),
        ]
        .into_iter()
        .flatten()
        .collect();

        if self.enable_history_present.is_some() {
            updates.push(FieldUpdate::EnableHistory(self.enable_history.is_some()));
        }
        if let Some(Ok(len)) = self.max_response_length.as_deref().map(|raw| raw.trim().parse::<u32>()) {
            updates.push(FieldUpdate::MaxResponseLength(len));
        }
        updates
    }

    fn tab(&self) -> FormTab {
        FormTab::parse(self.tab.as_deref())
    }
}

/// Apply `form` to the user's draft and return a copy plus its gate.
async fn apply(state: &AppState, user_id: &str, form: &CreateForm) -> (AssistantFormData, PendingGate) {
    let mut drafts = state.drafts.lock().await;
    let slot = drafts.entry(user_id.to_owned()).or_default();
    slot.form.apply_all(form.updates());
    (slot.form.clone(), slot.gate.clone())
}

fn form_error_status(err: &FormError) -> StatusCode {
    match err {
        FormError::MissingRequired => StatusCode::UNPROCESSABLE_ENTITY,
        FormError::Busy => StatusCode::CONFLICT,
        FormError::Backend(_) => StatusCode::BAD_GATEWAY,
    }
}

fn render_page(user: &User, form: &AssistantFormData, tab: FormTab, notice: Option<&Notice>) -> Html<String> {
    Html(render(&CreateView { user, form, tab, notice }))
}

#[derive(Deserialize)]
pub struct CreateQuery {
    tab: Option<String>,
}

/// `GET /create?tab=`
pub async fn create_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<CreateQuery>,
) -> Html<String> {
    let form = {
        let mut drafts = state.drafts.lock().await;
        drafts.entry(auth.user.id.clone()).or_default().form.clone()
    };
    render_page(&auth.user, &form, FormTab::parse(query.tab.as_deref()), None)
}

/// `POST /create` — apply the visible tab, then show the requested one.
pub async fn update_draft(State(state): State<AppState>, auth: AuthUser, Form(form): Form<CreateForm>) -> Redirect {
    apply(&state, &auth.user.id, &form).await;
    let next = form.goto.as_deref().map_or_else(|| form.tab(), |goto| FormTab::parse(Some(goto)));
    Redirect::to(&format!("/create?tab={}", next.as_str()))
}

/// `POST /create/draft`
pub async fn save_draft(State(state): State<AppState>, auth: AuthUser, Form(form): Form<CreateForm>) -> Response {
    let (draft, gate) = apply(&state, &auth.user.id, &form).await;
    match draft::save_draft(state.backend.as_ref(), &gate, &draft).await {
        Ok(()) => {
            tracing::info!(user_id = %auth.user.id, "draft saved");
            let notice = Notice::success("Draft saved!");
            render_page(&auth.user, &draft, form.tab(), Some(&notice)).into_response()
        }
        Err(e) => form_failure(&auth.user, &draft, form.tab(), &e),
    }
}

/// `POST /create/publish` — validate, publish, and return to the dashboard.
pub async fn publish(State(state): State<AppState>, auth: AuthUser, Form(form): Form<CreateForm>) -> Response {
    let (draft, gate) = apply(&state, &auth.user.id, &form).await;
    let id = match draft::publish(state.backend.as_ref(), &gate, &draft).await {
        Ok(id) => id,
        Err(e) => return form_failure(&auth.user, &draft, form.tab(), &e),
    };
    tracing::info!(user_id = %auth.user.id, assistant_id = %id, "assistant published");

    if let Some(slot) = state.drafts.lock().await.get_mut(&auth.user.id) {
        slot.form = AssistantFormData::default();
    }
    if state.config.publish_to_dashboard {
        let created_at = time::OffsetDateTime::now_utc().date().to_string();
        let assistant = draft::published_assistant(id, &draft, &state.config.public_origin, created_at);
        if let Err(e) = state.with_dashboard(&auth.user.id, |list| list.append(assistant)).await {
            tracing::warn!(error = %e, "published assistant not added to dashboard");
        }
    }
    Redirect::to("/dashboard?notice=published").into_response()
}

fn form_failure(user: &User, draft: &AssistantFormData, tab: FormTab, err: &FormError) -> Response {
    let status = form_error_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, "draft operation failed");
    }
    let notice = Notice::error(err.to_string());
    (status, render_page(user, draft, tab, Some(&notice))).into_response()
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
