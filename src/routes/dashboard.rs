//! Dashboard routes — listing, search, and delete.

use axum::extract::{Path, Query, State};
use axum::response::{Html, Json, Redirect};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::routes::auth::AuthUser;
use crate::services::listing::DashboardStats;
use crate::state::{AppState, Assistant};
use crate::views::Notice;
use crate::views::dashboard::{DashboardView, dashboard_page as render};

#[derive(Deserialize, Default)]
pub struct DashboardQuery {
    #[serde(default)]
    q: String,
    notice: Option<String>,
}

/// Banner for a `notice` key set by the redirect that led here.
fn notice_for(key: Option<&str>) -> Option<Notice> {
    match key? {
        "signed_in" => Some(Notice::success("Logged in successfully!")),
        "registered" => Some(Notice::success("Account created successfully!")),
        "deleted" => Some(Notice::success("Assistant deleted.")),
        "published" => Some(Notice::success("Assistant published!")),
        _ => None,
    }
}

/// Stats over the whole list plus the entries matching `query`.
async fn search(state: &AppState, user_id: &str, query: &str) -> Result<(DashboardStats, Vec<Assistant>), AppError> {
    let found = state
        .with_dashboard(user_id, |list| {
            let results: Vec<Assistant> = list.search(query).into_iter().cloned().collect();
            (list.stats(), results)
        })
        .await?;
    Ok(found)
}

/// `GET /dashboard?q=`
pub async fn dashboard_page(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, AppError> {
    let (stats, results) = search(&state, &auth.user.id, &query.q).await?;
    let results: Vec<&Assistant> = results.iter().collect();
    let notice = notice_for(query.notice.as_deref());
    Ok(Html(render(&DashboardView {
        user: &auth.user,
        stats,
        query: &query.q,
        results: &results,
        notice: notice.as_ref(),
    })))
}

/// `POST /dashboard/assistants/{id}/delete` — always reports success.
pub async fn delete_assistant(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let removed = state.with_dashboard(&auth.user.id, |list| list.delete(&id)).await?;
    tracing::info!(user_id = %auth.user.id, assistant_id = %id, removed, "assistant deleted");
    Ok(Redirect::to("/dashboard?notice=deleted"))
}

#[derive(Serialize)]
pub struct AssistantsResponse {
    pub assistants: Vec<Assistant>,
    pub stats: DashboardStats,
}

/// `GET /api/assistants?q=`
pub async fn api_assistants(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<AssistantsResponse>, AppError> {
    let (stats, assistants) = search(&state, &auth.user.id, &query.q).await?;
    Ok(Json(AssistantsResponse { assistants, stats }))
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod tests;
