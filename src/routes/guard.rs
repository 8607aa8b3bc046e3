//! Authorization middleware for page routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::services::guard::{GuardDecision, Route, evaluate};
use crate::state::AppState;

/// Re-check the session on every page request and redirect when the page
/// is not visible to it. Paths outside the page table pass through.
pub async fn enforce(State(state): State<AppState>, jar: CookieJar, request: Request, next: Next) -> Response {
    let Some(route) = Route::parse(request.uri().path()) else {
        return next.run(request).await;
    };
    let auth = state.session_store(jar).auth_state();
    match evaluate(&route, &auth) {
        GuardDecision::Render => next.run(request).await,
        GuardDecision::Redirect(target) => {
            let user_id = auth.user().map(|u| u.id.as_str());
            tracing::debug!(path = %request.uri().path(), to = %target.path(), ?user_id, "guard redirect");
            Redirect::to(&target.path()).into_response()
        }
    }
}
