//! Auth routes — mock login, registration, logout, and the current user.

use axum::Form;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::AppError;
use crate::services::auth::{self as auth_svc, Registration};
use crate::services::latency::SimulatedLatency;
use crate::services::session::User;
use crate::state::AppState;
use crate::views::{self, Notice};

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Session user read from the `user` cookie.
/// Use as a handler parameter to require a signed-in user.
pub struct AuthUser {
    pub user: User,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let app_state = AppState::from_ref(state);
        let user = app_state
            .session_store(jar)
            .get_user()
            .ok_or(AppError::Unauthorized)?;
        Ok(Self { user })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// `GET /login`
pub async fn login_page() -> Html<String> {
    Html(views::auth::login_page("", None))
}

/// `POST /login` — accept any non-blank credentials after the auth delay.
pub async fn login_submit(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LoginForm>) -> Response {
    SimulatedLatency::new(state.config.delays.auth).wait().await;

    match auth_svc::login(&form.email, &form.password) {
        Ok(user) => sign_in(&state, jar, user, "signed_in"),
        Err(e) => {
            let notice = Notice::error(e.to_string());
            (StatusCode::UNPROCESSABLE_ENTITY, Html(views::auth::login_page(&form.email, Some(&notice)))).into_response()
        }
    }
}

/// `GET /register`
pub async fn register_page() -> Html<String> {
    Html(views::auth::register_page("", "", None))
}

/// `POST /register`
pub async fn register_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<Registration>,
) -> Response {
    SimulatedLatency::new(state.config.delays.auth).wait().await;

    match auth_svc::register(&form) {
        Ok(user) => sign_in(&state, jar, user, "registered"),
        Err(e) => {
            let notice = Notice::error(e.to_string());
            let page = views::auth::register_page(&form.name, &form.email, Some(&notice));
            (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
        }
    }
}

fn sign_in(state: &AppState, jar: CookieJar, user: User, notice: &str) -> Response {
    tracing::info!(user_id = %user.id, "session started");
    let mut store = state.session_store(jar);
    store.set_user(user);
    (store.into_jar(), Redirect::to(&format!("/dashboard?notice={notice}"))).into_response()
}

/// `POST /logout` — clear the session user and drop their in-memory state.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let mut store = state.session_store(jar);
    if let Some(user) = store.get_user() {
        state.forget_user(&user.id).await;
    }
    store.clear_user();
    (store.into_jar(), Redirect::to("/"))
}

/// `GET /api/auth/me` — return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
