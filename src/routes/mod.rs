//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages and form posts are server-rendered HTML. The guard middleware runs
//! in front of every route and redirects page requests the current session
//! may not see. JSON endpoints live under `/api` with a permissive CORS
//! layer. Unknown paths redirect to the landing page.

pub mod assistant;
pub mod auth;
pub mod create;
pub mod dashboard;
pub mod guard;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum_extra::extract::cookie::CookieJar;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::views;

/// JSON routes used by scripts and external clients.
fn api_routes() -> Router<AppState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/me", get(auth::me))
        .route("/api/assistants", get(dashboard::api_assistants))
        .route("/api/chats/{session}", get(assistant::api_chat))
        .route("/api/chats/{session}/messages", post(assistant::api_send_message))
        .layer(cors)
}

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/register", get(auth::register_page).post(auth::register_submit))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard::dashboard_page))
        .route("/dashboard/assistants/{id}/delete", post(dashboard::delete_assistant))
        .route("/create", get(create::create_page).post(create::update_draft))
        .route("/create/draft", post(create::save_draft))
        .route("/create/publish", post(create::publish))
        .route("/assistant/{id}", get(assistant::open_chat))
        .route(
            "/assistant/{id}/chat/{session}",
            get(assistant::chat_page).post(assistant::send_message),
        )
        .merge(api_routes())
        .route("/healthz", get(healthz))
        .fallback(fallback)
        .layer(middleware::from_fn_with_state(state.clone(), guard::enforce))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// `GET /` — landing page.
async fn landing(State(state): State<AppState>, jar: CookieJar) -> Html<String> {
    let user = state.session_store(jar).get_user();
    Html(views::landing::landing_page(user.as_ref()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn fallback() -> Redirect {
    Redirect::to("/")
}

// =============================================================================
// TEST SUPPORT
// =============================================================================

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
    use axum::http::{Request, Response, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::services::session::{SESSION_KEY, User, decode_user};

    fn request(method: &str, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder
    }

    pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let req = request("GET", uri, cookie).body(Body::empty()).unwrap();
        app.clone().oneshot(req).await.unwrap()
    }

    pub async fn post_form(app: &Router, uri: &str, cookie: Option<&str>, form: &str) -> Response<Body> {
        let req = request("POST", uri, cookie)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_owned()))
            .unwrap();
        app.clone().oneshot(req).await.unwrap()
    }

    pub async fn post_json(app: &Router, uri: &str, json: serde_json::Value) -> Response<Body> {
        let req = request("POST", uri, None)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap();
        app.clone().oneshot(req).await.unwrap()
    }

    pub async fn body_string(response: Response<Body>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    /// Assert a 303 redirect and return its target.
    pub fn redirect_target(response: &Response<Body>) -> String {
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        response.headers()[LOCATION].to_str().unwrap().to_owned()
    }

    /// Raw `Set-Cookie` header for the session key, if the response sets one.
    pub fn session_set_cookie(response: &Response<Body>) -> Option<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{SESSION_KEY}=")))
            .map(str::to_owned)
    }

    /// User stored by a `Set-Cookie` session header.
    pub fn stored_user(set_cookie: &str) -> Option<User> {
        let pair = set_cookie.split(';').next()?;
        decode_user(pair.strip_prefix(&format!("{SESSION_KEY}="))?)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
