use axum::Router;
use axum::http::StatusCode;

use super::app;
use super::test_support::*;
use crate::state::test_helpers::{session_cookie, test_app_state, test_user};

fn test_app() -> Router {
    app(test_app_state())
}

fn member_cookie() -> String {
    session_cookie(&test_user())
}

#[tokio::test]
async fn healthz_is_ok() {
    let response = get(&test_app(), "/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_paths_redirect_to_landing() {
    let app = test_app();
    for path in ["/nope", "/dashboards", "/assistant", "/a/b/c"] {
        let response = get(&app, path, None).await;
        assert_eq!(redirect_target(&response), "/", "{path}");
    }
}

#[tokio::test]
async fn landing_renders_for_everyone() {
    let app = test_app();
    let anon = get(&app, "/", None).await;
    assert_eq!(anon.status(), StatusCode::OK);
    let html = body_string(anon).await;
    assert!(html.contains("Get started"));
    assert!(!html.contains("Log out"));

    let cookie = member_cookie();
    let member = get(&app, "/", Some(&cookie)).await;
    assert_eq!(member.status(), StatusCode::OK);
    let html = body_string(member).await;
    assert!(html.contains("Log out"));
    assert!(html.contains("Go to dashboard"));
}

// =============================================================================
// guard
// =============================================================================

#[tokio::test]
async fn anonymous_member_pages_redirect_to_login() {
    let app = test_app();
    for path in ["/dashboard", "/dashboard?q=x", "/create", "/create?tab=behavior"] {
        let response = get(&app, path, None).await;
        assert_eq!(redirect_target(&response), "/login", "{path}");
    }
}

#[tokio::test]
async fn anonymous_form_posts_on_member_pages_redirect_to_login() {
    let app = test_app();
    for path in ["/dashboard/assistants/ast-1/delete", "/create/publish", "/create/draft", "/create"] {
        let response = post_form(&app, path, None, "name=x").await;
        assert_eq!(redirect_target(&response), "/login", "{path}");
    }
}

#[tokio::test]
async fn signed_in_guest_pages_redirect_to_dashboard() {
    let app = test_app();
    let cookie = member_cookie();
    for path in ["/login", "/register"] {
        let response = get(&app, path, Some(&cookie)).await;
        assert_eq!(redirect_target(&response), "/dashboard", "{path}");
    }
}

#[tokio::test]
async fn guest_pages_render_for_anonymous() {
    let app = test_app();
    for path in ["/login", "/register"] {
        let response = get(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn malformed_session_cookie_reads_as_anonymous() {
    let app = test_app();
    for cookie in ["user=", "user=not-base64!!", "user=e30"] {
        let response = get(&app, "/dashboard", Some(cookie)).await;
        assert_eq!(redirect_target(&response), "/login", "{cookie}");
        let response = get(&app, "/login", Some(cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{cookie}");
    }
}

#[tokio::test]
async fn member_pages_render_when_signed_in() {
    let app = test_app();
    let cookie = member_cookie();
    for path in ["/dashboard", "/create"] {
        let response = get(&app, path, Some(&cookie)).await;
        assert_eq!(response.status(), StatusCode::OK, "{path}");
    }
}
