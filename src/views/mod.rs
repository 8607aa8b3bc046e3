//! HTML rendering.
//!
//! Simple inline templates without a template engine. Every page goes
//! through `layout`, which supplies the shared styles, the navigation bar,
//! an optional notice banner, and an optional meta refresh.

pub mod assistant;
pub mod auth;
pub mod create;
pub mod dashboard;
pub mod landing;

use crate::services::session::User;

const COMMON_STYLES: &str = r#"
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
        max-width: 1000px;
        margin: 0 auto;
        padding: 0 20px 40px;
        background: #f5f5f5;
        color: #222;
    }
    nav {
        display: flex;
        align-items: center;
        gap: 16px;
        padding: 16px 0;
    }
    nav .brand {
        font-weight: bold;
        font-size: 18px;
        margin-right: auto;
        color: #111;
        text-decoration: none;
    }
    nav form { margin: 0; }
    .container {
        background: white;
        padding: 30px;
        border-radius: 8px;
        box-shadow: 0 2px 4px rgba(0,0,0,0.1);
    }
    h1 { color: #111; margin-top: 0; }
    h2 { color: #444; margin-top: 30px; }
    .muted { color: #777; }
    .form-group { margin: 15px 0; }
    label { display: block; font-weight: bold; margin-bottom: 5px; }
    input[type="text"], input[type="email"], input[type="password"], input[type="number"],
    input[type="search"], select, textarea {
        width: 100%;
        padding: 10px;
        border: 1px solid #ddd;
        border-radius: 4px;
        font-size: 14px;
        box-sizing: border-box;
    }
    textarea { resize: vertical; }
    button, .button {
        background: #111;
        color: white;
        padding: 10px 20px;
        border: none;
        border-radius: 4px;
        cursor: pointer;
        font-size: 14px;
        font-weight: bold;
        text-decoration: none;
        display: inline-block;
    }
    button.secondary, .button.secondary { background: #888; }
    button.danger { background: #c0392b; }
    .notice { padding: 10px; border-radius: 4px; margin: 10px 0; }
    .notice.error { color: #a94442; background: #f2dede; }
    .notice.success { color: #3c763d; background: #dff0d8; }
    .notice.info { color: #31708f; background: #d9edf7; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 16px; }
    .card { border: 1px solid #eee; border-radius: 8px; padding: 16px; }
    .stats { display: flex; gap: 16px; margin: 20px 0; }
    .stat { flex: 1; background: #fafafa; border-radius: 8px; padding: 16px; }
    .stat strong { display: block; font-size: 24px; }
    .badge { font-size: 12px; padding: 2px 8px; border-radius: 10px; background: #eee; }
    .badge.published { background: #dff0d8; color: #3c763d; }
    .tabs { display: flex; gap: 8px; margin-bottom: 20px; }
    .tabs button.active { background: #111; }
    .tabs button { background: #bbb; }
    .code { font-family: monospace; background: #f5f5f5; padding: 2px 6px; border-radius: 3px; font-size: 13px; }
    .chat { display: flex; flex-direction: column; gap: 10px; margin: 20px 0; }
    .bubble { max-width: 75%; padding: 10px 14px; border-radius: 14px; }
    .bubble.user { align-self: flex-end; background: #111; color: white; }
    .bubble.assistant { align-self: flex-start; background: #eee; }
    .typing { color: #999; font-style: italic; }
"#;

/// Severity of a notice banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Success,
    Info,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

/// Transient message shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Success, text: text.into() }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }
}

/// Page chrome shared by every view.
pub struct Page<'a> {
    pub title: &'a str,
    pub user: Option<&'a User>,
    pub notice: Option<&'a Notice>,
    /// Reload the page after this many seconds.
    pub refresh_secs: Option<u32>,
}

impl<'a> Page<'a> {
    #[must_use]
    pub fn new(title: &'a str, user: Option<&'a User>) -> Self {
        Self { title, user, notice: None, refresh_secs: None }
    }

    #[must_use]
    pub fn notice(mut self, notice: Option<&'a Notice>) -> Self {
        self.notice = notice;
        self
    }

    #[must_use]
    pub fn refresh(mut self, secs: Option<u32>) -> Self {
        self.refresh_secs = secs;
        self
    }
}

pub fn layout(page: &Page<'_>, body: &str) -> String {
    let title = html_escape(page.title);
    let refresh = page
        .refresh_secs
        .map_or(String::new(), |s| format!(r#"<meta http-equiv="refresh" content="{s}">"#));
    let nav = nav_html(page.user);
    let notice = page.notice.map_or(String::new(), notice_html);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    {refresh}
    <title>{title} · Assistant Studio</title>
    <style>{COMMON_STYLES}</style>
</head>
<body>
    {nav}
    <main class="container">
        {notice}
        {body}
    </main>
</body>
</html>"#
    )
}

fn nav_html(user: Option<&User>) -> String {
    let links = match user {
        Some(user) => format!(
            r#"<a href="/dashboard">Dashboard</a>
        <a href="/create">New assistant</a>
        <span class="muted">{}</span>
        <form method="POST" action="/logout"><button type="submit" class="secondary">Log out</button></form>"#,
            html_escape(&user.name)
        ),
        None => r#"<a href="/login">Log in</a>
        <a class="button" href="/register">Get started</a>"#
            .to_owned(),
    };
    format!(
        r#"<nav>
        <a class="brand" href="/">Assistant Studio</a>
        {links}
    </nav>"#
    )
}

fn notice_html(notice: &Notice) -> String {
    format!(
        r#"<div class="notice {}" role="status">{}</div>"#,
        notice.kind.class(),
        html_escape(&notice.text)
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
