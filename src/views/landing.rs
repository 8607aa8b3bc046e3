//! Marketing landing page.

use super::{Page, layout};
use crate::services::session::User;

const FEATURES: [(&str, &str); 6] = [
    ("Easy, flexible creation", "Build an assistant in minutes with a guided three-step form."),
    ("Unique shareable links", "Every assistant gets its own public link you can send to anyone."),
    ("Advanced security", "Your assistants and conversations stay under your control."),
    ("High performance", "Fast replies for every visitor, at any hour."),
    ("Full management", "Search, review, and remove assistants from one dashboard."),
    ("Multilingual", "Reply in Arabic, English, or French with the tone you choose."),
];

pub fn landing_page(user: Option<&User>) -> String {
    let cta = if user.is_some() {
        r#"<a class="button" href="/dashboard">Go to dashboard</a>"#
    } else {
        r#"<a class="button" href="/register">Create your assistant</a>
            <a class="button secondary" href="/login">Log in</a>"#
    };
    let features: String = FEATURES
        .iter()
        .map(|(title, text)| format!(r#"<div class="card"><h3>{title}</h3><p class="muted">{text}</p></div>"#))
        .collect();

    let body = format!(
        r#"<section style="text-align: center; padding: 40px 0;">
            <p class="badge">An advanced platform for building smart assistants</p>
            <h1>Build your own AI assistant, simply and safely</h1>
            <p class="muted">Create, customize, and share assistants that answer your customers around the clock.</p>
            <p>{cta}</p>
        </section>
        <h2>Powerful features</h2>
        <p class="muted">Everything you need to build and manage professional assistants.</p>
        <div class="grid">{features}</div>"#
    );
    layout(&Page::new("Home", user), &body)
}
