//! Dashboard: stats, search box, and assistant cards.

use super::{Notice, Page, html_escape, layout};
use crate::services::listing::DashboardStats;
use crate::services::session::User;
use crate::state::{Assistant, AssistantStatus};

pub struct DashboardView<'a> {
    pub user: &'a User,
    pub stats: DashboardStats,
    pub query: &'a str,
    pub results: &'a [&'a Assistant],
    pub notice: Option<&'a Notice>,
}

pub fn dashboard_page(view: &DashboardView<'_>) -> String {
    let DashboardStats { total, published, total_views } = view.stats;
    let query = html_escape(view.query);
    let cards = if view.results.is_empty() {
        empty_state(view.query)
    } else {
        let cards: String = view.results.iter().map(|a| assistant_card(a)).collect();
        format!(r#"<div class="grid">{cards}</div>"#)
    };

    let body = format!(
        r#"<h1>My assistants</h1>
        <div class="stats">
            <div class="stat"><span class="muted">Total assistants</span><strong>{total}</strong></div>
            <div class="stat"><span class="muted">Published</span><strong>{published}</strong></div>
            <div class="stat"><span class="muted">Total views</span><strong>{total_views}</strong></div>
        </div>
        <form method="GET" action="/dashboard" style="display: flex; gap: 8px;">
            <input type="search" name="q" value="{query}" placeholder="Search assistants...">
            <button type="submit">Search</button>
            <a class="button secondary" href="/create">New assistant</a>
        </form>
        {cards}"#
    );
    layout(&Page::new("Dashboard", Some(view.user)).notice(view.notice), &body)
}

fn empty_state(query: &str) -> String {
    if query.trim().is_empty() {
        r#"<div style="text-align: center; padding: 40px 0;">
            <h3>No assistants</h3>
            <p class="muted">Start by creating your first assistant.</p>
            <a class="button" href="/create">New assistant</a>
        </div>"#
            .to_owned()
    } else {
        r#"<div style="text-align: center; padding: 40px 0;">
            <h3>No assistants</h3>
            <p class="muted">No results found.</p>
        </div>"#
            .to_owned()
    }
}

fn assistant_card(assistant: &Assistant) -> String {
    let badge_class = match assistant.status {
        AssistantStatus::Published => "badge published",
        AssistantStatus::Draft => "badge",
    };
    let id = urlencoding::encode(&assistant.id);
    format!(
        r#"<div class="card">
            <span class="{badge_class}">{status}</span>
            <h3>{name}</h3>
            <p class="muted">{description}</p>
            <p class="muted">{views} views · created {created_at}</p>
            <p>Link: <span class="code">{url}</span></p>
            <a class="button secondary" href="/assistant/{id}">Open</a>
            <form method="POST" action="/dashboard/assistants/{id}/delete" style="display: inline;">
                <button type="submit" class="danger">Delete</button>
            </form>
        </div>"#,
        status = assistant.status.label(),
        name = html_escape(&assistant.name),
        description = html_escape(&assistant.description),
        views = assistant.views,
        created_at = html_escape(&assistant.created_at),
        url = html_escape(&assistant.url),
    )
}
