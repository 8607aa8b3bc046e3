//! Public assistant viewer: header, transcript, and message box.

use super::{Notice, Page, html_escape, layout};
use crate::services::chat::{ChatMessage, ChatSnapshot, Sender};
use crate::services::session::User;

/// Seconds between reloads while a reply is pending.
const PENDING_REFRESH_SECS: u32 = 1;

pub fn chat_page(user: Option<&User>, chat: &ChatSnapshot, notice: Option<&Notice>) -> String {
    let assistant = &chat.assistant;
    let color = html_escape(&assistant.primary_color);
    let messages: String = chat.messages.iter().map(|m| message_html(m, &color)).collect();
    let typing = if chat.pending {
        r#"<div class="bubble assistant typing">Typing...</div>"#
    } else {
        ""
    };
    let disabled = if chat.pending { " disabled" } else { "" };

    let body = format!(
        r#"<div style="display: flex; align-items: center; gap: 12px;">
            <div style="width: 48px; height: 48px; border-radius: 50%; background: {color};"></div>
            <div>
                <h1 style="margin: 0;">{name}</h1>
                <p class="muted" style="margin: 0;">{description}</p>
            </div>
        </div>
        <div class="chat">{messages}{typing}</div>
        <form method="POST" action="/assistant/{id}/chat/{session}" style="display: flex; gap: 8px;">
            <input type="text" name="message" placeholder="Type your message..." autofocus{disabled}>
            <button type="submit"{disabled}>Send</button>
        </form>"#,
        name = html_escape(&assistant.name),
        description = html_escape(&assistant.description),
        id = urlencoding::encode(&assistant.id),
        session = chat.id,
    );
    let refresh = chat.pending.then_some(PENDING_REFRESH_SECS);
    layout(&Page::new(&assistant.name, user).notice(notice).refresh(refresh), &body)
}

fn message_html(message: &ChatMessage, color: &str) -> String {
    let (class, style) = match message.sender {
        Sender::User => ("user", format!(r#" style="background: {color};""#)),
        Sender::Assistant => ("assistant", String::new()),
    };
    format!(
        r#"<div class="bubble {class}"{style}>{content}<div class="muted" style="font-size: 11px;">{time}</div></div>"#,
        content = html_escape(&message.content),
        time = clock_time(message.timestamp),
    )
}

/// `HH:MM` (UTC) for a millisecond timestamp.
fn clock_time(millis: i64) -> String {
    time::OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .map(|t| format!("{:02}:{:02}", t.hour(), t.minute()))
        .unwrap_or_default()
}
