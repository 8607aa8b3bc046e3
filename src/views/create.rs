//! Multi-tab assistant creation form.
//!
//! The whole page is one `<form>`. It carries the fields of the visible tab
//! plus a hidden `tab` input; tab buttons, "save draft", and "publish" all
//! submit it to different actions, so edits on the visible tab are applied
//! before switching or saving.

use super::{Notice, Page, html_escape, layout};
use crate::services::draft::{AssistantFormData, FormTab, LANGUAGES, TONES};
use crate::services::session::User;

pub struct CreateView<'a> {
    pub user: &'a User,
    pub form: &'a AssistantFormData,
    pub tab: FormTab,
    pub notice: Option<&'a Notice>,
}

pub fn create_page(view: &CreateView<'_>) -> String {
    let tabs: String = FormTab::ALL
        .iter()
        .map(|t| {
            let class = if *t == view.tab { "active" } else { "" };
            format!(
                r#"<button type="submit" class="{class}" formaction="/create" name="goto" value="{value}">{title}</button>"#,
                value = t.as_str(),
                title = t.title(),
            )
        })
        .collect();
    let fields = match view.tab {
        FormTab::Basic => basic_fields(view.form),
        FormTab::Behavior => behavior_fields(view.form),
        FormTab::Appearance => appearance_fields(view.form),
    };

    let body = format!(
        r#"<p><a href="/dashboard">&larr; Back to dashboard</a></p>
        <h1>New assistant</h1>
        <form method="POST" action="/create">
            <input type="hidden" name="tab" value="{tab}">
            <div class="tabs">{tabs}</div>
            <h2>{title}</h2>
            {fields}
            <p style="margin-top: 30px;">
                <button type="submit" class="secondary" formaction="/create/draft">Save draft</button>
                <button type="submit" formaction="/create/publish">Publish assistant</button>
            </p>
        </form>"#,
        tab = view.tab.as_str(),
        title = view.tab.title(),
    );
    layout(&Page::new("New assistant", Some(view.user)).notice(view.notice), &body)
}

fn basic_fields(form: &AssistantFormData) -> String {
    format!(
        r#"<div class="form-group">
                <label for="name">Assistant name *</label>
                <input type="text" id="name" name="name" value="{name}" placeholder="e.g. Customer service assistant">
            </div>
            <div class="form-group">
                <label for="description">Description *</label>
                <textarea id="description" name="description" rows="4" placeholder="A short description of what the assistant does...">{description}</textarea>
            </div>
            <div class="form-group">
                <label for="language">Language</label>
                <select id="language" name="language">{languages}</select>
            </div>"#,
        name = html_escape(&form.name),
        description = html_escape(&form.description),
        languages = options(&LANGUAGES, &form.language),
    )
}

fn behavior_fields(form: &AssistantFormData) -> String {
    let checked = if form.enable_history { " checked" } else { "" };
    format!(
        r#"<div class="form-group">
                <label for="welcome_message">Welcome message</label>
                <textarea id="welcome_message" name="welcome_message" rows="3" placeholder="The message shown when a conversation starts...">{welcome}</textarea>
            </div>
            <div class="form-group">
                <label for="tone">Conversation tone</label>
                <select id="tone" name="tone">{tones}</select>
            </div>
            <div class="form-group">
                <label for="max_response_length">Maximum reply length (words)</label>
                <input type="number" id="max_response_length" name="max_response_length" value="{max}">
            </div>
            <div class="form-group">
                <input type="hidden" name="enable_history_present" value="1">
                <label><input type="checkbox" name="enable_history"{checked}> Keep conversation history</label>
            </div>"#,
        welcome = html_escape(&form.welcome_message),
        tones = options(&TONES, &form.tone),
        max = form.max_response_length,
    )
}

fn appearance_fields(form: &AssistantFormData) -> String {
    let color = html_escape(&form.primary_color);
    format!(
        r##"<div class="form-group">
                <label for="primary_color">Primary color</label>
                <input type="text" id="primary_color" name="primary_color" value="{color}" placeholder="#000000">
            </div>
            <h3>Preview</h3>
            <div class="card">
                <div class="chat">
                    <div class="bubble assistant">{welcome}</div>
                    <div class="bubble user" style="background: {color};">Hi! I need some help</div>
                </div>
            </div>"##,
        welcome = html_escape(&form.welcome_message),
    )
}

/// `<option>` list for a closed set, selecting `current`. A value outside
/// the set is kept as an extra option so it survives a round-trip.
fn options(choices: &[(&str, &str)], current: &str) -> String {
    let mut html: String = choices
        .iter()
        .map(|(value, label)| {
            let selected = if *value == current { " selected" } else { "" };
            format!(r#"<option value="{value}"{selected}>{label}</option>"#)
        })
        .collect();
    if !choices.iter().any(|(value, _)| *value == current) {
        let current = html_escape(current);
        html.push_str(&format!(r#"<option value="{current}" selected>{current}</option>"#));
    }
    html
}
