//! Login and registration forms.

use super::{Notice, Page, html_escape, layout};

/// Render the login page. `email` refills the field after a failed attempt.
pub fn login_page(email: &str, notice: Option<&Notice>) -> String {
    let email = html_escape(email);
    let body = format!(
        r#"<h1>Log in</h1>
        <p class="muted">Welcome back. Any email and password will do.</p>
        <form method="POST" action="/login">
            <div class="form-group">
                <label for="email">Email</label>
                <input type="email" id="email" name="email" value="{email}" autofocus>
            </div>
            <div class="form-group">
                <label for="password">Password</label>
                <input type="password" id="password" name="password">
            </div>
            <button type="submit">Log in</button>
        </form>
        <p>Don't have an account? <a href="/register">Register here</a></p>"#
    );
    layout(&Page::new("Log in", None).notice(notice), &body)
}

/// Render the registration page.
pub fn register_page(name: &str, email: &str, notice: Option<&Notice>) -> String {
    let name = html_escape(name);
    let email = html_escape(email);
    let body = format!(
        r#"<h1>Create an account</h1>
        <form method="POST" action="/register">
            <div class="form-group">
                <label for="name">Name</label>
                <input type="text" id="name" name="name" value="{name}" autofocus>
            </div>
            <div class="form-group">
                <label for="email">Email</label>
                <input type="email" id="email" name="email" value="{email}">
            </div>
            <div class="form-group">
                <label for="password">Password</label>
                <input type="password" id="password" name="password">
            </div>
            <div class="form-group">
                <label for="confirm_password">Confirm password</label>
                <input type="password" id="confirm_password" name="confirm_password">
            </div>
            <button type="submit">Register</button>
        </form>
        <p>Already registered? <a href="/login">Log in</a></p>"#
    );
    layout(&Page::new("Register", None).notice(notice), &body)
}
