//! Mock login and registration. Any non-blank credentials are accepted.

use uuid::Uuid;

use super::session::User;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("please enter your email and password")]
    MissingCredentials,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Part of `email` before the first `@` (the whole string when there is none).
#[must_use]
pub fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Synthesize a user for any non-blank email and password.
pub fn login(email: &str, password: &str) -> Result<User, AuthError> {
    if is_blank(email) || is_blank(password) {
        return Err(AuthError::MissingCredentials);
    }
    Ok(synthesize_user(email, None))
}

/// Registration form fields.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Like `login`, plus a password confirmation. A blank name falls back to the
/// email local part.
pub fn register(form: &Registration) -> Result<User, AuthError> {
    if is_blank(&form.email) || is_blank(&form.password) {
        return Err(AuthError::MissingCredentials);
    }
    if form.password != form.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }
    let name = form.name.trim();
    Ok(synthesize_user(&form.email, (!name.is_empty()).then_some(name)))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn synthesize_user(email: &str, name: Option<&str>) -> User {
    User {
        id: Uuid::new_v4().to_string(),
        email: email.to_owned(),
        name: name.unwrap_or_else(|| email_local_part(email)).to_owned(),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
