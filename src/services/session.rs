//! Session store — the signed-in user persisted in browser storage.
//!
//! ARCHITECTURE
//! ============
//! The only persisted value is the current `User`, serialized to JSON,
//! base64url-encoded, and stored in the `user` cookie. Presence of a
//! decodable record is the sole authorization signal: there is no token,
//! no expiry, and no server-side validation.
//!
//! A `SessionStore` is built per request from the cookie jar. Mutations
//! rewrite the jar (returned to the browser with the response) and publish a
//! `SessionEvent` on the shared broadcast channel.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use time::Duration;
use tokio::sync::broadcast;

/// Fixed storage key holding the serialized session user.
pub const SESSION_KEY: &str = "user";

/// Client-synthesized identity. Never issued by a server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Authorization state derived from the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }
}

impl From<Option<User>> for AuthState {
    fn from(user: Option<User>) -> Self {
        user.map_or(Self::Anonymous, Self::Authenticated)
    }
}

/// Change notification published on every session mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(User),
    SignedOut(Option<User>),
}

// =============================================================================
// ENCODING
// =============================================================================

#[must_use]
pub fn encode_user(user: &User) -> String {
    // Serializing a struct of strings cannot fail.
    let json = serde_json::to_vec(user).unwrap_or_default();
    Base64UrlUnpadded::encode_string(&json)
}

/// Decode a stored user. Any malformed content reads as "no user".
#[must_use]
pub fn decode_user(raw: &str) -> Option<User> {
    if raw.is_empty() {
        return None;
    }
    let bytes = Base64UrlUnpadded::decode_vec(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

// =============================================================================
// STORE
// =============================================================================

pub struct SessionStore {
    jar: CookieJar,
    secure: bool,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    #[must_use]
    pub fn new(jar: CookieJar, secure: bool, events: broadcast::Sender<SessionEvent>) -> Self {
        Self { jar, secure, events }
    }

    /// Current session user, if the stored record decodes.
    #[must_use]
    pub fn get_user(&self) -> Option<User> {
        self.jar
            .get(SESSION_KEY)
            .and_then(|cookie| decode_user(cookie.value()))
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.get_user().into()
    }

    /// Persist `user` as the session user and notify subscribers.
    pub fn set_user(&mut self, user: User) {
        let cookie = Cookie::build((SESSION_KEY, encode_user(&user)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        self.jar = self.jar.clone().add(cookie);
        tracing::debug!(user_id = %user.id, "session user stored");
        let _ = self.events.send(SessionEvent::SignedIn(user));
    }

    /// Remove the session user and notify subscribers.
    pub fn clear_user(&mut self) {
        let previous = self.get_user();
        let cookie = Cookie::build((SESSION_KEY, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(Duration::ZERO);
        self.jar = self.jar.clone().add(cookie);
        let _ = self.events.send(SessionEvent::SignedOut(previous));
    }

    /// Hand the (possibly rewritten) jar back for the response.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
