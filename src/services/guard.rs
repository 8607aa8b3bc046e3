//! Route table and authorization gate.
//!
//! Every page path maps to a `Route`, each route has one `Access` class, and
//! `evaluate` decides from the current `AuthState` whether the page renders
//! or the browser is sent elsewhere. The decision is recomputed on every
//! request; nothing is cached between navigations.

use super::session::AuthState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Create,
    Assistant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Always renders.
    Public,
    /// Signed-in users are sent to the dashboard.
    GuestOnly,
    /// Anonymous visitors are sent to the login page.
    MemberOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

impl Route {
    /// Map a request path to its page. Sub-paths belong to their page, so
    /// `/create/publish` is `Create` and `/assistant/a1/chat/..` is
    /// `Assistant("a1")`. Paths outside the page table return `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let Some(first) = segments.next() else {
            return Some(Self::Landing);
        };
        match first {
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            "dashboard" => Some(Self::Dashboard),
            "create" => Some(Self::Create),
            "assistant" => segments.next().map(|id| Self::Assistant(id.to_owned())),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Landing => "/".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
            Self::Create => "/create".to_owned(),
            Self::Assistant(id) => format!("/assistant/{id}"),
        }
    }

    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Self::Landing | Self::Assistant(_) => Access::Public,
            Self::Login | Self::Register => Access::GuestOnly,
            Self::Dashboard | Self::Create => Access::MemberOnly,
        }
    }
}

/// Decide whether `route` renders for the given authorization state.
#[must_use]
pub fn evaluate(route: &Route, auth: &AuthState) -> GuardDecision {
    match (route.access(), auth) {
        (Access::Public, _)
        | (Access::GuestOnly, AuthState::Anonymous)
        | (Access::MemberOnly, AuthState::Authenticated(_)) => GuardDecision::Render,
        (Access::GuestOnly, AuthState::Authenticated(_)) => GuardDecision::Redirect(Route::Dashboard),
        (Access::MemberOnly, AuthState::Anonymous) => GuardDecision::Redirect(Route::Login),
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
