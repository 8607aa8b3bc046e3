//! Application configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every knob has a default so the server starts with no environment at all.
//! Parsing goes through a lookup closure so tests can feed a map instead of
//! mutating the process environment.

use std::num::NonZeroU64;
use std::time::Duration;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_DELAY_MS: u64 = 1000;
pub const DEFAULT_DRAFT_DELAY_MS: u64 = 1000;
pub const DEFAULT_PUBLISH_DELAY_MS: u64 = 1500;
pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;
pub const DEFAULT_CHAT_SESSION_TTL_SECS: u64 = 1800;
pub const DEFAULT_CHAT_SWEEP_INTERVAL_SECS: u64 = 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PUBLIC_ORIGIN '{0}': expected an http:// or https:// URL")]
    InvalidOrigin(String),
}

/// Fixed delays standing in for backend round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub auth: Duration,
    pub draft: Duration,
    pub publish: Duration,
    pub reply: Duration,
}

impl Delays {
    /// All delays zero. Used by tests that do not care about latency.
    #[cfg(test)]
    #[must_use]
    pub fn none() -> Self {
        Self { auth: Duration::ZERO, draft: Duration::ZERO, publish: Duration::ZERO, reply: Duration::ZERO }
    }
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            auth: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            draft: Duration::from_millis(DEFAULT_DRAFT_DELAY_MS),
            publish: Duration::from_millis(DEFAULT_PUBLISH_DELAY_MS),
            reply: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Origin used to build shareable assistant links (no trailing slash).
    pub public_origin: String,
    pub cookie_secure: bool,
    pub delays: Delays,
    /// Append published assistants to the publisher's dashboard list.
    pub publish_to_dashboard: bool,
    pub chat_session_ttl: Duration,
    pub chat_sweep_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            port: DEFAULT_PORT,
            public_origin: format!("http://localhost:{DEFAULT_PORT}"),
            cookie_secure: false,
            delays: Delays::default(),
            publish_to_dashboard: false,
            chat_session_ttl: Duration::from_secs(DEFAULT_CHAT_SESSION_TTL_SECS),
            chat_sweep_interval: Duration::from_secs(DEFAULT_CHAT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `BIND_ADDR`: default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `PUBLIC_ORIGIN`: default `http://localhost:{PORT}`
    /// - `COOKIE_SECURE`: `1/true/yes/on` or `0/false/no/off`, default false
    /// - `AUTH_DELAY_MS`, `DRAFT_DELAY_MS`, `PUBLISH_DELAY_MS`, `REPLY_DELAY_MS`
    /// - `PUBLISH_TO_DASHBOARD`: default false
    /// - `CHAT_SESSION_TTL_SECS`: default 1800
    /// - `CHAT_SWEEP_INTERVAL_SECS`: default 60, must be non-zero
    ///
    /// # Errors
    ///
    /// Returns an error if `PUBLIC_ORIGIN` is set but is not an http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build typed config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `PUBLIC_ORIGIN` is set but is not an http(s) URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let public_origin = match lookup("PUBLIC_ORIGIN") {
            Some(raw) => normalize_origin(&raw)?,
            None => format!("http://localhost:{port}"),
        };
        let ms = |key: &str, default: u64| Duration::from_millis(parse_or(&lookup, key, default));
        let secs = |key: &str, default: u64| Duration::from_secs(parse_or(&lookup, key, default));

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned()),
            port,
            public_origin,
            cookie_secure: lookup("COOKIE_SECURE")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(false),
            delays: Delays {
                auth: ms("AUTH_DELAY_MS", DEFAULT_AUTH_DELAY_MS),
                draft: ms("DRAFT_DELAY_MS", DEFAULT_DRAFT_DELAY_MS),
                publish: ms("PUBLISH_DELAY_MS", DEFAULT_PUBLISH_DELAY_MS),
                reply: ms("REPLY_DELAY_MS", DEFAULT_REPLY_DELAY_MS),
            },
            publish_to_dashboard: lookup("PUBLISH_TO_DASHBOARD")
                .as_deref()
                .and_then(parse_bool)
                .unwrap_or(false),
            chat_session_ttl: secs("CHAT_SESSION_TTL_SECS", DEFAULT_CHAT_SESSION_TTL_SECS),
            chat_sweep_interval: Duration::from_secs(
                parse_nonzero(&lookup, "CHAT_SWEEP_INTERVAL_SECS")
                    .map_or(DEFAULT_CHAT_SWEEP_INTERVAL_SECS, NonZeroU64::get),
            ),
        })
    }

    /// Config with zero latency everywhere.
    #[cfg(test)]
    #[must_use]
    pub fn instant() -> Self {
        Self { delays: Delays::none(), ..Self::default() }
    }

    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Parse a loose boolean flag. Unknown values yield `None`.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// `tokio::time::interval` panics on a zero period.
fn parse_nonzero<F>(lookup: &F, key: &str) -> Option<NonZeroU64>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"));
    match host {
        Some(h) if !h.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidOrigin(raw.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
