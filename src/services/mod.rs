//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the session, routing, listing, drafting, and chat
//! logic so route handlers can stay focused on form decoding, cookies, and
//! rendering.

pub mod auth;
pub mod chat;
pub mod draft;
pub mod guard;
pub mod housekeeping;
pub mod latency;
pub mod listing;
pub mod mock;
pub mod session;
