//! Background tasks: idle chat sweeping and session event logging.
//!
//! DESIGN
//! ======
//! The sweeper wakes every `chat_sweep_interval`, evicts chat sessions idle
//! for longer than `chat_session_ttl`, and aborts their pending replies.
//! The session logger drains the session broadcast channel and writes one
//! log line per sign-in or sign-out. Both run until the runtime shuts down.

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::session::SessionEvent;
use crate::state::AppState;

/// Spawn the idle chat sweeper. Returns a handle for shutdown.
pub fn spawn_chat_sweeper(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let ttl = state.config.chat_session_ttl;
        let mut interval = tokio::time::interval(state.config.chat_sweep_interval);
        loop {
            interval.tick().await;
            let evicted = state.chats.sweep_idle(ttl).await;
            if evicted > 0 {
                let remaining = state.chats.session_count().await;
                debug!(evicted, remaining, "swept idle chat sessions");
            }
        }
    })
}

/// Spawn the session event logger. Ends when every sender is dropped.
pub fn spawn_session_logger(mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(SessionEvent::SignedIn(user)) => {
                    info!(user_id = %user.id, email = %user.email, "user signed in");
                }
                Ok(SessionEvent::SignedOut(Some(user))) => {
                    info!(user_id = %user.id, "user signed out");
                }
                Ok(SessionEvent::SignedOut(None)) => info!("anonymous session cleared"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "session logger lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
#[path = "housekeeping_test.rs"]
mod tests;
