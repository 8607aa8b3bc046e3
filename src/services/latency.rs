//! Simulated latency primitives.
//!
//! DESIGN
//! ======
//! Mock operations pretend to be network round-trips. `SimulatedLatency` is
//! the fixed delay, `PendingTask` is a spawned round-trip whose completion
//! effect runs after the delay (and can be aborted), and `PendingGate` is the
//! flag that rejects overlapping operations while one is in flight.
//!
//! A `PendingTask` is not aborted on drop: a pending effect always lands
//! unless someone calls [`PendingTask::abort`] explicitly.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

// =============================================================================
// SIMULATED LATENCY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimulatedLatency {
    delay: Duration,
}

impl SimulatedLatency {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Sleep for the configured delay. Zero delays return immediately.
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

// =============================================================================
// PENDING TASK
// =============================================================================

/// A spawned fake round-trip.
pub struct PendingTask {
    handle: JoinHandle<()>,
}

impl PendingTask {
    /// Spawn `work` on the runtime. Its effect applies when it completes.
    pub fn spawn<F>(work: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self { handle: tokio::spawn(work) }
    }

    /// Cancel the round-trip. Its completion effect will not run.
    pub fn abort(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl std::fmt::Debug for PendingTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTask")
            .field("finished", &self.is_finished())
            .finish()
    }
}

// =============================================================================
// PENDING GATE
// =============================================================================

/// Single-flight flag. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct PendingGate {
    busy: Arc<AtomicBool>,
}

impl PendingGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `None` while another claim is outstanding.
    #[must_use]
    pub fn try_begin(&self) -> Option<PendingGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingGuard { busy: Arc::clone(&self.busy) })
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases its gate when dropped.
#[derive(Debug)]
pub struct PendingGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
#[path = "latency_test.rs"]
mod tests;
