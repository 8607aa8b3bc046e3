use std::sync::atomic::AtomicUsize;

use super::*;

// =============================================================================
// SimulatedLatency
// =============================================================================

#[tokio::test(start_paused = true)]
async fn wait_sleeps_for_the_configured_delay() {
    let latency = SimulatedLatency::new(Duration::from_millis(1500));
    let start = tokio::time::Instant::now();
    latency.wait().await;
    assert!(start.elapsed() >= Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn zero_delay_returns_immediately() {
    let start = tokio::time::Instant::now();
    SimulatedLatency::default().wait().await;
    assert_eq!(start.elapsed(), Duration::ZERO);
}

// =============================================================================
// PendingGate
// =============================================================================

#[test]
fn gate_rejects_second_claim_until_released() {
    let gate = PendingGate::new();
    let first = gate.try_begin();
    assert!(first.is_some());
    assert!(gate.is_pending());
    assert!(gate.try_begin().is_none());

    drop(first);
    assert!(!gate.is_pending());
    assert!(gate.try_begin().is_some());
}

#[test]
fn gate_clones_share_state() {
    let gate = PendingGate::new();
    let other = gate.clone();
    let _guard = gate.try_begin().unwrap();
    assert!(other.is_pending());
    assert!(other.try_begin().is_none());
}

// =============================================================================
// PendingTask
// =============================================================================

#[tokio::test(start_paused = true)]
async fn task_applies_effect_after_delay() {
    let hits = Arc::new(AtomicUsize::new(0));
    let task_hits = Arc::clone(&hits);
    let latency = SimulatedLatency::new(Duration::from_millis(1000));
    let task = PendingTask::spawn(async move {
        latency.wait().await;
        task_hits.fetch_add(1, Ordering::SeqCst);
    });

    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert!(task.is_finished());
}

#[tokio::test(start_paused = true)]
async fn dropped_task_still_completes() {
    let hits = Arc::new(AtomicUsize::new(0));
    let task_hits = Arc::clone(&hits);
    drop(PendingTask::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        task_hits.fetch_add(1, Ordering::SeqCst);
    }));

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn aborted_task_never_applies_effect() {
    let hits = Arc::new(AtomicUsize::new(0));
    let task_hits = Arc::clone(&hits);
    let task = PendingTask::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        task_hits.fetch_add(1, Ordering::SeqCst);
    });
    task.abort();

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}
