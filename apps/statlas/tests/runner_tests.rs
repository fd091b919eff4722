//! Integration tests for the run driver.
//!
//! Uses tokio's paused clock so simulated pacing runs in virtual time;
//! timing assertions hold exactly instead of racing the wall clock.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use statlas::runner::{ProgressEvent, RunDriver};
use statlas_core::{
    ProgressMode, REPORT_STAGE_LABELS, RunId, StagePlan, StatlasError, report_stage_plan,
    upload_stage_plan,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Drain an event stream to its end.
///
/// The built-in plans emit fewer events than the channel buffers, so the
/// driver finishes without a concurrent reader and this can run after join.
async fn collect_events(mut rx: mpsc::Receiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

/// Percent values in emission order.
fn progress_percents(events: &[ProgressEvent]) -> Vec<u8> {
    events
        .iter()
        .filter_map(|event| match event {
            ProgressEvent::Progress { percent } => Some(*percent),
            _ => None,
        })
        .collect()
}

// =============================================================================
// EVENT ORDER TESTS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_upload_run_emits_events_in_order() {
    let mut driver = RunDriver::new();
    let (handle, rx) = driver
        .start(upload_stage_plan(), Duration::from_millis(100))
        .unwrap();

    let run = handle.join().await.unwrap();
    assert!(run.is_complete());
    assert_eq!(run.percent(), 100);

    let events = collect_events(rx).await;
    assert!(matches!(
        events.first(),
        Some(ProgressEvent::Started { stage_count: 1, .. })
    ));
    assert!(matches!(
        events.get(1),
        Some(ProgressEvent::StageStarted { index: 0, .. })
    ));
    assert!(matches!(events.last(), Some(ProgressEvent::Completed { .. })));

    let percents = progress_percents(&events);
    assert_eq!(percents, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);

    // The single ramp stage is announced exactly once.
    let stage_announcements = events
        .iter()
        .filter(|event| matches!(event, ProgressEvent::StageStarted { .. }))
        .count();
    assert_eq!(stage_announcements, 1);
}

#[tokio::test(start_paused = true)]
async fn test_start_and_completion_carry_the_same_run_id() {
    let mut driver = RunDriver::new();
    let (handle, rx) = driver
        .start(upload_stage_plan(), Duration::from_millis(100))
        .unwrap();
    let expected = handle.run_id();

    handle.join().await.unwrap();
    let events = collect_events(rx).await;

    let started = events.iter().find_map(|event| match event {
        ProgressEvent::Started { run_id, .. } => Some(*run_id),
        _ => None,
    });
    let completed = events.iter().find_map(|event| match event {
        ProgressEvent::Completed { run_id } => Some(*run_id),
        _ => None,
    });
    assert_eq!(started, Some(expected));
    assert_eq!(completed, Some(expected));
}

#[tokio::test(start_paused = true)]
async fn test_report_run_walks_stages_in_declared_order() {
    let mut driver = RunDriver::new();
    let (handle, rx) = driver
        .start(report_stage_plan(), Duration::from_millis(1500))
        .unwrap();

    let run = handle.join().await.unwrap();
    assert_eq!(run.completed_stages(), 6);

    let events = collect_events(rx).await;
    let labels: Vec<&str> = events
        .iter()
        .filter_map(|event| match event {
            ProgressEvent::StageStarted { label, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, REPORT_STAGE_LABELS);

    let percents = progress_percents(&events);
    assert_eq!(percents, vec![16, 33, 50, 66, 83, 100]);
}

#[tokio::test(start_paused = true)]
async fn test_progress_is_monotone_and_capped() {
    // An uneven step exercises the cap: 30, 60, 90, then 100.
    let plan = StagePlan::single("Working", ProgressMode::PercentRamp { step: 30 });
    let mut driver = RunDriver::new();
    let (handle, rx) = driver.start(plan, Duration::from_millis(50)).unwrap();

    handle.join().await.unwrap();
    let percents = progress_percents(&collect_events(rx).await);

    assert!(!percents.is_empty());
    for pair in percents.windows(2) {
        assert!(pair[1] >= pair[0], "percent went backwards: {:?}", percents);
    }
    assert!(percents.iter().all(|p| *p <= 100));
    assert_eq!(percents.last(), Some(&100));
}

// =============================================================================
// TIMING TESTS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_total_time_is_at_least_ticks_times_interval() {
    let interval = Duration::from_millis(1500);
    let plan = report_stage_plan();
    let ticks = u32::try_from(plan.ticks_to_complete()).unwrap();

    let mut driver = RunDriver::new();
    let start = Instant::now();
    let (handle, _rx) = driver.start(plan, interval).unwrap();
    let run = handle.join().await.unwrap();

    assert!(run.is_complete());
    let elapsed = start.elapsed();
    assert!(
        elapsed >= interval * ticks,
        "run of {} ticks at {:?} finished in {:?}",
        ticks,
        interval,
        elapsed
    );
}

#[tokio::test(start_paused = true)]
async fn test_upload_paces_one_tick_per_interval() {
    let interval = Duration::from_millis(100);
    let plan = upload_stage_plan();
    let ticks = u32::try_from(plan.ticks_to_complete()).unwrap();
    assert_eq!(ticks, 10);

    let mut driver = RunDriver::new();
    let start = Instant::now();
    let (handle, _rx) = driver.start(plan, interval).unwrap();
    handle.join().await.unwrap();

    assert!(start.elapsed() >= interval * ticks);
}

// =============================================================================
// DRIVER GUARD TESTS
// =============================================================================

#[tokio::test]
async fn test_second_start_while_pacing_is_refused() {
    let mut driver = RunDriver::new();
    // A tick this long cannot elapse during the test.
    let (_handle, _rx) = driver
        .start(upload_stage_plan(), Duration::from_secs(60))
        .unwrap();
    assert!(driver.is_busy());

    let err = driver
        .start(upload_stage_plan(), Duration::from_secs(60))
        .unwrap_err();
    assert!(matches!(err, StatlasError::RunInFlight));
}

#[tokio::test(start_paused = true)]
async fn test_driver_is_reusable_after_a_run_finishes() {
    let mut driver = RunDriver::new();

    let (first, rx) = driver
        .start(upload_stage_plan(), Duration::from_millis(100))
        .unwrap();
    let first_id = first.run_id();
    drop(rx);

    let run = first.join().await.unwrap();
    assert!(run.is_complete());
    assert!(!driver.is_busy());

    let (second, _rx) = driver
        .start(upload_stage_plan(), Duration::from_millis(100))
        .unwrap();
    assert_eq!(first_id, RunId(1));
    assert_eq!(second.run_id(), RunId(2));
}

#[tokio::test]
async fn test_dropping_the_handle_aborts_the_run() {
    let mut driver = RunDriver::new();
    let (handle, mut rx) = driver
        .start(upload_stage_plan(), Duration::from_secs(60))
        .unwrap();

    // Wait until the run is accepted, then abandon it.
    let first = rx.recv().await.unwrap();
    assert!(matches!(first, ProgressEvent::Started { .. }));
    drop(handle);

    // The stream ends without a completion event.
    let mut saw_completed = false;
    while let Some(event) = rx.recv().await {
        saw_completed |= matches!(event, ProgressEvent::Completed { .. });
    }
    assert!(!saw_completed, "aborted run must not announce completion");
}

#[tokio::test(start_paused = true)]
async fn test_dropped_receiver_does_not_stop_the_run() {
    let mut driver = RunDriver::new();
    let (handle, rx) = driver
        .start(upload_stage_plan(), Duration::from_millis(100))
        .unwrap();
    drop(rx);

    // Sends are fire-and-forget; the run still paces to terminal state.
    let run = handle.join().await.unwrap();
    assert!(run.is_complete());
    assert_eq!(run.percent(), 100);
}
