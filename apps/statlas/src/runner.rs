//! # Run Driver
//!
//! Paces a core [`SimulationRun`] on the tokio timer and streams progress
//! events to the caller.
//!
//! The core state machine only counts ticks; this module decides when a
//! tick happens. One driver allows one run in flight at a time, and a
//! second start while the first is still pacing is refused with
//! [`StatlasError::RunInFlight`]. There is no cancellation inside a run:
//! the only way to stop early is to drop the [`RunHandle`], which aborts
//! the driver task.

use statlas_core::{RunId, SimulationRun, StagePlan, StatlasError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

/// Progress events streamed while a simulated run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// The run was accepted and pacing is about to begin.
    Started { run_id: RunId, stage_count: usize },
    /// A stage began executing.
    StageStarted { index: usize, label: String },
    /// The percent moved after a tick.
    Progress { percent: u8 },
    /// The run reached terminal state. Emitted exactly once per run.
    Completed { run_id: RunId },
}

// =============================================================================
// RUN HANDLE
// =============================================================================

/// Owner of an in-flight run's driver task.
///
/// Dropping the handle aborts the task, so an abandoned run stops
/// ticking instead of pacing to completion in the background.
#[derive(Debug)]
pub struct RunHandle {
    run_id: RunId,
    task: Option<JoinHandle<SimulationRun>>,
}

impl RunHandle {
    /// Identity of the run this handle owns.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Whether the driver task has finished pacing.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Wait for the driver task and return the terminal run state.
    ///
    /// # Errors
    ///
    /// Returns `StatlasError::IoError` if the driver task panicked or was
    /// aborted.
    pub async fn join(mut self) -> Result<SimulationRun, StatlasError> {
        match self.task.take() {
            Some(task) => task
                .await
                .map_err(|e| StatlasError::IoError(format!("Run task: {}", e))),
            None => Err(StatlasError::IoError("Run already joined".to_string())),
        }
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

// =============================================================================
// RUN DRIVER
// =============================================================================

/// Starts and guards simulated runs, one at a time.
#[derive(Debug)]
pub struct RunDriver {
    last_run: RunId,
    active: Option<AbortHandle>,
}

impl Default for RunDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl RunDriver {
    /// A driver with no run in flight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_run: RunId(0),
            active: None,
        }
    }

    /// Whether a previously started run is still pacing.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Start pacing a run of `plan`, one tick every `tick_interval`.
    ///
    /// Returns the owning handle plus the event stream. Events are
    /// emitted in order: `Started`, then for each stage a `StageStarted`
    /// followed by its `Progress` ticks, then a single `Completed`.
    ///
    /// # Errors
    ///
    /// Returns `StatlasError::RunInFlight` while an earlier run from this
    /// driver is still pacing.
    pub fn start(
        &mut self,
        plan: StagePlan,
        tick_interval: Duration,
    ) -> Result<(RunHandle, mpsc::Receiver<ProgressEvent>), StatlasError> {
        if self.is_busy() {
            return Err(StatlasError::RunInFlight);
        }

        self.last_run = self.last_run.next();
        let run_id = self.last_run;

        let (tx, rx) = mpsc::channel::<ProgressEvent>(64);
        let task = tokio::spawn(drive(run_id, SimulationRun::new(plan), tick_interval, tx));
        self.active = Some(task.abort_handle());

        Ok((
            RunHandle {
                run_id,
                task: Some(task),
            },
            rx,
        ))
    }
}

/// Pace one run to completion, emitting events along the way.
///
/// Sends are fire-and-forget: a caller that dropped the receiver stops
/// the stream without stopping the run.
async fn drive(
    run_id: RunId,
    mut run: SimulationRun,
    tick_interval: Duration,
    tx: mpsc::Sender<ProgressEvent>,
) -> SimulationRun {
    let _ = tx
        .send(ProgressEvent::Started {
            run_id,
            stage_count: run.plan().stage_count(),
        })
        .await;

    let mut announced = None;
    while !run.is_complete() {
        if let (Some(index), Some(label)) = (run.current_stage(), run.current_stage_label()) {
            if announced != Some(index) {
                let _ = tx
                    .send(ProgressEvent::StageStarted {
                        index,
                        label: label.to_string(),
                    })
                    .await;
                announced = Some(index);
            }
        }

        tokio::time::sleep(tick_interval).await;
        run.tick();
        let _ = tx
            .send(ProgressEvent::Progress {
                percent: run.percent(),
            })
            .await;
    }

    // Token-gated so a run can never announce completion twice.
    if run.take_completion().is_some() {
        let _ = tx.send(ProgressEvent::Completed { run_id }).await;
    }

    run
}
