//! # Staged Progress Simulator
//!
//! The one reusable pattern behind every interactive workflow: a named
//! sequence of stages advanced on a timer, with a percent value that only
//! ever moves forward.
//!
//! The state machine here is synchronous and tick-driven. It owns no timer
//! and performs no work; the app layer decides when to call [`SimulationRun::tick`]
//! and how long to wait between calls. That keeps the core deterministic
//! and makes the timing properties directly testable.
//!
//! ## Progress Modes
//!
//! | Mode | Used by | Percent rule |
//! |------|---------|--------------|
//! | `PercentRamp` | upload | += step per tick within a single implicit stage |
//! | `StageWeighted` | report | `completed * 100 / total` after each stage |
//!
//! A run cannot fail, time out, or roll back. The only terminal transition
//! is completing the last stage, which arms a one-shot [`CompletionToken`]
//! so the external side effect (URL handoff, artifact emission) fires
//! exactly once.

use serde::{Deserialize, Serialize};

// =============================================================================
// PROGRESS MODE
// =============================================================================

/// How a run translates ticks into percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgressMode {
    /// Percent advances by `step` on every tick, capped at 100.
    /// The plan's single stage completes when the ramp reaches 100.
    PercentRamp {
        /// Percent added per tick. Must divide 100 evenly for the ramp to
        /// land exactly on the cap; the built-in plans guarantee this.
        step: u8,
    },
    /// Each tick completes one stage; percent is
    /// `completed_stages * 100 / total_stages`.
    StageWeighted,
}

// =============================================================================
// STAGE PLAN
// =============================================================================

/// The ordered, non-empty list of stage labels plus the progress mode for
/// one workflow. Immutable once a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePlan {
    labels: Vec<String>,
    mode: ProgressMode,
}

impl StagePlan {
    /// Build a plan from ordered stage labels.
    ///
    /// Returns `None` when `labels` is empty; every run needs at least one
    /// stage to complete.
    #[must_use]
    pub fn new(labels: Vec<String>, mode: ProgressMode) -> Option<Self> {
        if labels.is_empty() {
            return None;
        }
        Some(Self { labels, mode })
    }

    /// Build a plan with a single implicit stage.
    #[must_use]
    pub fn single(label: impl Into<String>, mode: ProgressMode) -> Self {
        Self {
            labels: vec![label.into()],
            mode,
        }
    }

    /// Infallible construction for the built-in plans.
    /// Callers must pass a non-empty label list.
    pub(crate) fn from_parts(labels: Vec<String>, mode: ProgressMode) -> Self {
        Self { labels, mode }
    }

    /// Number of stages in the plan. Always >= 1.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.labels.len()
    }

    /// Label of the stage at `index`, if it exists.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// All labels in declared order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The plan's progress mode.
    #[must_use]
    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    /// Number of ticks a run of this plan needs to reach terminal state.
    #[must_use]
    pub fn ticks_to_complete(&self) -> u64 {
        match self.mode {
            ProgressMode::PercentRamp { step } => {
                if step == 0 {
                    // A zero step would never reach the cap; treated as a
                    // single jump to keep the run finite.
                    1
                } else {
                    (100 / u64::from(step)) + u64::from(100 % u64::from(step) != 0)
                }
            }
            ProgressMode::StageWeighted => self.labels.len() as u64,
        }
    }
}

// =============================================================================
// COMPLETION TOKEN
// =============================================================================

/// One-shot proof that a run reached terminal state.
///
/// [`SimulationRun::take_completion`] yields this exactly once per run. The
/// caller spends it on the terminal side effect, which therefore cannot
/// fire twice no matter how often the run is polled afterwards.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a completion token triggers the terminal side effect exactly once"]
pub struct CompletionToken(());

// =============================================================================
// SIMULATION RUN
// =============================================================================

/// A single execution of a stage plan, from trigger to terminal state.
///
/// Percent is 0-100 and monotonically non-decreasing; there is no failure
/// path and no cancellation inside the state machine. Ticking a terminal
/// run is a no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    plan: StagePlan,
    completed: usize,
    percent: u8,
    complete: bool,
    completion_taken: bool,
}

impl SimulationRun {
    /// Start a run of the given plan at 0%.
    #[must_use]
    pub fn new(plan: StagePlan) -> Self {
        Self {
            plan,
            completed: 0,
            percent: 0,
            complete: false,
            completion_taken: false,
        }
    }

    /// The plan this run executes.
    #[must_use]
    pub fn plan(&self) -> &StagePlan {
        &self.plan
    }

    /// Current percent complete, 0-100.
    #[must_use]
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Number of fully completed stages.
    #[must_use]
    pub fn completed_stages(&self) -> usize {
        self.completed
    }

    /// Index of the stage currently executing, or `None` once terminal.
    #[must_use]
    pub fn current_stage(&self) -> Option<usize> {
        if self.complete {
            None
        } else {
            Some(self.completed.min(self.plan.stage_count().saturating_sub(1)))
        }
    }

    /// Label of the stage currently executing, or `None` once terminal.
    #[must_use]
    pub fn current_stage_label(&self) -> Option<&str> {
        self.current_stage().and_then(|i| self.plan.label(i))
    }

    /// Whether the run has reached terminal state.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Advance the run by one tick.
    ///
    /// In `PercentRamp` mode the percent climbs by the configured step; the
    /// run completes when the ramp reaches 100. In `StageWeighted` mode one
    /// stage completes per tick and the percent is recomputed from the
    /// completed count. Ticking a terminal run changes nothing.
    pub fn tick(&mut self) {
        if self.complete {
            return;
        }

        match self.plan.mode() {
            ProgressMode::PercentRamp { step } => {
                // step 0 degenerates to a single jump so the run stays finite
                let step = if step == 0 { 100 } else { step };
                self.percent = self.percent.saturating_add(step).min(100);
                if self.percent == 100 {
                    self.completed = self.plan.stage_count();
                    self.complete = true;
                }
            }
            ProgressMode::StageWeighted => {
                self.completed = (self.completed + 1).min(self.plan.stage_count());
                // stage_count >= 1 by construction; max(1) keeps a
                // hand-deserialized empty plan from dividing by zero
                let total = self.plan.stage_count().max(1) as u64;
                self.percent = ((self.completed as u64).saturating_mul(100) / total).min(100) as u8;
                if self.completed == self.plan.stage_count() {
                    self.percent = 100;
                    self.complete = true;
                }
            }
        }
    }

    /// Run every remaining tick at once.
    ///
    /// Useful for synchronous callers that want the terminal state without
    /// simulated pacing (the driver sleeps between ticks instead).
    pub fn run_to_completion(&mut self) {
        while !self.complete {
            self.tick();
        }
    }

    /// Take the one-shot completion token.
    ///
    /// Returns `Some` exactly once, and only after the run is terminal.
    /// Every later call (and any call before completion) returns `None`.
    pub fn take_completion(&mut self) -> Option<CompletionToken> {
        if self.complete && !self.completion_taken {
            self.completion_taken = true;
            Some(CompletionToken(()))
        } else {
            None
        }
    }
}

impl std::fmt::Display for SimulationRun {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.current_stage_label() {
            Some(label) => write!(f, "{}%: {}", self.percent, label),
            None => write!(f, "100%: complete"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
