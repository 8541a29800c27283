//! Observation hooks for a running solve.
//!
//! Hooks are called at fixed points of the outer loop and can capture
//! metrics or forward events to logging. They observe only; the solver
//! never reads anything back from a hook.
//!
//! # Lifecycle
//!
//! ```text
//! hook.on_start(n_dofs)
//! for each outer iteration:
//!   hook.on_iteration(...)
//!   hook.on_event(...)      // once per trace entry
//! hook.on_finish(outcome)
//! ```

use crate::hybrid::SolveOutcome;
use crate::trace::TraceEntry;

/// Trait for solve observers. All methods default to no-ops.
pub trait SolveHook {
    /// Called once the system is known to have free DOFs.
    fn on_start(&mut self, n_dofs: usize) {
        let _ = n_dofs;
    }

    /// Called at the top of each outer iteration, after forces are evaluated.
    fn on_iteration(&mut self, iteration: u32, residual_norm: f64, energy: f64) {
        let _ = (iteration, residual_norm, energy);
    }

    /// Called for every trace entry, in order.
    fn on_event(&mut self, entry: &TraceEntry) {
        let _ = entry;
    }

    /// Called when the solve returns an outcome.
    fn on_finish(&mut self, outcome: &SolveOutcome) {
        let _ = outcome;
    }

    /// Returns the hook's name for logging.
    fn name(&self) -> &str;
}

/// Hook that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl SolveHook for NoopHook {
    fn name(&self) -> &str {
        "noop_hook"
    }
}

/// Hook that mirrors trace entries into `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl SolveHook for TracingHook {
    fn on_start(&mut self, n_dofs: usize) {
        tracing::info!(n_dofs, "solve_start");
    }

    fn on_event(&mut self, entry: &TraceEntry) {
        tracing::debug!(event = %entry, "solve_event");
    }

    fn on_finish(&mut self, outcome: &SolveOutcome) {
        tracing::info!(outcome = ?outcome, "solve_finish");
    }

    fn name(&self) -> &str {
        "tracing_hook"
    }
}

/// One convergence-history sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationSample {
    pub iteration: u32,
    pub residual_norm: f64,
    pub energy: f64,
}

/// Hook that records the residual/energy history of a solve.
#[derive(Debug, Default, Clone)]
pub struct HistoryHook {
    pub samples: Vec<IterationSample>,
    pub outcome: Option<SolveOutcome>,
}

impl HistoryHook {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SolveHook for HistoryHook {
    fn on_iteration(&mut self, iteration: u32, residual_norm: f64, energy: f64) {
        self.samples.push(IterationSample {
            iteration,
            residual_norm,
            energy,
        });
    }

    fn on_finish(&mut self, outcome: &SolveOutcome) {
        self.outcome = Some(*outcome);
    }

    fn name(&self) -> &str {
        "history_hook"
    }
}
