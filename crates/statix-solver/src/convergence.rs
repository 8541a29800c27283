//! Convergence monitor: decides when the outer loop stops.

use std::time::{Duration, Instant};

use statix_math::dense::inf_norm;

use crate::config::SolverConfig;

/// What the monitor says about the current iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Residual is below tolerance.
    Converged,
    /// Keep iterating.
    Continue,
    /// `max_iterations` outer iterations have been spent.
    IterationsExhausted,
    /// The wall-clock budget has been spent.
    TimedOut,
}

/// Tracks the iteration count and wall-clock budget of one solve.
///
/// The convergence test itself, [`is_converged`](Self::is_converged),
/// is a pure predicate on the residual.
#[derive(Debug, Clone)]
pub struct ConvergenceMonitor {
    tolerance: f64,
    max_iterations: u32,
    budget: Option<Duration>,
    started: Instant,
    iterations: u32,
}

impl ConvergenceMonitor {
    /// Starts the clock for a new solve.
    pub fn new(config: &SolverConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
            budget: config
                .timeout_s
                .and_then(|s| Duration::try_from_secs_f64(s).ok()),
            started: Instant::now(),
            iterations: 0,
        }
    }

    /// `max |E_i| < tolerance`.
    pub fn is_converged(&self, residual: &[f64]) -> bool {
        inf_norm(residual) < self.tolerance
    }

    /// Outer iterations completed so far.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Marks one outer iteration as completed.
    pub fn advance(&mut self) {
        self.iterations += 1;
    }

    /// Time since the monitor was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Whether the wall-clock budget is spent.
    pub fn timed_out(&self) -> bool {
        self.budget.is_some_and(|b| self.elapsed() >= b)
    }

    /// Termination check run at the top of every outer iteration.
    pub fn check(&self, residual: &[f64]) -> Verdict {
        if self.is_converged(residual) {
            Verdict::Converged
        } else if self.iterations >= self.max_iterations {
            Verdict::IterationsExhausted
        } else if self.timed_out() {
            Verdict::TimedOut
        } else {
            Verdict::Continue
        }
    }
}
