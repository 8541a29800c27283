//! Energy-based backtracking line search.
//!
//! Once a full Newton step raises the energy past the reference, the step
//! is retried from the rollback point at geometrically shrinking fractions
//! until one lowers the energy below the reference. The schedule is fixed
//! and finite, so the worst-case cost is bounded.

use crate::config::SolverConfig;
use crate::newton::NewtonStep;
use crate::system::MechanicalSystem;
use crate::trace::{SolveTrace, TraceEntry};

/// Result of a line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineSearchOutcome {
    /// `factor * step` applied from the rollback point reached `energy < reference`.
    Accepted { factor: f64, energy: f64 },
    /// No fraction helped; the system was reset to the rollback point.
    Exhausted,
}

/// Geometric backtracking over a precomputed factor schedule.
#[derive(Debug, Clone)]
pub struct BacktrackingController {
    factors: Vec<f64>,
}

impl BacktrackingController {
    /// Builds the schedule from the config (`0.5, 0.25, 0.125` by default).
    pub fn from_config(config: &SolverConfig) -> Self {
        Self {
            factors: config.backtrack_factors(),
        }
    }

    /// Step fractions tried, in order.
    pub fn factors(&self) -> &[f64] {
        &self.factors
    }

    /// Search for a fraction of `step` that lowers the energy below `reference_energy`.
    ///
    /// The system is assumed to hold a rejected full step; every attempt
    /// starts again from `rollback`. On `Accepted` the system holds the
    /// accepted state with forces up to date. On `Exhausted` it holds
    /// `rollback`, also with forces up to date.
    pub fn search<S: MechanicalSystem + ?Sized>(
        &self,
        system: &mut S,
        rollback: &[f64],
        reference_energy: f64,
        step: &NewtonStep,
        trace: &mut SolveTrace,
    ) -> LineSearchOutcome {
        for &factor in &self.factors {
            trace.push(TraceEntry::NewtonRejectedRetry { factor });

            system.set_dofs(rollback);
            step.apply_scaled(system, factor);
            system.state_update_forces();
            let energy = system.energy();

            tracing::debug!(factor, energy, reference_energy, "line_search_attempt");

            if energy < reference_energy {
                return LineSearchOutcome::Accepted { factor, energy };
            }
        }

        system.set_dofs(rollback);
        system.state_update_forces();
        trace.push(TraceEntry::LineSearchExhausted);
        LineSearchOutcome::Exhausted
    }
}
