//! Hybrid equilibrium solver: the outer loop.
//!
//! Each iteration:
//! 1. **Evaluate**: forces, residual norm, energy
//! 2. **Check**: converged / iteration budget / wall-clock budget
//! 3. **Newton**: restricted Newton step over restrained DOFs
//! 4. **Accept or backtrack**: energy comparison against the rollback point
//! 5. **Refine**: `improve_dof` on every DOF the Newton step did not move
//!
//! Numerical trouble inside an iteration (no restrained DOFs, singular
//! reduced system, exhausted line search) is absorbed and the iteration
//! falls back to refinement. Only budget exhaustion is reported, as an
//! outcome rather than an error.

use serde::{Deserialize, Serialize};

use statix_math::dense::inf_norm;
use statix_types::{StatixError, StatixResult};

use crate::backtrack::{BacktrackingController, LineSearchOutcome};
use crate::config::SolverConfig;
use crate::convergence::{ConvergenceMonitor, Verdict};
use crate::hooks::{NoopHook, SolveHook};
use crate::newton::{self, StepError};
use crate::refine::PerDofRefiner;
use crate::system::{checked_residual, MechanicalSystem};
use crate::trace::{SkipReason, SolveTrace, TraceEntry};

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Residual below tolerance after `iterations` outer iterations.
    Converged { iterations: u32 },
    /// Iteration budget spent; the last state is kept.
    MaxIterationsExceeded,
    /// The system has no free DOFs; nothing was done.
    NoFreeDofs,
    /// Wall-clock budget spent; the last state is kept.
    TimedOut,
}

/// Everything a solve produces besides the mutated system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub outcome: SolveOutcome,
    pub trace: SolveTrace,
    /// Outer iterations performed.
    pub iterations: u32,
    /// Residual infinity norm at the final state (0 for `NoFreeDofs`).
    pub final_residual: f64,
    /// Energy at the final state (0 for `NoFreeDofs`).
    pub final_energy: f64,
    /// Wall-clock time of the solve (seconds).
    pub wall_time: f64,
}

impl SolveReport {
    /// True for `Converged` and `NoFreeDofs`.
    pub fn is_converged(&self) -> bool {
        matches!(
            self.outcome,
            SolveOutcome::Converged { .. } | SolveOutcome::NoFreeDofs
        )
    }

    /// Turns a non-converged outcome into [`StatixError::SolverDivergence`].
    pub fn into_result(self) -> StatixResult<Self> {
        if self.is_converged() {
            Ok(self)
        } else {
            Err(StatixError::SolverDivergence {
                iterations: self.iterations,
                residual: self.final_residual,
            })
        }
    }
}

/// Newton / line-search / per-DOF hybrid solver.
#[derive(Debug, Clone, Default)]
pub struct HybridSolver {
    config: SolverConfig,
}

impl HybridSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Drive `system` to static equilibrium.
    ///
    /// Mutates the system's DOFs in place. `Err` only for an invalid
    /// configuration or a system that breaks its interface contract.
    pub fn solve<S: MechanicalSystem + ?Sized>(&self, system: &mut S) -> StatixResult<SolveReport> {
        self.solve_with_hook(system, &mut NoopHook)
    }

    /// [`solve`](Self::solve) with an observer.
    pub fn solve_with_hook<S, H>(&self, system: &mut S, hook: &mut H) -> StatixResult<SolveReport>
    where
        S: MechanicalSystem + ?Sized,
        H: SolveHook + ?Sized,
    {
        self.config.validate()?;
        let config = &self.config;

        let mut monitor = ConvergenceMonitor::new(config);
        let mut trace = SolveTrace::new();
        let mut forwarded = 0;

        let n = system.n_dofs();
        if n == 0 {
            let outcome = SolveOutcome::NoFreeDofs;
            hook.on_finish(&outcome);
            return Ok(SolveReport {
                outcome,
                trace,
                iterations: 0,
                final_residual: 0.0,
                final_energy: 0.0,
                wall_time: monitor.elapsed().as_secs_f64(),
            });
        }

        hook.on_start(n);
        system.state_prepare();

        // Already in equilibrium: leave the state alone.
        system.state_update_forces();
        let residual = checked_residual(system)?;
        if monitor.is_converged(&residual) {
            let energy = system.energy();
            hook.on_iteration(0, inf_norm(&residual), energy);
            trace.push(TraceEntry::Converged { iterations: 0 });
            return Ok(finish(
                SolveOutcome::Converged { iterations: 0 },
                trace,
                &monitor,
                inf_norm(&residual),
                energy,
                hook,
                &mut forwarded,
            ));
        }

        if config.use_robust_step {
            system.robust_step();
            trace.push(TraceEntry::RobustStep);
        }

        let backtracking = BacktrackingController::from_config(config);
        let refiner = PerDofRefiner::new(config.refine_step);

        loop {
            system.state_update_forces();
            let residual = checked_residual(system)?;
            let residual_norm = inf_norm(&residual);
            let energy = system.energy();
            let iteration = monitor.iterations();

            hook.on_iteration(iteration, residual_norm, energy);
            trace.push(TraceEntry::Iteration {
                iteration,
                residual_norm,
                energy,
            });
            tracing::debug!(
                system = system.name(),
                iteration,
                residual = residual_norm,
                energy,
                "outer_iteration"
            );

            let outcome = match monitor.check(&residual) {
                Verdict::Continue => None,
                Verdict::Converged => {
                    trace.push(TraceEntry::Converged {
                        iterations: iteration,
                    });
                    tracing::info!(
                        system = system.name(),
                        iterations = iteration,
                        residual = residual_norm,
                        "equilibrium_reached"
                    );
                    Some(SolveOutcome::Converged {
                        iterations: iteration,
                    })
                }
                Verdict::IterationsExhausted => {
                    trace.push(TraceEntry::MaxIterExceeded {
                        iterations: iteration,
                    });
                    tracing::warn!(
                        system = system.name(),
                        iterations = iteration,
                        residual = residual_norm,
                        "max_iterations_exceeded"
                    );
                    Some(SolveOutcome::MaxIterationsExceeded)
                }
                Verdict::TimedOut => {
                    let elapsed_s = monitor.elapsed().as_secs_f64();
                    trace.push(TraceEntry::TimedOut {
                        iterations: iteration,
                        elapsed_s,
                    });
                    tracing::warn!(
                        system = system.name(),
                        iterations = iteration,
                        elapsed_s,
                        residual = residual_norm,
                        "solve_timed_out"
                    );
                    Some(SolveOutcome::TimedOut)
                }
            };
            if let Some(outcome) = outcome {
                return Ok(finish(
                    outcome,
                    trace,
                    &monitor,
                    residual_norm,
                    energy,
                    hook,
                    &mut forwarded,
                ));
            }

            let rollback = system.get_dofs();
            let reference_energy = energy + config.energy_tolerance;

            let handled: Vec<usize> = match newton::propose(system, config) {
                Ok(step) => {
                    system.state_update_forces();
                    let trial_energy = system.energy();
                    if trial_energy.is_nan() || trial_energy > reference_energy {
                        match backtracking.search(
                            system,
                            &rollback,
                            reference_energy,
                            &step,
                            &mut trace,
                        ) {
                            LineSearchOutcome::Accepted {
                                factor,
                                energy: accepted,
                            } => {
                                trace.push(TraceEntry::NewtonAccepted {
                                    dofs: step.len(),
                                    factor,
                                    energy_before: energy,
                                    energy_after: accepted,
                                    clamped: step.clamped,
                                });
                                step.indices
                            }
                            LineSearchOutcome::Exhausted => {
                                tracing::debug!(iteration, "line_search_exhausted");
                                Vec::new()
                            }
                        }
                    } else {
                        trace.push(TraceEntry::NewtonAccepted {
                            dofs: step.len(),
                            factor: 1.0,
                            energy_before: energy,
                            energy_after: trial_energy,
                            clamped: step.clamped,
                        });
                        step.indices
                    }
                }
                Err(StepError::Contract(e)) => return Err(e),
                Err(StepError::NoConstrainedDofs) => {
                    trace.push(TraceEntry::NewtonSkipped {
                        reason: SkipReason::NoConstrainedDofs,
                    });
                    Vec::new()
                }
                Err(StepError::NonFiniteState) => {
                    tracing::debug!(iteration, "newton_skipped_non_finite");
                    trace.push(TraceEntry::NewtonSkipped {
                        reason: SkipReason::NonFiniteState,
                    });
                    Vec::new()
                }
                Err(StepError::SingularReducedSystem(e)) => {
                    tracing::debug!(iteration, error = %e, "newton_skipped");
                    trace.push(TraceEntry::NewtonSkipped {
                        reason: SkipReason::SingularReducedSystem,
                    });
                    Vec::new()
                }
            };

            refiner.refine_remaining(system, &handled, &mut trace);

            forward(hook, &trace, &mut forwarded);
            monitor.advance();
        }
    }
}

fn forward<H: SolveHook + ?Sized>(hook: &mut H, trace: &SolveTrace, forwarded: &mut usize) {
    for entry in trace.since(*forwarded) {
        hook.on_event(entry);
    }
    *forwarded = trace.len();
}

fn finish<H: SolveHook + ?Sized>(
    outcome: SolveOutcome,
    trace: SolveTrace,
    monitor: &ConvergenceMonitor,
    final_residual: f64,
    final_energy: f64,
    hook: &mut H,
    forwarded: &mut usize,
) -> SolveReport {
    forward(hook, &trace, forwarded);
    hook.on_finish(&outcome);
    SolveReport {
        outcome,
        trace,
        iterations: monitor.iterations(),
        final_residual,
        final_energy,
        wall_time: monitor.elapsed().as_secs_f64(),
    }
}
