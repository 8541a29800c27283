//! Benchmark runner: solves scenarios and collects metrics.

use statix_solver::hooks::HistoryHook;
use statix_solver::{HybridSolver, SolveOutcome};
use statix_types::StatixResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::{Scenario, ScenarioKind};

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Solve a single scenario in place.
    ///
    /// A scenario that runs out of iterations or time still yields metrics;
    /// only contract violations are errors.
    pub fn run(scenario: &mut Scenario) -> StatixResult<BenchmarkMetrics> {
        let solver = HybridSolver::new(scenario.config.clone());
        let mut history = HistoryHook::new();
        let report = solver.solve_with_hook(scenario.system.as_mut(), &mut history)?;

        let initial_residual = history
            .samples
            .first()
            .map_or(report.final_residual, |s| s.residual_norm);

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            dofs: scenario.system.n_dofs(),
            outcome: outcome_name(&report.outcome).to_string(),
            converged: report.is_converged(),
            iterations: report.iterations,
            newton_accepted: report.trace.newton_accepted(),
            line_search_retries: report.trace.line_search_retries(),
            dofs_refined: report.trace.dofs_refined(),
            initial_residual,
            final_residual: report.final_residual,
            final_energy: report.final_energy,
            wall_time: report.wall_time,
        })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all() -> StatixResult<Vec<BenchmarkMetrics>> {
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let mut scenario = Scenario::from_kind(kind);
            results.push(Self::run(&mut scenario)?);
        }
        Ok(results)
    }
}

fn outcome_name(outcome: &SolveOutcome) -> &'static str {
    match outcome {
        SolveOutcome::Converged { .. } => "converged",
        SolveOutcome::MaxIterationsExceeded => "max_iterations_exceeded",
        SolveOutcome::NoFreeDofs => "no_free_dofs",
        SolveOutcome::TimedOut => "timed_out",
    }
}
