//! Benchmark metrics: data collected during a benchmark run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    pub dofs: usize,
    /// Outcome name (`converged`, `max_iterations_exceeded`, ...).
    pub outcome: String,
    pub converged: bool,
    /// Outer iterations performed.
    pub iterations: u32,
    pub newton_accepted: usize,
    pub line_search_retries: usize,
    pub dofs_refined: usize,
    /// Residual infinity norm before the first iteration.
    pub initial_residual: f64,
    pub final_residual: f64,
    pub final_energy: f64,
    /// Wall-clock time of the solve (seconds).
    pub wall_time: f64,
}

impl BenchmarkMetrics {
    /// CSV header matching [`BenchmarkMetrics::to_csv_row`].
    pub fn to_csv_header() -> String {
        "scenario,dofs,outcome,converged,iterations,newton_accepted,line_search_retries,dofs_refined,initial_residual,final_residual,final_energy,wall_time_ms".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{},{:.6e},{:.6e},{:.6e},{:.4}",
            self.scenario,
            self.dofs,
            self.outcome,
            self.converged,
            self.iterations,
            self.newton_accepted,
            self.line_search_retries,
            self.dofs_refined,
            self.initial_residual,
            self.final_residual,
            self.final_energy,
            self.wall_time * 1000.0,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
