//! # statix-bench
//!
//! Benchmark suite for the Statix equilibrium solver.
//!
//! Provides synthetic mechanical systems, four benchmark scenarios,
//! metric collection and CSV/JSON export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;
pub mod systems;

pub use metrics::BenchmarkMetrics;
pub use runner::BenchmarkRunner;
pub use scenarios::{Scenario, ScenarioKind};
