//! # statix-solver
//!
//! Hybrid nonlinear static-equilibrium solver: a restricted Newton step,
//! an energy backtracking line search and a per-DOF fallback, driven by
//! one bounded convergence loop.
//!
//! ## Key Types
//!
//! - [`MechanicalSystem`]: numerical interface of the system being solved
//! - [`HybridSolver`]: the outer loop
//! - [`SolverConfig`]: tolerances, budgets and step controls
//! - [`SolveReport`] / [`SolveOutcome`]: what a solve returns
//! - [`SolveTrace`]: per-solve diagnostic event log
//! - [`hooks::SolveHook`]: observers for a running solve

pub mod backtrack;
pub mod config;
pub mod convergence;
pub mod hooks;
pub mod hybrid;
pub mod newton;
pub mod refine;
pub mod system;
pub mod trace;

pub use config::SolverConfig;
pub use hybrid::{HybridSolver, SolveOutcome, SolveReport};
pub use system::MechanicalSystem;
pub use trace::{SolveTrace, TraceEntry};
