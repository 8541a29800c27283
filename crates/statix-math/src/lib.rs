//! # statix-math
//!
//! Dense linear algebra primitives for the Statix equilibrium solver.
//!
//! Provides:
//! - Vector norms and reduced-system gathering ([`dense`])
//! - A [`LinearSolver`] trait with a `faer` partial-pivoting LU backend

pub mod dense;
pub mod linear;
pub mod lu_solver;

pub use faer::Mat;
pub use linear::{LinalgError, LinearSolver};
pub use lu_solver::DenseLuSolver;
