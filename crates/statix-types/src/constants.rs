//! Solver defaults.
//!
//! These seed `SolverConfig::default()`; the solver loop itself only
//! ever reads values from its configuration.

/// Default cap on outer solver iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 20;

/// Default residual tolerance (infinity norm of the out-of-balance force).
pub const DEFAULT_TOLERANCE: f64 = 1.0e-3;

/// Default slack added to the reference energy before a Newton step is rejected.
pub const DEFAULT_ENERGY_TOLERANCE: f64 = 0.0;

/// Default bound on the largest single-iteration Newton DOF change.
pub const DEFAULT_STEP_LIMIT: f64 = 5.0;

/// Default perturbation used by the per-DOF refiner.
pub const DEFAULT_REFINE_STEP: f64 = 1.0e-3;

/// First step fraction tried after a Newton step is rejected.
pub const DEFAULT_BACKTRACK_INITIAL: f64 = 0.5;

/// Multiplier applied to the step fraction after each failed retry.
pub const DEFAULT_BACKTRACK_SHRINK: f64 = 0.5;

/// Smallest step fraction the line search will still try.
pub const DEFAULT_BACKTRACK_MIN_FACTOR: f64 = 0.1;
