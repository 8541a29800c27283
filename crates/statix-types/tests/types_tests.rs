//! Integration tests for statix-types.

use statix_types::constants;
use statix_types::{StatixError, StatixResult};

// ─── Error Tests ──────────────────────────────────────────────

#[test]
fn error_display() {
    let err = StatixError::InvalidConfig("step_limit must be positive".into());
    assert!(err.to_string().contains("step_limit"));
}

#[test]
fn dimension_mismatch_display() {
    let err = StatixError::DimensionMismatch {
        what: "residual",
        expected: 4,
        actual: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("residual"));
    assert!(msg.contains('4'));
    assert!(msg.contains('3'));
}

#[test]
fn solver_divergence_display() {
    let err = StatixError::SolverDivergence {
        iterations: 20,
        residual: 1.5e-2,
    };
    let msg = err.to_string();
    assert!(msg.contains("20"));
    assert!(msg.contains("1.50e-2"));
}

#[test]
fn io_error_converts() {
    fn open_missing() -> StatixResult<()> {
        std::fs::read("/definitely/not/a/real/path.toml")?;
        Ok(())
    }
    let err = open_missing().unwrap_err();
    assert!(matches!(err, StatixError::Io(_)));
}

// ─── Constant Tests ───────────────────────────────────────────

#[test]
fn backtracking_defaults_terminate() {
    assert!(constants::DEFAULT_BACKTRACK_SHRINK > 0.0);
    assert!(constants::DEFAULT_BACKTRACK_SHRINK < 1.0);
    assert!(constants::DEFAULT_BACKTRACK_MIN_FACTOR > 0.0);
    assert!(constants::DEFAULT_BACKTRACK_MIN_FACTOR <= constants::DEFAULT_BACKTRACK_INITIAL);
}

#[test]
fn documented_defaults() {
    assert_eq!(constants::DEFAULT_MAX_ITERATIONS, 20);
    assert_eq!(constants::DEFAULT_TOLERANCE, 1e-3);
    assert_eq!(constants::DEFAULT_ENERGY_TOLERANCE, 0.0);
    assert_eq!(constants::DEFAULT_STEP_LIMIT, 5.0);
    assert_eq!(constants::DEFAULT_REFINE_STEP, 1e-3);
}
