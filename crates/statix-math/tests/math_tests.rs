//! Integration tests for statix-math.

use statix_math::dense::{diagonal_indices, gather, inf_norm, principal_submatrix};
use statix_math::{DenseLuSolver, LinalgError, LinearSolver, Mat};

fn mat(rows: &[&[f64]]) -> Mat<f64> {
    Mat::from_fn(rows.len(), rows[0].len(), |i, j| rows[i][j])
}

// ─── Dense Helper Tests ───────────────────────────────────────

#[test]
fn inf_norm_picks_largest_magnitude() {
    assert_eq!(inf_norm(&[1.0, -3.0, 2.0]), 3.0);
    assert_eq!(inf_norm(&[]), 0.0);
}

#[test]
fn inf_norm_propagates_nan() {
    assert!(inf_norm(&[1.0, f64::NAN]).is_nan());
}

#[test]
fn diagonal_filter_keeps_negative_entries() {
    let k = mat(&[
        &[1.0, 0.0, 0.0],
        &[0.0, -2.0, 0.0],
        &[0.0, 0.0, -0.5],
    ]);
    assert_eq!(diagonal_indices(&k, |d| d < 0.0), vec![1, 2]);
}

#[test]
fn reduced_system_gathering() {
    let k = mat(&[
        &[1.0, 2.0, 3.0],
        &[4.0, 5.0, 6.0],
        &[7.0, 8.0, 9.0],
    ]);
    let kr = principal_submatrix(&k, &[0, 2]);
    assert_eq!(kr.nrows(), 2);
    assert_eq!(kr[(0, 0)], 1.0);
    assert_eq!(kr[(0, 1)], 3.0);
    assert_eq!(kr[(1, 0)], 7.0);
    assert_eq!(kr[(1, 1)], 9.0);

    assert_eq!(gather(&[10.0, 20.0, 30.0], &[2, 0]), vec![30.0, 10.0]);
}

// ─── LU Solver Tests ──────────────────────────────────────────

#[test]
fn solve_diagonal_system() {
    let a = mat(&[&[-10.0]]);
    let x = DenseLuSolver::solve_once(&a, &[-5.0]).unwrap();
    assert!((x[0] - 0.5).abs() < 1e-12);
}

#[test]
fn solve_general_system() {
    // Needs a row swap: first pivot is zero.
    let a = mat(&[&[0.0, 2.0], &[3.0, 1.0]]);
    let x = DenseLuSolver::solve_once(&a, &[4.0, 5.0]).unwrap();
    assert!((x[0] - 1.0).abs() < 1e-12);
    assert!((x[1] - 2.0).abs() < 1e-12);
}

#[test]
fn solution_satisfies_system() {
    let a = mat(&[&[4.0, -1.0, 0.0], &[-1.0, 4.0, -1.0], &[0.0, -1.0, 4.0]]);
    let b = [2.0, 4.0, 10.0];
    let x = DenseLuSolver::solve_once(&a, &b).unwrap();
    for i in 0..3 {
        let ax: f64 = (0..3).map(|j| a[(i, j)] * x[j]).sum();
        assert!((ax - b[i]).abs() < 1e-12);
    }
}

#[test]
fn singular_with_consistent_rhs_is_reported() {
    // Zero pivot with a compatible right-hand side still has no unique solution.
    let a = mat(&[&[1.0, 2.0], &[2.0, 4.0]]);
    assert!(DenseLuSolver::solve_once(&a, &[1.0, 2.0]).is_err());
}

#[test]
fn singular_matrix_is_reported() {
    let a = mat(&[&[1.0, 1.0], &[1.0, 1.0]]);
    let err = DenseLuSolver::solve_once(&a, &[1.0, 2.0]).unwrap_err();
    assert_eq!(err, LinalgError::Singular);
}

#[test]
fn zero_matrix_is_singular() {
    let a = Mat::<f64>::zeros(2, 2);
    let err = DenseLuSolver::solve_once(&a, &[1.0, 1.0]).unwrap_err();
    assert_eq!(err, LinalgError::Singular);
}

#[test]
fn rejects_non_square() {
    let a = Mat::<f64>::zeros(2, 3);
    let mut solver = DenseLuSolver::new();
    assert!(matches!(
        solver.factorize(&a),
        Err(LinalgError::NotSquare { rows: 2, cols: 3 })
    ));
    assert!(!solver.is_factorized());
}

#[test]
fn rejects_empty() {
    let mut solver = DenseLuSolver::new();
    assert_eq!(solver.factorize(&Mat::zeros(0, 0)), Err(LinalgError::Empty));
}

#[test]
fn solve_before_factorize_fails() {
    let solver = DenseLuSolver::new();
    let mut out = [0.0];
    assert_eq!(solver.solve(&[1.0], &mut out), Err(LinalgError::NotFactorized));
}

#[test]
fn rhs_length_checked() {
    let mut solver = DenseLuSolver::new();
    solver.factorize(&mat(&[&[2.0, 0.0], &[0.0, 2.0]])).unwrap();
    assert_eq!(solver.dimension(), 2);
    let mut out = [0.0; 2];
    assert!(matches!(
        solver.solve(&[1.0], &mut out),
        Err(LinalgError::DimensionMismatch { what: "RHS", .. })
    ));
}

#[test]
fn factorization_reused_for_several_rhs() {
    let mut solver = DenseLuSolver::new();
    solver.factorize(&mat(&[&[2.0, 1.0], &[1.0, 3.0]])).unwrap();
    let mut x = [0.0; 2];
    solver.solve(&[3.0, 4.0], &mut x).unwrap();
    assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 1.0).abs() < 1e-12);
    solver.solve(&[0.0, 0.0], &mut x).unwrap();
    assert_eq!(x, [0.0, 0.0]);
}
