//! Small dense helpers used when building the reduced Newton system.

use faer::Mat;

/// Infinity norm `max |v_i|`. Zero for an empty slice.
///
/// NaN entries propagate, so a poisoned residual never reads as converged.
pub fn inf_norm(v: &[f64]) -> f64 {
    let mut norm = 0.0_f64;
    for &x in v {
        if x.is_nan() {
            return f64::NAN;
        }
        norm = norm.max(x.abs());
    }
    norm
}

/// Indices `i` whose diagonal entry satisfies `pred(K[i, i])`, in ascending order.
pub fn diagonal_indices(matrix: &Mat<f64>, pred: impl Fn(f64) -> bool) -> Vec<usize> {
    let n = matrix.nrows().min(matrix.ncols());
    (0..n).filter(|&i| pred(matrix[(i, i)])).collect()
}

/// Principal submatrix `K[idx, idx]`.
pub fn principal_submatrix(matrix: &Mat<f64>, indices: &[usize]) -> Mat<f64> {
    let m = indices.len();
    Mat::from_fn(m, m, |r, c| matrix[(indices[r], indices[c])])
}

/// Gather `v[idx]` into a new vector.
pub fn gather(v: &[f64], indices: &[usize]) -> Vec<f64> {
    indices.iter().map(|&i| v[i]).collect()
}
