//! Solve trace: an append-only record of what the solver did.
//!
//! Each solve owns a fresh [`SolveTrace`] and hands it back in the
//! report. Entries are diagnostics only; no control decision reads them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a Newton proposal produced no step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No DOF had a negative stiffness diagonal.
    NoConstrainedDofs,
    /// The reduced linear system could not be solved.
    SingularReducedSystem,
    /// The residual or energy was NaN or infinite.
    NonFiniteState,
}

/// A single trace event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceEntry {
    /// The system's robust starting step was taken.
    RobustStep,

    /// Start of an outer iteration (after forces were evaluated).
    Iteration {
        iteration: u32,
        residual_norm: f64,
        energy: f64,
    },

    /// A Newton step was kept, either whole (`factor == 1.0`) or after backtracking.
    NewtonAccepted {
        /// Number of DOFs the step moved.
        dofs: usize,
        /// Fraction of the proposed step that was applied.
        factor: f64,
        energy_before: f64,
        energy_after: f64,
        /// Whether the raw step hit the step limit.
        clamped: bool,
    },

    /// No Newton step was available this iteration.
    NewtonSkipped { reason: SkipReason },

    /// The step was rejected and is being retried at `factor`.
    NewtonRejectedRetry { factor: f64 },

    /// Every backtracking fraction failed; the Newton step was discarded.
    LineSearchExhausted,

    /// `improve_dof` was applied to this DOF.
    DofRefined { dof: usize },

    /// Residual dropped below tolerance.
    Converged { iterations: u32 },

    /// Iteration budget spent without converging.
    MaxIterExceeded { iterations: u32 },

    /// Wall-clock budget spent without converging.
    TimedOut { iterations: u32, elapsed_s: f64 },
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RobustStep => write!(f, "robust step"),
            Self::Iteration {
                iteration,
                residual_norm,
                energy,
            } => write!(
                f,
                "iteration {iteration}: |E| = {residual_norm:.3e}, J = {energy:.6e}"
            ),
            Self::NewtonAccepted {
                dofs,
                factor,
                energy_before,
                energy_after,
                clamped,
            } => {
                write!(
                    f,
                    "newton accepted on {dofs} dofs (factor {factor}, J {energy_before:.6e} -> {energy_after:.6e})"
                )?;
                if *clamped {
                    write!(f, " [clamped]")?;
                }
                Ok(())
            }
            Self::NewtonSkipped { reason } => write!(f, "newton skipped: {reason:?}"),
            Self::NewtonRejectedRetry { factor } => {
                write!(f, "newton rejected, retrying with factor {factor}")
            }
            Self::LineSearchExhausted => write!(f, "line search exhausted, newton step discarded"),
            Self::DofRefined { dof } => write!(f, "refined dof {dof}"),
            Self::Converged { iterations } => write!(f, "converged after {iterations} iterations"),
            Self::MaxIterExceeded { iterations } => {
                write!(f, "no convergence after {iterations} iterations")
            }
            Self::TimedOut {
                iterations,
                elapsed_s,
            } => write!(f, "timed out after {iterations} iterations ({elapsed_s:.3}s)"),
        }
    }
}

/// Ordered, append-only list of [`TraceEntry`] values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolveTrace {
    entries: Vec<TraceEntry>,
}

impl SolveTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    /// All entries in order.
    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    /// Entries appended at or after position `mark`.
    pub fn since(&self, mark: usize) -> &[TraceEntry] {
        &self.entries[mark.min(self.entries.len())..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries.iter()
    }

    /// Number of entries matching `pred`.
    pub fn count(&self, pred: impl Fn(&TraceEntry) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(e)).count()
    }

    /// Number of accepted Newton steps.
    pub fn newton_accepted(&self) -> usize {
        self.count(|e| matches!(e, TraceEntry::NewtonAccepted { .. }))
    }

    /// Number of line-search retries.
    pub fn line_search_retries(&self) -> usize {
        self.count(|e| matches!(e, TraceEntry::NewtonRejectedRetry { .. }))
    }

    /// Number of single-DOF refinements.
    pub fn dofs_refined(&self) -> usize {
        self.count(|e| matches!(e, TraceEntry::DofRefined { .. }))
    }
}

impl fmt::Display for SolveTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
