use crate::model::LpModel;

/// Solve status, normalized across backends.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// An optimal solution was found.
    Optimal,
    /// No quantities satisfy all resource limits.
    Infeasible,
    /// The objective can be improved without bound.
    Unbounded,
    /// The backend itself failed to run.
    Error,
}

/// Normalized output of a solve attempt.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    pub status: SolveStatus,
    /// Solved value per variable, aligned with the model's variable order.
    /// Empty unless the status is optimal.
    pub quantities: Vec<f64>,
    pub objective_value: Option<f64>,
    /// Dual value per constraint row, when the backend (or the adapter's
    /// dual-program pricing) supplies them. Only meaningful for continuous
    /// models.
    pub duals: Option<Vec<f64>>,
    /// Technical detail for the error status.
    pub diagnostic: Option<String>,
}

impl SolverResult {
    pub fn optimal(quantities: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: SolveStatus::Optimal,
            quantities,
            objective_value: Some(objective_value),
            duals: None,
            diagnostic: None,
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolveStatus::Infeasible,
            quantities: Vec::new(),
            objective_value: None,
            duals: None,
            diagnostic: None,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            status: SolveStatus::Unbounded,
            quantities: Vec::new(),
            objective_value: None,
            duals: None,
            diagnostic: None,
        }
    }

    pub fn error(diagnostic: impl Into<String>) -> Self {
        Self {
            status: SolveStatus::Error,
            quantities: Vec::new(),
            objective_value: None,
            duals: None,
            diagnostic: Some(diagnostic.into()),
        }
    }
}

/// Capability interface over any LP/MILP backend.
///
/// Implementations must convert every backend failure mode, including
/// timeouts, into a `SolveStatus::Error` result rather than panicking or
/// hanging the caller.
pub trait SolverBackend {
    fn name(&self) -> &'static str;

    fn solve(&self, model: &LpModel) -> SolverResult;
}
