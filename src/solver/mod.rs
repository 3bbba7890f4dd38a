//! Solver collaborator interface.
//!
//! A [`MilpSolver`] consumes an immutable [`TimetableModel`] and reports one
//! of five terminal states. None of them is an error: an instance with more
//! students than seats is simply [`SolveStatus::Infeasible`].

mod good_lp_backend;
mod reduce;

pub use good_lp_backend::GoodLpSolver;

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::mip::TimetableModel;

/// Terminal state of a solver run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// Proven optimal solution.
    Optimal,
    /// A solution was found but a limit stopped the proof of optimality.
    Feasible,
    /// No assignment satisfies every constraint.
    Infeasible,
    /// The objective is unbounded below.
    Unbounded,
    /// A limit was reached before any solution was found.
    LimitReached,
}

impl SolveStatus {
    /// Whether the status carries a solution.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

/// Result of a solver run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Terminal state.
    pub status: SolveStatus,
    /// 0/1 value of every model variable, indexed by `VarId::index`.
    pub values: Option<Vec<bool>>,
    /// Objective value of `values`.
    pub objective: Option<f64>,
}

impl SolveOutcome {
    /// Outcome with a solution, scored against `model`.
    pub fn solved(status: SolveStatus, model: &TimetableModel, values: Vec<bool>) -> Self {
        debug_assert!(status.has_solution());
        let objective = model.objective_value(&values);
        Self {
            status,
            values: Some(values),
            objective: Some(objective),
        }
    }

    /// Outcome without a solution.
    pub fn without_solution(status: SolveStatus) -> Self {
        debug_assert!(!status.has_solution());
        Self {
            status,
            values: None,
            objective: None,
        }
    }

    /// Whether a solution is available.
    pub fn is_solution_found(&self) -> bool {
        self.values.is_some()
    }
}

/// A generic MILP solver.
///
/// Implementations must not modify the model and are invoked at most once
/// at a time per model.
pub trait MilpSolver {
    /// Solver name for logging.
    fn name(&self) -> &'static str;

    /// Minimizes the model's objective subject to its constraints.
    ///
    /// # Errors
    /// [`TimetableError::Backend`] when the backend fails without producing
    /// a status.
    fn solve(&self, model: &TimetableModel) -> Result<SolveOutcome, TimetableError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_has_solution() {
        assert!(SolveStatus::Optimal.has_solution());
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Infeasible.has_solution());
        assert!(!SolveStatus::Unbounded.has_solution());
        assert!(!SolveStatus::LimitReached.has_solution());
    }

    #[test]
    fn test_without_solution() {
        let o = SolveOutcome::without_solution(SolveStatus::Infeasible);
        assert!(!o.is_solution_found());
        assert_eq!(o.objective, None);
    }
}
