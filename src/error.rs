//! Crate-level error type.
//!
//! Infeasibility and solver limits are *outcomes*, reported through
//! [`SolveStatus`](crate::solver::SolveStatus); only defects in the input or
//! failures of the solver backend itself are errors.

use crate::validation::ValidationError;

/// Errors raised while building or solving a timetable model.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TimetableError {
    /// The instance or penalty configuration failed validation.
    #[error("invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
    /// The solver backend failed without reporting a status.
    #[error("solver backend failed: {0}")]
    Backend(String),
}

impl TimetableError {
    /// Validation errors carried by this error, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidInput(errors) => errors,
            Self::Backend(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for TimetableError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::InvalidInput(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
