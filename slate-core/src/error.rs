//! Typed failures reported by the planning core.

use thiserror::Error;

/// Rejected task fields. Raised only while constructing a [`crate::Task`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("malformed deadline '{input}': expected YYYY-MM-DD HH:MM")]
    MalformedDeadline { input: String },

    #[error("malformed date '{input}': expected YYYY-MM-DD")]
    MalformedDate { input: String },

    #[error("duration must be a positive number of minutes, got {0}")]
    NonPositiveDuration(i64),

    #[error("duration of {0} minutes is too long")]
    DurationOutOfRange(i64),

    #[error("task id must be a positive integer, got {0}")]
    NonPositiveId(i64),

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("category must not be empty")]
    EmptyCategory,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("a task with id {0} already exists")]
    DuplicateId(u64),

    #[error("budget must be non-negative, got {0} minutes")]
    InvalidBudget(i64),

    #[error("budget of {requested} minutes exceeds the limit of {max} minutes")]
    BudgetTooLarge { requested: i64, max: u32 },
}

pub type PlanResult<T> = Result<T, PlanError>;
