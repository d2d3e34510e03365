use hp_core::HpError;
use thiserror::Error;

/// Raised only while constructing a planner; a planning call never fails.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("planner configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] HpError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;
