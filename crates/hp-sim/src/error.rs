use hp_core::HpError;
use hp_planner::PlannerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match traffic count {expected}")]
    TrafficCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("planner error: {0}")]
    Planner(#[from] PlannerError),

    #[error(transparent)]
    Core(#[from] HpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
