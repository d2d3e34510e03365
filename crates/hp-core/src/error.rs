//! Workspace-wide base error type.
//!
//! Sub-crates define their own error enums and wrap `HpError` as one variant
//! where they need to surface core failures.

use thiserror::Error;

use crate::VehicleId;

/// The top-level error type for `hp-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum HpError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("lane {lane} outside road with {lanes_available} lanes")]
    LaneOutOfRange {
        lane:            u32,
        lanes_available: u32,
    },

    #[error("parse error: {0}")]
    Parse(String),
}
