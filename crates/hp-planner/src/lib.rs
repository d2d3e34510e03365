//! `hp-planner`: the behavioral decision layer of the highway planner.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | [`config`]     | `PlannerConfig`, `CostWeights`: tunables fixed by `configure`    |
//! | [`fsm`]        | `successor_states`: the maneuver transition table                |
//! | [`scan`]       | `PredictionSet`, nearest ahead/behind, lane speed, occupancy     |
//! | [`kinematics`] | `solve`: next (s, v, a) in a lane                                |
//! | [`trajectory`] | `Trajectory` and the per-maneuver generator                      |
//! | [`cost`]       | weighted cost terms, `TrajectoryData`, `CostBreakdown`           |
//! | [`planner`]    | `Planner`: choose / realize / predict                            |
//! | [`error`]      | `PlannerError`, `PlannerResult<T>`                               |
//!
//! # Design notes
//!
//! One planning tick runs one way through the modules:
//!
//! 1. [`fsm::successor_states`] lists the legal next maneuvers.
//! 2. [`trajectory::generate`] builds a two-point trajectory per maneuver,
//!    returning `None` when the maneuver is infeasible this tick.
//! 3. [`cost::cost_breakdown`] scores each feasible trajectory.
//! 4. [`Planner::choose_next_state`] returns the arg-min, falling back to a
//!    constant-speed trajectory if nothing was feasible.
//!
//! A planning call never fails and never mutates its inputs; only
//! [`Planner::realize_next_state`] writes to the ego snapshot.

pub mod config;
pub mod cost;
pub mod error;
pub mod fsm;
pub mod kinematics;
pub mod planner;
pub mod scan;
pub mod trajectory;

#[cfg(test)]
mod tests;

pub use config::{CostWeights, PlannerConfig};
pub use cost::{CostBreakdown, CostTerm, TrajectoryData, calculate_cost, cost_breakdown, logistic};
pub use error::{PlannerError, PlannerResult};
pub use fsm::successor_states;
pub use kinematics::{Kinematics, solve};
pub use planner::{Candidate, Decision, Planner};
pub use scan::PredictionSet;
pub use trajectory::{Trajectory, generate};
