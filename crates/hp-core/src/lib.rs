//! `hp-core`: foundational types for the highway behavior planner.
//!
//! This crate is a dependency of every other `hp-*` crate.  It has no `hp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`                                           |
//! | [`maneuver`]    | `Maneuver`: the six behavior states                   |
//! | [`vehicle`]     | `VehicleSnapshot`: one vehicle at one instant         |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (scenarios)      |
//! | [`error`]       | `HpError`                                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod maneuver;
pub mod rng;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::HpError;
pub use ids::VehicleId;
pub use maneuver::Maneuver;
pub use rng::{SimRng, VehicleRng};
pub use time::{SimClock, SimConfig, Tick};
pub use vehicle::VehicleSnapshot;
