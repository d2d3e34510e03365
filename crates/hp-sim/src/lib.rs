//! `hp-sim`: deterministic multi-vehicle tick loop for the highway planner.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Predict: every planner publishes generate_predictions(horizon).
//!   ② Decide: the ego runs Planner::decide on the traffic predictions;
//!               each traffic vehicle runs TrafficModel::step on everyone
//!               else's (parallel with the `parallel` feature).
//!   ③ Commit: ego first, then traffic in ascending VehicleId order:
//!                 realize_next_state(chosen trajectory)
//! ```
//!
//! # Traffic models
//!
//! | Model                | Behavior                                          |
//! |----------------------|---------------------------------------------------|
//! | `CruiseTraffic`      | Constant speed, ignores everyone                  |
//! | `LaneKeepingTraffic` | Follows its leader, never changes lane            |
//! | `PlanningTraffic`    | Full behavior planner per vehicle                 |
//! | `JitterTraffic<M>`   | Wraps `M`; random brake taps via `VehicleRng`     |
//!
//! # Scenarios
//!
//! Traffic comes from a CSV file ([`load_traffic_csv`]) or is drawn from a
//! seeded `SimRng` ([`random_traffic`]).
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Steps traffic on Rayon's thread pool.                  |
//! | `serde`    | Serde derives on `hp-core` / `hp-planner` types.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hp_core::{Maneuver, SimConfig, VehicleSnapshot};
//! use hp_planner::PlannerConfig;
//! use hp_sim::{LaneKeepingTraffic, NoopObserver, SimBuilder, load_traffic_csv};
//!
//! let traffic = load_traffic_csv(Path::new("traffic.csv"))?;
//! let ego = VehicleSnapshot::new(1, 0.0, 10.0, 0.0, Maneuver::KeepLane);
//! let mut sim = SimBuilder::new(config, PlannerConfig::default(), ego, LaneKeepingTraffic)
//!     .traffic(traffic)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod loader;
pub mod observer;
pub mod scenario;
pub mod sim;
pub mod traffic;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use loader::{load_traffic_csv, load_traffic_reader};
pub use observer::{NoopObserver, SimObserver, TickReport};
pub use scenario::{ScenarioSpec, random_traffic};
pub use sim::Sim;
pub use traffic::{CruiseTraffic, JitterTraffic, LaneKeepingTraffic, PlanningTraffic, TrafficModel};
