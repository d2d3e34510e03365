//! Two-point trajectories and the per-maneuver generator.

use hp_core::{Maneuver, VehicleSnapshot};

use crate::PlannerConfig;
use crate::kinematics::solve;
use crate::scan::{PredictionSet, lane_occupied, vehicle_behind};

/// The ego vehicle now and one tick ahead under one candidate maneuver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub current:   VehicleSnapshot,
    pub projected: VehicleSnapshot,
}

impl Trajectory {
    #[inline]
    pub fn new(current: VehicleSnapshot, projected: VehicleSnapshot) -> Self {
        Self { current, projected }
    }

    /// The maneuver this trajectory realizes.
    #[inline]
    pub fn maneuver(&self) -> Maneuver {
        self.projected.state
    }

    /// Change in acceleration per second across the step.
    #[inline]
    pub fn jerk(&self, dt: f64) -> f64 {
        (self.projected.a - self.current.a) / dt
    }
}

/// Build the trajectory realizing `maneuver` from `ego`.
///
/// Returns `None` when the maneuver is impossible this tick (a lane change
/// into an occupied slot or off the road).
pub fn generate(
    config:      &PlannerConfig,
    maneuver:    Maneuver,
    predictions: &PredictionSet,
    ego:         &VehicleSnapshot,
) -> Option<Trajectory> {
    match maneuver {
        Maneuver::ConstantSpeed => Some(constant_speed(config, ego)),
        Maneuver::KeepLane => Some(keep_lane(config, predictions, ego)),
        Maneuver::PrepareLaneChangeLeft | Maneuver::PrepareLaneChangeRight => {
            Some(prepare_lane_change(config, maneuver, predictions, ego))
        }
        Maneuver::LaneChangeLeft | Maneuver::LaneChangeRight => {
            lane_change(config, maneuver, predictions, ego)
        }
    }
}

/// Dead-reckoning at the current speed; the projected point drops `a` to 0.
pub fn constant_speed(config: &PlannerConfig, ego: &VehicleSnapshot) -> Trajectory {
    let projected = VehicleSnapshot {
        s: ego.position_at(config.timestep),
        a: 0.0,
        ..*ego
    };
    Trajectory::new(*ego, projected)
}

fn keep_lane(config: &PlannerConfig, predictions: &PredictionSet, ego: &VehicleSnapshot) -> Trajectory {
    let next = solve(config, predictions, ego.lane, ego);
    Trajectory::new(*ego, next.into_snapshot(ego.lane, Maneuver::KeepLane))
}

/// Stay in lane while matching the slower of the current and target lane.
///
/// With a follower in the current lane the current-lane kinematics are kept
/// so the ego does not brake in front of it.
fn prepare_lane_change(
    config:      &PlannerConfig,
    maneuver:    Maneuver,
    predictions: &PredictionSet,
    ego:         &VehicleSnapshot,
) -> Trajectory {
    let current_lane = solve(config, predictions, ego.lane, ego);

    let follower = vehicle_behind(predictions, ego.lane, ego.s).is_some();
    let target = maneuver.target_lane(ego.lane, config.lanes_available);

    let best = match target {
        Some(lane) if !follower => {
            let target_lane = solve(config, predictions, lane, ego);
            if target_lane.v < current_lane.v { target_lane } else { current_lane }
        }
        _ => current_lane,
    };
    Trajectory::new(*ego, best.into_snapshot(ego.lane, maneuver))
}

fn lane_change(
    config:      &PlannerConfig,
    maneuver:    Maneuver,
    predictions: &PredictionSet,
    ego:         &VehicleSnapshot,
) -> Option<Trajectory> {
    let lane = maneuver.target_lane(ego.lane, config.lanes_available)?;
    if lane_occupied(predictions, lane, ego.s, config.lane_change_clearance) {
        return None;
    }
    let next = solve(config, predictions, lane, ego);
    Some(Trajectory::new(*ego, next.into_snapshot(lane, maneuver)))
}
