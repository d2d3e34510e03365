//! Next-tick kinematics for the ego vehicle in a given lane.

use hp_core::VehicleSnapshot;

use crate::PlannerConfig;
use crate::scan::{PredictionSet, vehicle_ahead, vehicle_behind};

/// Position, velocity and acceleration one tick ahead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub s: f64,
    pub v: f64,
    pub a: f64,
}

impl Kinematics {
    /// Snapshot in `lane` carrying these kinematics.
    #[inline]
    pub fn into_snapshot(self, lane: u32, state: hp_core::Maneuver) -> VehicleSnapshot {
        VehicleSnapshot::new(lane, self.s, self.v, self.a, state)
    }
}

/// Feasible kinematics for `ego` in `lane` one tick from now.
///
/// Picks the highest velocity that respects the lead vehicle, the
/// preferred buffer and the target speed, then limits the change to what
/// `max_acceleration` allows in one tick.  The result always satisfies
/// `0 <= v <= target_speed` and `|v - ego.v| <= max_acceleration * dt`
/// whenever `ego.v` itself lies in `[0, target_speed]`.
pub fn solve(
    config:      &PlannerConfig,
    predictions: &PredictionSet,
    lane:        u32,
    ego:         &VehicleSnapshot,
) -> Kinematics {
    let dt = config.timestep;
    let accel_limited = config.max_velocity_from(ego.v);

    let desired = match vehicle_ahead(predictions, lane, ego.s, config.goal_s) {
        // Boxed in: never close on the leader.
        Some(ahead) if vehicle_behind(predictions, lane, ego.s).is_some() => ahead.v,
        Some(ahead) => {
            let gap_velocity = ahead.v + (ahead.s - ego.s - config.preferred_buffer) / dt - ego.a * dt;
            gap_velocity.min(accel_limited).min(config.target_speed)
        }
        None => accel_limited.min(config.target_speed),
    };

    let upper = accel_limited.min(config.target_speed).max(0.0);
    let lower = (ego.v - config.max_acceleration * dt).max(0.0).min(upper);
    let v = desired.clamp(lower, upper);

    let a = ((v - ego.v) / dt).clamp(-config.max_acceleration, config.max_acceleration);
    let s = ego.s + ego.v * dt + 0.5 * a * dt * dt;

    Kinematics { s, v, a }
}
