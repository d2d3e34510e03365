//! Planner tunables.
//!
//! A `PlannerConfig` is built once with [`PlannerConfig::configure`] (plus
//! optional `with_*` adjustments), validated by [`Planner::new`], and then
//! held immutably by the planner for its whole lifetime.
//!
//! [`Planner::new`]: crate::Planner::new

use crate::{PlannerError, PlannerResult};

// ── CostWeights ───────────────────────────────────────────────────────────────

/// Weight of each cost term in the total.
///
/// The defaults are widely separated orders of magnitude so the weighted sum
/// behaves like a lexicographic order: collision first, then reaching the
/// goal lane, then efficiency.  The comfort terms default to zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CostWeights {
    pub collision:    f64,
    pub reach_goal:   f64,
    pub efficiency:   f64,
    pub buffer:       f64,
    pub acceleration: f64,
    pub jerk:         f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            collision:    1e7,
            reach_goal:   1e6,
            efficiency:   1e5,
            buffer:       0.0,
            acceleration: 0.0,
            jerk:         0.0,
        }
    }
}

// ── PlannerConfig ─────────────────────────────────────────────────────────────

/// Tunables fixed for the lifetime of a [`Planner`][crate::Planner].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlannerConfig {
    /// Cruise speed the ego never exceeds.
    pub target_speed:          f64,
    pub lanes_available:       u32,
    /// Longitudinal position of the goal.  Traffic beyond it is ignored.
    pub goal_s:                f64,
    pub goal_lane:             u32,
    pub max_acceleration:      f64,
    pub max_jerk:              f64,
    /// Desired gap to a lead vehicle while keeping lane.
    pub preferred_buffer:      f64,
    /// Planning tick duration in seconds.
    pub timestep:              f64,
    /// Lateral lane width used by the nearest-distance metric.
    pub lane_width:            f64,
    /// Vehicle radius used by the buffer cost.
    pub vehicle_radius:        f64,
    /// Distances strictly below this count as a collision.
    pub collision_distance:    f64,
    /// A traffic vehicle within this longitudinal distance of the ego in the
    /// target lane blocks a lane change.  `0.0` means an exact `s` match.
    pub lane_change_clearance: f64,
    pub weights:               CostWeights,
}

impl PlannerConfig {
    /// 49.5 mph expressed in m/s.
    pub const DEFAULT_TARGET_SPEED: f64 = 49.5 / 2.24;

    /// Build a configuration for a run towards `goal_s` in `goal_lane`.
    ///
    /// Everything not named here takes its default and can be adjusted with
    /// the `with_*` methods before the planner is constructed.
    pub fn configure(goal_s: f64, max_acceleration: f64, goal_lane: u32) -> Self {
        Self {
            target_speed:          Self::DEFAULT_TARGET_SPEED,
            lanes_available:       3,
            goal_s,
            goal_lane,
            max_acceleration,
            max_jerk:              10.0,
            preferred_buffer:      10.0,
            timestep:              0.02,
            lane_width:            4.0,
            vehicle_radius:        1.5,
            collision_distance:    20.0,
            lane_change_clearance: 0.0,
            weights:               CostWeights::default(),
        }
    }

    pub fn with_target_speed(mut self, target_speed: f64) -> Self {
        self.target_speed = target_speed;
        self
    }

    pub fn with_lanes_available(mut self, lanes_available: u32) -> Self {
        self.lanes_available = lanes_available;
        self
    }

    pub fn with_max_jerk(mut self, max_jerk: f64) -> Self {
        self.max_jerk = max_jerk;
        self
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_lane_change_clearance(mut self, clearance: f64) -> Self {
        self.lane_change_clearance = clearance;
        self
    }

    pub fn with_weights(mut self, weights: CostWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Velocity reachable from `v` in one tick at full acceleration.
    #[inline]
    pub fn max_velocity_from(&self, v: f64) -> f64 {
        v + self.max_acceleration * self.timestep
    }

    /// Reject configurations the planner cannot work with.
    pub fn validate(&self) -> PlannerResult<()> {
        let positive = [
            ("timestep", self.timestep),
            ("target_speed", self.target_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlannerError::Config(format!("{name} must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("max_acceleration", self.max_acceleration),
            ("max_jerk", self.max_jerk),
            ("preferred_buffer", self.preferred_buffer),
            ("lane_width", self.lane_width),
            ("vehicle_radius", self.vehicle_radius),
            ("collision_distance", self.collision_distance),
            ("lane_change_clearance", self.lane_change_clearance),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(PlannerError::Config(format!("{name} must be non-negative, got {value}")));
            }
        }

        if self.goal_s.is_nan() {
            return Err(PlannerError::Config("goal_s must be a number".into()));
        }
        if self.lanes_available == 0 {
            return Err(PlannerError::Config("lanes_available must be at least 1".into()));
        }
        if self.goal_lane >= self.lanes_available {
            return Err(PlannerError::Config(format!(
                "goal_lane {} outside road with {} lanes",
                self.goal_lane, self.lanes_available
            )));
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self::configure(1_000.0, 10.0, 1)
    }
}
