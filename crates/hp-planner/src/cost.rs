//! Weighted multi-term trajectory cost.
//!
//! Every term is computed from the same [`TrajectoryData`] derived once per
//! trajectory, multiplied by its weight from [`CostWeights`], and summed.
//! Lower is better.  Nothing here mutates the ego or the predictions.
//!
//! [`CostWeights`]: crate::CostWeights

use hp_core::Maneuver;

use crate::PlannerConfig;
use crate::scan::{PredictionSet, lane_speed, nearest_distance};
use crate::trajectory::Trajectory;

/// Maps `x` into (-1, 1); `[0, ∞)` maps into `[0, 1)`.
#[inline]
pub fn logistic(x: f64) -> f64 {
    2.0 / (1.0 + (-x).exp()) - 1.0
}

// ── TrajectoryData ────────────────────────────────────────────────────────────

/// Values shared by all cost terms of one trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryData {
    /// The lane the ego is heading for: the terminal lane shifted by the lane
    /// offset of a terminal prepare state, otherwise the terminal lane.
    pub intended_lane:    u32,
    pub final_lane:       u32,
    pub distance_to_goal: f64,
}

impl TrajectoryData {
    pub fn new(config: &PlannerConfig, trajectory: &Trajectory) -> Self {
        let last = &trajectory.projected;
        let intended_lane = match last.state {
            Maneuver::PrepareLaneChangeLeft | Maneuver::PrepareLaneChangeRight => last
                .state
                .target_lane(last.lane, config.lanes_available)
                .unwrap_or(last.lane),
            _ => last.lane,
        };
        Self {
            intended_lane,
            final_lane:       last.lane,
            distance_to_goal: config.goal_s - last.s,
        }
    }
}

// ── Cost terms ────────────────────────────────────────────────────────────────

/// The independent terms of the total cost.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CostTerm {
    Collision,
    Buffer,
    GoalDistance,
    Inefficiency,
    MaxAcceleration,
    MaxJerk,
}

impl CostTerm {
    pub const ALL: [CostTerm; 6] = [
        CostTerm::Collision,
        CostTerm::Buffer,
        CostTerm::GoalDistance,
        CostTerm::Inefficiency,
        CostTerm::MaxAcceleration,
        CostTerm::MaxJerk,
    ];

    pub fn weight(self, config: &PlannerConfig) -> f64 {
        let w = &config.weights;
        match self {
            CostTerm::Collision       => w.collision,
            CostTerm::Buffer          => w.buffer,
            CostTerm::GoalDistance    => w.reach_goal,
            CostTerm::Inefficiency    => w.efficiency,
            CostTerm::MaxAcceleration => w.acceleration,
            CostTerm::MaxJerk         => w.jerk,
        }
    }

    /// Unweighted value of this term.
    pub fn evaluate(
        self,
        config:      &PlannerConfig,
        trajectory:  &Trajectory,
        predictions: &PredictionSet,
        data:        &TrajectoryData,
    ) -> f64 {
        match self {
            CostTerm::Collision       => collision_cost(config, trajectory, predictions),
            CostTerm::Buffer          => buffer_cost(config, trajectory, predictions),
            CostTerm::GoalDistance    => goal_distance_cost(config, data),
            CostTerm::Inefficiency    => inefficiency_cost(config, predictions, data),
            CostTerm::MaxAcceleration => max_accel_cost(config, trajectory),
            CostTerm::MaxJerk         => max_jerk_cost(config, trajectory),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CostTerm::Collision       => "collision",
            CostTerm::Buffer          => "buffer",
            CostTerm::GoalDistance    => "goal_distance",
            CostTerm::Inefficiency    => "inefficiency",
            CostTerm::MaxAcceleration => "max_accel",
            CostTerm::MaxJerk         => "max_jerk",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// 1 if the closest tracked vehicle is strictly nearer than the collision
/// distance.
pub fn collision_cost(config: &PlannerConfig, trajectory: &Trajectory, predictions: &PredictionSet) -> f64 {
    let nearest = nearest_distance(&trajectory.projected, predictions, config.lane_width);
    if nearest < config.collision_distance { 1.0 } else { 0.0 }
}

/// Grows towards 1 as the gap to the closest vehicle shrinks.
///
/// A zero vehicle radius has no buffer to violate and always costs 0.
pub fn buffer_cost(config: &PlannerConfig, trajectory: &Trajectory, predictions: &PredictionSet) -> f64 {
    if config.vehicle_radius <= 0.0 {
        return 0.0;
    }
    let nearest = nearest_distance(&trajectory.projected, predictions, config.lane_width);
    logistic(2.0 * config.vehicle_radius / nearest)
}

/// Penalizes intended and final lanes away from the goal lane, more strongly
/// as the goal approaches; saturates at 1 at or past the goal.
pub fn goal_distance_cost(config: &PlannerConfig, data: &TrajectoryData) -> f64 {
    if data.distance_to_goal <= 0.0 {
        return 1.0;
    }
    let lane_mismatch = (2.0 * config.goal_lane as f64
        - data.intended_lane as f64
        - data.final_lane as f64)
        .abs();
    1.0 - 2.0 * (-lane_mismatch / data.distance_to_goal).exp()
}

/// Penalizes intended and final lanes whose traffic is slower than the
/// target speed.
pub fn inefficiency_cost(config: &PlannerConfig, predictions: &PredictionSet, data: &TrajectoryData) -> f64 {
    let target = config.target_speed;
    let intended = lane_speed(predictions, data.intended_lane).unwrap_or(target);
    let last = lane_speed(predictions, data.final_lane).unwrap_or(target);
    (2.0 * target - intended - last) / target
}

pub fn max_accel_cost(config: &PlannerConfig, trajectory: &Trajectory) -> f64 {
    if trajectory.projected.a.abs() > config.max_acceleration { 1.0 } else { 0.0 }
}

pub fn max_jerk_cost(config: &PlannerConfig, trajectory: &Trajectory) -> f64 {
    if trajectory.jerk(config.timestep).abs() > config.max_jerk { 1.0 } else { 0.0 }
}

// ── Totals ────────────────────────────────────────────────────────────────────

/// Unweighted value of every term plus the weighted total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub terms: [f64; 6],
    pub total: f64,
}

impl CostBreakdown {
    #[inline]
    pub fn get(&self, term: CostTerm) -> f64 {
        self.terms[term.index()]
    }
}

/// Score `trajectory` term by term.
pub fn cost_breakdown(
    config:      &PlannerConfig,
    predictions: &PredictionSet,
    trajectory:  &Trajectory,
) -> CostBreakdown {
    let data = TrajectoryData::new(config, trajectory);
    let mut terms = [0.0; 6];
    let mut total = 0.0;
    for term in CostTerm::ALL {
        let value = term.evaluate(config, trajectory, predictions, &data);
        terms[term.index()] = value;
        total += term.weight(config) * value;
    }
    CostBreakdown { terms, total }
}

/// Weighted total cost of `trajectory`.
#[inline]
pub fn calculate_cost(config: &PlannerConfig, predictions: &PredictionSet, trajectory: &Trajectory) -> f64 {
    cost_breakdown(config, predictions, trajectory).total
}
