//! The planner orchestrator: one instance per planned vehicle.

use hp_core::{HpError, Maneuver, VehicleSnapshot};
use tracing::{debug, trace, warn};

use crate::cost::{CostBreakdown, CostTerm, cost_breakdown};
use crate::fsm::successor_states;
use crate::scan::PredictionSet;
use crate::trajectory::{self, Trajectory};
use crate::{PlannerConfig, PlannerResult};

/// A feasible maneuver together with its trajectory and score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub maneuver:   Maneuver,
    pub trajectory: Trajectory,
    pub cost:       CostBreakdown,
}

/// Outcome of one planning call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub trajectory: Trajectory,
    /// Weighted cost of `trajectory`.
    pub cost:       f64,
    /// How many candidate maneuvers were feasible.
    pub candidates: usize,
    /// `true` if no candidate was feasible and the constant-speed fallback
    /// was returned.
    pub fallback:   bool,
}

/// Behavior planner for one vehicle.
///
/// Holds an immutable [`PlannerConfig`] and the vehicle's persistent
/// snapshot.  Planning calls only read; [`realize_next_state`] is the single
/// writer.
///
/// [`realize_next_state`]: Planner::realize_next_state
#[derive(Debug, Clone)]
pub struct Planner {
    config: PlannerConfig,
    ego:    VehicleSnapshot,
}

impl Planner {
    /// Validate `config` and place the vehicle at `ego`.
    pub fn new(config: PlannerConfig, ego: VehicleSnapshot) -> PlannerResult<Self> {
        config.validate()?;
        if ego.lane >= config.lanes_available {
            return Err(HpError::LaneOutOfRange {
                lane:            ego.lane,
                lanes_available: config.lanes_available,
            }
            .into());
        }
        Ok(Self { config, ego })
    }

    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The vehicle's current committed snapshot.
    #[inline]
    pub fn ego(&self) -> &VehicleSnapshot {
        &self.ego
    }

    /// Legal next maneuvers from the current state.
    pub fn successor_states(&self) -> Vec<Maneuver> {
        successor_states(self.ego.state, self.ego.lane, self.config.lanes_available)
    }

    /// Trajectory for `maneuver`, or `None` if it is infeasible this tick.
    pub fn generate_trajectory(&self, maneuver: Maneuver, predictions: &PredictionSet) -> Option<Trajectory> {
        trajectory::generate(&self.config, maneuver, predictions, &self.ego)
    }

    /// Weighted cost of `trajectory` against `predictions`.
    pub fn cost(&self, predictions: &PredictionSet, trajectory: &Trajectory) -> f64 {
        cost_breakdown(&self.config, predictions, trajectory).total
    }

    /// Every feasible successor with its score, in successor order.
    pub fn evaluate(&self, predictions: &PredictionSet) -> Vec<Candidate> {
        self.successor_states()
            .into_iter()
            .filter_map(|maneuver| {
                let trajectory = self.generate_trajectory(maneuver, predictions)?;
                let cost = cost_breakdown(&self.config, predictions, &trajectory);
                debug!(
                    maneuver = %maneuver,
                    total = cost.total,
                    collision = cost.get(CostTerm::Collision),
                    goal = cost.get(CostTerm::GoalDistance),
                    inefficiency = cost.get(CostTerm::Inefficiency),
                    "candidate scored"
                );
                Some(Candidate { maneuver, trajectory, cost })
            })
            .collect()
    }

    /// Pick the lowest-cost maneuver; ties go to the earlier successor.
    ///
    /// Never fails: with no feasible candidate the constant-speed trajectory
    /// is returned and `fallback` is set.
    pub fn decide(&self, predictions: &PredictionSet) -> Decision {
        self.select(&self.evaluate(predictions), predictions)
    }

    /// Arg-min over `candidates`, falling back to constant speed when the
    /// slice is empty.
    pub fn select(&self, candidates: &[Candidate], predictions: &PredictionSet) -> Decision {
        let best = candidates
            .iter()
            .min_by(|a, b| a.cost.total.total_cmp(&b.cost.total));

        let Some(best) = best else {
            warn!(state = %self.ego.state, lane = self.ego.lane, "no feasible maneuver, holding speed");
            let trajectory = trajectory::constant_speed(&self.config, &self.ego);
            return Decision {
                cost:       self.cost(predictions, &trajectory),
                trajectory,
                candidates: 0,
                fallback:   true,
            };
        };

        trace!(maneuver = %best.maneuver, cost = best.cost.total, "maneuver chosen");
        Decision {
            trajectory: best.trajectory,
            cost:       best.cost.total,
            candidates: candidates.len(),
            fallback:   false,
        }
    }

    /// The minimum-cost trajectory for this tick.
    pub fn choose_next_state(&self, predictions: &PredictionSet) -> Trajectory {
        self.decide(predictions).trajectory
    }

    /// Commit the projected point of `trajectory` as the new ego snapshot.
    pub fn realize_next_state(&mut self, trajectory: &Trajectory) {
        self.ego = trajectory.projected;
    }

    /// Choose and commit in one call.
    pub fn step(&mut self, predictions: &PredictionSet) -> Decision {
        let decision = self.decide(predictions);
        self.realize_next_state(&decision.trajectory);
        decision
    }

    /// Constant-velocity forecast of this vehicle for other planners.
    ///
    /// Element `k` is the state `k + 1` ticks ahead.  The first tick is
    /// covered at the current speed; the forecast speed is then capped at
    /// `target_speed`, and element 0 carries the acceleration that cap
    /// implies.  Later elements have zero acceleration.
    pub fn generate_predictions(&self, horizon: usize) -> Vec<VehicleSnapshot> {
        let dt = self.config.timestep;
        let next_s = self.ego.s + self.ego.v * dt;
        let next_v = self.ego.v.min(self.config.target_speed);
        let next_a = (next_v - self.ego.v) / dt;
        (0..horizon)
            .map(|k| VehicleSnapshot {
                s: next_s + next_v * dt * k as f64,
                v: next_v,
                a: if k == 0 { next_a } else { 0.0 },
                ..self.ego
            })
            .collect()
    }
}
