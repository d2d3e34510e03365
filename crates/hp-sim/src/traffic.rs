//! The `TrafficModel` trait and the built-in traffic behaviors.
//!
//! Every traffic vehicle is an independent [`Planner`] instance; a model
//! decides which trajectory that planner commits each tick.

use hp_core::{Maneuver, VehicleId, VehicleRng, VehicleSnapshot};
use hp_planner::trajectory::constant_speed;
use hp_planner::{Planner, PredictionSet, Trajectory};

use crate::{SimError, SimResult};

/// Chooses the next trajectory of one traffic vehicle.
///
/// `Send + Sync + 'static` so the sim can call it from Rayon workers with the
/// `parallel` feature.  Implementations must not keep per-vehicle state in
/// `self`; anything random goes through the vehicle's own `rng` so results
/// do not depend on thread scheduling.
pub trait TrafficModel: Send + Sync + 'static {
    /// `predictions` holds every other vehicle on the road (the ego
    /// included), never `vehicle` itself.
    fn step(
        &self,
        vehicle:     VehicleId,
        planner:     &Planner,
        predictions: &PredictionSet,
        rng:         &mut VehicleRng,
    ) -> Trajectory;
}

// ── CruiseTraffic ─────────────────────────────────────────────────────────────

/// Dead-reckons at the current speed; ignores everyone else.
#[derive(Debug, Clone, Copy, Default)]
pub struct CruiseTraffic;

impl TrafficModel for CruiseTraffic {
    fn step(&self, _: VehicleId, planner: &Planner, _: &PredictionSet, _: &mut VehicleRng) -> Trajectory {
        constant_speed(planner.config(), planner.ego())
    }
}

// ── LaneKeepingTraffic ────────────────────────────────────────────────────────

/// Stays in lane, following the leader at the preferred buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneKeepingTraffic;

impl TrafficModel for LaneKeepingTraffic {
    fn step(&self, _: VehicleId, planner: &Planner, predictions: &PredictionSet, _: &mut VehicleRng) -> Trajectory {
        planner
            .generate_trajectory(Maneuver::KeepLane, predictions)
            .unwrap_or_else(|| constant_speed(planner.config(), planner.ego()))
    }
}

// ── PlanningTraffic ───────────────────────────────────────────────────────────

/// Runs the full behavior planner, lane changes included.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanningTraffic;

impl TrafficModel for PlanningTraffic {
    fn step(&self, _: VehicleId, planner: &Planner, predictions: &PredictionSet, _: &mut VehicleRng) -> Trajectory {
        planner.decide(predictions).trajectory
    }
}

// ── JitterTraffic ─────────────────────────────────────────────────────────────

/// Wraps another model and randomly taps the brakes.
///
/// Each tick, with probability `brake_probability`, the inner trajectory is
/// replaced by a full-strength braking step in the current lane.
#[derive(Debug, Clone, Copy)]
pub struct JitterTraffic<M: TrafficModel> {
    inner:             M,
    brake_probability: f64,
}

impl<M: TrafficModel> JitterTraffic<M> {
    /// `brake_probability` must lie in `[0, 1]`; anything else (NaN
    /// included) is a `SimError::Config`.
    pub fn new(inner: M, brake_probability: f64) -> SimResult<Self> {
        if !(0.0..=1.0).contains(&brake_probability) {
            return Err(SimError::Config(format!(
                "brake_probability must be in [0, 1], got {brake_probability}"
            )));
        }
        Ok(Self { inner, brake_probability })
    }

    #[inline]
    pub fn brake_probability(&self) -> f64 {
        self.brake_probability
    }
}

impl<M: TrafficModel> TrafficModel for JitterTraffic<M> {
    fn step(
        &self,
        vehicle:     VehicleId,
        planner:     &Planner,
        predictions: &PredictionSet,
        rng:         &mut VehicleRng,
    ) -> Trajectory {
        // Draw first so the RNG stream advances identically every tick.
        let brake = rng.gen_bool(self.brake_probability);
        let planned = self.inner.step(vehicle, planner, predictions, rng);
        if !brake {
            return planned;
        }

        let config = planner.config();
        let ego = planner.ego();
        let dt = config.timestep;
        let v = (ego.v - config.max_acceleration * dt).max(0.0);
        let a = (v - ego.v) / dt;
        let projected = VehicleSnapshot {
            s: ego.s + ego.v * dt + 0.5 * a * dt * dt,
            v,
            a,
            ..*ego
        };
        Trajectory::new(*ego, projected)
    }
}
