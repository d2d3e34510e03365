//! The `Sim` struct and its tick loop.

use hp_core::{HpError, SimClock, SimConfig, Tick, VehicleId, VehicleRng};
use hp_planner::{Decision, Planner, PredictionSet, Trajectory};
use tracing::{debug, info};

use crate::{SimError, SimObserver, SimResult, TickReport, TrafficModel};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<T>` holds one ego [`Planner`] plus one planner per traffic vehicle and
/// drives the three-phase tick loop:
///
/// 1. **Predict**: every vehicle publishes `generate_predictions(horizon)`.
/// 2. **Decide** (traffic optionally parallel with the `parallel` feature):
///    - The ego runs [`Planner::decide`] against the traffic predictions.
///    - Each traffic vehicle runs [`TrafficModel::step`] against everyone
///      else's predictions, the ego's included.
/// 3. **Commit** (sequential, ego first then ascending `VehicleId`):
///    every planner realizes its chosen trajectory.
///
/// Nobody sees a commit from the same tick, so the order of decisions never
/// matters and runs are reproducible for a given seed.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<T: TrafficModel> {
    /// Global configuration (total ticks, seed, timestep, …).
    pub config: SimConfig,

    /// Simulation clock: tracks the current tick and maps to simulated time.
    pub clock: SimClock,

    /// The planned vehicle.
    pub ego: Planner,

    /// Key under which the ego appears in traffic predictions.  Never
    /// collides with a traffic `VehicleId`.
    pub ego_id: VehicleId,

    /// Traffic planners, indexed by `VehicleId`.
    pub traffic: Vec<Planner>,

    /// Per-vehicle deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: Vec<VehicleRng>,

    /// The traffic model.  Called once per traffic vehicle per tick.
    pub model: T,

    /// Dedicated pool when `config.num_threads` is set.
    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<T: TrafficModel> Sim<T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            start = %self.clock.current_tick,
            end = %self.config.end_tick(),
            traffic = self.traffic.len(),
            "simulation started"
        );
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }
            self.tick_with(now, observer);
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(
            end = %self.clock.current_tick,
            ego_lane = self.ego.ego().lane,
            ego_s = self.ego.ego().s,
            "simulation finished"
        );
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.tick_with(now, observer);
        }
        Ok(())
    }

    /// Look up a vehicle's planner.  `ego_id` resolves to the ego.
    pub fn vehicle(&self, id: VehicleId) -> SimResult<&Planner> {
        if id == self.ego_id {
            return Ok(&self.ego);
        }
        self.traffic
            .get(id.index())
            .ok_or(SimError::Core(HpError::VehicleNotFound(id)))
    }

    /// Predictions the ego plans against: every traffic vehicle's forecast.
    pub fn traffic_predictions(&self) -> PredictionSet {
        let horizon = self.config.prediction_horizon;
        self.traffic
            .iter()
            .enumerate()
            .map(|(i, planner)| (VehicleId(i as u32), planner.generate_predictions(horizon)))
            .collect()
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn tick_with<O: SimObserver>(&mut self, now: Tick, observer: &mut O) {
        observer.on_tick_start(now);
        let report = self.process_tick(now);
        observer.on_tick_end(&report);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(&report, &self.traffic);
        }
        self.clock.advance();
    }

    fn process_tick(&mut self, now: Tick) -> TickReport {
        // ── Phase 1: predictions ──────────────────────────────────────────
        let mut shared = self.traffic_predictions();

        // ── Phase 2: decisions (read-only) ────────────────────────────────
        let decision: Decision = self.ego.decide(&shared);
        debug!(
            tick = %now,
            maneuver = %decision.trajectory.maneuver(),
            cost = decision.cost,
            candidates = decision.candidates,
            "ego decided"
        );

        shared.insert(self.ego_id, self.ego.generate_predictions(self.config.prediction_horizon));
        let trajectories = self.step_traffic(&shared);

        // ── Phase 3: commit ───────────────────────────────────────────────
        //
        // Trajectories arrive in ascending VehicleId order; committing only
        // after every decision keeps results independent of threading.
        self.ego.realize_next_state(&decision.trajectory);
        for (planner, trajectory) in self.traffic.iter_mut().zip(&trajectories) {
            planner.realize_next_state(trajectory);
        }

        TickReport {
            tick:             now,
            time_secs:        self.clock.secs_at(now + 1),
            ego:              decision,
            traffic_vehicles: self.traffic.len(),
        }
    }

    /// Compute every traffic vehicle's next trajectory.
    ///
    /// With the `parallel` Cargo feature, vehicles are stepped on Rayon's
    /// thread pool.
    fn step_traffic(&mut self, shared: &PredictionSet) -> Vec<Trajectory> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let model   = &self.model;
        let traffic = self.traffic.as_slice();
        let rngs    = &mut self.rngs;

        #[cfg(not(feature = "parallel"))]
        {
            traffic
                .iter()
                .zip(rngs.iter_mut())
                .enumerate()
                .map(|(i, (planner, rng))| {
                    let id = VehicleId(i as u32);
                    model.step(id, planner, &others(shared, id), rng)
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut work = || {
                traffic
                    .par_iter()
                    .zip(rngs.par_iter_mut())
                    .enumerate()
                    .map(|(i, (planner, rng))| {
                        let id = VehicleId(i as u32);
                        model.step(id, planner, &others(shared, id), rng)
                    })
                    .collect::<Vec<_>>()
            };
            match &self.pool {
                Some(pool) => pool.install(work),
                None       => work(),
            }
        }
    }
}

/// `shared` without `vehicle`'s own entry.
fn others(shared: &PredictionSet, vehicle: VehicleId) -> PredictionSet {
    shared
        .iter()
        .filter(|&(&id, _)| id != vehicle)
        .map(|(&id, trajectory)| (id, trajectory.clone()))
        .collect()
}
