//! Fluent builder for constructing a [`Sim`].

use hp_core::{SimConfig, VehicleId, VehicleRng, VehicleSnapshot};
use hp_planner::{Planner, PlannerConfig};

use crate::{Sim, SimError, SimResult, TrafficModel};

/// Fluent builder for [`Sim<T>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, timestep, …
/// - [`PlannerConfig`] + [`VehicleSnapshot`]: the ego planner and its start
/// - `T: TrafficModel`: how traffic vehicles move
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                          |
/// |--------------------------|----------------------------------|
/// | `.traffic(v)`            | Empty road                       |
/// | `.traffic_config(c)`     | The ego's `PlannerConfig`        |
/// | `.traffic_configs(v)`    | `traffic_config` for every car   |
///
/// # Example
///
/// ```rust,ignore
/// let traffic = load_traffic_csv(Path::new("traffic.csv"))?;
/// let mut sim = SimBuilder::new(config, planner_config, ego, LaneKeepingTraffic)
///     .traffic(traffic)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<T: TrafficModel> {
    config:          SimConfig,
    ego_config:      PlannerConfig,
    ego:             VehicleSnapshot,
    traffic:         Vec<VehicleSnapshot>,
    traffic_config:  Option<PlannerConfig>,
    traffic_configs: Option<Vec<PlannerConfig>>,
    model:           T,
}

impl<T: TrafficModel> SimBuilder<T> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:     SimConfig,
        ego_config: PlannerConfig,
        ego:        VehicleSnapshot,
        model:      T,
    ) -> Self {
        Self {
            config,
            ego_config,
            ego,
            traffic:         Vec::new(),
            traffic_config:  None,
            traffic_configs: None,
            model,
        }
    }

    /// Starting snapshots of the traffic vehicles, indexed by `VehicleId`.
    pub fn traffic(mut self, traffic: Vec<VehicleSnapshot>) -> Self {
        self.traffic = traffic;
        self
    }

    /// One planner configuration shared by every traffic vehicle.
    pub fn traffic_config(mut self, config: PlannerConfig) -> Self {
        self.traffic_config = Some(config);
        self
    }

    /// Per-vehicle planner configurations (must be length `traffic` count).
    ///
    /// Takes precedence over [`traffic_config`](Self::traffic_config).
    pub fn traffic_configs(mut self, configs: Vec<PlannerConfig>) -> Self {
        self.traffic_configs = Some(configs);
        self
    }

    /// Validate inputs, build every planner and RNG, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<T>> {
        let count = self.traffic.len();
        let timestep = self.config.timestep_secs;

        // ── Validate and resolve optional inputs ──────────────────────────
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(SimError::Config(format!("timestep_secs must be positive, got {timestep}")));
        }
        if !u32::try_from(count).is_ok_and(|n| n < u32::MAX) {
            return Err(SimError::Config(format!("too many traffic vehicles: {count}")));
        }

        let configs = match self.traffic_configs {
            Some(c) => {
                if c.len() != count {
                    return Err(SimError::TrafficCountMismatch {
                        expected: count,
                        got:      c.len(),
                        what:     "traffic configs",
                    });
                }
                c
            }
            None => {
                let shared = self.traffic_config.unwrap_or_else(|| self.ego_config.clone());
                vec![shared; count]
            }
        };

        let mismatched = std::iter::once(&self.ego_config)
            .chain(&configs)
            .find(|c| c.timestep != timestep);
        if let Some(c) = mismatched {
            return Err(SimError::Config(format!(
                "planner timestep {} does not match sim timestep {timestep}",
                c.timestep
            )));
        }

        // ── Build planners and RNGs ───────────────────────────────────────
        let ego = Planner::new(self.ego_config, self.ego)?;
        let traffic = configs
            .into_iter()
            .zip(self.traffic)
            .map(|(config, start)| Planner::new(config, start))
            .collect::<Result<Vec<_>, _>>()?;
        let rngs = (0..count as u32)
            .map(|i| VehicleRng::new(self.config.seed, VehicleId(i)))
            .collect();

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(e.to_string()))?,
            ),
            None => None,
        };

        Ok(Sim {
            clock:   self.config.make_clock(),
            config:  self.config,
            ego,
            ego_id:  VehicleId(count as u32),
            traffic,
            rngs,
            model:   self.model,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
