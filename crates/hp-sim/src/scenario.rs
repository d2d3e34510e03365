//! Random traffic scenario generation.
//!
//! Draws starting snapshots from a [`SimRng`] so a scenario is fully
//! determined by its seed.  Vehicles in the same lane keep at least
//! `min_gap` metres between each other and between any `avoid` snapshot
//! (usually the ego start).

use hp_core::{SimRng, VehicleSnapshot};

use crate::{SimError, SimResult};

/// Attempts per vehicle before placement gives up.
const PLACEMENT_ATTEMPTS: usize = 100;

/// Parameters for [`random_traffic`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioSpec {
    pub vehicles: usize,
    pub lanes:    u32,
    /// Half-open range of starting positions (m).
    pub s_min:    f64,
    pub s_max:    f64,
    /// Closed range of starting speeds (m/s).
    pub v_min:    f64,
    pub v_max:    f64,
    /// Minimum same-lane spacing (m).
    pub min_gap:  f64,
}

impl Default for ScenarioSpec {
    fn default() -> Self {
        Self {
            vehicles: 8,
            lanes:    3,
            s_min:    -100.0,
            s_max:    200.0,
            v_min:    12.0,
            v_max:    22.0,
            min_gap:  15.0,
        }
    }
}

impl ScenarioSpec {
    pub fn validate(&self) -> SimResult<()> {
        let finite = [self.s_min, self.s_max, self.v_min, self.v_max, self.min_gap]
            .iter()
            .all(|x| x.is_finite());
        if !finite {
            return Err(SimError::Config("scenario bounds must be finite".into()));
        }
        if self.lanes == 0 {
            return Err(SimError::Config("scenario needs at least one lane".into()));
        }
        if self.s_min >= self.s_max {
            return Err(SimError::Config(format!(
                "empty position range [{}, {})", self.s_min, self.s_max
            )));
        }
        if self.v_min < 0.0 || self.v_min > self.v_max {
            return Err(SimError::Config(format!(
                "invalid speed range [{}, {}]", self.v_min, self.v_max
            )));
        }
        if self.min_gap < 0.0 {
            return Err(SimError::Config("min_gap must be non-negative".into()));
        }
        Ok(())
    }
}

/// Generate `spec.vehicles` traffic snapshots, indexed by `VehicleId`.
///
/// Returns `SimError::Config` if `spec` is invalid or a vehicle cannot be
/// placed without violating `min_gap`.
pub fn random_traffic(
    spec:  &ScenarioSpec,
    avoid: &[VehicleSnapshot],
    rng:   &mut SimRng,
) -> SimResult<Vec<VehicleSnapshot>> {
    spec.validate()?;

    let mut placed: Vec<VehicleSnapshot> = Vec::with_capacity(spec.vehicles);
    for i in 0..spec.vehicles {
        let mut slot = None;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let lane = rng.gen_range(0..spec.lanes);
            let s    = rng.gen_range(spec.s_min..spec.s_max);
            let clear = avoid
                .iter()
                .chain(&placed)
                .all(|other| other.lane != lane || (other.s - s).abs() >= spec.min_gap);
            if clear {
                slot = Some((lane, s));
                break;
            }
        }
        let Some((lane, s)) = slot else {
            return Err(SimError::Config(format!(
                "could not place vehicle {i} with min_gap {} m", spec.min_gap
            )));
        };
        let v = rng.gen_range(spec.v_min..=spec.v_max);
        placed.push(VehicleSnapshot::traffic(lane, s, v, 0.0));
    }
    Ok(placed)
}
