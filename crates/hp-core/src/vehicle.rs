//! Kinematic snapshot of one vehicle at one instant.

use crate::Maneuver;

/// One vehicle (ego or traffic) at one instant, in road (Frenet) coordinates.
///
/// `state` is meaningful only for the ego vehicle; traffic snapshots carry it
/// incidentally (usually `ConstantSpeed`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSnapshot {
    /// Lane index in `[0, lanes_available)`, lane 0 leftmost.
    pub lane:  u32,
    /// Longitudinal position along the road centerline.
    pub s:     f64,
    /// Longitudinal velocity.
    pub v:     f64,
    /// Longitudinal acceleration.
    pub a:     f64,
    pub state: Maneuver,
}

impl VehicleSnapshot {
    #[inline]
    pub fn new(lane: u32, s: f64, v: f64, a: f64, state: Maneuver) -> Self {
        Self { lane, s, v, a, state }
    }

    /// A traffic snapshot tagged `ConstantSpeed`.
    #[inline]
    pub fn traffic(lane: u32, s: f64, v: f64, a: f64) -> Self {
        Self::new(lane, s, v, a, Maneuver::ConstantSpeed)
    }

    /// Position after `dt` seconds of constant acceleration.
    #[inline]
    pub fn position_at(&self, dt: f64) -> f64 {
        self.s + self.v * dt + 0.5 * self.a * dt * dt
    }
}
