//! Plain data row types written by output backends.

use hp_core::{Maneuver, VehicleSnapshot};

/// The committed ego state at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EgoTrajectoryRow {
    pub tick:      u64,
    pub time_secs: f64,
    pub lane:      u32,
    pub s:         f64,
    pub v:         f64,
    pub a:         f64,
    pub state:     Maneuver,
    /// Weighted cost of the chosen trajectory.
    pub cost:      f64,
}

/// One traffic vehicle at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficSnapshotRow {
    pub vehicle_id: u32,
    pub tick:       u64,
    pub lane:       u32,
    pub s:          f64,
    pub v:          f64,
    pub a:          f64,
    pub state:      Maneuver,
}

impl TrafficSnapshotRow {
    pub fn new(vehicle_id: u32, tick: u64, snapshot: &VehicleSnapshot) -> Self {
        Self {
            vehicle_id,
            tick,
            lane:  snapshot.lane,
            s:     snapshot.s,
            v:     snapshot.v,
            a:     snapshot.a,
            state: snapshot.state,
        }
    }
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub time_secs:        f64,
    pub traffic_vehicles: u64,
    /// Feasible candidate maneuvers the ego scored.
    pub candidates:       u64,
    /// The ego fell back to constant speed.
    pub fallback:         bool,
}
