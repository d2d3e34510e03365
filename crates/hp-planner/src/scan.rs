//! Scans over the per-tick prediction set.
//!
//! Every scan looks only at each tracked vehicle's near-term snapshot
//! (index 0 of its predicted trajectory); vehicles with an empty prediction
//! are ignored.

use std::collections::BTreeMap;

use hp_core::{VehicleId, VehicleSnapshot};

/// Predicted trajectories of every tracked vehicle, index 0 nearest-term.
///
/// A `BTreeMap` keeps iteration order deterministic across runs.
pub type PredictionSet = BTreeMap<VehicleId, Vec<VehicleSnapshot>>;

/// Near-term snapshot of every tracked vehicle.
pub fn near_term(predictions: &PredictionSet) -> impl Iterator<Item = &VehicleSnapshot> {
    predictions.values().filter_map(|trajectory| trajectory.first())
}

/// Closest vehicle in `lane` strictly ahead of `s` and strictly before
/// `horizon_s`.
pub fn vehicle_ahead(
    predictions: &PredictionSet,
    lane:        u32,
    s:           f64,
    horizon_s:   f64,
) -> Option<VehicleSnapshot> {
    near_term(predictions)
        .filter(|other| other.lane == lane && other.s > s && other.s < horizon_s)
        .min_by(|a, b| a.s.total_cmp(&b.s))
        .copied()
}

/// Closest vehicle in `lane` strictly behind `s`.
pub fn vehicle_behind(predictions: &PredictionSet, lane: u32, s: f64) -> Option<VehicleSnapshot> {
    near_term(predictions)
        .filter(|other| other.lane == lane && other.s < s)
        .max_by(|a, b| a.s.total_cmp(&b.s))
        .copied()
}

/// Traffic speed observed in `lane`.
///
/// `None` means the lane is empty and the caller should assume the target
/// speed.  With several vehicles in the lane the slowest one is reported, so
/// the result does not depend on map order.
pub fn lane_speed(predictions: &PredictionSet, lane: u32) -> Option<f64> {
    near_term(predictions)
        .filter(|other| other.lane == lane)
        .map(|other| other.v)
        .min_by(f64::total_cmp)
}

/// `true` if a tracked vehicle sits in `lane` within `clearance` of `s`.
pub fn lane_occupied(predictions: &PredictionSet, lane: u32, s: f64, clearance: f64) -> bool {
    near_term(predictions).any(|other| other.lane == lane && (other.s - s).abs() <= clearance)
}

/// Proximity metric between `terminal` and the closest tracked vehicle.
///
/// For each vehicle `ds = |Δs|` and `dd = |Δlane| * lane_width`; the metric
/// is `sqrt(ds² - dd²)`, so same-lane proximity dominates.  A pair with
/// `dd > ds` is not a conflict and is skipped.  Returns `f64::INFINITY` when
/// nothing conflicts; never NaN.
pub fn nearest_distance(
    terminal:    &VehicleSnapshot,
    predictions: &PredictionSet,
    lane_width:  f64,
) -> f64 {
    near_term(predictions)
        .filter_map(|other| {
            let ds = (terminal.s - other.s).abs();
            let dd = terminal.lane.abs_diff(other.lane) as f64 * lane_width;
            (dd <= ds).then(|| (ds * ds - dd * dd).sqrt())
        })
        .fold(f64::INFINITY, f64::min)
}
