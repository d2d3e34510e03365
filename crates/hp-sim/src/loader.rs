//! CSV traffic scenario loader.
//!
//! # CSV format
//!
//! One row per traffic vehicle.  `vehicle_id` values must be exactly
//! `0..n` (any order); `lane` is a 0-based lane index, `s` the longitudinal
//! position in metres, `v` and `a` speed and acceleration in SI units.
//!
//! ```csv
//! vehicle_id,lane,s,v,a
//! 0,0,40.0,18.0,0.0
//! 1,1,85.0,15.5,0.0
//! 2,2,-30.0,21.0,0.0
//! ```
//!
//! Loaded vehicles are tagged `Maneuver::ConstantSpeed`.  Lanes are checked
//! against the road only when the planners are built.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use hp_core::VehicleSnapshot;

use crate::SimError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TrafficRecord {
    vehicle_id: u32,
    lane:       u32,
    s:          f64,
    v:          f64,
    a:          f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load traffic starting snapshots from a CSV file.
///
/// Returns a `Vec` indexed by `VehicleId`.
pub fn load_traffic_csv(path: &Path) -> Result<Vec<VehicleSnapshot>, SimError> {
    let file = std::fs::File::open(path)
        .map_err(SimError::Io)?;
    load_traffic_reader(file)
}

/// Like [`load_traffic_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or loading from network
/// streams.
pub fn load_traffic_reader<R: Read>(reader: R) -> Result<Vec<VehicleSnapshot>, SimError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_id: BTreeMap<u32, VehicleSnapshot> = BTreeMap::new();

    for result in csv_reader.deserialize::<TrafficRecord>() {
        let row = result.map_err(|e| SimError::Parse(e.to_string()))?;
        if ![row.s, row.v, row.a].iter().all(|x| x.is_finite()) {
            return Err(SimError::Parse(format!(
                "vehicle {}: s, v and a must be finite",
                row.vehicle_id
            )));
        }
        if row.v < 0.0 {
            return Err(SimError::Parse(format!(
                "vehicle {}: negative speed {}",
                row.vehicle_id, row.v
            )));
        }

        let snapshot = VehicleSnapshot::traffic(row.lane, row.s, row.v, row.a);
        if by_id.insert(row.vehicle_id, snapshot).is_some() {
            return Err(SimError::Parse(format!("duplicate vehicle_id {}", row.vehicle_id)));
        }
    }

    // Ids must be exactly 0..n; the map iterates them in ascending order.
    by_id
        .into_iter()
        .enumerate()
        .map(|(i, (id, snapshot))| {
            if id as usize == i {
                Ok(snapshot)
            } else {
                Err(SimError::Parse(format!("missing vehicle_id {i}")))
            }
        })
        .collect()
}
