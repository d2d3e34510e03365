//! The maneuver finite-state machine.
//!
//! Lane changes complete within a single tick, so `LaneChangeLeft` and
//! `LaneChangeRight` always collapse back to `KeepLane`.  Left moves toward
//! lane 0 and right toward `lanes_available - 1` (see [`Maneuver`]).

use hp_core::Maneuver;

/// Legal next maneuvers from `current` in `lane`.  `KeepLane` is always first.
pub fn successor_states(current: Maneuver, lane: u32, lanes_available: u32) -> Vec<Maneuver> {
    let has_left  = lane > 0;
    let has_right = lane.saturating_add(1) < lanes_available;

    let mut states = vec![Maneuver::KeepLane];
    match current {
        Maneuver::KeepLane => {
            if has_right {
                states.push(Maneuver::PrepareLaneChangeRight);
            }
            if has_left {
                states.push(Maneuver::PrepareLaneChangeLeft);
            }
        }
        Maneuver::PrepareLaneChangeLeft => {
            if has_left {
                states.push(Maneuver::PrepareLaneChangeLeft);
                states.push(Maneuver::LaneChangeLeft);
            }
        }
        Maneuver::PrepareLaneChangeRight => {
            if has_right {
                states.push(Maneuver::PrepareLaneChangeRight);
                states.push(Maneuver::LaneChangeRight);
            }
        }
        Maneuver::LaneChangeLeft | Maneuver::LaneChangeRight | Maneuver::ConstantSpeed => {}
    }
    states
}
