//! Behavior states of the maneuver finite-state machine.
//!
//! # Lane convention
//!
//! Lane 0 is the leftmost lane.  Every *Left* maneuver moves toward lane 0
//! (offset −1) and every *Right* maneuver toward `lanes_available - 1`
//! (offset +1).  The successor enumerator, the trajectory generator and the
//! cost helper data all read the offset from [`Maneuver::lane_offset`], so
//! there is exactly one place that defines the direction.

use std::fmt;
use std::str::FromStr;

use crate::HpError;

/// The maneuver a vehicle is performing (or preparing) this tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Maneuver {
    /// Dead-reckoning at the current speed; also the planner's fallback.
    ConstantSpeed,
    /// Follow the current lane at the best feasible speed.
    #[default]
    KeepLane,
    /// Match speed with the lane to the left before moving over.
    PrepareLaneChangeLeft,
    /// Match speed with the lane to the right before moving over.
    PrepareLaneChangeRight,
    /// Move one lane to the left (instantaneous).
    LaneChangeLeft,
    /// Move one lane to the right (instantaneous).
    LaneChangeRight,
}

impl Maneuver {
    /// All six states, in declaration order.
    pub const ALL: [Maneuver; 6] = [
        Maneuver::ConstantSpeed,
        Maneuver::KeepLane,
        Maneuver::PrepareLaneChangeLeft,
        Maneuver::PrepareLaneChangeRight,
        Maneuver::LaneChangeLeft,
        Maneuver::LaneChangeRight,
    ];

    /// Lane index offset of the lane this maneuver targets.
    ///
    /// `0` for `ConstantSpeed` and `KeepLane`.
    #[inline]
    pub fn lane_offset(self) -> i32 {
        match self {
            Maneuver::PrepareLaneChangeLeft | Maneuver::LaneChangeLeft => -1,
            Maneuver::PrepareLaneChangeRight | Maneuver::LaneChangeRight => 1,
            Maneuver::ConstantSpeed | Maneuver::KeepLane => 0,
        }
    }

    /// The lane this maneuver targets when started from `lane`, or `None` if
    /// that lane would fall outside `[0, lanes_available)`.
    pub fn target_lane(self, lane: u32, lanes_available: u32) -> Option<u32> {
        lane.checked_add_signed(self.lane_offset())
            .filter(|&target| target < lanes_available)
    }

    /// `true` for the two lane-change execution states.
    #[inline]
    pub fn is_lane_change(self) -> bool {
        matches!(self, Maneuver::LaneChangeLeft | Maneuver::LaneChangeRight)
    }

    /// Short code used in CSV/SQLite output.
    pub fn as_str(self) -> &'static str {
        match self {
            Maneuver::ConstantSpeed          => "CS",
            Maneuver::KeepLane               => "KL",
            Maneuver::PrepareLaneChangeLeft  => "PLCL",
            Maneuver::PrepareLaneChangeRight => "PLCR",
            Maneuver::LaneChangeLeft         => "LCL",
            Maneuver::LaneChangeRight        => "LCR",
        }
    }
}

impl fmt::Display for Maneuver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Maneuver {
    type Err = HpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "CS"   => Ok(Maneuver::ConstantSpeed),
            "KL"   => Ok(Maneuver::KeepLane),
            "PLCL" => Ok(Maneuver::PrepareLaneChangeLeft),
            "PLCR" => Ok(Maneuver::PrepareLaneChangeRight),
            "LCL"  => Ok(Maneuver::LaneChangeLeft),
            "LCR"  => Ok(Maneuver::LaneChangeRight),
            other  => Err(HpError::Parse(format!(
                "invalid maneuver {other:?}: expected one of CS, KL, PLCL, PLCR, LCL, LCR"
            ))),
        }
    }
}
