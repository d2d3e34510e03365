//! Simulation observer trait for progress reporting and data collection.

use hp_core::Tick;
use hp_planner::{Decision, Planner};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick:             Tick,
    /// Simulated time at the end of the tick, when the committed ego
    /// snapshot applies.
    pub time_secs:        f64,
    /// The ego decision; `trajectory.projected` is the committed snapshot.
    pub ego:              Decision,
    pub traffic_vehicles: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: lane change counter
///
/// ```rust,ignore
/// struct LaneChanges(usize);
///
/// impl SimObserver for LaneChanges {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         if report.ego.trajectory.maneuver().is_lane_change() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after every vehicle has committed.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// `traffic` is indexed by `VehicleId` and already reflects this tick's
    /// commits.
    fn on_snapshot(&mut self, _report: &TickReport, _traffic: &[Planner]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
