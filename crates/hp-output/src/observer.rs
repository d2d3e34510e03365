//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use hp_core::Tick;
use hp_planner::Planner;
use hp_sim::{SimObserver, TickReport};

use crate::row::{EgoTrajectoryRow, TickSummaryRow, TrafficSnapshotRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes the ego trajectory, traffic snapshots and
/// tick summaries to any [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, report: &TickReport) {
        let row = TickSummaryRow {
            tick:             report.tick.0,
            time_secs:        report.time_secs,
            traffic_vehicles: report.traffic_vehicles as u64,
            candidates:       report.ego.candidates as u64,
            fallback:         report.ego.fallback,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, report: &TickReport, traffic: &[Planner]) {
        let ego = &report.ego.trajectory.projected;
        let row = EgoTrajectoryRow {
            tick:      report.tick.0,
            time_secs: report.time_secs,
            lane:      ego.lane,
            s:         ego.s,
            v:         ego.v,
            a:         ego.a,
            state:     ego.state,
            cost:      report.ego.cost,
        };
        let result = self.writer.write_ego(&row);
        self.store_err(result);

        let rows: Vec<TrafficSnapshotRow> = traffic
            .iter()
            .enumerate()
            .map(|(i, planner)| TrafficSnapshotRow::new(i as u32, report.tick.0, planner.ego()))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_traffic(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
