//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `ego_trajectory.csv`
//! - `traffic_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{EgoTrajectoryRow, OutputResult, TickSummaryRow, TrafficSnapshotRow};
use crate::writer::OutputWriter;

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    ego:       Writer<File>,
    traffic:   Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut ego = Writer::from_path(dir.join("ego_trajectory.csv"))?;
        ego.write_record(["tick", "time_secs", "lane", "s", "v", "a", "state", "cost"])?;

        let mut traffic = Writer::from_path(dir.join("traffic_snapshots.csv"))?;
        traffic.write_record(["vehicle_id", "tick", "lane", "s", "v", "a", "state"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(["tick", "time_secs", "traffic_vehicles", "candidates", "fallback"])?;

        Ok(Self {
            ego,
            traffic,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_ego(&mut self, row: &EgoTrajectoryRow) -> OutputResult<()> {
        self.ego.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.lane.to_string(),
            row.s.to_string(),
            row.v.to_string(),
            row.a.to_string(),
            row.state.as_str().to_owned(),
            row.cost.to_string(),
        ])?;
        Ok(())
    }

    fn write_traffic(&mut self, rows: &[TrafficSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.traffic.write_record(&[
                row.vehicle_id.to_string(),
                row.tick.to_string(),
                row.lane.to_string(),
                row.s.to_string(),
                row.v.to_string(),
                row.a.to_string(),
                row.state.as_str().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.traffic_vehicles.to_string(),
            row.candidates.to_string(),
            (row.fallback as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.ego.flush()?;
        self.traffic.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
