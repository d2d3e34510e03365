//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `ego_trajectory`, `traffic_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{EgoTrajectoryRow, OutputResult, TickSummaryRow, TrafficSnapshotRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS ego_trajectory (
                 tick      INTEGER PRIMARY KEY,
                 time_secs REAL    NOT NULL,
                 lane      INTEGER NOT NULL,
                 s         REAL    NOT NULL,
                 v         REAL    NOT NULL,
                 a         REAL    NOT NULL,
                 state     TEXT    NOT NULL,
                 cost      REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS traffic_snapshots (
                 vehicle_id INTEGER NOT NULL,
                 tick       INTEGER NOT NULL,
                 lane       INTEGER NOT NULL,
                 s          REAL    NOT NULL,
                 v          REAL    NOT NULL,
                 a          REAL    NOT NULL,
                 state      TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick             INTEGER PRIMARY KEY,
                 time_secs        REAL    NOT NULL,
                 traffic_vehicles INTEGER NOT NULL,
                 candidates       INTEGER NOT NULL,
                 fallback         INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_ego(&mut self, row: &EgoTrajectoryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO ego_trajectory (tick, time_secs, lane, s, v, a, state, cost) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.tick,
                row.time_secs,
                row.lane,
                row.s,
                row.v,
                row.a,
                row.state.as_str(),
                row.cost,
            ],
        )?;
        Ok(())
    }

    fn write_traffic(&mut self, rows: &[TrafficSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO traffic_snapshots \
                 (vehicle_id, tick, lane, s, v, a, state) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.vehicle_id,
                    row.tick,
                    row.lane,
                    row.s,
                    row.v,
                    row.a,
                    row.state.as_str(),
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, time_secs, traffic_vehicles, candidates, fallback) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                row.tick,
                row.time_secs,
                row.traffic_vehicles,
                row.candidates,
                row.fallback as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
