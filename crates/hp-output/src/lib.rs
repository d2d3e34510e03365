//! `hp-output`: simulation output writers for the highway planner.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature   | Backend     | Files created                                                      |
//! |-----------|-------------|--------------------------------------------------------------------|
//! | *(none)*  | CSV         | `ego_trajectory.csv`, `traffic_snapshots.csv`, `tick_summaries.csv` |
//! | `sqlite`  | SQLite      | `output.db`                                                        |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `hp_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hp_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{EgoTrajectoryRow, TickSummaryRow, TrafficSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
