//! The `OutputWriter` trait implemented by all backend writers.

use crate::{EgoTrajectoryRow, OutputResult, TickSummaryRow, TrafficSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter {
    /// Write one committed ego state.
    fn write_ego(&mut self, row: &EgoTrajectoryRow) -> OutputResult<()>;

    /// Write a batch of traffic snapshots.
    fn write_traffic(&mut self, rows: &[TrafficSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
