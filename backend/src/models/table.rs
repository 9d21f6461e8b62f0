//! In-memory tables: raw readings and the resampled grid derived from them.

use std::num::NonZeroU32;

use chrono::{NaiveDateTime, TimeDelta};

use super::channel::Channel;

/// One row of the source sheet.
///
/// `values` is parallel to the owning table's channel list; `None` marks a
/// blank cell or a sentinel reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: NaiveDateTime,
    pub values: Vec<Option<f64>>,
}

impl Reading {
    pub fn new(timestamp: NaiveDateTime, values: Vec<Option<f64>>) -> Self {
        Self { timestamp, values }
    }
}

/// Raw readings ordered by timestamp.
///
/// Built once at startup and never written afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeIndexedTable {
    channels: Vec<Channel>,
    readings: Vec<Reading>,
}

impl TimeIndexedTable {
    /// Build a table, sorting the readings by timestamp.
    ///
    /// The sort is stable so rows sharing a timestamp keep their file order.
    pub fn new(channels: Vec<Channel>, mut readings: Vec<Reading>) -> Self {
        readings.sort_by_key(|r| r.timestamp);
        Self { channels, readings }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

/// Per-channel means on a fixed-width time grid.
///
/// `index` is strictly increasing with a constant step of `bucket_minutes`;
/// every column has exactly `index.len()` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampledSeries {
    bucket_minutes: NonZeroU32,
    channels: Vec<Channel>,
    index: Vec<NaiveDateTime>,
    columns: Vec<Vec<Option<f64>>>,
}

impl ResampledSeries {
    pub(crate) fn new(
        bucket_minutes: NonZeroU32,
        channels: Vec<Channel>,
        index: Vec<NaiveDateTime>,
        columns: Vec<Vec<Option<f64>>>,
    ) -> Self {
        debug_assert_eq!(channels.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == index.len()));
        Self {
            bucket_minutes,
            channels,
            index,
            columns,
        }
    }

    pub fn bucket_minutes(&self) -> NonZeroU32 {
        self.bucket_minutes
    }

    pub fn bucket_width(&self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.bucket_minutes.get()))
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Bucket start times.
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Values of one channel, aligned with [`ResampledSeries::index`].
    pub fn column(&self, column: &str) -> Option<&[Option<f64>]> {
        self.channels
            .iter()
            .position(|c| c.column == column)
            .map(|i| self.columns[i].as_slice())
    }

    /// Turn the grid back into a raw table, one reading per bucket.
    ///
    /// Resampling the result with the same bucket width yields this series.
    pub fn to_table(&self) -> TimeIndexedTable {
        let readings = self
            .index
            .iter()
            .enumerate()
            .map(|(row, ts)| {
                Reading::new(*ts, self.columns.iter().map(|col| col[row]).collect())
            })
            .collect();
        TimeIndexedTable::new(self.channels.clone(), readings)
    }
}
