//! Fixed-cadence resampling of raw readings.
//!
//! Readings are grouped into buckets aligned to the Unix epoch. Configured
//! widths divide 1440 minutes, so every grid also lines up with midnight.

use std::collections::BTreeMap;
use std::num::NonZeroU32;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use log::info;

use crate::models::{ResampledSeries, TimeIndexedTable};

/// Bucket width used by the dashboard unless configured otherwise.
pub const DEFAULT_BUCKET_MINUTES: NonZeroU32 = match NonZeroU32::new(5) {
    Some(v) => v,
    None => unreachable!(),
};

/// Start of the bucket containing `timestamp`.
pub fn bucket_start(timestamp: NaiveDateTime, bucket_minutes: NonZeroU32) -> NaiveDateTime {
    let width = i64::from(bucket_minutes.get()) * 60;
    let offset = timestamp.and_utc().timestamp().rem_euclid(width);
    timestamp
        - TimeDelta::seconds(offset)
        - TimeDelta::nanoseconds(i64::from(timestamp.nanosecond()))
}

/// Running sum and count of the non-missing values of one channel in one bucket.
#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Average every channel over fixed-width buckets.
///
/// The grid runs from the first to the last occupied bucket without holes;
/// buckets with no non-missing value for a channel hold `None` for it.
pub fn resample(table: &TimeIndexedTable, bucket_minutes: NonZeroU32) -> ResampledSeries {
    let width = table.channels().len();
    let mut buckets: BTreeMap<NaiveDateTime, Vec<Accumulator>> = BTreeMap::new();

    for reading in table.readings() {
        let slots = buckets
            .entry(bucket_start(reading.timestamp, bucket_minutes))
            .or_insert_with(|| vec![Accumulator::default(); width]);
        for (slot, value) in slots.iter_mut().zip(&reading.values) {
            if let Some(v) = value {
                slot.push(*v);
            }
        }
    }

    let mut index = Vec::new();
    let mut columns: Vec<Vec<Option<f64>>> = vec![Vec::new(); width];

    if let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) {
        let step = TimeDelta::minutes(i64::from(bucket_minutes.get()));
        let mut current = first;
        while current <= last {
            let slots = buckets.get(&current);
            for (i, column) in columns.iter_mut().enumerate() {
                column.push(slots.and_then(|s| s[i].mean()));
            }
            index.push(current);
            current += step;
        }
    }

    info!(
        "Resampled {} readings into {} buckets of {} minutes",
        table.len(),
        index.len(),
        bucket_minutes
    );

    ResampledSeries::new(bucket_minutes, table.channels().to_vec(), index, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, Reading};
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .and_then(|d| d.and_hms_opt(h, m, s))
            .unwrap()
    }

    fn table(rows: Vec<(NaiveDateTime, Vec<Option<f64>>)>) -> TimeIndexedTable {
        TimeIndexedTable::new(
            vec![Channel::new("a", "A"), Channel::new("b", "B")],
            rows.into_iter().map(|(t, v)| Reading::new(t, v)).collect(),
        )
    }

    #[test]
    fn test_bucket_start() {
        let five = DEFAULT_BUCKET_MINUTES;
        assert_eq!(bucket_start(ts(10, 0, 0), five), ts(10, 0, 0));
        assert_eq!(bucket_start(ts(10, 4, 59), five), ts(10, 0, 0));
        assert_eq!(bucket_start(ts(10, 7, 30), five), ts(10, 5, 0));
        assert_eq!(bucket_start(ts(0, 2, 0), five), ts(0, 0, 0));
    }

    #[test]
    fn test_resample_means_per_bucket() {
        let series = resample(
            &table(vec![
                (ts(10, 0, 0), vec![Some(20.0), Some(1.0)]),
                (ts(10, 1, 0), vec![Some(22.0), None]),
                (ts(10, 6, 0), vec![None, Some(3.0)]),
            ]),
            DEFAULT_BUCKET_MINUTES,
        );

        assert_eq!(series.index(), &[ts(10, 0, 0), ts(10, 5, 0)]);
        assert_eq!(series.column("a").unwrap(), &[Some(21.0), None]);
        assert_eq!(series.column("b").unwrap(), &[Some(1.0), Some(3.0)]);
    }

    #[test]
    fn test_resample_fills_gaps() {
        let series = resample(
            &table(vec![
                (ts(10, 0, 0), vec![Some(1.0), Some(1.0)]),
                (ts(10, 16, 0), vec![Some(2.0), Some(2.0)]),
            ]),
            DEFAULT_BUCKET_MINUTES,
        );

        assert_eq!(series.len(), 4);
        assert_eq!(
            series.column("a").unwrap(),
            &[Some(1.0), None, None, Some(2.0)]
        );
    }

    #[test]
    fn test_resample_empty_table() {
        let series = resample(&table(vec![]), DEFAULT_BUCKET_MINUTES);
        assert!(series.is_empty());
        assert_eq!(series.channels().len(), 2);
    }

    #[test]
    fn test_resample_wider_bucket() {
        let fifteen = NonZeroU32::new(15).unwrap();
        let series = resample(
            &table(vec![
                (ts(10, 0, 0), vec![Some(1.0), None]),
                (ts(10, 10, 0), vec![Some(3.0), None]),
                (ts(10, 20, 0), vec![Some(5.0), None]),
            ]),
            fifteen,
        );

        assert_eq!(series.index(), &[ts(10, 0, 0), ts(10, 15, 0)]);
        assert_eq!(series.column("a").unwrap(), &[Some(2.0), Some(5.0)]);
        assert_eq!(series.column("b").unwrap(), &[None, None]);
    }
}
