//! Property tests for bucket resampling.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};
use proptest::prelude::*;

use irt_dashboard::models::{Channel, Reading, TimeIndexedTable};
use irt_dashboard::transformations::{mask_sentinel, resample, DEFAULT_BUCKET_MINUTES};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap()
}

fn value() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        3 => (-40.0f64..60.0).prop_map(Some),
        1 => Just(-9999.0).prop_map(mask_sentinel),
        1 => Just(None),
    ]
}

fn table() -> impl Strategy<Value = TimeIndexedTable> {
    prop::collection::vec((0i64..6 * 3600, value(), value()), 1..60).prop_map(|rows| {
        let readings = rows
            .into_iter()
            .map(|(secs, a, b)| Reading::new(base() + TimeDelta::seconds(secs), vec![a, b]))
            .collect();
        TimeIndexedTable::new(vec![Channel::new("a", "A"), Channel::new("b", "B")], readings)
    })
}

proptest! {
    #[test]
    fn grid_is_aligned_and_continuous(table in table()) {
        let series = resample(&table, DEFAULT_BUCKET_MINUTES);

        prop_assert!(!series.is_empty());
        for ts in series.index() {
            prop_assert_eq!(ts.minute() % 5, 0);
            prop_assert_eq!(ts.second(), 0);
        }
        for pair in series.index().windows(2) {
            prop_assert_eq!(pair[1] - pair[0], TimeDelta::minutes(5));
        }
    }

    #[test]
    fn bucket_mean_lies_within_its_readings(table in table()) {
        let series = resample(&table, DEFAULT_BUCKET_MINUTES);
        let width = series.bucket_width();

        for (row, start) in series.index().iter().enumerate() {
            let raw: Vec<f64> = table
                .readings()
                .iter()
                .filter(|r| r.timestamp >= *start && r.timestamp < *start + width)
                .filter_map(|r| r.values[0])
                .collect();
            match series.column("a").unwrap()[row] {
                None => prop_assert!(raw.is_empty()),
                Some(mean) => {
                    let lo = raw.iter().copied().fold(f64::INFINITY, f64::min);
                    let hi = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    prop_assert!(mean >= lo - 1e-9 && mean <= hi + 1e-9);
                }
            }
        }
    }

    #[test]
    fn no_sentinel_survives(table in table()) {
        let series = resample(&table, DEFAULT_BUCKET_MINUTES);
        for column in ["a", "b"] {
            prop_assert!(series
                .column(column)
                .unwrap()
                .iter()
                .flatten()
                .all(|v| *v > -9999.0));
        }
    }

    #[test]
    fn resampling_is_idempotent(table in table()) {
        let once = resample(&table, DEFAULT_BUCKET_MINUTES);
        let twice = resample(&once.to_table(), DEFAULT_BUCKET_MINUTES);
        prop_assert_eq!(once, twice);
    }
}
