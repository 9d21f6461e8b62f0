//! Error-bars view: rolling-deviation bars plus a comparison of the selected
//! channels.
//!
//! Summary policy by selection size:
//!
//! | selected | summary                                   |
//! |----------|-------------------------------------------|
//! | 0 or 1   | empty                                     |
//! | 2        | paired t-test, statistic and p-value      |
//! | 3+       | repeated-measures ANOVA table             |

use log::debug;

use super::stats::{anova_rm, paired_t_test, LongRecord, StatsError};
use crate::api::{ErrorBars, ErrorBarsData, Figure, Layout, Trace};
use crate::models::{ResampledSeries, Selection};
use crate::transformations::{rolling_std, ROLLING_WINDOW};

/// Label of the within-subject factor in the ANOVA table.
pub const WITHIN_FACTOR: &str = "Sensor";

pub fn error_bars_title(series: &ResampledSeries) -> String {
    format!(
        "IRT Temperatures with Error Bars (Every {} Minutes)",
        series.bucket_minutes()
    )
}

/// Same traces as the plot view, each with a trailing rolling deviation as
/// its error bars.
pub fn error_bars_figure(series: &ResampledSeries, selection: &Selection) -> Figure {
    let mut figure = Figure::new(Layout::dark(error_bars_title(series)));
    for column in selection.columns() {
        if let Some(values) = series.column(column) {
            let bars = ErrorBars::data(rolling_std(values, ROLLING_WINDOW));
            figure.add_trace(
                Trace::lines_markers(column.clone(), series.index().to_vec(), values.to_vec())
                    .with_error_y(bars),
            );
        }
    }
    figure
}

/// Reshape the selected channels into long form, one record per
/// bucket and channel, channel-major.
pub fn melt(series: &ResampledSeries, selection: &Selection) -> Vec<LongRecord> {
    selection
        .columns()
        .iter()
        .filter_map(|column| series.column(column).map(|values| (column, values)))
        .flat_map(|(column, values)| {
            series
                .index()
                .iter()
                .zip(values)
                .map(move |(ts, value)| LongRecord {
                    subject: *ts,
                    level: column.clone(),
                    value: *value,
                })
        })
        .collect()
}

/// Statistical comparison text for the selection.
pub fn comparison_summary(
    series: &ResampledSeries,
    selection: &Selection,
) -> Result<String, StatsError> {
    match selection.columns() {
        [] | [_] => Ok(String::new()),
        [a, b] => {
            let lhs = series.column(a).unwrap_or_default();
            let rhs = series.column(b).unwrap_or_default();
            let result = paired_t_test(lhs, rhs)?;
            debug!("Paired t-test {} vs {} over {} pairs", a, b, result.n);
            Ok(format!(
                "Paired t-test between {} and {}:\nt-stat = {:.4}, p-value = {:.4}",
                a, b, result.statistic, result.p_value
            ))
        }
        _ => {
            let result = anova_rm(&melt(series, selection), WITHIN_FACTOR)?;
            debug!(
                "Repeated-measures ANOVA over {} subjects and {} levels",
                result.subjects, result.levels
            );
            Ok(result.to_string())
        }
    }
}

/// Figure and summary for the error-bars tab.
pub fn error_bars_view(
    series: &ResampledSeries,
    selection: &Selection,
) -> Result<ErrorBarsData, StatsError> {
    Ok(ErrorBarsData {
        figure: error_bars_figure(series, selection),
        summary: comparison_summary(series, selection)?,
    })
}
