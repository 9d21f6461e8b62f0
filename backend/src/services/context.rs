//! Read-only data context shared by every request.

use std::num::NonZeroU32;

use crate::api::{ChannelOption, ChannelOptions, ErrorBarsData, Figure};
use crate::config::DataSettings;
use crate::io::{load_table, LoadResult};
use crate::models::{Channel, ResampledSeries, Selection, TimeIndexedTable};
use crate::transformations::resample;

use super::error_bars::error_bars_view;
use super::plot::plot_figure;
use super::stats::StatsError;

/// Number of channels the error-bars view starts with.
pub const ERROR_BARS_DEFAULT_COUNT: usize = 2;

/// Loaded table and its resampled grid.
///
/// Built once before the server starts; handlers only ever borrow it.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    table: TimeIndexedTable,
    series: ResampledSeries,
}

impl DashboardContext {
    pub fn new(table: TimeIndexedTable, bucket_minutes: NonZeroU32) -> Self {
        let series = resample(&table, bucket_minutes);
        Self { table, series }
    }

    /// Load and resample the configured source file.
    pub fn load(settings: &DataSettings) -> LoadResult<Self> {
        let table = load_table(&settings.path, &settings.timestamp_column, &settings.channels)?;
        Ok(Self::new(table, settings.bucket_minutes))
    }

    pub fn table(&self) -> &TimeIndexedTable {
        &self.table
    }

    pub fn series(&self) -> &ResampledSeries {
        &self.series
    }

    pub fn channels(&self) -> &[Channel] {
        self.table.channels()
    }

    /// Initial selection of the plot view: every channel.
    pub fn plot_default(&self) -> Selection {
        Selection::all(self.channels())
    }

    /// Initial selection of the error-bars view: the first two channels.
    pub fn error_bars_default(&self) -> Selection {
        Selection::first(self.channels(), ERROR_BARS_DEFAULT_COUNT)
    }

    pub fn channel_options(&self) -> ChannelOptions {
        ChannelOptions {
            options: self.channels().iter().map(ChannelOption::from).collect(),
            plot_default: self.plot_default().columns().to_vec(),
            error_bars_default: self.error_bars_default().columns().to_vec(),
        }
    }

    pub fn plot(&self, selection: &Selection) -> Figure {
        plot_figure(&self.series, selection)
    }

    pub fn error_bars(&self, selection: &Selection) -> Result<ErrorBarsData, StatsError> {
        error_bars_view(&self.series, selection)
    }
}
