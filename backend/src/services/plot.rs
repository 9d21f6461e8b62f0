use crate::api::{Figure, Layout, Trace};
use crate::models::{ResampledSeries, Selection};

/// Title of the plain temperature chart.
pub fn plot_title(series: &ResampledSeries) -> String {
    format!("IRT Temperatures (Every {} Minutes)", series.bucket_minutes())
}

/// One line+marker trace per selected channel.
///
/// An empty selection gives a figure without traces.
pub fn plot_figure(series: &ResampledSeries, selection: &Selection) -> Figure {
    let mut figure = Figure::new(Layout::dark(plot_title(series)));
    for column in selection.columns() {
        if let Some(values) = series.column(column) {
            figure.add_trace(Trace::lines_markers(
                column.clone(),
                series.index().to_vec(),
                values.to_vec(),
            ));
        }
    }
    figure
}
