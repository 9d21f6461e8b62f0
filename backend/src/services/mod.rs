//! Service layer: builds the views the HTTP layer serves.
//!
//! Services take the shared [`DashboardContext`] and a channel selection and
//! return plain DTOs. They never touch the filesystem after startup.

pub mod context;
pub mod error_bars;
pub mod plot;
pub mod stats;


pub use context::DashboardContext;
pub use error_bars::{comparison_summary, error_bars_figure, error_bars_view, melt, WITHIN_FACTOR};
pub use plot::plot_figure;
pub use stats::{anova_rm, paired_t_test, AnovaRm, LongRecord, PairedTTest, StatsError};
