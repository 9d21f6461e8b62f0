//! Transformations applied between the loaded sheet and the rendered views.

pub mod cleaning;
pub mod resample;
pub mod rolling;

pub use cleaning::mask_sentinel;
pub use resample::{bucket_start, resample, DEFAULT_BUCKET_MINUTES};
pub use rolling::{rolling_std, ROLLING_WINDOW};
