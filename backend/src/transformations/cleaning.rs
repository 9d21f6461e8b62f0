use crate::models::SENTINEL;

/// Turn a raw logger value into a measurement, dropping the `-9999` sentinel
/// and NaN.
pub fn mask_sentinel(value: f64) -> Option<f64> {
    if value.is_nan() || value == SENTINEL {
        None
    } else {
        Some(value)
    }
}
