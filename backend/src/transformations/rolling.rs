/// Number of buckets in the trailing window behind each error bar.
pub const ROLLING_WINDOW: usize = 5;

/// Trailing sample standard deviation (`n - 1` denominator).
///
/// Position `i` covers buckets `i + 1 - window ..= i`. It is `None` while the
/// window is not yet full and whenever any bucket inside it is missing. A
/// window shorter than two buckets has no sample deviation and yields only
/// `None`.
pub fn rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| {
            if window < 2 || i + 1 < window {
                return None;
            }
            values[i + 1 - window..=i]
                .iter()
                .copied()
                .collect::<Option<Vec<f64>>>()
                .map(|w| sample_std(&w))
        })
        .collect()
}

fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (ss / (n - 1.0)).sqrt()
}
