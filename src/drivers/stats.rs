//! Whole-window statistics shared by the outlier and normalization stages.
//!
//! Standard deviation is the population form (divide by `n`), matching how
//! the window is treated as the complete observation rather than a sample.
use std::fmt;
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}
pub fn std_dev(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mean = mean(data);
    let variance = data
        .iter()
        .map(|v| {
            let delta = v - mean;
            delta * delta
        })
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}
/// Median; even-length input averages the two middle values.
pub fn median(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
/// Compact description of a window, used to give fault logs some context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowStats {
    pub len: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std: f64,
}
impl WindowStats {
    pub fn of(data: &[f64]) -> Self {
        let (min, max) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Self {
            len: data.len(),
            min,
            max,
            mean: mean(data),
            std: std_dev(data),
        }
    }
}
impl fmt::Display for WindowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "len={} min={:.3} max={:.3} mean={:.3} std={:.3}",
            self.len, self.min, self.max, self.mean, self.std
        )
    }
}
