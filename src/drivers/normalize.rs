use crate::drivers::stats::{mean, std_dev};
use crate::drivers::PulseError;
/// Zero-mean, unit-variance rescaling.
///
/// `epsilon` only keeps the division defined on a constant window; it is not
/// a noise floor.
#[derive(Clone, Copy, Debug)]
pub struct Normalizer {
    epsilon: f64,
}
impl Normalizer {
    pub fn new(epsilon: f64) -> Result<Self, PulseError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(PulseError::InvalidParameter {
                name: "normalize_epsilon",
                value: epsilon,
            });
        }
        Ok(Self { epsilon })
    }
    pub fn apply(&self, data: &[f64]) -> Result<Vec<f64>, PulseError> {
        let mean = mean(data);
        let std = std_dev(data);
        if !mean.is_finite() || !std.is_finite() {
            return Err(PulseError::degenerate(
                "normalize",
                format!("window statistics not finite (mean={mean}, std={std})"),
            ));
        }
        let scale = std + self.epsilon;
        Ok(data.iter().map(|v| (v - mean) / scale).collect())
    }
}
impl Default for Normalizer {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::stats;
    #[test]
    fn output_has_zero_mean_and_unit_variance() {
        let data: Vec<f64> = (0..100).map(|i| 120.0 + (i % 7) as f64).collect();
        let out = Normalizer::default().apply(&data).unwrap();
        assert!(stats::mean(&out).abs() < 1e-9);
        assert!((stats::std_dev(&out) - 1.0).abs() < 1e-5);
    }
    #[test]
    fn constant_window_maps_to_zeros() {
        let out = Normalizer::default().apply(&[128.0; 150]).unwrap();
        assert!(out.iter().all(|&v| v == 0.0));
    }
    #[test]
    fn overflowing_window_is_degenerate() {
        let data = vec![1.5e308; 10];
        let err = Normalizer::default().apply(&data).unwrap_err();
        assert!(matches!(
            err,
            PulseError::DegenerateSignal {
                stage: "normalize",
                ..
            }
        ));
    }
}
