use crate::drivers::stats::{median, std_dev};
use crate::drivers::PulseError;
/// Single global Hampel-style pass: anything further than `sigmas` standard
/// deviations from the window median is replaced by the median.
///
/// This is deliberately coarse. It knocks out rare capture glitches (a frame
/// with a blown-out pixel) and leaves genuine slow drift alone.
#[derive(Clone, Copy, Debug)]
pub struct OutlierSuppressor {
    sigmas: f64,
}
impl OutlierSuppressor {
    pub fn new(sigmas: f64) -> Result<Self, PulseError> {
        if !sigmas.is_finite() || sigmas <= 0.0 {
            return Err(PulseError::InvalidParameter {
                name: "outlier_sigmas",
                value: sigmas,
            });
        }
        Ok(Self { sigmas })
    }
    pub fn apply(&self, data: &[f64]) -> Vec<f64> {
        let median = median(data);
        let threshold = self.sigmas * std_dev(data);
        // Strict comparison: a constant window (threshold 0) is left untouched.
        data.iter()
            .map(|&v| if (v - median).abs() > threshold { median } else { v })
            .collect()
    }
}
impl Default for OutlierSuppressor {
    fn default() -> Self {
        Self { sigmas: 3.0 }
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    #[test]
    fn single_spike_is_restored_to_median() {
        let mut data = vec![100.0; 150];
        data[70] = 1000.0;
        let cleaned = OutlierSuppressor::default().apply(&data);
        assert_eq!(cleaned.len(), 150);
        assert!(cleaned.iter().all(|&v| v == 100.0));
    }
    #[test]
    fn constant_window_is_untouched() {
        let data = vec![42.0; 20];
        assert_eq!(OutlierSuppressor::default().apply(&data), data);
    }
    #[test]
    fn second_pass_changes_nothing() {
        let mut data: Vec<f64> = (0..150)
            .map(|i| 100.0 + 10.0 * (2.0 * PI * i as f64 / 30.0).sin())
            .collect();
        data[40] = 1000.0;
        let suppressor = OutlierSuppressor::default();
        let once = suppressor.apply(&data);
        assert!(once[40] < 200.0);
        let changed = once.iter().zip(&data).filter(|(a, b)| a != b).count();
        assert_eq!(changed, 1);
        assert_eq!(suppressor.apply(&once), once);
    }
    #[test]
    fn rejects_non_positive_sigmas() {
        assert!(OutlierSuppressor::new(0.0).is_err());
        assert!(OutlierSuppressor::new(f64::NAN).is_err());
        assert!(OutlierSuppressor::new(2.5).is_ok());
    }
}
