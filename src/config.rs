//! Engine configuration.
//!
//! Every tunable of the scoring session lives here rather than as a literal in
//! the stages. Loaded from JSON; missing keys fall back to the defaults below.
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::drivers::buffer::MAX_CAPACITY;
use crate::drivers::{FilterSpec, PulseError};
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window length in samples; scoring starts once it is full.
    pub capacity: usize,
    /// EMA weight given to the newest raw probability, in (0, 1].
    pub smoothing_factor: f64,
    /// Nominal capture rate. Drives the Nyquist normalization of the band.
    pub sample_rate_hz: f64,
    pub low_cut_hz: f64,
    pub high_cut_hz: f64,
    pub filter_order: usize,
    /// Upper bound on the odd-extension padding used by the zero-phase filter.
    pub max_pad_len: usize,
    pub outlier_sigmas: f64,
    pub normalize_epsilon: f64,
    /// Delay between the end of one tick and the start of the next.
    pub tick_interval_ms: u64,
}
impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: 150,
            smoothing_factor: 0.15,
            sample_rate_hz: 30.0,
            low_cut_hz: 0.75,
            high_cut_hz: 3.0,
            filter_order: 3,
            max_pad_len: 45,
            outlier_sigmas: 3.0,
            normalize_epsilon: 1e-6,
            tick_interval_ms: 33,
        }
    }
}
impl EngineConfig {
    pub fn from_json_str(text: &str) -> Result<Self, PulseError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PulseError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
    pub fn to_json(&self) -> Result<String, PulseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
    pub fn validate(&self) -> Result<(), PulseError> {
        if !(2..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(PulseError::InvalidCapacity(self.capacity));
        }
        let alpha = self.smoothing_factor;
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(PulseError::InvalidSmoothingFactor(alpha));
        }
        // Order, sample rate and band edges.
        FilterSpec::from_config(self)?;
        if !self.outlier_sigmas.is_finite() || self.outlier_sigmas <= 0.0 {
            return Err(PulseError::InvalidParameter {
                name: "outlier_sigmas",
                value: self.outlier_sigmas,
            });
        }
        if !self.normalize_epsilon.is_finite() || self.normalize_epsilon <= 0.0 {
            return Err(PulseError::InvalidParameter {
                name: "normalize_epsilon",
                value: self.normalize_epsilon,
            });
        }
        Ok(())
    }
}
