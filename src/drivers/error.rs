use thiserror::Error;
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("buffer capacity must be within 2..=1048576 samples, got {0}")]
    InvalidCapacity(usize),
    #[error("smoothing factor must be within (0, 1], got {0}")]
    InvalidSmoothingFactor(f64),
    #[error("sample rate must be greater than zero, got {0}")]
    InvalidSampleRate(f64),
    #[error("filter order must be within 1..=8, got {0}")]
    InvalidFilterOrder(usize),
    #[error("cutoffs must satisfy 0 < low < high < nyquist: low {low_hz} Hz, high {high_hz} Hz, nyquist {nyquist_hz} Hz")]
    InvalidCutoff {
        low_hz: f64,
        high_hz: f64,
        nyquist_hz: f64,
    },
    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("signal too short: got {len} samples, need at least {required}")]
    SignalTooShort { len: usize, required: usize },
    #[error("degenerate signal in {stage}: {reason}")]
    DegenerateSignal { stage: &'static str, reason: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),
}
impl PulseError {
    pub(crate) fn degenerate(stage: &'static str, reason: impl Into<String>) -> Self {
        PulseError::DegenerateSignal {
            stage,
            reason: reason.into(),
        }
    }
    /// True for failures that can only come from construction or config loading.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            PulseError::SignalTooShort { .. } | PulseError::DegenerateSignal { .. }
        )
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn taxonomy_separates_tick_faults_from_configuration() {
        assert!(PulseError::InvalidCapacity(0).is_configuration());
        assert!(PulseError::Config("bad".into()).is_configuration());
        assert!(!PulseError::degenerate("normalize", "std is NaN").is_configuration());
        assert!(!PulseError::SignalTooShort { len: 1, required: 2 }.is_configuration());
    }
    #[test]
    fn messages_name_the_stage() {
        let err = PulseError::degenerate("bandpass", "output not finite");
        assert_eq!(
            err.to_string(),
            "degenerate signal in bandpass: output not finite"
        );
    }
}
