use crate::config::EngineConfig;
use crate::drivers::classifier::SpectralEnergyClassifier;
use crate::drivers::error::PulseError;
use crate::drivers::fft::{PulseSpectrum, SpectrumAnalyzer};
use crate::drivers::filter::{FilterSpec, PulseBandpassFilter};
use crate::drivers::normalize::Normalizer;
use crate::drivers::outlier::OutlierSuppressor;
/// Outcome of one full pass over a window.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    pub energy: f64,
    pub raw_probability: f64,
    pub spectrum: Option<PulseSpectrum>,
}
/// Outlier suppression → normalization → zero-phase bandpass → energy classifier.
///
/// Stateless between windows; all session state lives in the engine.
#[derive(Clone, Debug)]
pub struct ScoringPipeline {
    outliers: OutlierSuppressor,
    normalizer: Normalizer,
    bandpass: PulseBandpassFilter,
    classifier: SpectralEnergyClassifier,
    spectrum: SpectrumAnalyzer,
}
impl ScoringPipeline {
    pub fn new(config: &EngineConfig) -> Result<Self, PulseError> {
        let spec = FilterSpec::from_config(config)?;
        // Every scored window is exactly `capacity` samples long.
        let spectrum = SpectrumAnalyzer::with_size(config.capacity, spec.sample_rate_hz, spec.low_hz, spec.high_hz);
        Ok(Self {
            outliers: OutlierSuppressor::new(config.outlier_sigmas)?,
            normalizer: Normalizer::new(config.normalize_epsilon)?,
            bandpass: PulseBandpassFilter::design(spec)?,
            classifier: SpectralEnergyClassifier,
            spectrum,
        })
    }
    pub fn filter_spec(&self) -> &FilterSpec {
        self.bandpass.spec()
    }
    pub fn run(&self, window: &[f64]) -> Result<PipelineReport, PulseError> {
        let cleaned = self.outliers.apply(window);
        let normalized = self.normalizer.apply(&cleaned)?;
        let filtered = self.bandpass.apply(&normalized)?;
        let (energy, raw_probability) = self.classifier.classify(&filtered)?;
        let spectrum = self.spectrum.analyze(&filtered);
        Ok(PipelineReport {
            energy,
            raw_probability,
            spectrum,
        })
    }
}
