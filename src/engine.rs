// src/engine.rs
use log::{debug, info, warn};
use crate::config::EngineConfig;
use crate::drivers::{PipelineReport, PulseError, SampleBuffer, ScoreSmoother, ScoringPipeline, WindowStats};
use crate::types::EngineOutput;
/// One detection session: owns the sample window and the displayed score.
///
/// Call [`tick`](Self::tick) once per captured frame. Nothing here sleeps or
/// spawns; scheduling belongs to the caller.
pub struct ThreatScoreEngine {
    config: EngineConfig,
    buffer: SampleBuffer,
    pipeline: ScoringPipeline,
    smoother: ScoreSmoother,
    last_report: Option<PipelineReport>,
    faults: u64,
    rejected: u64,
}
impl ThreatScoreEngine {
    pub fn new(config: EngineConfig) -> Result<Self, PulseError> {
        config.validate()?;
        let buffer = SampleBuffer::with_capacity(config.capacity)?;
        let pipeline = ScoringPipeline::new(&config)?;
        let smoother = ScoreSmoother::new(config.smoothing_factor)?;
        let (low, high) = pipeline.filter_spec().normalized_band();
        info!(
            "engine ready: window {} samples @ {} Hz, band {:.3}-{:.3} of nyquist, alpha {}",
            config.capacity, config.sample_rate_hz, low, high, config.smoothing_factor
        );
        Ok(Self {
            config,
            buffer,
            pipeline,
            smoother,
            last_report: None,
            faults: 0,
            rejected: 0,
        })
    }
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }
    pub fn display_score(&self) -> f64 {
        self.smoother.value()
    }
    /// Most recent successful pipeline pass.
    pub fn last_report(&self) -> Option<&PipelineReport> {
        self.last_report.as_ref()
    }
    /// Ticks that degraded to a zero score because the window was unusable.
    pub fn faults(&self) -> u64 {
        self.faults
    }
    /// Samples dropped for being NaN or infinite.
    pub fn rejected_samples(&self) -> u64 {
        self.rejected
    }
    pub fn tick(&mut self, sample: Option<f64>) -> EngineOutput {
        let Some(sample) = sample else {
            return EngineOutput::Obscured;
        };
        if !sample.is_finite() {
            self.rejected += 1;
            warn!("dropping non-finite sample {sample}; treating tick as obscured");
            return EngineOutput::Obscured;
        }
        let was_full = self.buffer.is_full();
        self.buffer.push(sample);
        if !self.buffer.is_full() {
            return EngineOutput::Calibrating {
                percent: self.buffer.fill_percent(),
            };
        }
        if !was_full {
            info!("calibration complete after {} samples", self.buffer.len());
        }
        let window = self.buffer.snapshot();
        match self.pipeline.run(&window) {
            Ok(report) => self.score(report),
            Err(err) => {
                self.faults += 1;
                warn!(
                    "scoring fault #{}: {err} [{}]; reporting zero score",
                    self.faults,
                    WindowStats::of(&window)
                );
                EngineOutput::Scored {
                    probability: 0,
                    score: 0,
                }
            }
        }
    }
    /// Start over as if a new session had begun.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.smoother.reset();
        self.last_report = None;
        self.faults = 0;
        self.rejected = 0;
        info!("session reset");
    }
    fn score(&mut self, report: PipelineReport) -> EngineOutput {
        let display = self.smoother.update(report.raw_probability);
        debug_assert!(
            (0.0..=100.0).contains(&display),
            "display score left [0, 100]: {display}"
        );
        match &report.spectrum {
            Some(spectrum) => debug!(
                "energy {:.4} raw {:.2} display {:.2} peak {:.2} Hz ({:.0} bpm, {:.0}% in band)",
                report.energy,
                report.raw_probability,
                display,
                spectrum.dominant_hz,
                spectrum.bpm,
                spectrum.band_power_ratio * 100.0
            ),
            None => debug!(
                "energy {:.4} raw {:.2} display {:.2} (no spectral peak)",
                report.energy, report.raw_probability, display
            ),
        }
        let output = EngineOutput::Scored {
            probability: to_percent(report.raw_probability),
            score: to_percent(display),
        };
        self.last_report = Some(report);
        output
    }
}
fn to_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
#[cfg(test)]
mod tests {
    use super::*;
    fn small_engine(capacity: usize) -> ThreatScoreEngine {
        ThreatScoreEngine::new(EngineConfig {
            capacity,
            ..EngineConfig::default()
        })
        .unwrap()
    }
    #[test]
    fn refuses_bad_config_up_front() {
        let err = ThreatScoreEngine::new(EngineConfig {
            smoothing_factor: 2.0,
            ..EngineConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, PulseError::InvalidSmoothingFactor(_)));
    }
    #[test]
    fn calibrates_until_full() {
        let mut engine = small_engine(150);
        for k in 1..150usize {
            let out = engine.tick(Some(128.0));
            assert_eq!(
                out,
                EngineOutput::Calibrating {
                    percent: (100 * k / 150) as u8
                }
            );
            assert!(engine.last_report().is_none());
            assert_eq!(engine.display_score(), 0.0);
        }
        assert!(matches!(engine.tick(Some(128.0)), EngineOutput::Scored { .. }));
    }
    #[test]
    fn constant_feed_scores_flat_signal() {
        let mut engine = small_engine(150);
        for _ in 0..149 {
            engine.tick(Some(128.0));
        }
        let out = engine.tick(Some(128.0));
        // raw 87.5 → 88, display 0.15 * 87.5 = 13.125 → 13
        assert_eq!(
            out,
            EngineOutput::Scored {
                probability: 88,
                score: 13
            }
        );
        assert!((engine.display_score() - 13.125).abs() < 1e-9);
    }
    #[test]
    fn obscured_tick_touches_nothing() {
        let mut engine = small_engine(10);
        for v in 0..10 {
            engine.tick(Some(100.0 + v as f64));
        }
        let before = engine.buffer().snapshot();
        let score = engine.display_score();
        assert_eq!(engine.tick(None), EngineOutput::Obscured);
        assert_eq!(engine.buffer().snapshot(), before);
        assert_eq!(engine.display_score(), score);
    }
    #[test]
    fn non_finite_samples_are_rejected() {
        let mut engine = small_engine(10);
        engine.tick(Some(1.0));
        assert_eq!(engine.tick(Some(f64::NAN)), EngineOutput::Obscured);
        assert_eq!(engine.tick(Some(f64::INFINITY)), EngineOutput::Obscured);
        assert_eq!(engine.buffer().len(), 1);
        assert_eq!(engine.rejected_samples(), 2);
    }
    #[test]
    fn degenerate_window_degrades_to_zero_without_touching_score() {
        let mut engine = small_engine(20);
        for _ in 0..20 {
            engine.tick(Some(128.0));
        }
        let score = engine.display_score();
        assert!(score > 0.0);
        let mut last = None;
        for _ in 0..20 {
            last = Some(engine.tick(Some(1.5e308)));
        }
        assert_eq!(
            last,
            Some(EngineOutput::Scored {
                probability: 0,
                score: 0
            })
        );
        assert!(engine.faults() > 0);
        assert!(engine.display_score() >= score);
        assert!(engine.display_score() <= 100.0);
    }
    #[test]
    fn reset_starts_a_new_session() {
        let mut engine = small_engine(10);
        for _ in 0..12 {
            engine.tick(Some(50.0));
        }
        assert!(engine.display_score() > 0.0);
        engine.reset();
        assert!(engine.buffer().is_empty());
        assert_eq!(engine.display_score(), 0.0);
        assert_eq!(engine.tick(Some(50.0)), EngineOutput::Calibrating { percent: 10 });
    }
    #[test]
    fn to_percent_rounds_half_away_from_zero() {
        assert_eq!(to_percent(87.5), 88);
        assert_eq!(to_percent(13.125), 13);
        assert_eq!(to_percent(0.0), 0);
        assert_eq!(to_percent(100.0), 100);
    }
}
