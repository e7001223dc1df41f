use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;
use rustfft::{num_complex::Complex64, Fft, FftPlanner};
/// Dominant-frequency summary of a filtered window.
///
/// Purely diagnostic: the score never depends on it, but it tells a reader of
/// the debug log whether a scored window carried a pulse-like peak at all.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseSpectrum {
    pub dominant_hz: f64,
    pub bpm: f64,
    /// Share of (non-DC) spectral power that falls inside the pulse band.
    pub band_power_ratio: f64,
}
/// Pulse-band spectrum for windows of one fixed size. The FFT is planned once
/// and reused for every window.
#[derive(Clone)]
pub struct SpectrumAnalyzer {
    fft_size: usize,
    sample_rate_hz: f64,
    low_hz: f64,
    high_hz: f64,
    fft: Arc<dyn Fft<f64>>,
}
impl fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("fft_size", &self.fft_size)
            .field("sample_rate_hz", &self.sample_rate_hz)
            .field("low_hz", &self.low_hz)
            .field("high_hz", &self.high_hz)
            .finish()
    }
}
impl SpectrumAnalyzer {
    pub fn with_size(fft_size: usize, sample_rate_hz: f64, low_hz: f64, high_hz: f64) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size.max(1));
        Self {
            fft_size,
            sample_rate_hz,
            low_hz,
            high_hz,
            fft,
        }
    }
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }
    /// Hann-windowed magnitude spectrum, peak searched inside the pulse band.
    /// Longer inputs are truncated and shorter ones zero-padded to the planned
    /// size. Returns `None` when the window is too short or carries no power.
    pub fn analyze(&self, signal: &[f64]) -> Option<PulseSpectrum> {
        let n = self.fft_size;
        let used = signal.len().min(n);
        if used < 8 || self.sample_rate_hz <= 0.0 {
            return None;
        }
        let mut buffer: Vec<Complex64> = signal[..used]
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let w = 0.5 - 0.5 * (2.0 * PI * i as f64 / (used - 1) as f64).cos();
                Complex64::new(v * w, 0.0)
            })
            .collect();
        buffer.resize(n, Complex64::new(0.0, 0.0));
        self.fft.process(&mut buffer);
        let bin_hz = self.sample_rate_hz / n as f64;
        let half = n / 2;
        let mut total = 0.0;
        let mut in_band = 0.0;
        let mut peak: Option<(usize, f64)> = None;
        for (k, c) in buffer.iter().enumerate().take(half + 1).skip(1) {
            let power = c.norm_sqr();
            total += power;
            let freq = k as f64 * bin_hz;
            if freq >= self.low_hz && freq <= self.high_hz {
                in_band += power;
                if peak.map_or(true, |(_, p)| power > p) {
                    peak = Some((k, power));
                }
            }
        }
        let (peak_bin, peak_power) = peak?;
        if total <= 0.0 || peak_power <= 0.0 || !total.is_finite() {
            return None;
        }
        let dominant_hz = peak_bin as f64 * bin_hz;
        Some(PulseSpectrum {
            dominant_hz,
            bpm: dominant_hz * 60.0,
            band_power_ratio: in_band / total,
        })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn analyzer(size: usize) -> SpectrumAnalyzer {
        SpectrumAnalyzer::with_size(size, 30.0, 0.75, 3.0)
    }
    #[test]
    fn finds_in_band_tone() {
        // 1.2 Hz lands exactly on bin 6 of a 150-sample window at 30 Hz.
        let signal: Vec<f64> = (0..150)
            .map(|i| (2.0 * PI * 1.2 * i as f64 / 30.0).sin())
            .collect();
        let spectrum = analyzer(150).analyze(&signal).unwrap();
        assert!((spectrum.dominant_hz - 1.2).abs() < 1e-9);
        assert!((spectrum.bpm - 72.0).abs() < 1e-6);
        assert!(spectrum.band_power_ratio > 0.9);
    }
    #[test]
    fn silent_window_has_no_peak() {
        assert!(analyzer(150).analyze(&[0.0; 150]).is_none());
    }
    #[test]
    fn short_window_is_skipped() {
        assert!(analyzer(150).analyze(&[1.0, -1.0, 1.0]).is_none());
    }
    #[test]
    fn one_plan_serves_every_window() {
        let analyzer = analyzer(150);
        let first: Vec<f64> = (0..150)
            .map(|i| (2.0 * PI * 1.2 * i as f64 / 30.0).sin())
            .collect();
        let second: Vec<f64> = (0..150)
            .map(|i| (2.0 * PI * 2.0 * i as f64 / 30.0).sin())
            .collect();
        assert!((analyzer.analyze(&first).unwrap().dominant_hz - 1.2).abs() < 1e-9);
        assert!((analyzer.analyze(&second).unwrap().dominant_hz - 2.0).abs() < 1e-9);
        assert!((analyzer.clone().analyze(&first).unwrap().bpm - 72.0).abs() < 1e-6);
    }
    #[test]
    fn short_input_is_zero_padded_to_plan() {
        let signal: Vec<f64> = (0..120)
            .map(|i| (2.0 * PI * 1.5 * i as f64 / 30.0).sin())
            .collect();
        let spectrum = analyzer(150).analyze(&signal).unwrap();
        // 1.5 Hz sits on bin 7.5 of the padded plan; the peak lands next to it.
        assert!((spectrum.dominant_hz - 1.5).abs() <= 0.2 + 1e-9);
    }
}
