//! Zero-phase Butterworth bandpass for the human pulse band.
//!
//! The design follows the classic analog-prototype route: Butterworth poles on
//! the unit circle, a lowpass-to-bandpass transform around the pre-warped band
//! edges, then the bilinear transform to the z-plane. The resulting transfer
//! function is run forward and backward over an odd-extended copy of the
//! window, with each pass seeded from the filter's step-response steady state
//! so the edges do not ring.
use std::f64::consts::PI;
use rustfft::num_complex::Complex64;
use crate::config::EngineConfig;
use crate::drivers::PulseError;
const MAX_ORDER: usize = 8;
/// Immutable description of the bandpass. Built once per session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSpec {
    pub order: usize,
    pub sample_rate_hz: f64,
    pub low_hz: f64,
    pub high_hz: f64,
    pub max_pad_len: usize,
}
impl FilterSpec {
    pub fn new(
        order: usize,
        sample_rate_hz: f64,
        low_hz: f64,
        high_hz: f64,
    ) -> Result<Self, PulseError> {
        if order == 0 || order > MAX_ORDER {
            return Err(PulseError::InvalidFilterOrder(order));
        }
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(PulseError::InvalidSampleRate(sample_rate_hz));
        }
        let nyquist_hz = sample_rate_hz * 0.5;
        let band_ok = low_hz.is_finite()
            && high_hz.is_finite()
            && low_hz > 0.0
            && low_hz < high_hz
            && high_hz < nyquist_hz;
        if !band_ok {
            return Err(PulseError::InvalidCutoff {
                low_hz,
                high_hz,
                nyquist_hz,
            });
        }
        Ok(Self {
            order,
            sample_rate_hz,
            low_hz,
            high_hz,
            max_pad_len: 45,
        })
    }
    pub fn from_config(config: &EngineConfig) -> Result<Self, PulseError> {
        Ok(Self::new(
            config.filter_order,
            config.sample_rate_hz,
            config.low_cut_hz,
            config.high_cut_hz,
        )?
        .with_max_pad_len(config.max_pad_len))
    }
    pub fn with_max_pad_len(mut self, max_pad_len: usize) -> Self {
        self.max_pad_len = max_pad_len;
        self
    }
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz * 0.5
    }
    /// Band edges as fractions of Nyquist, e.g. (0.05, 0.20) for 0.75–3 Hz at 30 Hz.
    pub fn normalized_band(&self) -> (f64, f64) {
        let nyquist = self.nyquist_hz();
        (self.low_hz / nyquist, self.high_hz / nyquist)
    }
    /// Edge padding used for a window of `len` samples.
    pub fn pad_len(&self, len: usize) -> usize {
        len.saturating_sub(1).min(self.max_pad_len)
    }
}
/// Direct-form coefficients, normalized so that `a[0] == 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferFunction {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}
impl TransferFunction {
    /// Digital Butterworth bandpass with edges given as fractions of Nyquist.
    pub fn butterworth_bandpass(order: usize, low: f64, high: f64) -> Result<Self, PulseError> {
        if order == 0 || order > MAX_ORDER {
            return Err(PulseError::InvalidFilterOrder(order));
        }
        if !(0.0 < low && low < high && high < 1.0) {
            return Err(PulseError::InvalidCutoff {
                low_hz: low,
                high_hz: high,
                nyquist_hz: 1.0,
            });
        }
        // Design at fs = 2 so that Nyquist is 1.
        let fs = 2.0;
        let warped_low = 2.0 * fs * (PI * low / fs).tan();
        let warped_high = 2.0 * fs * (PI * high / fs).tan();
        let bandwidth = warped_high - warped_low;
        let center = (warped_low * warped_high).sqrt();
        let n = order as f64;
        let mut poles = Vec::with_capacity(2 * order);
        for k in 0..order {
            let m = -(n - 1.0) + 2.0 * k as f64;
            let prototype = -Complex64::from_polar(1.0, PI * m / (2.0 * n));
            let scaled = prototype * (bandwidth / 2.0);
            let offset = (scaled * scaled - center * center).sqrt();
            poles.push(scaled + offset);
            poles.push(scaled - offset);
        }
        // The bandpass transform leaves `order` zeros at s = 0.
        let zeros = vec![Complex64::new(0.0, 0.0); order];
        let analog_gain = bandwidth.powi(order as i32);
        let fs2 = Complex64::new(2.0 * fs, 0.0);
        let num: Complex64 = zeros.iter().map(|z| fs2 - z).product();
        let den: Complex64 = poles.iter().map(|p| fs2 - p).product();
        let gain = analog_gain * (num / den).re;
        let mut digital_zeros: Vec<Complex64> = zeros.iter().map(|z| (fs2 + z) / (fs2 - z)).collect();
        digital_zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(poles.len() - zeros.len()));
        let digital_poles: Vec<Complex64> = poles.iter().map(|p| (fs2 + p) / (fs2 - p)).collect();
        let b = poly(&digital_zeros).into_iter().map(|c| gain * c.re).collect();
        let a = poly(&digital_poles).into_iter().map(|c| c.re).collect();
        Ok(Self { b, a })
    }
    /// Initial state for which a constant input produces a constant output.
    pub fn steady_state(&self) -> Result<Vec<f64>, PulseError> {
        let n = self.a.len().max(self.b.len());
        if n < 2 {
            return Ok(Vec::new());
        }
        let a = padded(&self.a, n);
        let b = padded(&self.b, n);
        let a_sum: f64 = a.iter().sum();
        if a_sum.abs() < f64::EPSILON {
            return Err(PulseError::Config(
                "filter has a pole at DC; no steady state exists".into(),
            ));
        }
        let b_sum: f64 = (1..n).map(|k| b[k] - a[k] * b[0]).sum();
        let mut zi = vec![0.0; n - 1];
        zi[0] = b_sum / a_sum;
        let mut acc_a = 1.0;
        let mut acc_c = 0.0;
        for k in 1..n - 1 {
            acc_a += a[k];
            acc_c += b[k] - a[k] * b[0];
            zi[k] = acc_a * zi[0] - acc_c;
        }
        Ok(zi)
    }
    /// Run the filter causally over `input`, updating `state` in place.
    pub fn filter_with_state(&self, input: &[f64], state: &mut [f64]) -> Vec<f64> {
        let n = self.a.len().max(self.b.len());
        let a = padded(&self.a, n);
        let b = padded(&self.b, n);
        let mut output = Vec::with_capacity(input.len());
        for &x in input {
            // Transposed direct form II
            let y = b[0] * x + state.first().copied().unwrap_or(0.0);
            for i in 0..state.len() {
                let next = state.get(i + 1).copied().unwrap_or(0.0);
                state[i] = b[i + 1] * x + next - a[i + 1] * y;
            }
            output.push(y);
        }
        output
    }
    /// Magnitude response at `freq` expressed as a fraction of Nyquist.
    pub fn magnitude_at(&self, freq: f64) -> f64 {
        let z_inv = Complex64::from_polar(1.0, -PI * freq);
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
        };
        (eval(&self.b) / eval(&self.a)).norm()
    }
}
/// Bandpass applied forward then backward, so the output is not time-shifted.
#[derive(Clone, Debug)]
pub struct PulseBandpassFilter {
    spec: FilterSpec,
    transfer: TransferFunction,
    steady_state: Vec<f64>,
}
impl PulseBandpassFilter {
    pub fn design(spec: FilterSpec) -> Result<Self, PulseError> {
        let (low, high) = spec.normalized_band();
        let transfer = TransferFunction::butterworth_bandpass(spec.order, low, high)?;
        let steady_state = transfer.steady_state()?;
        if transfer
            .b
            .iter()
            .chain(&transfer.a)
            .chain(&steady_state)
            .any(|v| !v.is_finite())
        {
            return Err(PulseError::Config(format!(
                "bandpass design for {:.3}-{:.3} Hz produced non-finite coefficients",
                spec.low_hz, spec.high_hz
            )));
        }
        Ok(Self {
            spec,
            transfer,
            steady_state,
        })
    }
    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }
    pub fn transfer_function(&self) -> &TransferFunction {
        &self.transfer
    }
    pub fn apply(&self, data: &[f64]) -> Result<Vec<f64>, PulseError> {
        if data.len() < 2 {
            return Err(PulseError::SignalTooShort {
                len: data.len(),
                required: 2,
            });
        }
        let pad = self.spec.pad_len(data.len());
        let extended = odd_extend(data, pad);
        let mut state: Vec<f64> = self.steady_state.iter().map(|z| z * extended[0]).collect();
        let mut forward = self.transfer.filter_with_state(&extended, &mut state);
        forward.reverse();
        let mut state: Vec<f64> = self.steady_state.iter().map(|z| z * forward[0]).collect();
        let mut backward = self.transfer.filter_with_state(&forward, &mut state);
        backward.reverse();
        let output = backward[pad..pad + data.len()].to_vec();
        if let Some(bad) = output.iter().position(|v| !v.is_finite()) {
            return Err(PulseError::degenerate(
                "bandpass",
                format!("output sample {bad} is not finite"),
            ));
        }
        Ok(output)
    }
}
/// Point-symmetric extension about each end: `2*x[0] - x[pad..1]` in front and
/// `2*x[n-1] - x[n-2..n-1-pad]` behind.
fn odd_extend(data: &[f64], pad: usize) -> Vec<f64> {
    let n = data.len();
    let first = data[0];
    let last = data[n - 1];
    let mut out = Vec::with_capacity(n + 2 * pad);
    out.extend((1..=pad).rev().map(|i| 2.0 * first - data[i]));
    out.extend_from_slice(data);
    out.extend((0..pad).map(|i| 2.0 * last - data[n - 2 - i]));
    out
}
fn padded(coeffs: &[f64], len: usize) -> Vec<f64> {
    let mut out = coeffs.to_vec();
    out.resize(len, 0.0);
    out
}
/// Monic polynomial coefficients (highest power first) with the given roots.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let prev = coeffs[i - 1];
            coeffs[i] -= root * prev;
        }
    }
    coeffs
}
