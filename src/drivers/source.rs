use std::collections::VecDeque;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::PulseError;
/// What the capture/landmark side saw on one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Reading {
    /// Mean brightness of the sampled skin region, nominally 0–255.
    Face(f64),
    NoFace,
}
impl Reading {
    pub fn sample(self) -> Option<f64> {
        match self {
            Reading::Face(v) => Some(v),
            Reading::NoFace => None,
        }
    }
}
impl From<Option<f64>> for Reading {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Reading::NoFace, Reading::Face)
    }
}
/// Something that can yield one reading per tick. `None` means exhausted.
pub trait SampleSource {
    fn next_reading(&mut self) -> Option<Reading>;
}
/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Reading>,
}
impl ManualSource {
    pub fn new(readings: impl IntoIterator<Item = Reading>) -> Self {
        Self {
            queue: readings.into_iter().collect(),
        }
    }
    pub fn from_samples(samples: impl IntoIterator<Item = f64>) -> Self {
        Self::new(samples.into_iter().map(Reading::Face))
    }
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}
impl SampleSource for ManualSource {
    fn next_reading(&mut self) -> Option<Reading> {
        self.queue.pop_front()
    }
}
/// Replays a recorded trace: one sample per line, `-`/`none`/blank for a
/// frame without a face, `#` starts a comment line.
pub struct LineSource {
    inner: ManualSource,
}
impl LineSource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PulseError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }
    pub fn parse(text: &str) -> Result<Self, PulseError> {
        let mut readings = Vec::new();
        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() || line == "-" || line.eq_ignore_ascii_case("none") {
                readings.push(Reading::NoFace);
                continue;
            }
            let value: f64 = line.parse().map_err(|_| {
                PulseError::Config(format!("line {}: `{line}` is not a sample", line_no + 1))
            })?;
            readings.push(Reading::Face(value));
        }
        Ok(Self {
            inner: ManualSource::new(readings),
        })
    }
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}
impl SampleSource for LineSource {
    fn next_reading(&mut self) -> Option<Reading> {
        self.inner.next_reading()
    }
}
/// Brightness trace of a sinusoidal pulse riding on a constant level, with
/// seeded uniform noise. Endless unless a limit is set.
pub struct SyntheticPulseSource {
    sample_rate_hz: f64,
    pulse_hz: f64,
    baseline: f64,
    amplitude: f64,
    noise: f64,
    rng: StdRng,
    index: u64,
    limit: Option<u64>,
}
impl SyntheticPulseSource {
    pub fn new(sample_rate_hz: f64, pulse_hz: f64, seed: u64) -> Self {
        Self {
            sample_rate_hz,
            pulse_hz,
            baseline: 128.0,
            amplitude: 2.0,
            noise: 0.0,
            rng: StdRng::seed_from_u64(seed),
            index: 0,
            limit: None,
        }
    }
    pub fn with_noise(mut self, amplitude: f64) -> Self {
        self.noise = amplitude.abs();
        self
    }
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }
    pub fn with_limit(mut self, samples: u64) -> Self {
        self.limit = Some(samples);
        self
    }
}
impl SampleSource for SyntheticPulseSource {
    fn next_reading(&mut self) -> Option<Reading> {
        if self.limit.is_some_and(|limit| self.index >= limit) {
            return None;
        }
        let t = self.index as f64 / self.sample_rate_hz;
        self.index += 1;
        let jitter = if self.noise > 0.0 {
            self.rng.gen_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        let value = self.baseline + self.amplitude * (2.0 * PI * self.pulse_hz * t).sin() + jitter;
        Some(Reading::Face(value))
    }
}
