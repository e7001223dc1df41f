use crate::drivers::PulseError;
/// Open interval of first-difference energy treated as biologically plausible.
pub const PLAUSIBLE_ENERGY: (f64, f64) = (0.9, 2.1);
/// Energy a clean human pulse is expected to sit at.
pub const BIOLOGICAL_CENTER: f64 = 1.5;
const IN_BAND_SLOPE: f64 = 5.0;
const DEVIATION_SLOPE: f64 = 45.0;
const DEVIATION_FLOOR: f64 = 20.0;
const MAX_PROBABILITY: f64 = 100.0;
/// Maps filtered-signal energy to a synthetic-face probability in [0, 100].
///
/// Energy is the sum of squared first differences, a cheap time-domain stand-in
/// for rhythmic high-frequency content.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpectralEnergyClassifier;
impl SpectralEnergyClassifier {
    pub fn energy(filtered: &[f64]) -> f64 {
        filtered.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum()
    }
    pub fn probability(energy: f64) -> f64 {
        let (low, high) = PLAUSIBLE_ENERGY;
        if low < energy && energy < high {
            (energy - low) * IN_BAND_SLOPE
        } else {
            let deviation = (energy - BIOLOGICAL_CENTER).abs();
            (deviation * DEVIATION_SLOPE + DEVIATION_FLOOR).min(MAX_PROBABILITY)
        }
    }
    /// Energy and probability for a filtered window.
    pub fn classify(&self, filtered: &[f64]) -> Result<(f64, f64), PulseError> {
        let energy = Self::energy(filtered);
        if !energy.is_finite() {
            return Err(PulseError::degenerate(
                "classifier",
                format!("energy is {energy}"),
            ));
        }
        Ok((energy, Self::probability(energy)))
    }
}
