use crate::drivers::PulseError;
/// Exponential moving average turning the per-window probability into the
/// displayed score.
#[derive(Clone, Copy, Debug)]
pub struct ScoreSmoother {
    alpha: f64,
    value: f64,
}
impl ScoreSmoother {
    pub fn new(alpha: f64) -> Result<Self, PulseError> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha > 1.0 {
            return Err(PulseError::InvalidSmoothingFactor(alpha));
        }
        Ok(Self { alpha, value: 0.0 })
    }
    pub fn value(&self) -> f64 {
        self.value
    }
    pub fn update(&mut self, raw: f64) -> f64 {
        self.value = self.value * (1.0 - self.alpha) + raw * self.alpha;
        self.value
    }
    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
