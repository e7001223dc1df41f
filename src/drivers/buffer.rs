use std::collections::VecDeque;
use crate::drivers::PulseError;
/// Largest window accepted; about 9.7 hours of samples at 30 Hz.
pub const MAX_CAPACITY: usize = 1 << 20;
/// Fixed-capacity sliding window of brightness samples, oldest evicted first.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}
impl SampleBuffer {
    pub fn with_capacity(capacity: usize) -> Result<Self, PulseError> {
        if !(2..=MAX_CAPACITY).contains(&capacity) {
            return Err(PulseError::InvalidCapacity(capacity));
        }
        Ok(Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        })
    }
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    /// Whole percent of the window filled so far, rounded down.
    pub fn fill_percent(&self) -> u8 {
        (100 * self.samples.len() / self.capacity) as u8
    }
    /// Ordered copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
