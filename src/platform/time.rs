//! Fixed-step pacing
//!
//! Converts wall-clock deltas into a whole number of simulation ticks. Large
//! deltas (a stalled terminal, a suspended process) are clamped so the
//! simulation never tries to catch up more than `max_substeps` ticks at once.

use std::time::Duration;

use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_interval(), settings.max_substeps)
    }

    #[inline]
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Feed elapsed time, returns the number of ticks due now
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let cap = self.step * self.max_substeps;
        self.accumulator += elapsed.min(cap);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Time left until the next tick is due
    pub fn until_next(&self) -> Duration {
        self.step.saturating_sub(self.accumulator)
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}
