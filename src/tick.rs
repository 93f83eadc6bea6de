//! Scheduling-tick adapter
//!
//! The sound functions are stepped at the original machine's fixed interrupt
//! rate. This adapter sits at the boundary to the external sample clock: it
//! is clocked once per synthesized sample and reports when a scheduling tick
//! is due, so the mixer's real-time callback can drive the dispatcher
//! without owning any timing state of its own.

use crate::config::TimingConfig;

/// Converts elapsed samples into due scheduling ticks
#[derive(Debug, Clone)]
pub struct TickScheduler {
    config: TimingConfig,
    /// Current sample count within the tick period
    sample_count: u64,
    /// Total ticks elapsed
    tick_count: u64,
    /// Samples until the next tick
    samples_until_tick: u32,
}

impl TickScheduler {
    /// Create a scheduler for the given timing configuration
    pub fn new(config: TimingConfig) -> Self {
        let samples_per_tick = config.samples_per_tick();
        TickScheduler {
            config,
            sample_count: 0,
            tick_count: 0,
            samples_until_tick: samples_per_tick,
        }
    }

    /// Clock the scheduler by one sample
    ///
    /// Returns true if a scheduling tick is due.
    pub fn clock(&mut self) -> bool {
        self.sample_count += 1;
        self.samples_until_tick = self.samples_until_tick.saturating_sub(1);

        if self.samples_until_tick == 0 {
            self.tick_count += 1;
            self.samples_until_tick = self.config.samples_per_tick();
            true
        } else {
            false
        }
    }

    /// Advance by a batch of samples, returning how many ticks became due
    pub fn advance(&mut self, samples: u32) -> u32 {
        let mut due = 0;
        for _ in 0..samples {
            if self.clock() {
                due += 1;
            }
        }
        due
    }

    /// Total samples clocked
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Total ticks elapsed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Samples until the next tick fires
    pub fn samples_until_tick(&self) -> u32 {
        self.samples_until_tick
    }

    /// Elapsed time in seconds
    pub fn elapsed_time(&self) -> f64 {
        self.sample_count as f64 / self.config.sample_rate as f64
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        self.sample_count = 0;
        self.tick_count = 0;
        self.samples_until_tick = self.config.samples_per_tick();
    }

    /// The timing configuration in use
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TimingConfig::default())
    }
}
