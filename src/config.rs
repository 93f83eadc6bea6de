//! Timing configuration
//!
//! The original interpreters read playback timing from machine globals; here
//! the configuration is an explicit value threaded into the speaker driver
//! and the tick scheduler at construction time.

use serde::{Deserialize, Serialize};

use crate::{Result, SoundError};

/// Default output sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Default scheduling-tick rate in Hz (the original 60 Hz interrupt poll)
pub const DEFAULT_TICK_RATE: f32 = 60.0;

/// Timing configuration for synthesis and scheduling
///
/// Couples the synthesized sample rate to the fixed scheduling-tick rate at
/// which the active sound function is stepped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Output sample rate in Hz
    pub sample_rate: u32,
    /// Scheduling-tick frequency in Hz (50.0 for PAL-style polls, 60.0 for NTSC)
    pub tick_rate: f32,
}

impl TimingConfig {
    /// Create a configuration with the given sample and tick rates
    pub fn new(sample_rate: u32, tick_rate: f32) -> Self {
        TimingConfig {
            sample_rate,
            tick_rate,
        }
    }

    /// Number of synthesized samples per scheduling tick
    pub fn samples_per_tick(&self) -> u32 {
        (self.sample_rate as f32 / self.tick_rate) as u32
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`SoundError::Config`] if either rate is zero, negative or
    /// non-finite, or if the tick rate exceeds the sample rate.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SoundError::Config("sample rate must be non-zero".into()));
        }
        if !self.tick_rate.is_finite() || self.tick_rate <= 0.0 {
            return Err(SoundError::Config(format!(
                "tick rate must be positive, got {}",
                self.tick_rate
            )));
        }
        if self.tick_rate > self.sample_rate as f32 {
            return Err(SoundError::Config(format!(
                "tick rate {} exceeds sample rate {}",
                self.tick_rate, self.sample_rate
            )));
        }
        Ok(())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            sample_rate: DEFAULT_SAMPLE_RATE,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}
