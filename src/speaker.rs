//! One-bit speaker driver
//!
//! The speaker is the only audio output on the original machine: a single
//! bit of polarity, toggled at precise moments by the sound-function
//! algorithms. The driver exposes the two primitives the algorithms are
//! written against (toggle and advance-N-samples) and accumulates the
//! resulting logical waveform into a normalized sample buffer for the
//! external mixer to drain.

use crate::config::TimingConfig;

/// Output level while the speaker polarity is high
const LEVEL_HIGH: f32 = 0.5;
/// Output level while the speaker polarity is low
const LEVEL_LOW: f32 = -0.5;

/// Callback seam between sound-function algorithms and the output stream
///
/// The exact count and ordering of calls made through this trait within one
/// update is part of the algorithm contract: reordering changes the audible
/// waveform.
pub trait SpeakerDriver {
    /// Flip the speaker's current polarity
    fn toggle(&mut self);

    /// Advance the synthesized sample clock by `samples` at the current polarity
    fn advance(&mut self, samples: u32);

    /// Pause primitive invoked for the `0xFE` wait pseudo-instruction
    ///
    /// `marker` is the table byte that triggered the wait; `ticks` is the
    /// duration in scheduling ticks. Semantics are owned by the driver, not
    /// by the algorithm that delegates here.
    fn wait(&mut self, marker: u8, ticks: u32);
}

/// Concrete speaker accumulating toggles into a waveform buffer
///
/// Samples are normalized `f32` values at the configured sample rate. The
/// buffer grows as the algorithms run and is handed off wholesale via
/// [`Speaker::drain_samples`].
#[derive(Debug, Clone)]
pub struct Speaker {
    config: TimingConfig,
    polarity: bool,
    buffer: Vec<f32>,
    sample_count: u64,
}

impl Speaker {
    /// Create a speaker driver for the given timing configuration
    pub fn new(config: TimingConfig) -> Self {
        Speaker {
            config,
            polarity: false,
            buffer: Vec::new(),
            sample_count: 0,
        }
    }

    /// Current polarity of the speaker (true = high)
    pub fn polarity(&self) -> bool {
        self.polarity
    }

    /// Total samples synthesized since creation or the last reset
    pub fn sample_count(&self) -> u64 {
        self.sample_count
    }

    /// Number of samples currently buffered
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Borrow the buffered samples without consuming them
    pub fn samples(&self) -> &[f32] {
        &self.buffer
    }

    /// Take all buffered samples, leaving the buffer empty
    pub fn drain_samples(&mut self) -> Vec<f32> {
        std::mem::take(&mut self.buffer)
    }

    /// Reset polarity, buffer and sample count
    pub fn reset(&mut self) {
        self.polarity = false;
        self.buffer.clear();
        self.sample_count = 0;
    }

    /// The timing configuration the speaker was built with
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    fn level(&self) -> f32 {
        if self.polarity {
            LEVEL_HIGH
        } else {
            LEVEL_LOW
        }
    }
}

impl SpeakerDriver for Speaker {
    fn toggle(&mut self) {
        self.polarity = !self.polarity;
    }

    fn advance(&mut self, samples: u32) {
        let level = self.level();
        self.buffer
            .extend(std::iter::repeat(level).take(samples as usize));
        self.sample_count += samples as u64;
    }

    fn wait(&mut self, _marker: u8, ticks: u32) {
        // Hold the current polarity for the full duration.
        self.advance(ticks * self.config.samples_per_tick());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_toggle_changes_level() {
        let mut speaker = Speaker::new(TimingConfig::default());
        speaker.advance(2);
        speaker.toggle();
        speaker.advance(3);

        let samples = speaker.samples();
        assert_eq!(samples.len(), 5);
        assert_abs_diff_eq!(samples[0], LEVEL_LOW);
        assert_abs_diff_eq!(samples[1], LEVEL_LOW);
        assert_abs_diff_eq!(samples[2], LEVEL_HIGH);
        assert_abs_diff_eq!(samples[4], LEVEL_HIGH);
    }

    #[test]
    fn test_wait_holds_polarity_for_ticks() {
        let config = TimingConfig::new(44_100, 60.0);
        let mut speaker = Speaker::new(config);
        speaker.toggle();
        speaker.wait(0xFE, 10);

        assert_eq!(speaker.buffered(), 7350); // 10 ticks * 735 samples
        assert!(speaker.samples().iter().all(|&s| s == LEVEL_HIGH));
    }

    #[test]
    fn test_drain_empties_buffer_but_keeps_count() {
        let mut speaker = Speaker::new(TimingConfig::default());
        speaker.advance(100);
        let samples = speaker.drain_samples();
        assert_eq!(samples.len(), 100);
        assert_eq!(speaker.buffered(), 0);
        assert_eq!(speaker.sample_count(), 100);
    }

    #[test]
    fn test_reset() {
        let mut speaker = Speaker::new(TimingConfig::default());
        speaker.toggle();
        speaker.advance(10);
        speaker.reset();
        assert!(!speaker.polarity());
        assert_eq!(speaker.sample_count(), 0);
        assert_eq!(speaker.buffered(), 0);
    }
}
