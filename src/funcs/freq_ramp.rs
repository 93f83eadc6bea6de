//! Frequency ramp
//!
//! Sweeps the toggle interval from a starting value towards a limit in
//! `delta` steps, emitting a fixed number of toggle/advance pairs at each
//! intermediate interval. The whole ramp is drained on the first update; the
//! algorithm has no resumable multi-tick state.

use crate::speaker::SpeakerDriver;
use crate::table::ParameterTable;

use super::StepResult;

/// Direction-byte threshold: values at or above this ramp downwards
const DIRECTION_THRESHOLD: u8 = 0x40;

/// Samples per toggle at a given interval
///
/// Linear conversion of the original routine's per-iteration instruction
/// cycle count into synthesized samples. Must match the hardware exactly;
/// the constants set the pitch of everything this algorithm plays.
#[inline]
fn pulse_samples(interval: i32) -> u32 {
    (17 + 5 * interval) as u32
}

/// Frequency-ramp sound function
///
/// Parameter bytes: `delta` (1), `count` (2), starting `interval` (3),
/// `limit` (4) and a direction byte (5).
#[derive(Debug, Clone)]
pub struct FreqRamp {
    table: ParameterTable,
}

impl FreqRamp {
    /// Bind the ramp to its parameter table
    pub fn new(table: ParameterTable) -> Self {
        FreqRamp { table }
    }

    /// Run the full ramp; always completes on the first call
    pub fn update(&mut self, driver: &mut impl SpeakerDriver) -> StepResult {
        let delta = self.table.byte(1) as i32;
        let count = self.table.byte(2) as u32;
        let mut interval = self.table.byte(3) as i32;
        let limit = self.table.byte(4) as i32;
        let decreasing = self.table.byte(5) >= DIRECTION_THRESHOLD;

        // 0 would mean 256 on the original 8-bit interpreter; the authored
        // tables never use it.
        debug_assert!(delta != 0, "frequency ramp with zero delta");

        // The step emits before it tests: one batch always plays at the
        // starting interval, even when that interval already lies past the
        // limit.
        if decreasing {
            loop {
                for _ in 0..=count {
                    driver.toggle();
                    driver.advance(pulse_samples(interval));
                }
                interval -= delta;
                if interval < limit {
                    break;
                }
            }
        } else {
            loop {
                for _ in 0..=count {
                    driver.toggle();
                    driver.advance(pulse_samples(interval));
                }
                interval += delta;
                if interval >= limit {
                    break;
                }
            }
        }

        StepResult::Completed
    }
}
