//! Asymmetric wave
//!
//! Same cursor walk as the symmetric wave, but each iteration toggles only
//! once, so the waveform spends its time skewed toward one polarity. The
//! wait pseudo-instruction is also seven times longer here; the authored
//! tables rely on both differences.

use crate::speaker::SpeakerDriver;
use crate::table::ParameterTable;

use super::{StepResult, END_SENTINEL, WAIT_SENTINEL};

/// Wait pseudo-instruction duration in scheduling ticks
const WAIT_TICKS: u32 = 70;

/// Asymmetric-wave sound function
///
/// Offset 0 holds the iteration `count`; the cursor walks interval bytes
/// from offset 1 until the `0xFF` sentinel.
#[derive(Debug, Clone)]
pub struct AsymmetricWave {
    table: ParameterTable,
    cursor: usize,
    count: u32,
}

impl AsymmetricWave {
    /// Bind the algorithm to its parameter table
    pub fn new(table: ParameterTable) -> Self {
        let count = table.byte(0) as u32;
        // 0 would mean 256 on the original 8-bit interpreter; the authored
        // tables never use it.
        debug_assert!(count > 0, "asymmetric wave with zero count");
        AsymmetricWave {
            table,
            cursor: 1,
            count,
        }
    }

    /// Current cursor position within the table
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Consume one table byte
    pub fn update(&mut self, driver: &mut impl SpeakerDriver) -> StepResult {
        let byte = self.table.byte(self.cursor);
        self.cursor += 1;

        match byte {
            END_SENTINEL => StepResult::Completed,
            WAIT_SENTINEL => {
                driver.wait(byte, WAIT_TICKS);
                StepResult::Continuing
            }
            interval => {
                let interval = interval as u32;
                for _ in 0..self.count {
                    driver.toggle();
                    driver.advance(1289 - 5 * interval);
                }
                StepResult::Continuing
            }
        }
    }
}
