//! Symmetric wave
//!
//! Walks the parameter table one interval byte per tick and plays each as a
//! run of near-symmetric square pulses: every iteration toggles twice with
//! two slightly different durations, so consecutive half-waves differ by
//! five samples of duty cycle.

use crate::speaker::SpeakerDriver;
use crate::table::ParameterTable;

use super::{StepResult, END_SENTINEL, WAIT_SENTINEL};

/// Wait pseudo-instruction duration in scheduling ticks
const WAIT_TICKS: u32 = 10;

/// Symmetric-wave sound function
///
/// Offset 0 holds the shared iteration `count`; the cursor walks interval
/// bytes from offset 1 until the `0xFF` sentinel.
#[derive(Debug, Clone)]
pub struct SymmetricWave {
    table: ParameterTable,
    cursor: usize,
    count: u32,
}

impl SymmetricWave {
    /// Bind the algorithm to its parameter table
    pub fn new(table: ParameterTable) -> Self {
        let count = table.byte(0) as u32;
        SymmetricWave {
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
                for _ in 0..(interval >> 3) + self.count {
                    driver.toggle();
                    driver.advance(1292 - 5 * interval);
                    driver.toggle();
                    driver.advance(1287 - 5 * interval);
                }
                StepResult::Continuing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::funcs::tests_support::{DriverCall, RecordingDriver};

    #[test]
    fn test_single_interval_byte() {
        // count=2, one interval byte of 5: (5 >> 3) + 2 = 2 pairs.
        let table = ParameterTable::new(vec![2, 0x05, 0xFF]);
        let mut driver = RecordingDriver::default();
        let mut func = SymmetricWave::new(table);

        assert_eq!(func.update(&mut driver), StepResult::Continuing);
        assert_eq!(func.update(&mut driver), StepResult::Completed);

        let pair = [
            DriverCall::Toggle,
            DriverCall::Advance(1292 - 25),
            DriverCall::Toggle,
            DriverCall::Advance(1287 - 25),
        ];
        let expected: Vec<DriverCall> = pair.iter().chain(pair.iter()).copied().collect();
        assert_eq!(driver.calls, expected);
    }

    #[test]
    fn test_wait_byte_delegates_to_driver() {
        let table = ParameterTable::new(vec![0, 0xFE, 0x10, 0xFF]);
        let mut driver = RecordingDriver::default();
        let mut func = SymmetricWave::new(table);

        assert_eq!(func.update(&mut driver), StepResult::Continuing);
        assert_eq!(driver.calls, vec![DriverCall::Wait(0xFE, 10)]);

        // The wait is not a toggle; playback resumes with the next byte.
        assert_eq!(func.update(&mut driver), StepResult::Continuing);
        assert_eq!(func.update(&mut driver), StepResult::Completed);
    }

    #[test]
    fn test_cursor_consumes_through_sentinel() {
        let table = ParameterTable::new(vec![1, 0x08, 0x10, 0xFF]);
        let mut driver = RecordingDriver::default();
        let mut func = SymmetricWave::new(table);

        while func.update(&mut driver) == StepResult::Continuing {}
        assert_eq!(func.cursor(), 4);
    }

    #[test]
    fn test_interval_contributes_iterations() {
        // count=0 but interval 0x18 still yields (0x18 >> 3) = 3 pairs.
        let table = ParameterTable::new(vec![0, 0x18, 0xFF]);
        let mut driver = RecordingDriver::default();
        let mut func = SymmetricWave::new(table);
        func.update(&mut driver);
        assert_eq!(driver.toggles(), 6);
    }
}
