//! Two-voice polyphone
//!
//! Interprets the table as a stream of 3-byte records, each describing two
//! square-wave voices by their toggle intervals plus a signed play length.
//! The voices share the single speaker bit: every sub-tick each voice's
//! countdown is decremented, expired voices flag a toggle by XOR-ing their
//! mask into a shared shift register, and the register's low bit decides
//! whether the speaker flips before the register shifts right by one.
//!
//! Timing is driven by a 16-bit combined counter loaded per record. An
//! update runs sub-ticks until the counter's low byte reaches zero, so the
//! first batch after a record load is 253 sub-ticks and every following
//! batch is 256; the record is finished exactly when the full counter wraps
//! to zero.

use crate::speaker::SpeakerDriver;
use crate::table::ParameterTable;

use super::StepResult;

/// Record first-byte value terminating the table
const RECORD_TERMINATOR: u8 = 0x01;

/// Samples advanced per sub-tick (actually 42.5 on the original hardware,
/// truncated)
const SUBTICK_SAMPLES: u32 = 42;

/// Toggle mask XOR-ed into the shift register when a voice fires
const VOICE_MASK: u8 = 0x01;

/// Initial low byte of the combined counter; shortens the first batch of a
/// record to 253 sub-ticks
const COUNT_SEED: u16 = 0x3;

/// Two-voice polyphone sound function
#[derive(Debug, Clone)]
pub struct Polyphone {
    table: ParameterTable,
    cursor: usize,
    /// Combined iteration counter; zero means "no record loaded"
    count: u16,
    interval1: u8,
    interval2: u8,
    remain1: u8,
    remain2: u8,
    mask1: u8,
    mask2: u8,
    shift: u8,
}

impl Polyphone {
    /// Bind the algorithm to its parameter table
    pub fn new(table: ParameterTable) -> Self {
        Polyphone {
            table,
            cursor: 1,
            count: 0,
            interval1: 0,
            interval2: 0,
            remain1: 0,
            remain2: 0,
            mask1: VOICE_MASK,
            mask2: VOICE_MASK,
            shift: 0,
        }
    }

    /// Current record cursor within the table
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Run one batch of sub-ticks
    pub fn update(&mut self, driver: &mut impl SpeakerDriver) -> StepResult {
        if self.count == 0 {
            if self.table.byte(self.cursor) == RECORD_TERMINATOR {
                return StepResult::Completed;
            }
            self.load_record();
        }

        loop {
            self.sub_tick(driver);
            self.count = self.count.wrapping_add(1);
            if self.count & 0x00FF == 0 {
                break;
            }
        }

        if self.count == 0 {
            // Record finished; the next record loads on the following tick.
            self.cursor += 3;
        }

        StepResult::Continuing
    }

    /// Load the 3-byte record at the cursor: `(interval2, interval1, signedCount)`
    fn load_record(&mut self) {
        let mut interval2 = self.table.byte(self.cursor);
        let mut interval1 = self.table.byte(self.cursor + 1);
        let signed_count = self.table.byte(self.cursor + 2) as i8;

        debug_assert!(
            interval1 != 0 || interval2 != 0,
            "polyphone record with both voices silent"
        );

        if interval1 == 0 {
            // Only voice 2 specified: promote it into the primary slot and
            // play single-voiced.
            interval1 = interval2;
            interval2 = 0;
        }

        // Sign-extended play length; low byte seeded so the counter hits a
        // batch boundary exactly when it wraps to zero.
        self.count = ((-(signed_count as i32) << 8) | COUNT_SEED as i32) as u16;

        self.interval1 = interval1;
        self.interval2 = interval2;
        self.remain1 = interval1;
        self.remain2 = interval2;
        self.mask1 = VOICE_MASK;
        self.mask2 = VOICE_MASK;
        self.shift = 0;
    }

    fn sub_tick(&mut self, driver: &mut impl SpeakerDriver) {
        self.remain1 = self.remain1.wrapping_sub(1);
        let fired1 = self.remain1 == 0;
        if fired1 {
            self.remain1 = self.interval1;
        }

        if self.interval2 != 0 {
            self.remain2 = self.remain2.wrapping_sub(1);
            if self.remain2 == 0 {
                self.remain2 = self.interval2;
                // Use only voice 1 if both voices trigger on the same
                // sub-tick; XOR-ing both masks would cancel the toggle.
                if !fired1 {
                    self.shift ^= self.mask2;
                }
            }
        }

        if fired1 {
            self.shift ^= self.mask1;
        }

        if self.shift & 0x01 != 0 {
            driver.toggle();
        }
        self.shift >>= 1;
        driver.advance(SUBTICK_SAMPLES);
    }
}
