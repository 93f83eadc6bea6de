//! Sound-function algorithms and dispatcher
//!
//! A sound function interprets one parameter table and drives the one-bit
//! speaker through the [`SpeakerDriver`] callbacks. Each call to `update`
//! performs exactly one scheduling tick's worth of work, which may emit many
//! toggle/advance calls in a tight inner loop.
//!
//! The four algorithms are a closed sum type rather than a trait-object
//! hierarchy: state layout stays explicit and the dispatcher's per-tick call
//! is a plain `match`, with no virtual dispatch inside the real-time loop.

pub mod asymmetric;
pub mod freq_ramp;
pub mod polyphone;
pub mod symmetric;

pub use asymmetric::AsymmetricWave;
pub use freq_ramp::FreqRamp;
pub use polyphone::Polyphone;
pub use symmetric::SymmetricWave;

use crate::speaker::SpeakerDriver;
use crate::table::ParameterTable;

/// Table byte marking the end of a cursor-walked parameter table
pub const END_SENTINEL: u8 = 0xFF;

/// Table byte marking a wait pseudo-instruction
pub const WAIT_SENTINEL: u8 = 0xFE;

/// Outcome of stepping a sound function or envelope by one tick
///
/// The original interpreters used a boolean with opposite polarity between
/// the speaker functions and the PCM envelope; every state machine in this
/// crate reports through this one type instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// More work remains; call `update` again next tick
    Continuing,
    /// The sequence reached its terminating sentinel; do not call `update` again
    Completed,
}

/// Active sound-function algorithm bound to its parameter table
///
/// Construction binds the table and resets the cursor to the algorithm's
/// starting offset (offset 1 by convention: offset 0 holds a repeat count or
/// shared parameter). Construction has no side effect on the output stream.
#[derive(Debug, Clone)]
pub enum SpeakerFunction {
    /// Frequency ramp sweeping an interval towards a limit
    FreqRamp(FreqRamp),
    /// Near-symmetric duty-cycle square wave
    SymmetricWave(SymmetricWave),
    /// Duty cycle skewed toward one polarity
    AsymmetricWave(AsymmetricWave),
    /// Two voices interleaved through a shift register
    Polyphone(Polyphone),
}

impl SpeakerFunction {
    /// Bind the frequency-ramp algorithm to `table`
    pub fn freq_ramp(table: ParameterTable) -> Self {
        SpeakerFunction::FreqRamp(FreqRamp::new(table))
    }

    /// Bind the symmetric-wave algorithm to `table`
    pub fn symmetric_wave(table: ParameterTable) -> Self {
        SpeakerFunction::SymmetricWave(SymmetricWave::new(table))
    }

    /// Bind the asymmetric-wave algorithm to `table`
    pub fn asymmetric_wave(table: ParameterTable) -> Self {
        SpeakerFunction::AsymmetricWave(AsymmetricWave::new(table))
    }

    /// Bind the two-voice polyphone algorithm to `table`
    pub fn polyphone(table: ParameterTable) -> Self {
        SpeakerFunction::Polyphone(Polyphone::new(table))
    }

    /// Advance the state machine by one scheduling tick
    ///
    /// Calling `update` again after it returned [`StepResult::Completed`] is
    /// a programming error; the dispatcher enforces this.
    pub fn update(&mut self, driver: &mut impl SpeakerDriver) -> StepResult {
        match self {
            SpeakerFunction::FreqRamp(f) => f.update(driver),
            SpeakerFunction::SymmetricWave(f) => f.update(driver),
            SpeakerFunction::AsymmetricWave(f) => f.update(driver),
            SpeakerFunction::Polyphone(f) => f.update(driver),
        }
    }
}

/// Holds the currently active sound function and steps it once per tick
///
/// Exactly one activation is current at any time. Starting a new function
/// discards the previous activation's state outright; a partially built
/// waveform segment is abandoned, not rolled back.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    active: Option<SpeakerFunction>,
}

impl Dispatcher {
    /// Create a dispatcher with no active function
    pub fn new() -> Self {
        Dispatcher { active: None }
    }

    /// Activate `func`, superseding any currently active function
    pub fn start(&mut self, func: SpeakerFunction) {
        self.active = Some(func);
    }

    /// Drop the active function without finishing it
    pub fn stop(&mut self) {
        self.active = None;
    }

    /// Whether a sound function is currently active
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Step the active function by one scheduling tick
    ///
    /// Deactivates the function when it completes. Returns whether a
    /// function is still active afterwards; with no active function this is
    /// a no-op returning false.
    pub fn tick(&mut self, driver: &mut impl SpeakerDriver) -> bool {
        if let Some(func) = self.active.as_mut() {
            if func.update(driver) == StepResult::Completed {
                self.active = None;
            }
        }
        self.active.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::speaker::Speaker;

    #[test]
    fn test_dispatcher_deactivates_on_completion() {
        let table = ParameterTable::new(vec![1, 0x10, 0xFF]);
        let mut speaker = Speaker::new(TimingConfig::default());
        let mut dispatcher = Dispatcher::new();

        dispatcher.start(SpeakerFunction::symmetric_wave(table));
        assert!(dispatcher.is_active());

        assert!(dispatcher.tick(&mut speaker)); // consumes 0x10
        assert!(!dispatcher.tick(&mut speaker)); // hits the sentinel
        assert!(!dispatcher.is_active());

        // Ticking with nothing active stays a no-op.
        let buffered = speaker.buffered();
        assert!(!dispatcher.tick(&mut speaker));
        assert_eq!(speaker.buffered(), buffered);
    }

    #[test]
    fn test_start_supersedes_active_function() {
        let long_table = ParameterTable::new(vec![1, 0x10, 0x10, 0x10, 0xFF]);
        let short_table = ParameterTable::new(vec![1, 0xFF]);
        let mut speaker = Speaker::new(TimingConfig::default());
        let mut dispatcher = Dispatcher::new();

        dispatcher.start(SpeakerFunction::symmetric_wave(long_table));
        dispatcher.tick(&mut speaker);

        // Retrigger: the partially played table is discarded, the new one
        // completes on its first tick.
        dispatcher.start(SpeakerFunction::symmetric_wave(short_table));
        assert!(!dispatcher.tick(&mut speaker));
    }
}
