//! One-Bit Speaker and PCM Envelope Synthesis for Apple Home Computers
//!
//! A cycle-accurate reconstruction of the sound output of 1980s Apple home
//! computers: the one-bit toggled speaker driven by four table-replay "sound
//! function" algorithms, and a simple PCM channel with a hardware volume
//! register driven by a fade-in/fade-out envelope.
//!
//! Correctness here means exact sample counts, exact bit-shift volume curves
//! and exact state transitions. The parameter tables were authored for the
//! original machines' sound interpreters; any drift in timing produces
//! audible pitch artifacts or desynchronized polyphony.
//!
//! # Features
//! - Four one-bit speaker algorithms: frequency ramp, symmetric wave,
//!   asymmetric wave and the two-voice polyphone
//! - Speaker driver accumulating toggles into a normalized sample stream
//! - PCM channel envelope with the original 6-bit → 8-bit volume expansion
//! - Fixed-rate tick scheduling matching the original interrupt rate
//! - Optional WAV export of the synthesized waveform
//!
//! # Crate feature flags
//! - `export-wav` (opt-in): WAV rendering of speaker output (enables `hound`)
//!
//! # Quick start
//! ## Play a sound-function table through the speaker
//! ```
//! use a2sound::{Dispatcher, Speaker, SpeakerFunction, ParameterTable, TimingConfig};
//!
//! let table = ParameterTable::new(vec![2, 0x20, 0x30, 0xFF]);
//! let mut speaker = Speaker::new(TimingConfig::default());
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.start(SpeakerFunction::symmetric_wave(table));
//! while dispatcher.tick(&mut speaker) {}
//! let samples = speaker.drain_samples();
//! ```
//!
//! ## Run a PCM envelope against a channel mixer
//! ```no_run
//! use a2sound::{ChannelId, PcmEnvelope, PcmMixer, StepResult};
//!
//! fn fade<M: PcmMixer>(mixer: &mut M, wave: &[u8]) {
//!     let mut env = PcmEnvelope::start(mixer, ChannelId::new(0), wave, 0x80, 4, 2);
//!     while env.update(mixer) == StepResult::Continuing {}
//! }
//! ```

#![warn(missing_docs)]

// Domain modules
pub mod config; // Timing configuration
pub mod envelope; // PCM channel envelope driver
pub mod funcs; // Sound-function algorithms + dispatcher
pub mod speaker; // One-bit speaker driver
pub mod table; // Parameter byte tables
pub mod tick; // Scheduling-tick adapter

#[cfg(feature = "export-wav")]
pub mod export; // WAV rendering

/// Error types for synthesis operations
#[derive(thiserror::Error, Debug)]
pub enum SoundError {
    /// Invalid timing or channel configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error from filesystem or device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error writing audio file
    #[error("Audio file write error: {0}")]
    Export(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for SoundError {
    /// Converts a String into `SoundError::Other`.
    ///
    /// Convenience conversion for generic string errors. Prefer the specific
    /// variant constructors (`Config`, `Export`) where the error class is
    /// known, since `Other` loses that discrimination.
    fn from(msg: String) -> Self {
        SoundError::Other(msg)
    }
}

impl From<&str> for SoundError {
    /// Converts a string slice into `SoundError::Other`.
    ///
    /// See [`From<String>`] for guidance on when to use explicit variant
    /// constructors instead.
    fn from(msg: &str) -> Self {
        SoundError::Other(msg.to_string())
    }
}

/// Result type for synthesis operations
pub type Result<T> = std::result::Result<T, SoundError>;

// Public API exports
pub use config::TimingConfig;
pub use envelope::{ChannelId, PcmEnvelope, PcmMixer, BASE_FREQUENCY};
pub use funcs::{Dispatcher, SpeakerFunction, StepResult};
pub use speaker::{Speaker, SpeakerDriver};
pub use table::ParameterTable;
pub use tick::TickScheduler;

#[cfg(feature = "export-wav")]
pub use export::write_wav_file;
