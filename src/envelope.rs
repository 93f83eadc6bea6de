//! PCM channel envelope driver
//!
//! The multi-voice PCM platform plays a short looped waveform through a real
//! hardware channel instead of toggling the speaker bit. This driver owns
//! the volume-ramp state machine for one such channel: fade the 6-bit
//! software volume in, flip once at the ceiling, fade back out, and report
//! completion when the volume decays below audibility. Stopping the channel
//! on completion is the caller's job; the envelope only writes volume.
//!
//! The hardware register is 8 bits wide; the software volume is expanded by
//! bit replication, which approximates a smooth loudness scale and must be
//! preserved bit-exactly.

use crate::funcs::StepResult;

/// Oscillator base frequency the channel playback rate divider is applied to
/// (the 1.0227 MHz NTSC machine clock)
pub const BASE_FREQUENCY: u32 = 1_022_727;

/// Length of the looped waveform slice copied out of shared data at start
pub const WAVEFORM_LEN: usize = 0x40;

/// Lowest audible software volume; decaying below this ends the envelope
const VOLUME_MIN: i16 = 1;

/// Software volume ceiling (6-bit)
const VOLUME_MAX: i16 = 63;

/// Expand a 6-bit software volume into the 8-bit hardware register value
///
/// Shifts the 6-bit volume into the register's top bits and replicates its
/// two highest bits into the low bits. For volumes in `[1, 63]` the result
/// always lies in `[4, 255]`.
#[inline]
pub fn expand_volume(volume: u8) -> u8 {
    (volume << 2) | (volume >> 4)
}

/// Opaque handle identifying a hardware voice slot in the external mixer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(u8);

impl ChannelId {
    /// Wrap a raw voice-slot index
    pub fn new(index: u8) -> Self {
        ChannelId(index)
    }

    /// Raw voice-slot index
    pub fn index(&self) -> u8 {
        self.0
    }
}

/// Hardware channel mixer consumed by the envelope driver
///
/// Implemented by the external PCM mixer that owns the audio callback; this
/// crate only issues channel commands through it.
pub trait PcmMixer {
    /// Start looped playback of `waveform` on the given channel
    ///
    /// `frequency` is the playback rate in Hz, `initial_volume` is already a
    /// hardware register value, and `loop_start..loop_end` delimits the loop
    /// within `waveform`.
    fn start_channel(
        &mut self,
        id: ChannelId,
        waveform: &[u8],
        frequency: u32,
        initial_volume: u8,
        loop_start: usize,
        loop_end: usize,
    );

    /// Write the channel's hardware volume register
    fn set_channel_volume(&mut self, id: ChannelId, register_value: u8);
}

/// Fade-in/fade-out volume envelope over one looped PCM channel
///
/// Created with [`PcmEnvelope::start`], stepped once per scheduling tick
/// with [`PcmEnvelope::update`]. The direction flips exactly once per
/// activation; retriggering means starting a fresh envelope.
#[derive(Debug, Clone)]
pub struct PcmEnvelope {
    channel: ChannelId,
    waveform: Vec<u8>,
    volume: i16,
    ramping_up: bool,
    fade_in: i16,
    fade_out: i16,
}

impl PcmEnvelope {
    /// Start the channel and create the envelope at volume 1, ramping up
    ///
    /// Copies the looped waveform slice out of `source` once; the playback
    /// frequency is derived as [`BASE_FREQUENCY`]` / freq`.
    pub fn start<M: PcmMixer + ?Sized>(
        mixer: &mut M,
        channel: ChannelId,
        source: &[u8],
        freq: u16,
        fade_in: u8,
        fade_out: u8,
    ) -> Self {
        debug_assert!(freq > 0, "zero frequency divider");
        debug_assert!(fade_in > 0 && fade_out > 0, "zero fade rate");

        let len = WAVEFORM_LEN.min(source.len());
        let waveform = source[..len].to_vec();

        mixer.start_channel(
            channel,
            &waveform,
            BASE_FREQUENCY / freq as u32,
            expand_volume(VOLUME_MIN as u8),
            0,
            len,
        );

        PcmEnvelope {
            channel,
            waveform,
            volume: VOLUME_MIN,
            ramping_up: true,
            fade_in: fade_in as i16,
            fade_out: fade_out as i16,
        }
    }

    /// Advance the volume ramp by one scheduling tick
    ///
    /// Writes the expanded volume register while the envelope is live. On
    /// decay below the audible floor it completes without writing a final
    /// volume; the caller must then stop the channel.
    pub fn update<M: PcmMixer + ?Sized>(&mut self, mixer: &mut M) -> StepResult {
        if self.ramping_up {
            self.volume += self.fade_in;
            if self.volume >= VOLUME_MAX {
                self.volume = VOLUME_MAX;
                self.ramping_up = false;
            }
        } else {
            self.volume -= self.fade_out;
            if self.volume < VOLUME_MIN {
                return StepResult::Completed;
            }
        }

        mixer.set_channel_volume(self.channel, expand_volume(self.volume as u8));
        StepResult::Continuing
    }

    /// Current 6-bit software volume
    pub fn volume(&self) -> u8 {
        self.volume as u8
    }

    /// Whether the envelope is still in its fade-in phase
    pub fn is_ramping_up(&self) -> bool {
        self.ramping_up
    }

    /// The channel this envelope drives
    pub fn channel(&self) -> ChannelId {
        self.channel
    }

    /// The looped waveform slice copied at start
    pub fn waveform(&self) -> &[u8] {
        &self.waveform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum MixerCall {
        Start {
            id: u8,
            waveform_len: usize,
            frequency: u32,
            initial_volume: u8,
            loop_end: usize,
        },
        SetVolume(u8, u8),
    }

    #[derive(Debug, Default)]
    struct RecordingMixer {
        calls: Vec<MixerCall>,
    }

    impl PcmMixer for RecordingMixer {
        fn start_channel(
            &mut self,
            id: ChannelId,
            waveform: &[u8],
            frequency: u32,
            initial_volume: u8,
            _loop_start: usize,
            loop_end: usize,
        ) {
            self.calls.push(MixerCall::Start {
                id: id.index(),
                waveform_len: waveform.len(),
                frequency,
                initial_volume,
                loop_end,
            });
        }

        fn set_channel_volume(&mut self, id: ChannelId, register_value: u8) {
            self.calls.push(MixerCall::SetVolume(id.index(), register_value));
        }
    }

    fn volume_writes(mixer: &RecordingMixer) -> Vec<u8> {
        mixer
            .calls
            .iter()
            .filter_map(|c| match c {
                MixerCall::SetVolume(_, v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_expand_volume_bit_replication() {
        assert_eq!(expand_volume(1), 0x04);
        assert_eq!(expand_volume(16), 0x41);
        assert_eq!(expand_volume(63), 0xFF);
        for v in 1..=63u8 {
            let reg = expand_volume(v);
            assert_eq!(reg, (v << 2) | (v >> 4));
            assert!((4..=255).contains(&reg));
        }
    }

    #[test]
    fn test_start_copies_waveform_and_derives_frequency() {
        let source = vec![0x80u8; 0x100];
        let mut mixer = RecordingMixer::default();
        let env = PcmEnvelope::start(&mut mixer, ChannelId::new(3), &source, 0x40, 4, 2);

        assert_eq!(env.waveform().len(), WAVEFORM_LEN);
        assert_eq!(
            mixer.calls,
            vec![MixerCall::Start {
                id: 3,
                waveform_len: WAVEFORM_LEN,
                frequency: BASE_FREQUENCY / 0x40,
                initial_volume: expand_volume(1),
                loop_end: WAVEFORM_LEN,
            }]
        );
    }

    #[test]
    fn test_ramp_is_strictly_monotone_and_flips_once() {
        let source = vec![0u8; WAVEFORM_LEN];
        let mut mixer = RecordingMixer::default();
        let mut env = PcmEnvelope::start(&mut mixer, ChannelId::new(0), &source, 1, 7, 3);

        let mut flips = 0;
        let mut was_up = true;
        while env.update(&mut mixer) == StepResult::Continuing {
            if was_up && !env.is_ramping_up() {
                flips += 1;
            }
            was_up = env.is_ramping_up();
        }
        assert_eq!(flips, 1);

        let writes = volume_writes(&mixer);
        let peak = writes
            .iter()
            .position(|&v| v == expand_volume(63))
            .expect("ramp reaches ceiling");
        for pair in writes[..=peak].windows(2) {
            assert!(pair[1] > pair[0]);
        }
        for pair in writes[peak..].windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_completion_issues_no_mixer_call() {
        let source = vec![0u8; WAVEFORM_LEN];
        let mut mixer = RecordingMixer::default();
        let mut env = PcmEnvelope::start(&mut mixer, ChannelId::new(5), &source, 1, 62, 40);

        // 1 -> 63 (flip), 63 -> 23, 23 -> below the floor.
        assert_eq!(env.update(&mut mixer), StepResult::Continuing);
        assert_eq!(env.update(&mut mixer), StepResult::Continuing);

        // The completing tick writes nothing; stopping the channel is the
        // caller's move.
        let calls_before = mixer.calls.len();
        assert_eq!(env.update(&mut mixer), StepResult::Completed);
        assert_eq!(mixer.calls.len(), calls_before);
        assert_eq!(volume_writes(&mixer), vec![expand_volume(63), expand_volume(23)]);
    }

    #[test]
    fn test_register_values_in_documented_range() {
        let source = vec![0u8; WAVEFORM_LEN];
        let mut mixer = RecordingMixer::default();
        let mut env = PcmEnvelope::start(&mut mixer, ChannelId::new(0), &source, 2, 3, 5);
        while env.update(&mut mixer) == StepResult::Continuing {}

        for write in volume_writes(&mixer) {
            assert!((4..=255).contains(&write));
        }
    }
}
