//! WAV file export

use std::path::Path;

use crate::{Result, SoundError};

/// Write normalized mono samples to a 16-bit PCM WAV file
///
/// # Examples
///
/// ```no_run
/// use a2sound::{Speaker, SpeakerDriver, TimingConfig};
/// use a2sound::export::write_wav_file;
///
/// # fn main() -> a2sound::Result<()> {
/// let mut speaker = Speaker::new(TimingConfig::default());
/// speaker.toggle();
/// speaker.advance(44_100);
/// write_wav_file("beep.wav", speaker.samples(), 44_100)?;
/// # Ok(())
/// # }
/// ```
pub fn write_wav_file<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)
        .map_err(|e| SoundError::Export(e.to_string()))?;

    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| SoundError::Export(e.to_string()))?;
    }

    writer
        .finalize()
        .map_err(|e| SoundError::Export(e.to_string()))?;

    Ok(())
}
