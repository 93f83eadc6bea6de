//! Audio export
//!
//! Offline rendering of the synthesized speaker waveform, gated behind the
//! `export-wav` cargo feature.

mod wav;

pub use wav::write_wav_file;

/// Normalize samples to peak amplitude 1.0
///
/// Leaves silent buffers untouched.
pub fn normalize_samples(samples: &mut [f32]) {
    let peak = samples.iter().fold(0.0f32, |max, s| max.max(s.abs()));
    if peak > 0.0 {
        let gain = 1.0 / peak;
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize_scales_to_unit_peak() {
        let mut samples = vec![0.25, -0.5, 0.1];
        normalize_samples(&mut samples);
        assert_abs_diff_eq!(samples[1], -1.0);
        assert_abs_diff_eq!(samples[0], 0.5);
    }

    #[test]
    fn test_normalize_leaves_silence_alone() {
        let mut samples = vec![0.0; 16];
        normalize_samples(&mut samples);
        assert!(samples.iter().all(|&s| s == 0.0));
    }
}
