//! WAV encoding
//!
//! Writes the separated mono buffer as 24-bit integer PCM via hound.

use std::path::Path;

use crate::decoder::resolve_wav_path;
use crate::error::{SeparationError, SeparationResult};
use crate::pipeline::AudioBuffer;

/// Full-scale value for signed 24-bit PCM
const PCM24_FULL_SCALE: f64 = 8388607.0;

/// Mono 24-bit PCM WAV writer
pub struct WavEncoder;

impl WavEncoder {
    /// Encode a mono buffer to a 24-bit PCM WAV file
    pub fn encode(path: &Path, buffer: &AudioBuffer) -> SeparationResult<()> {
        if buffer.channels != 1 {
            return Err(SeparationError::OutputShape(format!(
                "expected a mono buffer, got {} channels",
                buffer.channels
            )));
        }

        let path = resolve_wav_path(path);

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: buffer.sample_rate,
            bits_per_sample: 24,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| SeparationError::WriteError(format!("{}: {}", path.display(), e)))?;

        for &sample in &buffer.samples {
            let value = (sample.clamp(-1.0, 1.0) * PCM24_FULL_SCALE) as i32;
            writer
                .write_sample(value)
                .map_err(|e| SeparationError::WriteError(format!("{}: {}", path.display(), e)))?;
        }

        writer
            .finalize()
            .map_err(|e| SeparationError::WriteError(format!("{}: {}", path.display(), e)))?;

        log::info!(
            "WRITE {} ({} frames, 1 ch, {} Hz, 24-bit PCM)",
            path.display(),
            buffer.frames(),
            buffer.sample_rate,
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::WavDecoder;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_encode_rejects_stereo() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let stereo = AudioBuffer::new(vec![0.0; 8], 2, 44100);

        assert!(matches!(
            WavEncoder::encode(&path, &stereo),
            Err(SeparationError::OutputShape(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_encode_writes_24_bit_pcm() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        let buffer = AudioBuffer::mono(vec![0.0, 0.5, -0.5, 1.0, -1.0], 48000);

        WavEncoder::encode(&path, &buffer).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(spec.bits_per_sample, 24);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    }

    #[test]
    fn test_encode_extension_defaulting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result");
        let buffer = AudioBuffer::mono(vec![0.25; 16], 44100);

        WavEncoder::encode(&path, &buffer).unwrap();
        assert!(dir.path().join("result.wav").exists());
    }

    #[test]
    fn test_mono_round_trip_within_quantization() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("round.wav");

        let original: Vec<f64> = (0..256).map(|i| ((i as f64) * 0.21).sin() * 0.8).collect();
        WavEncoder::encode(&out_path, &AudioBuffer::mono(original.clone(), 44100)).unwrap();

        // The decoder wants stereo; read back with hound directly
        let reader = hound::WavReader::open(&out_path).unwrap();
        let max_val = (1i64 << 23) as f64;
        let restored: Vec<f64> = reader
            .into_samples::<i32>()
            .map(|s| s.unwrap() as f64 / max_val)
            .collect();

        assert_eq!(restored.len(), original.len());
        for (a, b) in original.iter().zip(&restored) {
            // 24-bit quantization step
            assert_abs_diff_eq!(a, b, epsilon = 2.0 / max_val);
        }
    }

    #[test]
    fn test_encoded_output_is_not_valid_pipeline_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono_out.wav");
        WavEncoder::encode(&path, &AudioBuffer::mono(vec![0.1; 32], 44100)).unwrap();

        assert!(matches!(
            WavDecoder::decode(&path),
            Err(SeparationError::InputShape(_))
        ));
    }
}
