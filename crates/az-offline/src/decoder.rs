//! WAV decoding
//!
//! Reads stereo WAV input via hound, normalizing integer and float
//! sample formats to [-1, +1] f64. Anything other than exactly two
//! channels is rejected up front.

use std::path::{Path, PathBuf};

use crate::error::{SeparationError, SeparationResult};
use crate::pipeline::AudioBuffer;

/// Default the file extension to `.wav` when the path has none
pub fn resolve_wav_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("wav")
    }
}

/// Stereo WAV file reader
pub struct WavDecoder;

impl WavDecoder {
    /// Decode a stereo WAV file to an AudioBuffer
    pub fn decode(path: &Path) -> SeparationResult<AudioBuffer> {
        let path = resolve_wav_path(path);

        let reader = hound::WavReader::open(&path)
            .map_err(|e| SeparationError::ReadError(format!("{}: {}", path.display(), e)))?;

        let spec = reader.spec();
        let channels = spec.channels as usize;
        let sample_rate = spec.sample_rate;

        let samples: Vec<f64> = match spec.sample_format {
            hound::SampleFormat::Int => {
                let max_val = (1i64 << (spec.bits_per_sample - 1)) as f64;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| v as f64 / max_val))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| {
                        SeparationError::ReadError(format!("{}: {}", path.display(), e))
                    })?
            }
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .map(|s| s.map(|v| v as f64))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| SeparationError::ReadError(format!("{}: {}", path.display(), e)))?,
        };

        let buffer = AudioBuffer::new(samples, channels, sample_rate);

        log::info!(
            "READ {} ({} frames, {} ch, {} Hz)",
            path.display(),
            buffer.frames(),
            buffer.channels,
            buffer.sample_rate,
        );

        if buffer.channels != 2 {
            return Err(SeparationError::InputShape(format!(
                "{}: expected a stereo file, got {} channel(s)",
                path.display(),
                buffer.channels
            )));
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn write_test_wav(path: &Path, channels: u16, samples: &[f32]) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &sample in samples {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_resolve_wav_path() {
        assert_eq!(
            resolve_wav_path(Path::new("mix")),
            PathBuf::from("mix.wav")
        );
        assert_eq!(
            resolve_wav_path(Path::new("mix.wav")),
            PathBuf::from("mix.wav")
        );
        assert_eq!(
            resolve_wav_path(Path::new("mix.flac")),
            PathBuf::from("mix.flac")
        );
    }

    #[test]
    fn test_decode_stereo_float() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stereo.wav");
        write_test_wav(&path, 2, &[0.5, -0.5, 0.25, -0.25]);

        let buffer = WavDecoder::decode(&path).unwrap();
        assert_eq!(buffer.channels, 2);
        assert_eq!(buffer.sample_rate, 44100);
        assert_eq!(buffer.frames(), 2);
        assert_abs_diff_eq!(buffer.samples[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(buffer.samples[1], -0.5, epsilon = 1e-6);
    }

    #[test]
    fn test_decode_rejects_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.wav");
        write_test_wav(&path, 1, &[0.1, 0.2, 0.3]);

        assert!(matches!(
            WavDecoder::decode(&path),
            Err(SeparationError::InputShape(_))
        ));
    }

    #[test]
    fn test_decode_missing_file() {
        assert!(matches!(
            WavDecoder::decode(Path::new("/nonexistent/input.wav")),
            Err(SeparationError::ReadError(_))
        ));
    }

    #[test]
    fn test_decode_int_normalization() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("int.wav");

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for sample in [16384i16, -16384, 32767, -32768] {
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();

        let buffer = WavDecoder::decode(&path).unwrap();
        assert_abs_diff_eq!(buffer.samples[0], 0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(buffer.samples[1], -0.5, epsilon = 1e-4);
        assert_abs_diff_eq!(buffer.samples[3], -1.0, epsilon = 1e-4);
    }
}
