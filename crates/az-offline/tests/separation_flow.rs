//! Separation Integration Tests
//!
//! Tests the complete offline flow: WAV decode, channel split,
//! spectral mixing, gain/clip, 24-bit WAV encode.
//! Verifies:
//! - File-to-file runs for every mix mode
//! - Signal validity (no NaN/Inf) end to end
//! - Center-panned cancellation through real files
//! - No output written on failed runs

use std::path::Path;

use az_dsp::{MixMode, MixWeights};
use az_offline::{
    AudioBuffer, SeparationConfig, SeparationError, SeparationPipeline, WavDecoder, WavEncoder,
};

const SAMPLE_RATE: u32 = 44100;

/// Generate test sine wave
fn generate_sine(samples: usize, freq: f64) -> Vec<f64> {
    (0..samples)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE as f64;
            (2.0 * std::f64::consts::PI * freq * t).sin() * 0.5
        })
        .collect()
}

/// Check signal has no NaN or Infinity
fn is_valid_signal(signal: &[f64]) -> bool {
    signal.iter().all(|&x| x.is_finite())
}

fn write_stereo_wav(path: &Path, left: &[f64], right: &[f64]) {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for (l, r) in left.iter().zip(right) {
        writer.write_sample(*l as f32).unwrap();
        writer.write_sample(*r as f32).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_file_to_file_every_mode() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.wav");

    // A "vocal" panned center plus an instrument panned hard left
    let vocal = generate_sine(8192, 440.0);
    let guitar = generate_sine(8192, 220.0);
    let left: Vec<f64> = vocal.iter().zip(&guitar).map(|(v, g)| v + g * 0.8).collect();
    let right = vocal.clone();
    write_stereo_wav(&input_path, &left, &right);

    for mode in [
        MixMode::Difference,
        MixMode::SpectralDifference,
        MixMode::Product,
        MixMode::Mixture,
    ] {
        let output_path = dir.path().join(format!("out-{}.wav", mode));

        let config = SeparationConfig::new(1024, 256).with_mode(mode);
        let pipeline = SeparationPipeline::new(config);

        let input = WavDecoder::decode(&input_path).unwrap();
        let output = pipeline.process(&input).unwrap();

        assert_eq!(output.channels, 1);
        assert_eq!(output.samples.len(), input.frames());
        assert!(is_valid_signal(&output.samples));
        assert!(output.peak() <= 1.0);

        WavEncoder::encode(&output_path, &output).unwrap();
        assert!(output_path.exists());

        let reader = hound::WavReader::open(&output_path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().bits_per_sample, 24);
    }
}

#[test]
fn test_center_pan_cancellation_through_files() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("center.wav");

    // Identical channels: a perfectly center-panned source
    let vocal = generate_sine(4096, 330.0);
    write_stereo_wav(&input_path, &vocal, &vocal);

    let input = WavDecoder::decode(&input_path).unwrap();
    let output = SeparationPipeline::new(SeparationConfig::default())
        .process(&input)
        .unwrap();

    // The float->f32->float trip keeps both channels bit-identical,
    // so the difference fold is exactly zero
    assert!(output.samples.iter().all(|&s| s == 0.0));
}

#[test]
fn test_mixture_weights_through_pipeline() {
    let left = generate_sine(4096, 550.0);
    let right = generate_sine(4096, 110.0);
    let input = AudioBuffer::stereo(&left, &right, SAMPLE_RATE);

    let base = SeparationConfig::new(1024, 256).with_mode(MixMode::Mixture);

    let defaulted = SeparationPipeline::new(base.clone()).process(&input).unwrap();
    let padded = SeparationPipeline::new(
        base.with_weights(MixWeights::from_slice(&[1.0, -1.0]).unwrap()),
    )
    .process(&input)
    .unwrap();

    assert_eq!(defaulted.samples, padded.samples);
}

#[test]
fn test_failed_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("mono.wav");
    let output_path = dir.path().join("never.wav");

    // Mono input is rejected before any processing
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&input_path, spec).unwrap();
    for sample in generate_sine(1024, 100.0) {
        writer.write_sample(sample as f32).unwrap();
    }
    writer.finalize().unwrap();

    let result = WavDecoder::decode(&input_path);
    assert!(matches!(result, Err(SeparationError::InputShape(_))));
    assert!(!output_path.exists());
}
