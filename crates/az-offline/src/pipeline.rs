//! Separation pipeline
//!
//! End-to-end sequencing over a complete in-memory buffer:
//! validate stereo input, split (with optional swap), mix, apply
//! gain, clip, return mono. No retries, no partial output.

use az_dsp::{Sample, SpectralMixer, Stft};

use crate::config::SeparationConfig;
use crate::error::{SeparationError, SeparationResult};

// ═══════════════════════════════════════════════════════════════════════════════
// AUDIO BUFFER
// ═══════════════════════════════════════════════════════════════════════════════

/// Audio buffer for offline processing (f64 for maximum precision)
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Interleaved samples
    pub samples: Vec<Sample>,
    /// Number of channels
    pub channels: usize,
    /// Sample rate
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Create a buffer from interleaved samples
    pub fn new(samples: Vec<Sample>, channels: usize, sample_rate: u32) -> Self {
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Create a mono buffer
    pub fn mono(samples: Vec<Sample>, sample_rate: u32) -> Self {
        Self::new(samples, 1, sample_rate)
    }

    /// Create a stereo buffer from separate channel signals
    pub fn stereo(left: &[Sample], right: &[Sample], sample_rate: u32) -> Self {
        let mut samples = Vec::with_capacity(left.len() + right.len());
        for (l, r) in left.iter().zip(right) {
            samples.push(*l);
            samples.push(*r);
        }
        Self::new(samples, 2, sample_rate)
    }

    /// Number of frames
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels
        }
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f64 / self.sample_rate as f64
        }
    }

    /// Get channel data (non-interleaved copy)
    pub fn get_channel(&self, channel: usize) -> Vec<Sample> {
        if channel >= self.channels {
            return Vec::new();
        }
        self.samples
            .iter()
            .skip(channel)
            .step_by(self.channels)
            .copied()
            .collect()
    }

    /// Apply linear gain
    pub fn apply_gain(&mut self, gain: f64) {
        for sample in &mut self.samples {
            *sample *= gain;
        }
    }

    /// Clip every sample to [-1, +1]
    pub fn clip(&mut self) {
        for sample in &mut self.samples {
            *sample = sample.clamp(-1.0, 1.0);
        }
    }

    /// Get peak level (linear)
    pub fn peak(&self) -> f64 {
        self.samples.iter().map(|s| s.abs()).fold(0.0, f64::max)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SEPARATION PIPELINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Stereo-to-mono separation pipeline
pub struct SeparationPipeline {
    config: SeparationConfig,
}

impl SeparationPipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: SeparationConfig) -> Self {
        Self { config }
    }

    /// Run configuration
    pub fn config(&self) -> &SeparationConfig {
        &self.config
    }

    /// Process a stereo buffer into a mono buffer
    ///
    /// Fails before any signal work on invalid STFT parameters and on
    /// non-stereo input; the returned buffer keeps the input sample
    /// rate and is clipped to [-1, +1].
    pub fn process(&self, input: &AudioBuffer) -> SeparationResult<AudioBuffer> {
        // Configuration is validated up front, for the time-domain fast
        // path as well, so a bad window/hop pair never half-runs.
        let stft = Stft::new(self.config.framesize, self.config.hopsize)?;

        if input.channels != 2 {
            return Err(SeparationError::InputShape(format!(
                "expected exactly 2 channels, got {}",
                input.channels
            )));
        }

        let mut left = input.get_channel(0);
        let mut right = input.get_channel(1);
        if self.config.swap {
            std::mem::swap(&mut left, &mut right);
        }

        log::info!(
            "separating {} frames at {} Hz: mode={} framesize={} hopsize={} swap={} gain={}dB",
            input.frames(),
            input.sample_rate,
            self.config.mode,
            self.config.framesize,
            self.config.hopsize,
            self.config.swap,
            self.config.gain_db,
        );

        let mixer = SpectralMixer::new(stft, self.config.mode).with_weights(self.config.weights);
        let mixed = mixer.mix(&left, &right)?;

        let mut output = AudioBuffer::mono(mixed, input.sample_rate);
        output.apply_gain(self.config.gain_linear());
        output.clip();

        log::debug!("separated peak level: {:.4}", output.peak());

        Ok(output)
    }
}
