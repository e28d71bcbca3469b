//! Azimuth spectral mixing
//!
//! Combines a stereo pair into one channel by exploiting inter-channel
//! amplitude differences. All spectral modes share one phase reference:
//! the phase of the time-domain sum, which keeps reconstructed
//! harmonics coherent and avoids comb filtering from mixing phases of
//! independently processed channels.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{DspError, DspResult};
use crate::stft::Stft;
use crate::Sample;

// ═══════════════════════════════════════════════════════════════════════════════
// MODES
// ═══════════════════════════════════════════════════════════════════════════════

/// Magnitude recombination policy
///
/// `Difference` and `SpectralDifference` are distinct algorithms that
/// share a name: the former is a plain time-domain channel difference
/// (no transform at all), the latter subtracts spectral magnitudes and
/// resynthesizes with the sum's phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MixMode {
    /// Time-domain `left - right` fast path (default)
    #[default]
    Difference,
    /// Spectral `|L| - |R|` with the sum's phase
    SpectralDifference,
    /// Spectral `|L| * |R|` with the sum's phase
    Product,
    /// Spectral `(w0*|L| + w1*|R| + w2*|C|) / 3` with the sum's phase
    Mixture,
}

impl MixMode {
    /// Canonical mode name
    pub fn as_str(&self) -> &'static str {
        match self {
            MixMode::Difference => "difference",
            MixMode::SpectralDifference => "spectral-difference",
            MixMode::Product => "product",
            MixMode::Mixture => "mixture",
        }
    }

    /// Whether this mode runs through the transform engine
    pub fn is_spectral(&self) -> bool {
        !matches!(self, MixMode::Difference)
    }
}

impl fmt::Display for MixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MixMode {
    type Err = DspError;

    /// Exact-match parsing; unrecognized names fail fast
    fn from_str(s: &str) -> DspResult<Self> {
        match s {
            "difference" => Ok(MixMode::Difference),
            "spectral-difference" => Ok(MixMode::SpectralDifference),
            "product" => Ok(MixMode::Product),
            "mixture" => Ok(MixMode::Mixture),
            other => Err(DspError::UnknownMode(other.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WEIGHTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Mixture-mode coefficients for (|L|, |R|, |C|)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixWeights([f64; 3]);

impl Default for MixWeights {
    fn default() -> Self {
        Self([1.0, -1.0, 0.0])
    }
}

impl MixWeights {
    /// Create from exactly three coefficients
    pub fn new(w0: f64, w1: f64, w2: f64) -> Self {
        Self([w0, w1, w2])
    }

    /// Create from up to three coefficients, zero-padding the rest
    pub fn from_slice(weights: &[f64]) -> DspResult<Self> {
        if weights.len() > 3 {
            return Err(DspError::InvalidConfig(format!(
                "at most 3 mixture weights supported, got {}",
                weights.len()
            )));
        }

        let mut padded = [0.0; 3];
        padded[..weights.len()].copy_from_slice(weights);
        Ok(Self(padded))
    }

    /// Coefficients as an array
    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MIXER
// ═══════════════════════════════════════════════════════════════════════════════

/// Combines two channel signals into one via a shared transform engine
pub struct SpectralMixer {
    stft: Stft,
    mode: MixMode,
    weights: MixWeights,
}

impl SpectralMixer {
    /// Create a mixer with default weights
    pub fn new(stft: Stft, mode: MixMode) -> Self {
        Self {
            stft,
            mode,
            weights: MixWeights::default(),
        }
    }

    /// Set mixture-mode weights
    pub fn with_weights(mut self, weights: MixWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Mix `left` and `right` into a single channel
    ///
    /// Spectral modes transform left, right, and their time-domain sum
    /// with the shared engine, recombine magnitudes per mode with the
    /// sum's phase, and resynthesize. Negative magnitudes pass through
    /// unmodified (they flip the effective phase by pi). The output has
    /// the same length as the inputs.
    pub fn mix(&self, left: &[Sample], right: &[Sample]) -> DspResult<Vec<Sample>> {
        if left.len() != right.len() {
            return Err(DspError::ChannelMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        if self.mode == MixMode::Difference {
            // Straight channel-difference mono-fold, no transform
            return Ok(left.iter().zip(right).map(|(l, r)| l - r).collect());
        }

        let sum: Vec<Sample> = left.iter().zip(right).map(|(l, r)| l + r).collect();

        let spec_l = self.stft.forward(left);
        let spec_r = self.stft.forward(right);
        let spec_c = self.stft.forward(&sum);

        log::debug!(
            "mixing {} frames x {} bins in {} mode",
            spec_c.len(),
            self.stft.bins(),
            self.mode
        );

        let [w0, w1, w2] = self.weights.as_array();

        let mixed: Vec<Vec<Complex64>> = spec_l
            .iter()
            .zip(&spec_r)
            .zip(&spec_c)
            .map(|((frame_l, frame_r), frame_c)| {
                frame_l
                    .iter()
                    .zip(frame_r)
                    .zip(frame_c)
                    .map(|((l, r), c)| {
                        let magnitude = match self.mode {
                            MixMode::SpectralDifference => l.norm() - r.norm(),
                            MixMode::Product => l.norm() * r.norm(),
                            MixMode::Mixture => {
                                (w0 * l.norm() + w1 * r.norm() + w2 * c.norm()) / 3.0
                            }
                            MixMode::Difference => unreachable!("handled above"),
                        };
                        Complex64::from_polar(magnitude, c.arg())
                    })
                    .collect()
            })
            .collect();

        let mut output = self.stft.inverse(&mixed)?;
        output.truncate(left.len());
        Ok(output)
    }
}
