//! Configuration types for offline separation

use az_dsp::{MixMode, MixWeights};
use serde::{Deserialize, Serialize};

/// Separation run configuration
///
/// STFT parameters are carried explicitly (no ambient globals), so
/// independent pipelines with different configurations can coexist in
/// one process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeparationConfig {
    /// STFT frame size in samples (power of two recommended)
    pub framesize: usize,

    /// STFT hop size in samples
    pub hopsize: usize,

    /// Magnitude recombination mode
    pub mode: MixMode,

    /// Mixture-mode weights for (|L|, |R|, |C|)
    pub weights: MixWeights,

    /// Exchange left/right before processing
    pub swap: bool,

    /// Output gain in decibels
    pub gain_db: f64,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            framesize: 4096,
            hopsize: 1024, // 4x overlap
            mode: MixMode::default(),
            weights: MixWeights::default(),
            swap: false,
            gain_db: 0.0,
        }
    }
}

impl SeparationConfig {
    /// Create config with explicit STFT parameters
    pub fn new(framesize: usize, hopsize: usize) -> Self {
        Self {
            framesize,
            hopsize,
            ..Default::default()
        }
    }

    /// Set the mix mode
    pub fn with_mode(mut self, mode: MixMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the mixture weights
    pub fn with_weights(mut self, weights: MixWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set channel swapping
    pub fn with_swap(mut self, swap: bool) -> Self {
        self.swap = swap;
        self
    }

    /// Set the output gain in dB
    pub fn with_gain_db(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }

    /// Linear output gain derived from `gain_db`
    pub fn gain_linear(&self) -> f64 {
        10.0_f64.powf(self.gain_db / 20.0)
    }
}
