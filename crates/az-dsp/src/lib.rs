//! az-dsp: DSP core for the Azimuth separation toolkit
//!
//! Offline, high-precision (f64) spectral processing:
//! - `window` - COLA-compatible analysis/synthesis window
//! - `stft` - short-time transform engine with overlap-add reconstruction
//! - `mixer` - azimuth-cue spectral mixing (difference/product/mixture)

pub mod error;
pub mod mixer;
pub mod stft;
pub mod window;

pub use error::{DspError, DspResult};
pub use mixer::{MixMode, MixWeights, SpectralMixer};
pub use stft::{Spectrogram, Stft};

/// Type alias for audio samples (always f64 for maximum precision)
pub type Sample = f64;
