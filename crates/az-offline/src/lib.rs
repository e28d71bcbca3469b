//! az-offline: Offline separation pipeline
//!
//! Batch stereo-to-mono source separation:
//! 1. Decode stereo WAV input
//! 2. Split channels (optional swap)
//! 3. Mix via the az-dsp spectral mixer
//! 4. Apply output gain and clip to [-1, +1]
//! 5. Encode mono 24-bit PCM WAV output
//!
//! Single-threaded, synchronous, whole-buffer processing; every
//! configuration or shape error aborts the run before any output is
//! written.

mod config;
mod decoder;
mod encoder;
mod error;
mod pipeline;

pub use config::*;
pub use decoder::*;
pub use encoder::*;
pub use error::*;
pub use pipeline::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
