//! az-viz: Debug spectrogram rendering
//!
//! Renders a Spectrogram as a PNG heat map for inspection before and
//! after separation. Purely diagnostic; no effect on produced audio.

pub mod spectrogram;

pub use spectrogram::{SpectrogramImage, VizError, VizResult};
