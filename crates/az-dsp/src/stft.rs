//! Short-time transform engine
//!
//! Offline forward/inverse STFT over a complete in-memory signal:
//! - Hann analysis window, tail zero-padding, `ceil(len / hop)` frames
//! - Half spectrum per frame (framesize / 2 + 1 complex bins)
//! - Weighted overlap-add synthesis with per-sample window-energy
//!   normalization, so an unmodified spectrogram reconstructs the
//!   input to floating-point tolerance away from the padded edges

use std::sync::Arc;

use num_complex::Complex64;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};

use crate::error::{DspError, DspResult};
use crate::window::hann;
use crate::Sample;

/// Positions with less accumulated window energy than this are muted
/// instead of divided (the window is zero there, e.g. sample 0).
const NORM_EPSILON: f64 = 1e-12;

/// Ordered spectral frames for one channel, half spectrum each
pub type Spectrogram = Vec<Vec<Complex64>>;

/// Short-time transform engine with a fixed frame/hop configuration
pub struct Stft {
    framesize: usize,
    hopsize: usize,
    window: Vec<Sample>,
    fft_forward: Arc<dyn RealToComplex<f64>>,
    fft_inverse: Arc<dyn ComplexToReal<f64>>,
}

impl Stft {
    /// Create a new engine
    ///
    /// Fails with a configuration error when `framesize` is zero or
    /// `hopsize` is zero or larger than `framesize`.
    pub fn new(framesize: usize, hopsize: usize) -> DspResult<Self> {
        if framesize == 0 {
            return Err(DspError::InvalidConfig(
                "framesize must be positive".to_string(),
            ));
        }
        if hopsize == 0 || hopsize > framesize {
            return Err(DspError::InvalidConfig(format!(
                "hopsize must be in 1..={}, got {}",
                framesize, hopsize
            )));
        }
        if !framesize.is_power_of_two() {
            log::warn!("framesize {} is not a power of two; transform will be slower", framesize);
        }

        let mut planner = RealFftPlanner::<f64>::new();

        Ok(Self {
            framesize,
            hopsize,
            window: hann(framesize),
            fft_forward: planner.plan_fft_forward(framesize),
            fft_inverse: planner.plan_fft_inverse(framesize),
        })
    }

    /// Frame size in samples
    pub fn framesize(&self) -> usize {
        self.framesize
    }

    /// Hop size in samples
    pub fn hopsize(&self) -> usize {
        self.hopsize
    }

    /// Number of complex bins per spectral frame
    pub fn bins(&self) -> usize {
        self.framesize / 2 + 1
    }

    /// Number of frames produced for a signal of the given length
    pub fn num_frames(&self, len: usize) -> usize {
        len.div_ceil(self.hopsize)
    }

    /// Forward transform: signal -> spectrogram
    ///
    /// The signal is zero-padded at the tail so every frame is fully
    /// populated; `inverse` applies the matching policy.
    pub fn forward(&self, signal: &[Sample]) -> Spectrogram {
        let num_frames = self.num_frames(signal.len());
        let mut frames = Vec::with_capacity(num_frames);

        let mut input = vec![0.0; self.framesize];
        let mut spectrum = vec![Complex64::new(0.0, 0.0); self.bins()];

        for frame_idx in 0..num_frames {
            let start = frame_idx * self.hopsize;

            for (i, slot) in input.iter_mut().enumerate() {
                let sample = signal.get(start + i).copied().unwrap_or(0.0);
                *slot = sample * self.window[i];
            }

            self.fft_forward.process(&mut input, &mut spectrum).ok();
            frames.push(spectrum.clone());
        }

        frames
    }

    /// Inverse transform: spectrogram -> signal
    ///
    /// Synthesis-windowed overlap-add; each output position is divided
    /// by its accumulated squared-window sum. Returns `frames * hop`
    /// samples, the padded length of the matching `forward` call.
    pub fn inverse(&self, spectrogram: &Spectrogram) -> DspResult<Vec<Sample>> {
        if spectrogram.is_empty() {
            return Ok(Vec::new());
        }

        for (idx, frame) in spectrogram.iter().enumerate() {
            if frame.len() != self.bins() {
                return Err(DspError::InvalidConfig(format!(
                    "spectral frame {} has {} bins, expected {}",
                    idx,
                    frame.len(),
                    self.bins()
                )));
            }
        }

        let num_frames = spectrogram.len();
        let padded_len = (num_frames - 1) * self.hopsize + self.framesize;

        let mut output = vec![0.0; padded_len];
        let mut norm = vec![0.0; padded_len];

        let mut spectrum = vec![Complex64::new(0.0, 0.0); self.bins()];
        let mut frame = vec![0.0; self.framesize];
        let scale = 1.0 / self.framesize as f64;

        for (frame_idx, bins) in spectrogram.iter().enumerate() {
            spectrum.copy_from_slice(bins);

            // realfft rejects spectra whose DC or Nyquist bins carry an
            // imaginary part; magnitude/phase edits can introduce one.
            spectrum[0].im = 0.0;
            let last = spectrum.len() - 1;
            spectrum[last].im = 0.0;

            self.fft_inverse.process(&mut spectrum, &mut frame).ok();

            let start = frame_idx * self.hopsize;
            for (i, &value) in frame.iter().enumerate() {
                let win = self.window[i];
                output[start + i] += value * scale * win;
                norm[start + i] += win * win;
            }
        }

        for (sample, &energy) in output.iter_mut().zip(&norm) {
            if energy > NORM_EPSILON {
                *sample /= energy;
            } else {
                *sample = 0.0;
            }
        }

        output.truncate(num_frames * self.hopsize);
        Ok(output)
    }
}
