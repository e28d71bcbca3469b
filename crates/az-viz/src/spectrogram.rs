//! Spectrogram heat map rendering
//!
//! Frames run along the x axis, frequency bins along the y axis with
//! low frequencies at the bottom. Magnitudes are mapped to dB relative
//! to the spectrogram peak over a fixed dynamic range, then through a
//! viridis color map into 8-bit RGB.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use az_dsp::Spectrogram;
use thiserror::Error;

/// Visualization errors
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Nothing to render: {0}")]
    EmptySpectrogram(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for visualization
pub type VizResult<T> = Result<T, VizError>;

/// Spectrogram-to-PNG renderer
#[derive(Debug, Clone)]
pub struct SpectrogramImage {
    /// Minimum dB level for display (relative to peak)
    pub min_db: f64,
    /// Maximum dB level for display (relative to peak)
    pub max_db: f64,
}

impl Default for SpectrogramImage {
    fn default() -> Self {
        Self {
            min_db: -90.0,
            max_db: 0.0,
        }
    }
}

impl SpectrogramImage {
    /// Create a renderer with a custom dB display range
    pub fn new(min_db: f64, max_db: f64) -> Self {
        Self { min_db, max_db }
    }

    /// Render the spectrogram to a PNG file
    pub fn render(&self, spectrogram: &Spectrogram, path: &Path) -> VizResult<()> {
        let width = spectrogram.len();
        let height = spectrogram.first().map(|frame| frame.len()).unwrap_or(0);

        if width == 0 || height == 0 {
            return Err(VizError::EmptySpectrogram(format!(
                "{} frames x {} bins",
                width, height
            )));
        }

        let peak = spectrogram
            .iter()
            .flatten()
            .map(|bin| bin.norm())
            .fold(0.0, f64::max)
            .max(f64::MIN_POSITIVE);

        let mut pixels = Vec::with_capacity(width * height * 3);

        // Top row is the highest bin
        for y in 0..height {
            let bin = height - 1 - y;
            for frame in spectrogram.iter() {
                let normalized = self.normalize(frame[bin].norm() / peak);
                let [r, g, b] = viridis(normalized);
                pixels.push((r * 255.0) as u8);
                pixels.push((g * 255.0) as u8);
                pixels.push((b * 255.0) as u8);
            }
        }

        let file = File::create(path)?;
        let mut encoder = png::Encoder::new(BufWriter::new(file), width as u32, height as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| VizError::Encode(e.to_string()))?;
        writer
            .write_image_data(&pixels)
            .map_err(|e| VizError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| VizError::Encode(e.to_string()))?;

        log::info!("PLOT {} ({} frames x {} bins)", path.display(), width, height);

        Ok(())
    }

    /// Map a peak-relative linear magnitude into the display range
    fn normalize(&self, magnitude: f64) -> f64 {
        let db = if magnitude > 0.0 {
            20.0 * magnitude.log10()
        } else {
            self.min_db
        };

        ((db - self.min_db) / (self.max_db - self.min_db)).clamp(0.0, 1.0)
    }
}

/// Simplified viridis approximation, (r, g, b) in 0.0-1.0
fn viridis(t: f64) -> [f64; 3] {
    let t = t.clamp(0.0, 1.0);
    let r = 0.267 + t * (0.993 - 0.267);
    let g = if t < 0.5 {
        0.004 + t * 2.0 * (0.507 - 0.004)
    } else {
        0.507 + (t - 0.5) * 2.0 * (0.906 - 0.507)
    };
    let b = 0.329 + t * 0.1 * (1.0 - t) * 4.0;
    [r, g, b]
}
