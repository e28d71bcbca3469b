//! Error types for offline separation

use thiserror::Error;

/// Offline separation errors
#[derive(Error, Debug)]
pub enum SeparationError {
    #[error("Failed to read audio file: {0}")]
    ReadError(String),

    #[error("Failed to write output file: {0}")]
    WriteError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid input shape: {0}")]
    InputShape(String),

    #[error("Invalid output shape: {0}")]
    OutputShape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DSP error: {0}")]
    Dsp(#[from] az_dsp::DspError),
}

/// Result type for offline separation
pub type SeparationResult<T> = Result<T, SeparationError>;
