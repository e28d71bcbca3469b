//! Error types for DSP processing

use thiserror::Error;

/// DSP processing errors
#[derive(Error, Debug)]
pub enum DspError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown mix mode: {0}")]
    UnknownMode(String),

    #[error("Channel length mismatch: left {left}, right {right}")]
    ChannelMismatch { left: usize, right: usize },
}

/// Result type for DSP operations
pub type DspResult<T> = Result<T, DspError>;
