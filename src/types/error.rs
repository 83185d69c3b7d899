//! Error type shared by every stage of the pipeline
//!
//! Each variant carries a stable reason code, in the same R-code style used
//! for coherence results.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::NetworkState;

pub type Result<T> = std::result::Result<T, ResonanceError>;

/// Failures raised by synthesis, analysis, the network and the I/O adapters
#[derive(Debug, Error)]
pub enum ResonanceError {
    /// Synthesis produced an all-zero signal, normalization skipped
    #[error("synthesized signal is silent ({samples} samples), nothing to normalize")]
    DegenerateSignal { samples: usize },

    /// Coherence requested on fewer than 2 samples
    #[error("coherence needs at least {required} samples, got {samples}")]
    InsufficientSamples { samples: usize, required: usize },

    /// Network operation called out of order
    #[error("cannot {operation} while network is {state}")]
    InvalidState {
        operation: &'static str,
        state: NetworkState,
    },

    /// Pipeline invoked without a signal
    #[error("no signal available: {detail}")]
    MissingInput { detail: String },

    /// Rejected argument
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Signal file does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResonanceError {
    /// Shorthand for [`ResonanceError::InvalidParameter`]
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::DegenerateSignal { .. } => "R201_DEGENERATE_SIGNAL",
            Self::InsufficientSamples { .. } => "R202_INSUFFICIENT_SAMPLES",
            Self::InvalidState { .. } => "R203_INVALID_STATE",
            Self::MissingInput { .. } => "R204_MISSING_INPUT",
            Self::InvalidParameter { .. } => "R205_INVALID_PARAMETER",
            Self::NotFound { .. } => "R206_NOT_FOUND",
            Self::Io(_) => "R207_IO_ERROR",
            Self::Wav(_) => "R208_WAV_ERROR",
            Self::Json(_) => "R209_JSON_ERROR",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::DegenerateSignal { .. } => "Degenerate (all-zero) signal",
            Self::InsufficientSamples { .. } => "Not enough samples",
            Self::InvalidState { .. } => "Operation out of order",
            Self::MissingInput { .. } => "Signal source missing",
            Self::InvalidParameter { .. } => "Invalid parameter",
            Self::NotFound { .. } => "File not found",
            Self::Io(_) => "I/O failure",
            Self::Wav(_) => "WAV encode/decode failure",
            Self::Json(_) => "JSON encode/decode failure",
        }
    }
}
