//! Core types for the resonance pipeline

mod error;
mod tone;
mod signal;
mod coherence;
mod network;
mod activation;
mod spectrum;
mod config;

pub use error::{ResonanceError, Result};
pub use tone::{ToneRole, ToneSpec};
pub use signal::Signal;
pub use coherence::{CoherenceResult, CoherenceReason};
pub use network::NetworkState;
pub use activation::{ActivationResult, ActivationReport};
pub use spectrum::Spectrum;
pub use config::{SynthesisRequest, ActivationConfig};
