//! Core modules for the resonance pipeline

pub mod synthesizer;
pub mod analyzer;
pub mod network;
pub mod pipeline;
pub mod wav;
pub mod spectrum;

pub use synthesizer::WaveformSynthesizer;
pub use analyzer::CoherenceAnalyzer;
pub use network::ResonanceNetwork;
pub use pipeline::FieldActivationPipeline;
pub use wav::{load_signal, save_signal};
pub use spectrum::{SpectrumAnalyzer, save_spectrum};
