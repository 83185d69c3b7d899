//! Resonance: harmonic waveform synthesis and FFT phase-coherence pipeline
//!
//! Synthesizer → (Signal) → CoherenceAnalyzer → (score) → ResonanceNetwork → ActivationResult

pub mod core;
pub mod types;

// =============================================================================
// SYNTHESIS DEFAULTS
// =============================================================================

/// Default sample rate (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default signal duration (seconds)
pub const DEFAULT_DURATION_SECS: f64 = 60.0;

/// Base tone frequency (Hz)
pub const BASE_FREQUENCY_HZ: f64 = 963.0;

/// Base tone amplitude
pub const BASE_AMPLITUDE: f64 = 0.5;

/// Ratio between base and modulator frequency, also the default field ratio
pub const GOLDEN_RATIO: f64 = 1.61803398875;

/// Fixed amplitude of the modulator sine
pub const MODULATOR_AMPLITUDE: f64 = 0.5;

/// Depth of the amplitude modulation applied to the base tone
pub const MODULATION_DEPTH: f64 = 0.3;

/// Additive harmonics
pub const HARMONIC_432_HZ: f64 = 432.0;
pub const HARMONIC_528_HZ: f64 = 528.0;
pub const HARMONIC_AMPLITUDE: f64 = 0.2;

// =============================================================================
// COHERENCE
// =============================================================================

/// Phase-difference statistics need at least two bins
pub const MIN_COHERENCE_SAMPLES: usize = 2;

/// Bins at or below this fraction of the strongest bin are numerically silent
/// and take phase 0, the same convention as exactly-zero bins.
pub const PHASE_FLOOR_RELATIVE: f64 = 1e-7;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
