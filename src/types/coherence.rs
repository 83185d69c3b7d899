//! Coherence result types
//!
//! The score is a relative phase-stability heuristic, not a calibrated
//! physical quantity: `1 / (1 + std(diff(arg(FFT(x)))))`.

use serde::{Deserialize, Serialize};

/// Outcome of one coherence measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceResult {
    /// Score: 1.0 for perfectly phase-stable input, lower as phase differences spread
    pub score: f64,
    /// Population std of consecutive phase differences, None if not computed
    pub phase_diff_std: Option<f64>,
    /// Number of FFT bins analyzed
    pub bin_count: usize,
    /// Reason code
    pub reason: CoherenceReason,
}

impl CoherenceResult {
    /// Create a computed result from the phase-difference spread
    pub fn computed(phase_diff_std: f64, bin_count: usize) -> Self {
        Self {
            score: 1.0 / (1.0 + phase_diff_std),
            phase_diff_std: Some(phase_diff_std),
            bin_count,
            reason: CoherenceReason::R101_COHERENCE_COMPUTED,
        }
    }

    /// Defined zero score for signals too short to analyze
    pub fn insufficient(sample_count: usize) -> Self {
        Self {
            score: 0.0,
            phase_diff_std: None,
            bin_count: sample_count,
            reason: CoherenceReason::R102_INSUFFICIENT_SAMPLES,
        }
    }

    pub fn is_computed(&self) -> bool {
        self.reason == CoherenceReason::R101_COHERENCE_COMPUTED
    }
}

/// Reason codes for coherence measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum CoherenceReason {
    /// Score computed from phase differences
    R101_COHERENCE_COMPUTED,
    /// Fewer than 2 samples, score defaulted to 0.0
    R102_INSUFFICIENT_SAMPLES,
}

impl CoherenceReason {
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_COHERENCE_COMPUTED => "R101_COHERENCE_COMPUTED",
            Self::R102_INSUFFICIENT_SAMPLES => "R102_INSUFFICIENT_SAMPLES",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_COHERENCE_COMPUTED => "Coherence computed",
            Self::R102_INSUFFICIENT_SAMPLES => "Not enough samples, score is 0",
        }
    }
}

impl std::fmt::Display for CoherenceReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
