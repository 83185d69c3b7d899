//! Coherence analyzer: phase stability of a signal's spectrum
//!
//! score = 1 / (1 + std(diff(phase(FFT(x)))))
//!
//! This is a relative heuristic for comparing signals, not a validated
//! physical coherence measure. Bins with no energy have no defined phase and
//! take phase 0; a bin counts as empty when its magnitude is at or below
//! `PHASE_FLOOR_RELATIVE` of the strongest bin.

use rustfft::{num_complex::Complex, FftPlanner};
use tracing::warn;

use crate::types::{CoherenceResult, ResonanceError, Result, Signal};
use crate::{MIN_COHERENCE_SAMPLES, PHASE_FLOOR_RELATIVE};

/// Forward, unnormalized complex FFT of real samples
pub(crate) fn fft_real(samples: &[f32]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .map(|&s| Complex::new(s as f64, 0.0))
        .collect();
    if buffer.is_empty() {
        return buffer;
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);
    buffer
}

/// Phase of every bin, empty bins mapped to 0
pub(crate) fn bin_phases(bins: &[Complex<f64>]) -> Vec<f64> {
    let strongest = bins.iter().fold(0.0_f64, |m, c| m.max(c.norm()));
    let floor = strongest * PHASE_FLOOR_RELATIVE;

    bins.iter()
        .map(|c| {
            let magnitude = c.norm();
            if magnitude == 0.0 || magnitude <= floor {
                0.0
            } else {
                c.arg()
            }
        })
        .collect()
}

/// Population standard deviation of consecutive differences
fn diff_std(values: &[f64]) -> f64 {
    let diffs: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    let n = diffs.len() as f64;
    let mean = diffs.iter().sum::<f64>() / n;
    let variance = diffs.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / n;
    variance.sqrt()
}

/// Coherence analyzer
#[derive(Debug, Default)]
pub struct CoherenceAnalyzer;

impl CoherenceAnalyzer {
    /// Create new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Measure coherence, failing on signals shorter than 2 samples
    pub fn try_measure(&self, signal: &Signal) -> Result<CoherenceResult> {
        if signal.len() < MIN_COHERENCE_SAMPLES {
            return Err(ResonanceError::InsufficientSamples {
                samples: signal.len(),
                required: MIN_COHERENCE_SAMPLES,
            });
        }

        let bins = fft_real(signal.samples());
        let phases = bin_phases(&bins);
        Ok(CoherenceResult::computed(diff_std(&phases), bins.len()))
    }

    /// Measure coherence; short signals get a defined 0.0 score and a warning
    pub fn measure(&self, signal: &Signal) -> CoherenceResult {
        match self.try_measure(signal) {
            Ok(result) => result,
            Err(err) => {
                warn!(code = err.code(), "{}; coherence defaults to 0.0", err);
                CoherenceResult::insufficient(signal.len())
            }
        }
    }

    /// Coherence score only
    pub fn measure_coherence(&self, signal: &Signal) -> f64 {
        self.measure(signal).score
    }

    /// Mean absolute amplitude scaled by `ratio` (0.0 for empty signals)
    pub fn amplitude_resonance(&self, signal: &Signal, ratio: f64) -> f64 {
        signal.mean_abs() * ratio
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CoherenceReason;

    fn signal(samples: Vec<f32>) -> Signal {
        Signal::new(samples, 8000).unwrap()
    }

    #[test]
    fn test_empty_signal_scores_zero() {
        let analyzer = CoherenceAnalyzer::new();
        let result = analyzer.measure(&signal(Vec::new()));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.reason, CoherenceReason::R102_INSUFFICIENT_SAMPLES);
    }

    #[test]
    fn test_single_sample_scores_zero() {
        let analyzer = CoherenceAnalyzer::new();
        assert_eq!(analyzer.measure_coherence(&signal(vec![0.7])), 0.0);
        assert!(matches!(
            analyzer.try_measure(&signal(vec![0.7])),
            Err(ResonanceError::InsufficientSamples { samples: 1, required: 2 })
        ));
    }

    #[test]
    fn test_zero_signal_scores_one() {
        let analyzer = CoherenceAnalyzer::new();
        let result = analyzer.measure(&signal(vec![0.0; 64]));
        assert!(result.is_computed());
        assert_eq!(result.phase_diff_std, Some(0.0));
        assert_eq!(result.score, 1.0);
    }

    #[test]
    fn test_constant_signal_scores_one() {
        // all energy in the DC bin, which has phase 0
        let analyzer = CoherenceAnalyzer::new();
        assert_eq!(analyzer.measure_coherence(&signal(vec![0.5; 32])), 1.0);
    }

    #[test]
    fn test_two_sample_alternating() {
        // FFT([1, -1]) = [0, 2], phases [0, 0]
        let analyzer = CoherenceAnalyzer::new();
        assert_eq!(analyzer.measure_coherence(&signal(vec![1.0, -1.0])), 1.0);
    }

    #[test]
    fn test_quarter_rate_sine() {
        // FFT([0, 1, 0, -1]) = [0, -2i, 0, 2i]
        // phases [0, -π/2, 0, π/2], diffs [-π/2, π/2, π/2], std = π·√2 / 3
        let analyzer = CoherenceAnalyzer::new();
        let result = analyzer.measure(&signal(vec![0.0, 1.0, 0.0, -1.0]));
        let expected_std = std::f64::consts::PI * 2.0_f64.sqrt() / 3.0;
        assert!((result.phase_diff_std.unwrap() - expected_std).abs() < 1e-12);
        assert!((result.score - 1.0 / (1.0 + expected_std)).abs() < 1e-12);
        assert_eq!(result.bin_count, 4);
    }

    #[test]
    fn test_score_in_unit_interval() {
        let analyzer = CoherenceAnalyzer::new();
        let samples: Vec<f32> = (0..257).map(|i| ((i * 37 % 101) as f32 / 50.0) - 1.0).collect();
        let score = analyzer.measure_coherence(&signal(samples));
        assert!(score > 0.0 && score <= 1.0);
    }

    #[test]
    fn test_amplitude_resonance() {
        let analyzer = CoherenceAnalyzer::new();
        let s = signal(vec![0.5, -0.5, 1.0, -1.0]);
        assert_eq!(analyzer.amplitude_resonance(&s, 2.0), 1.5);
        assert_eq!(analyzer.amplitude_resonance(&signal(Vec::new()), 2.0), 0.0);
    }
}
