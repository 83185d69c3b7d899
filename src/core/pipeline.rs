//! Field activation pipeline: signal → coherence → network field → result
//!
//! Each run owns a fresh ResonanceNetwork; no state survives between runs,
//! so the same signal and participants always give the same result.

use std::path::Path;

use chrono::Utc;
use tracing::{debug, info};

use crate::core::{load_signal, CoherenceAnalyzer, ResonanceNetwork};
use crate::types::{
    ActivationConfig, ActivationReport, ActivationResult, CoherenceResult, ResonanceError, Result,
    Signal,
};

/// Orchestrates one activation
#[derive(Debug, Default)]
pub struct FieldActivationPipeline {
    analyzer: CoherenceAnalyzer,
}

impl FieldActivationPipeline {
    /// Create new pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the field from a signal; no signal means no result
    pub fn activate<P: AsRef<str>>(
        &self,
        signal: Option<&Signal>,
        participants: &[P],
        base_frequency: f64,
        ratio_constant: f64,
    ) -> Result<ActivationResult> {
        let signal = signal.ok_or_else(|| ResonanceError::MissingInput {
            detail: "no signal source supplied".to_string(),
        })?;
        let (result, _) = self.run(signal, participants, base_frequency, ratio_constant)?;
        Ok(result)
    }

    /// Like [`activate`](Self::activate), with the context the result came from
    pub fn activate_report<P: AsRef<str>>(
        &self,
        signal: Option<&Signal>,
        participants: &[P],
        base_frequency: f64,
        ratio_constant: f64,
    ) -> Result<ActivationReport> {
        let signal = signal.ok_or_else(|| ResonanceError::MissingInput {
            detail: "no signal source supplied".to_string(),
        })?;
        let (result, coherence) = self.run(signal, participants, base_frequency, ratio_constant)?;

        Ok(ActivationReport {
            timestamp: Utc::now(),
            result,
            measured_coherence: coherence.score,
            ratio_constant,
            participants: participants.iter().map(|p| p.as_ref().to_string()).collect(),
            amplitude_resonance: self.analyzer.amplitude_resonance(signal, ratio_constant),
            signal_digest: signal.digest(),
            sample_rate: signal.sample_rate(),
            duration_secs: signal.duration_secs(),
        })
    }

    /// Load a WAV file and activate; a missing file is a missing input
    pub fn activate_path<P: AsRef<str>>(
        &self,
        path: impl AsRef<Path>,
        participants: &[P],
        base_frequency: f64,
        ratio_constant: f64,
    ) -> Result<ActivationReport> {
        let signal = match load_signal(path.as_ref()) {
            Ok(signal) => signal,
            Err(ResonanceError::NotFound { path }) => {
                return Err(ResonanceError::MissingInput {
                    detail: format!("signal file {} not found", path.display()),
                })
            }
            Err(err) => return Err(err),
        };
        self.activate_report(Some(&signal), participants, base_frequency, ratio_constant)
    }

    /// Activate with participants and ratio taken from a config
    pub fn activate_with_config(
        &self,
        signal: Option<&Signal>,
        config: &ActivationConfig,
    ) -> Result<ActivationReport> {
        self.activate_report(
            signal,
            &config.participants,
            config.reported_base_frequency(),
            config.ratio_constant,
        )
    }

    fn run<P: AsRef<str>>(
        &self,
        signal: &Signal,
        participants: &[P],
        base_frequency: f64,
        ratio_constant: f64,
    ) -> Result<(ActivationResult, CoherenceResult)> {
        if !ratio_constant.is_finite() {
            return Err(ResonanceError::invalid("ratio_constant", "must be finite"));
        }

        let mut network = ResonanceNetwork::new();
        network.initialize(participants.iter().map(|p| p.as_ref()))?;

        let coherence = self.analyzer.measure(signal);
        let field = network.update_field(coherence.score, ratio_constant)?;
        let field_strength = network.field_strength(ratio_constant);

        debug!(
            score = coherence.score,
            reason = coherence.reason.code(),
            "coherence measured"
        );
        info!(
            field,
            field_strength,
            participants = network.participant_count(),
            "field activated"
        );

        let result = ActivationResult {
            coherence: field,
            field_strength,
            participant_count: network.participant_count(),
            base_frequency,
        };
        Ok((result, coherence))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ramp() -> Signal {
        let samples = (0..64).map(|i| ((i % 7) as f32 - 3.0) / 3.0).collect();
        Signal::new(samples, 8000).unwrap()
    }

    #[test]
    fn test_missing_signal() {
        let pipeline = FieldActivationPipeline::new();
        let err = pipeline.activate(None, &["A"], 963.0, 1.618).unwrap_err();
        assert!(matches!(err, ResonanceError::MissingInput { .. }));
    }

    #[test]
    fn test_field_strength_relation() {
        let pipeline = FieldActivationPipeline::new();
        let result = pipeline
            .activate(Some(&ramp()), &["A", "B", "C"], 963.0, 1.618)
            .unwrap();

        let measured = CoherenceAnalyzer::new().measure_coherence(&ramp());
        assert_eq!(result.coherence, measured * 1.618);
        assert_eq!(result.field_strength, result.coherence * 3.0 * 1.618);
        assert_eq!(result.participant_count, 3);
        assert_eq!(result.base_frequency, 963.0);
    }

    #[test]
    fn test_duplicate_participants_fail_before_analysis() {
        let pipeline = FieldActivationPipeline::new();
        let err = pipeline
            .activate(Some(&ramp()), &["A", "A"], 963.0, 1.618)
            .unwrap_err();
        assert!(matches!(err, ResonanceError::InvalidParameter { .. }));
    }

    #[test]
    fn test_empty_participant_list_activates() {
        let pipeline = FieldActivationPipeline::new();
        let result = pipeline
            .activate(Some(&ramp()), &[] as &[&str], 963.0, 1.618)
            .unwrap();

        let measured = CoherenceAnalyzer::new().measure_coherence(&ramp());
        assert_eq!(result.participant_count, 0);
        assert_eq!(result.field_strength, 0.0);
        assert_eq!(result.coherence, measured * 1.618);
    }

    #[test]
    fn test_short_signal_activates_with_zero_field() {
        let pipeline = FieldActivationPipeline::new();
        let signal = Signal::new(vec![0.3], 8000).unwrap();
        let result = pipeline.activate(Some(&signal), &["A", "B"], 963.0, 1.618).unwrap();
        assert_eq!(result.coherence, 0.0);
        assert_eq!(result.field_strength, 0.0);
    }

    #[test]
    fn test_report_context() {
        let pipeline = FieldActivationPipeline::new();
        let signal = ramp();
        let report = pipeline
            .activate_report(Some(&signal), &["A", "B"], 963.0, 2.0)
            .unwrap();

        assert_eq!(report.participants, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(report.result.coherence, report.measured_coherence * 2.0);
        assert_eq!(report.signal_digest, signal.digest());
        assert_eq!(report.amplitude_resonance, signal.mean_abs() * 2.0);
        assert_eq!(report.sample_rate, 8000);
    }

    #[test]
    fn test_missing_file_is_missing_input() {
        let pipeline = FieldActivationPipeline::new();
        let err = pipeline
            .activate_path("./no/such/signal.wav", &["A"], 963.0, 1.618)
            .unwrap_err();
        assert!(matches!(err, ResonanceError::MissingInput { .. }));
    }
}
