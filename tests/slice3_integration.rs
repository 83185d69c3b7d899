//! Integration tests for Slice 3
//!
//! Tests the full activation: synthesize → FieldActivationPipeline → ActivationResult

use pretty_assertions::assert_eq;

use resonance::core::{CoherenceAnalyzer, FieldActivationPipeline, WaveformSynthesizer};
use resonance::types::{ActivationConfig, ActivationResult, ResonanceError, Signal, ToneSpec};

fn reference_signal() -> Signal {
    WaveformSynthesizer::new()
        .synthesize(
            1.0,
            8000,
            &ToneSpec::base(963.0, 0.5),
            1.618,
            &[ToneSpec::harmonic(432.0, 0.2), ToneSpec::harmonic(528.0, 0.2)],
        )
        .unwrap()
}

/// Reference example: field strength is exactly coherence * 4 * 1.618
#[test]
fn test_reference_activation() {
    let signal = reference_signal();
    let pipeline = FieldActivationPipeline::new();

    let result = pipeline
        .activate(Some(&signal), &["A", "B", "C", "D"], 963.0, 1.618)
        .unwrap();

    assert_eq!(result.field_strength, result.coherence * 4.0 * 1.618);
    assert_eq!(result.participant_count, 4);
    assert_eq!(result.base_frequency, 963.0);

    let measured = CoherenceAnalyzer::new().measure_coherence(&signal);
    assert!((0.0..=1.0).contains(&measured));
    assert_eq!(result.coherence, measured * 1.618);
}

/// No signal → MissingInput, nothing produced
#[test]
fn test_missing_input() {
    let pipeline = FieldActivationPipeline::new();
    let err = pipeline
        .activate(None, &["A", "B", "C", "D"], 963.0, 1.618)
        .unwrap_err();

    assert_eq!(err.code(), "R204_MISSING_INPUT");
    assert!(matches!(err, ResonanceError::MissingInput { .. }));
}

/// Same signal and participants always give the same result
#[test]
fn test_activation_idempotent() {
    let signal = reference_signal();
    let pipeline = FieldActivationPipeline::new();
    let participants = ["A", "B", "C", "D"];

    let first = pipeline.activate(Some(&signal), &participants, 963.0, 1.618).unwrap();
    let second = pipeline.activate(Some(&signal), &participants, 963.0, 1.618).unwrap();
    let fresh = FieldActivationPipeline::new()
        .activate(Some(&signal), &participants, 963.0, 1.618)
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first, fresh);
}

/// Report carries the raw score and the context
#[test]
fn test_activation_report() {
    let signal = reference_signal();
    let config = ActivationConfig {
        participants: vec!["A".into(), "B".into()],
        ratio_constant: 2.0,
        ..ActivationConfig::default()
    };

    let report = FieldActivationPipeline::new()
        .activate_with_config(Some(&signal), &config)
        .unwrap();

    assert_eq!(report.result.participant_count, 2);
    assert_eq!(report.result.base_frequency, 963.0);
    assert_eq!(report.result.coherence, report.measured_coherence * 2.0);
    assert_eq!(report.signal_digest, signal.digest());
    assert_eq!(report.duration_secs, 1.0);
}

/// JSON output is valid and round-trips
#[test]
fn test_json_output_valid() {
    let result = FieldActivationPipeline::new()
        .activate(Some(&reference_signal()), &["A", "B"], 963.0, 1.618)
        .unwrap();

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"coherence\""));
    assert!(json.contains("\"field_strength\""));
    assert!(json.contains("\"participant_count\":2"));

    let restored: ActivationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, result);
}

/// Parseable output format
#[test]
fn test_parseable_output_format() {
    let result = ActivationResult {
        coherence: 0.5,
        field_strength: 3.236,
        participant_count: 4,
        base_frequency: 963.0,
    };
    assert_eq!(
        result.to_parseable_string(),
        "coherence=0.5000 | field_strength=3.2360 | participants=4 | base=963Hz"
    );
}
