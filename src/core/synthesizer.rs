//! Waveform synthesizer: amplitude-modulated base tone plus additive harmonics
//!
//! signal(t) = base(t) * (1 + 0.3 * mod(t)) + Σ harmonic(t), then peak-normalized.
//! The modulator runs at base.frequency / ratio with a fixed amplitude of 0.5.

use std::f64::consts::TAU;

use tracing::debug;

use crate::types::{ResonanceError, Result, Signal, SynthesisRequest, ToneRole, ToneSpec};
use crate::{MODULATION_DEPTH, MODULATOR_AMPLITUDE};

/// Pure synthesizer, no state
#[derive(Debug, Default)]
pub struct WaveformSynthesizer;

impl WaveformSynthesizer {
    /// Create new synthesizer
    pub fn new() -> Self {
        Self
    }

    /// Tone derived from the base for amplitude modulation
    pub fn modulator_tone(base: &ToneSpec, modulator_ratio: f64) -> ToneSpec {
        ToneSpec::new(
            base.frequency / modulator_ratio,
            MODULATOR_AMPLITUDE,
            ToneRole::Modulator,
        )
    }

    /// Synthesize `round(sample_rate * duration)` samples over `[0, duration)`
    pub fn synthesize(
        &self,
        duration_secs: f64,
        sample_rate: u32,
        base: &ToneSpec,
        modulator_ratio: f64,
        harmonics: &[ToneSpec],
    ) -> Result<Signal> {
        let n = Self::validate(duration_secs, sample_rate, base, modulator_ratio, harmonics)?;
        let modulator = Self::modulator_tone(base, modulator_ratio);

        debug!(
            samples = n,
            base = %base,
            modulator_hz = modulator.frequency,
            harmonics = harmonics.len(),
            "synthesizing waveform"
        );

        let step = duration_secs / n as f64;
        let raw: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 * step;
                let base_wave = base.amplitude * (TAU * base.frequency * t).sin();
                let mod_wave = modulator.amplitude * (TAU * modulator.frequency * t).sin();
                harmonics.iter().fold(
                    base_wave * (1.0 + MODULATION_DEPTH * mod_wave),
                    |acc, h| acc + h.amplitude * (TAU * h.frequency * t).sin(),
                )
            })
            .collect();

        let peak = raw.iter().fold(0.0_f64, |m, x| m.max(x.abs()));
        if peak == 0.0 {
            return Err(ResonanceError::DegenerateSignal { samples: n });
        }

        let samples = raw.iter().map(|x| (x / peak) as f32).collect();
        Signal::new(samples, sample_rate)
    }

    /// Synthesize from a grouped request
    pub fn synthesize_request(&self, request: &SynthesisRequest) -> Result<Signal> {
        self.synthesize(
            request.duration_secs,
            request.sample_rate,
            &request.base,
            request.modulator_ratio,
            &request.harmonics,
        )
    }

    /// Check all arguments, return the sample count
    fn validate(
        duration_secs: f64,
        sample_rate: u32,
        base: &ToneSpec,
        modulator_ratio: f64,
        harmonics: &[ToneSpec],
    ) -> Result<usize> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ResonanceError::invalid(
                "duration",
                format!("must be positive, got {}", duration_secs),
            ));
        }
        if sample_rate == 0 {
            return Err(ResonanceError::invalid("sample_rate", "must be positive"));
        }
        if !modulator_ratio.is_finite() || modulator_ratio <= 0.0 {
            return Err(ResonanceError::invalid(
                "modulator_ratio",
                format!("must be positive, got {}", modulator_ratio),
            ));
        }
        base.validate()?;
        for h in harmonics {
            h.validate()?;
        }

        let n = (sample_rate as f64 * duration_secs).round();
        if n < 1.0 {
            return Err(ResonanceError::invalid(
                "duration",
                format!("{}s at {}Hz yields no samples", duration_secs, sample_rate),
            ));
        }
        Ok(n as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn harmonics() -> Vec<ToneSpec> {
        vec![ToneSpec::harmonic(432.0, 0.2), ToneSpec::harmonic(528.0, 0.2)]
    }

    #[test]
    fn test_length_is_rounded_product() {
        let synth = WaveformSynthesizer::new();
        let base = ToneSpec::base(963.0, 0.5);

        let signal = synth.synthesize(1.0, 8000, &base, 1.618, &harmonics()).unwrap();
        assert_eq!(signal.len(), 8000);
        assert_eq!(signal.sample_rate(), 8000);

        // 0.25 s * 6 Hz = 1.5 → 2 samples
        let rounded_up = synth.synthesize(0.25, 6, &base, 1.618, &[]).unwrap();
        assert_eq!(rounded_up.len(), 2);

        // 0.25 s * 5 Hz = 1.25 → 1 sample, which is t = 0 and therefore silent
        let single = synth.synthesize(0.25, 5, &base, 1.618, &[]);
        assert!(matches!(
            single,
            Err(ResonanceError::DegenerateSignal { samples: 1 })
        ));
    }

    #[test]
    fn test_peak_is_exactly_one() {
        let synth = WaveformSynthesizer::new();
        let signal = synth
            .synthesize(0.5, 8000, &ToneSpec::base(963.0, 0.5), 1.618, &harmonics())
            .unwrap();
        assert_eq!(signal.peak(), 1.0);
        assert!(signal.samples().iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn test_first_sample_is_zero() {
        // every component is a sine starting at t = 0
        let synth = WaveformSynthesizer::new();
        let signal = synth
            .synthesize(0.1, 8000, &ToneSpec::base(963.0, 0.5), 1.618, &harmonics())
            .unwrap();
        assert_eq!(signal.samples()[0], 0.0);
    }

    #[test]
    fn test_silent_input_is_degenerate() {
        let synth = WaveformSynthesizer::new();
        let result = synth.synthesize(1.0, 8000, &ToneSpec::base(963.0, 0.0), 1.618, &[]);
        assert!(matches!(
            result,
            Err(ResonanceError::DegenerateSignal { samples: 8000 })
        ));
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let synth = WaveformSynthesizer::new();
        let base = ToneSpec::base(963.0, 0.5);

        assert!(synth.synthesize(0.0, 8000, &base, 1.618, &[]).is_err());
        assert!(synth.synthesize(-1.0, 8000, &base, 1.618, &[]).is_err());
        assert!(synth.synthesize(1.0, 0, &base, 1.618, &[]).is_err());
        assert!(synth.synthesize(1.0, 8000, &base, 0.0, &[]).is_err());
        assert!(synth.synthesize(0.0001, 1000, &base, 1.618, &[]).is_err());
        assert!(synth
            .synthesize(1.0, 8000, &base, 1.618, &[ToneSpec::harmonic(-5.0, 0.2)])
            .is_err());
    }

    #[test]
    fn test_modulator_tone() {
        let tone = WaveformSynthesizer::modulator_tone(&ToneSpec::base(963.0, 0.5), 1.618);
        assert_eq!(tone.role, ToneRole::Modulator);
        assert_eq!(tone.frequency, 963.0 / 1.618);
        assert_eq!(tone.amplitude, 0.5);
    }

    #[test]
    fn test_deterministic() {
        let synth = WaveformSynthesizer::new();
        let base = ToneSpec::base(963.0, 0.5);
        let a = synth.synthesize(0.25, 8000, &base, 1.618, &harmonics()).unwrap();
        let b = synth.synthesize(0.25, 8000, &base, 1.618, &harmonics()).unwrap();
        assert_eq!(a, b);
    }
}
