//! Run configuration
//!
//! Defaults reproduce the reference render: 60 s at 44.1 kHz, a 963 Hz base
//! modulated at the golden ratio, harmonics at 432 Hz and 528 Hz.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{ResonanceError, Result, ToneSpec};
use crate::{
    BASE_AMPLITUDE, BASE_FREQUENCY_HZ, DEFAULT_DURATION_SECS, DEFAULT_SAMPLE_RATE, GOLDEN_RATIO,
    HARMONIC_432_HZ, HARMONIC_528_HZ, HARMONIC_AMPLITUDE,
};

/// Arguments of one synthesis call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisRequest {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub base: ToneSpec,
    /// Modulator frequency = base frequency / ratio
    pub modulator_ratio: f64,
    pub harmonics: Vec<ToneSpec>,
}

impl Default for SynthesisRequest {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            base: ToneSpec::base(BASE_FREQUENCY_HZ, BASE_AMPLITUDE),
            modulator_ratio: GOLDEN_RATIO,
            harmonics: vec![
                ToneSpec::harmonic(HARMONIC_432_HZ, HARMONIC_AMPLITUDE),
                ToneSpec::harmonic(HARMONIC_528_HZ, HARMONIC_AMPLITUDE),
            ],
        }
    }
}

/// Everything a full `run` needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    pub synthesis: SynthesisRequest,
    pub participants: Vec<String>,
    pub ratio_constant: f64,
    /// Reported base frequency; follows the synthesis base unless set
    pub base_frequency: Option<f64>,
    /// Where `run` writes the rendered signal
    pub signal_path: String,
    /// Where `run` writes the spectrum JSON
    pub spectrum_path: String,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            synthesis: SynthesisRequest::default(),
            participants: ["alpha", "beta", "gamma", "delta"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ratio_constant: GOLDEN_RATIO,
            base_frequency: None,
            signal_path: "./output/harmonics.wav".to_string(),
            spectrum_path: "./output/spectrum.json".to_string(),
        }
    }
}

impl ActivationConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ResonanceError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ResonanceError::Io(e),
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Base frequency reported in results
    pub fn reported_base_frequency(&self) -> f64 {
        self.base_frequency.unwrap_or(self.synthesis.base.frequency)
    }
}
