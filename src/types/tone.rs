//! Tone specifications: one additive component of a synthesized signal

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{ResonanceError, Result};
use crate::{BASE_AMPLITUDE, HARMONIC_AMPLITUDE, MODULATOR_AMPLITUDE};

lazy_static! {
    // "963", "963Hz", "432 hz @ 0.2", "528@-0.1"
    static ref RE_TONE: Regex = Regex::new(
        r"(?i)^\s*(\d+(?:\.\d+)?)\s*(?:hz)?\s*(?:@\s*(-?\d+(?:\.\d+)?))?\s*$"
    ).unwrap();
}

/// What a tone contributes to the waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneRole {
    /// Carrier, amplitude-modulated
    Base,
    /// Derived sub-harmonic driving the modulation
    Modulator,
    /// Added on top of the modulated carrier
    Harmonic,
}

impl ToneRole {
    /// Amplitude used when a tone string omits one
    pub fn default_amplitude(&self) -> f64 {
        match self {
            ToneRole::Base => BASE_AMPLITUDE,
            ToneRole::Modulator => MODULATOR_AMPLITUDE,
            ToneRole::Harmonic => HARMONIC_AMPLITUDE,
        }
    }
}

impl std::fmt::Display for ToneRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ToneRole::Base => "base",
            ToneRole::Modulator => "modulator",
            ToneRole::Harmonic => "harmonic",
        };
        write!(f, "{}", name)
    }
}

/// Frequency / amplitude / role triple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    /// Frequency in Hz, must be positive
    pub frequency: f64,
    pub amplitude: f64,
    pub role: ToneRole,
}

impl ToneSpec {
    pub fn new(frequency: f64, amplitude: f64, role: ToneRole) -> Self {
        Self {
            frequency,
            amplitude,
            role,
        }
    }

    pub fn base(frequency: f64, amplitude: f64) -> Self {
        Self::new(frequency, amplitude, ToneRole::Base)
    }

    pub fn harmonic(frequency: f64, amplitude: f64) -> Self {
        Self::new(frequency, amplitude, ToneRole::Harmonic)
    }

    /// Reject non-positive or non-finite frequency and non-finite amplitude
    pub fn validate(&self) -> Result<()> {
        if !self.frequency.is_finite() || self.frequency <= 0.0 {
            return Err(ResonanceError::invalid(
                "frequency",
                format!("{} tone needs a positive frequency, got {}", self.role, self.frequency),
            ));
        }
        if !self.amplitude.is_finite() {
            return Err(ResonanceError::invalid(
                "amplitude",
                format!("{} tone amplitude is not finite", self.role),
            ));
        }
        Ok(())
    }

    /// Parse `"<freq>[Hz][@<amp>]"`, e.g. `432Hz@0.2`
    pub fn parse(text: &str, role: ToneRole) -> Result<Self> {
        let caps = RE_TONE.captures(text).ok_or_else(|| {
            ResonanceError::invalid("tone", format!("expected <freq>[Hz][@<amp>], got {:?}", text))
        })?;

        let frequency: f64 = caps[1]
            .parse()
            .map_err(|_| ResonanceError::invalid("tone", format!("bad frequency in {:?}", text)))?;

        let amplitude = match caps.get(2) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| ResonanceError::invalid("tone", format!("bad amplitude in {:?}", text)))?,
            None => role.default_amplitude(),
        };

        let tone = Self::new(frequency, amplitude, role);
        tone.validate()?;
        Ok(tone)
    }
}

impl std::fmt::Display for ToneSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}Hz@{}", self.frequency, self.amplitude)
    }
}
