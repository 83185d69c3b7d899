//! Activation outputs

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Summary of one pipeline run
///
/// `coherence` is the network field after the update (measured score times
/// the ratio constant), so `field_strength == coherence * participant_count * ratio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationResult {
    pub coherence: f64,
    pub field_strength: f64,
    pub participant_count: usize,
    pub base_frequency: f64,
}

impl ActivationResult {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!(
            "{} coherence={} | field_strength={} | participants={} | base={}Hz",
            "◉".green(),
            format!("{:.4}", self.coherence).bold(),
            format!("{:.4}", self.field_strength).bold().green(),
            self.participant_count,
            self.base_frequency
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "coherence={:.4} | field_strength={:.4} | participants={} | base={}Hz",
            self.coherence, self.field_strength, self.participant_count, self.base_frequency
        )
    }
}

/// Activation result plus the context it was computed from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationReport {
    /// Timestamp
    pub timestamp: DateTime<Utc>,
    pub result: ActivationResult,
    /// Score straight from the analyzer, before the ratio is applied
    pub measured_coherence: f64,
    pub ratio_constant: f64,
    pub participants: Vec<String>,
    /// Mean absolute amplitude times the ratio constant
    pub amplitude_resonance: f64,
    /// SHA-256 of the analyzed signal
    pub signal_digest: String,
    pub sample_rate: u32,
    pub duration_secs: f64,
}
