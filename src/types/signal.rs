//! Sampled signal: mono f32 samples at a fixed rate

use sha2::{Digest, Sha256};

use crate::types::{ResonanceError, Result};

/// Immutable mono signal
///
/// Samples are stored as `f32`, the same fixed-width representation written
/// to disk, so a save/load cycle analyzes identically.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Signal {
    /// Wrap samples; the sample rate must be positive
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(ResonanceError::invalid("sample_rate", "must be positive"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Largest absolute sample (0.0 when empty)
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0_f32, |m, s| m.max(s.abs()))
    }

    /// Mean absolute sample (0.0 when empty)
    pub fn mean_abs(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().map(|s| s.abs() as f64).sum::<f64>() / self.samples.len() as f64
    }

    /// New signal with every sample multiplied by `gain`
    pub fn scaled(&self, gain: f32) -> Signal {
        Signal {
            samples: self.samples.iter().map(|s| s * gain).collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// SHA-256 over the sample rate and samples (little-endian), hex encoded
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.sample_rate.to_le_bytes());
        for s in &self.samples {
            hasher.update(s.to_le_bytes());
        }
        hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect()
    }
}
