//! Time- and frequency-domain view of a signal, as consumed by plotting tools

use serde::{Deserialize, Serialize};

/// FFT of a signal laid out for plotting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub sample_rate: u32,
    /// Number of FFT bins (= sample count)
    pub bin_count: usize,
    /// Sample times in seconds, inclusive of the end point
    pub time: Vec<f64>,
    /// Peak-normalized waveform, one value per entry of `time`
    pub waveform: Vec<f64>,
    /// Bin centre frequencies, `fftfreq` order (non-negative then negative)
    pub frequencies: Vec<f64>,
    /// One-sided amplitude `2/N * |X_k|` for `k < N/2`
    pub magnitudes: Vec<f64>,
    /// Phase of every bin (radians)
    pub phases: Vec<f64>,
}

impl Spectrum {
    /// Spectrum of an empty signal
    pub fn empty(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            bin_count: 0,
            time: Vec::new(),
            waveform: Vec::new(),
            frequencies: Vec::new(),
            magnitudes: Vec::new(),
            phases: Vec::new(),
        }
    }

    /// Frequency of the strongest one-sided bin
    pub fn peak_frequency(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.frequencies[k])
    }
}
