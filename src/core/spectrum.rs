//! Spectrum export: the data behind waveform, magnitude and phase plots

use std::path::Path;

use tracing::info;

use crate::core::analyzer::{bin_phases, fft_real};
use crate::types::{Result, Signal, Spectrum};

/// Builds plot-ready spectra
#[derive(Debug, Default)]
pub struct SpectrumAnalyzer;

impl SpectrumAnalyzer {
    /// Create new analyzer
    pub fn new() -> Self {
        Self
    }

    /// Waveform, frequencies, one-sided magnitudes and phases of the signal.
    ///
    /// The signal is divided by its peak first, so integer or quiet WAV
    /// input lands on the same scale as a freshly synthesized one. A silent
    /// signal is analyzed as-is.
    pub fn analyze(&self, signal: &Signal) -> Spectrum {
        if signal.is_empty() {
            return Spectrum::empty(signal.sample_rate());
        }

        let normalized = Self::normalize(signal.samples());
        let bins = fft_real(&normalized);
        let n = bins.len();

        Spectrum {
            sample_rate: signal.sample_rate(),
            bin_count: n,
            time: self.time_axis(signal),
            waveform: normalized.iter().map(|&s| s as f64).collect(),
            frequencies: Self::fft_frequencies(n, signal.sample_rate()),
            magnitudes: bins[..n / 2]
                .iter()
                .map(|c| 2.0 / n as f64 * c.norm())
                .collect(),
            phases: bin_phases(&bins),
        }
    }

    fn normalize(samples: &[f32]) -> Vec<f32> {
        let peak = samples.iter().fold(0.0_f32, |m, s| m.max(s.abs()));
        if peak == 0.0 {
            return samples.to_vec();
        }
        samples.iter().map(|s| s / peak).collect()
    }

    /// Bin centre frequencies: 0, 1, …, ⌈n/2⌉-1, then -⌊n/2⌋, …, -1 (times rate / n)
    pub fn fft_frequencies(n: usize, sample_rate: u32) -> Vec<f64> {
        let val = 1.0 / (n as f64 * (1.0 / sample_rate as f64));
        let positive = (n - 1) / 2 + 1;
        (0..n)
            .map(|k| {
                let index = if k < positive {
                    k as f64
                } else {
                    k as f64 - n as f64
                };
                index * val
            })
            .collect()
    }

    /// Time of each sample, `len` evenly spaced points from 0 to len / rate inclusive
    pub fn time_axis(&self, signal: &Signal) -> Vec<f64> {
        let len = signal.len();
        match len {
            0 => Vec::new(),
            1 => vec![0.0],
            _ => {
                let stop = signal.duration_secs();
                let last = len - 1;
                let step = stop / last as f64;
                (0..len)
                    .map(|i| if i == last { stop } else { i as f64 * step })
                    .collect()
            }
        }
    }
}

/// Save spectrum to JSON file
pub fn save_spectrum(path: impl AsRef<Path>, spectrum: &Spectrum) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let json = serde_json::to_string_pretty(spectrum)?;
    std::fs::write(path, json)?;

    info!(path = %path.display(), bins = spectrum.bin_count, "spectrum saved");
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
