//! WAV load/save for signals
//!
//! Saved signals are mono 32-bit float. Loading accepts any channel count
//! and keeps the first channel only; integer PCM is scaled into [-1, 1).

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::info;

use crate::types::{ResonanceError, Result, Signal};

/// Load a signal from a WAV file
pub fn load_signal(path: impl AsRef<Path>) -> Result<Signal> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            ResonanceError::NotFound {
                path: path.to_path_buf(),
            }
        }
        other => ResonanceError::Wav(other),
    })?;

    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()?
        }
    };

    let samples: Vec<f32> = interleaved.into_iter().step_by(channels).collect();

    info!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels,
        samples = samples.len(),
        "signal loaded"
    );

    Signal::new(samples, spec.sample_rate)
}

/// Save a signal as mono 32-bit float WAV, creating parent directories
pub fn save_signal(path: impl AsRef<Path>, signal: &Signal) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in signal.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    info!(
        path = %path.display(),
        samples = signal.len(),
        duration_secs = signal.duration_secs(),
        "signal saved"
    );
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
