//! Resonance CLI
//!
//! Usage:
//!   resonance synth --out tone.wav                     # Render the default waveform
//!   resonance synth --out t.wav --base 963Hz@0.5 --harmonic 432Hz@0.2
//!   resonance activate --input tone.wav -p A -p B      # Measure and activate
//!   resonance spectrum --input tone.wav --out s.json   # Export plot data
//!   resonance run                                      # synth + activate + spectrum
//!   resonance --json run                               # JSON output

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use resonance::core::{
    load_signal, save_signal, save_spectrum, FieldActivationPipeline, SpectrumAnalyzer,
    WaveformSynthesizer,
};
use resonance::types::{
    ActivationConfig, ActivationReport, ResonanceError, Signal, Spectrum, ToneRole, ToneSpec,
};
use resonance::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "resonance",
    version = VERSION,
    about = "Synthesize harmonic waveforms and measure their phase coherence",
    long_about = "Renders an amplitude-modulated base tone with additive harmonics,\n\
                  scores its FFT phase stability and reports the resulting field.\n\n\
                  Coherence = 1 / (1 + std(diff(phase(FFT(x)))))  -- a relative heuristic.\n\
                  Field strength = coherence * ratio * participants * ratio."
)]
struct Args {
    /// JSON config file (missing keys keep defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    no_color: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a waveform to a WAV file
    Synth {
        /// Output WAV path (default: config signal_path)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[command(flatten)]
        synthesis: SynthesisArgs,
    },

    /// Measure coherence of a WAV file and activate the field
    Activate {
        /// Input WAV path
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        field: FieldArgs,
    },

    /// Export the spectrum of a WAV file as JSON
    Spectrum {
        /// Input WAV path
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSON path (default: config spectrum_path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Render, activate and export in one go
    Run {
        #[command(flatten)]
        synthesis: SynthesisArgs,

        #[command(flatten)]
        field: FieldArgs,
    },
}

#[derive(clap::Args, Debug)]
struct SynthesisArgs {
    /// Duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Base tone, e.g. 963Hz@0.5
    #[arg(long, value_parser = parse_base)]
    base: Option<ToneSpec>,

    /// Base / modulator frequency ratio
    #[arg(long)]
    modulator_ratio: Option<f64>,

    /// Additive harmonic, repeatable, e.g. 432Hz@0.2 (replaces configured harmonics)
    #[arg(long = "harmonic", value_parser = parse_harmonic)]
    harmonics: Vec<ToneSpec>,
}

#[derive(clap::Args, Debug)]
struct FieldArgs {
    /// Participant name, repeatable (replaces configured participants)
    #[arg(short, long = "participant")]
    participants: Vec<String>,

    /// Ratio constant applied to the field
    #[arg(long)]
    ratio: Option<f64>,

    /// Base frequency reported in the result
    #[arg(long)]
    base_frequency: Option<f64>,
}

fn parse_base(s: &str) -> Result<ToneSpec, String> {
    ToneSpec::parse(s, ToneRole::Base).map_err(|e| e.to_string())
}

fn parse_harmonic(s: &str) -> Result<ToneSpec, String> {
    ToneSpec::parse(s, ToneRole::Harmonic).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), error_line(&e));
            ExitCode::FAILURE
        }
    }
}

/// `[code] description: detail`
fn error_line(e: &ResonanceError) -> String {
    format!("[{}] {}: {}", e.code(), e.description(), e)
}

fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the tracing subscriber; RUST_LOG wins over --verbose
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), ResonanceError> {
    let mut config = match &args.config {
        Some(path) => ActivationConfig::load(path)?,
        None => ActivationConfig::default(),
    };

    match &args.command {
        Command::Synth { out, synthesis } => {
            synthesis.apply(&mut config);
            let path = out.clone().unwrap_or_else(|| PathBuf::from(&config.signal_path));
            let signal = WaveformSynthesizer::new().synthesize_request(&config.synthesis)?;
            save_signal(&path, &signal)?;
            print_signal_saved(&path, &signal, args);
        }

        Command::Activate { input, field } => {
            field.apply(&mut config);
            let report = FieldActivationPipeline::new().activate_path(
                input,
                &config.participants,
                config.reported_base_frequency(),
                config.ratio_constant,
            )?;
            print_report(&report, args);
        }

        Command::Spectrum { input, out } => {
            let path = out.clone().unwrap_or_else(|| PathBuf::from(&config.spectrum_path));
            let signal = load_signal(input)?;
            let spectrum = SpectrumAnalyzer::new().analyze(&signal);
            save_spectrum(&path, &spectrum)?;
            print_spectrum_saved(&path, &spectrum, args);
        }

        Command::Run { synthesis, field } => {
            synthesis.apply(&mut config);
            field.apply(&mut config);

            let signal_path = PathBuf::from(&config.signal_path);
            let signal = WaveformSynthesizer::new().synthesize_request(&config.synthesis)?;
            save_signal(&signal_path, &signal)?;
            print_signal_saved(&signal_path, &signal, args);

            let report = FieldActivationPipeline::new().activate_path(
                &signal_path,
                &config.participants,
                config.reported_base_frequency(),
                config.ratio_constant,
            )?;
            print_report(&report, args);

            let spectrum_path = PathBuf::from(&config.spectrum_path);
            let spectrum = SpectrumAnalyzer::new().analyze(&signal);
            save_spectrum(&spectrum_path, &spectrum)?;
            print_spectrum_saved(&spectrum_path, &spectrum, args);
        }
    }

    Ok(())
}

impl SynthesisArgs {
    /// CLI flags override config values
    fn apply(&self, config: &mut ActivationConfig) {
        let synthesis = &mut config.synthesis;
        if let Some(duration) = self.duration {
            synthesis.duration_secs = duration;
        }
        if let Some(rate) = self.sample_rate {
            synthesis.sample_rate = rate;
        }
        if let Some(base) = self.base {
            synthesis.base = base;
        }
        if let Some(ratio) = self.modulator_ratio {
            synthesis.modulator_ratio = ratio;
        }
        if !self.harmonics.is_empty() {
            synthesis.harmonics = self.harmonics.clone();
        }
    }
}

impl FieldArgs {
    fn apply(&self, config: &mut ActivationConfig) {
        if !self.participants.is_empty() {
            config.participants = self.participants.clone();
        }
        if let Some(ratio) = self.ratio {
            config.ratio_constant = ratio;
        }
        if self.base_frequency.is_some() {
            config.base_frequency = self.base_frequency;
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
    }
}

fn signal_record(path: &std::path::Path, signal: &Signal) -> serde_json::Value {
    json!({
        "signal_path": path.display().to_string(),
        "samples": signal.len(),
        "sample_rate": signal.sample_rate(),
        "duration_secs": signal.duration_secs(),
        "peak": signal.peak(),
        "signal_digest": signal.digest(),
    })
}

fn spectrum_record(path: &std::path::Path, spectrum: &Spectrum) -> serde_json::Value {
    json!({
        "spectrum_path": path.display().to_string(),
        "bin_count": spectrum.bin_count,
        "sample_rate": spectrum.sample_rate,
        "peak_frequency": spectrum.peak_frequency(),
    })
}

fn print_signal_saved(path: &std::path::Path, signal: &Signal, args: &Args) {
    if args.json {
        print_json(&signal_record(path, signal));
        return;
    }
    println!(
        "{} {} ({:.2}s @ {}Hz, {} samples)",
        "saved".cyan(),
        path.display(),
        signal.duration_secs(),
        signal.sample_rate(),
        signal.len()
    );
}

fn print_spectrum_saved(path: &std::path::Path, spectrum: &Spectrum, args: &Args) {
    if args.json {
        print_json(&spectrum_record(path, spectrum));
        return;
    }
    let peak = spectrum
        .peak_frequency()
        .map(|f| format!("{:.1}Hz", f))
        .unwrap_or_else(|| "n/a".to_string());
    println!(
        "{} {} ({} bins, peak {})",
        "saved".cyan(),
        path.display(),
        spectrum.bin_count,
        peak
    );
}

fn print_report(report: &ActivationReport, args: &Args) {
    if args.json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
        return;
    }

    if args.no_color {
        println!("{}", report.result.to_parseable_string());
    } else {
        println!("{}", report.result.to_terminal_string());
    }

    if args.verbose {
        println!("  measured coherence:  {:.6}", report.measured_coherence);
        println!("  ratio constant:      {}", report.ratio_constant);
        println!("  amplitude resonance: {:.6}", report.amplitude_resonance);
        println!("  participants:        {}", report.participants.join(", "));
        println!(
            "  signal:              {:.2}s @ {}Hz  sha256={}",
            report.duration_secs,
            report.sample_rate,
            &report.signal_digest[..16]
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================
