use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use mlsdeconv::MlsTables;
use mlsdeconv::config::MeasurementConfig;
use mlsdeconv::mls::{MlsOrder, repeat_periods, to_bipolar_scaled};
use mlsdeconv::output::iso8601_timestamp;
use mlsdeconv::storage::{
    MLS_FILE, STIMULUS_FILE, TAG_L_FILE, TAG_S_FILE, save_tables, save_wav,
};

const STIMULUS_WAV: &str = "stimulus.wav";

#[derive(Parser, Debug)]
#[command(name = "generate_tables")]
#[command(about = "Generate an MLS stimulus and its deconvolution tables")]
struct Args {
    /// MLS order (3-18)
    #[arg(short = 'n', long)]
    order: Option<MlsOrder>,

    /// TOML measurement configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/tables")]
    output_dir: PathBuf,

    /// Sample rate of the stimulus WAV in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Peak amplitude of the stimulus WAV (0-1]
    #[arg(long)]
    amplitude: Option<f64>,

    /// Periods of the sequence written to the stimulus WAV
    #[arg(long, default_value_t = 2)]
    periods: usize,

    /// Skip writing manifest.json
    #[arg(long)]
    no_manifest: bool,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Serialize)]
struct Manifest {
    generated_at: String,
    order: u32,
    period: usize,
    sample_rate: u32,
    amplitude: f64,
    stimulus_periods: usize,
    files: Vec<&'static str>,
}

fn load_config(args: &Args) -> Result<MeasurementConfig> {
    let mut config = match &args.config {
        Some(path) => MeasurementConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MeasurementConfig::default(),
    };
    if let Some(order) = args.order {
        config.sequence.order = order;
    }
    if let Some(sample_rate) = args.sample_rate {
        config.audio.sample_rate = sample_rate;
    }
    if let Some(amplitude) = args.amplitude {
        config.sequence.amplitude = amplitude;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if args.periods == 0 {
        anyhow::bail!("--periods must be at least 1");
    }

    let config = load_config(&args)?;
    let order = config.sequence.order;

    let tables = MlsTables::build(order).context("Failed to build MLS tables")?;
    save_tables(&args.output_dir, &tables).context("Failed to write tables")?;

    let playback = repeat_periods(
        &to_bipolar_scaled(tables.mls().bits(), config.sequence.amplitude),
        args.periods,
    );
    save_wav(
        args.output_dir.join(STIMULUS_WAV),
        &playback,
        config.audio.sample_rate,
    )
    .context("Failed to write stimulus WAV")?;

    if !args.no_manifest {
        let manifest = Manifest {
            generated_at: iso8601_timestamp(),
            order: order.get(),
            period: order.period(),
            sample_rate: config.audio.sample_rate,
            amplitude: config.sequence.amplitude,
            stimulus_periods: args.periods,
            files: vec![MLS_FILE, STIMULUS_FILE, TAG_S_FILE, TAG_L_FILE, STIMULUS_WAV],
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Order {} tables ({} samples) written to {}",
        order,
        order.period(),
        args.output_dir.display()
    );
    Ok(())
}
