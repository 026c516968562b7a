use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use mlsdeconv::MlsTables;
use mlsdeconv::mls::{MlsOrder, repeat_periods};
use mlsdeconv::simulation::{LinearSystem, NoiseConfig, REFERENCE_TAPS, apply_noise};
use mlsdeconv::storage::save_buffer;

#[derive(Parser, Debug)]
#[command(name = "synthesize_capture")]
#[command(about = "Simulate a capture of the MLS stimulus through a linear system")]
struct Args {
    /// MLS order (3-18)
    #[arg(short = 'n', long, default_value = "18")]
    order: MlsOrder,

    /// System taps, comma-separated (default: 2.0,0.4,0.2,-0.1,-0.8)
    #[arg(short, long)]
    taps: Option<String>,

    /// Bulk delay of the system in samples
    #[arg(short, long, default_value_t = 0)]
    delay: usize,

    /// Whole periods to write; the capture is in steady state throughout
    #[arg(short, long, default_value_t = 1)]
    periods: usize,

    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// AWGN SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f64>,

    /// Constant offset added to the capture (CLI override)
    #[arg(long)]
    dc_offset: Option<f64>,

    /// Seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// Sample rate for WAV output in Hz
    #[arg(long, default_value_t = 96000)]
    sample_rate: u32,

    /// Output file (.wav or .csv)
    #[arg(short, long, default_value = "capture.csv")]
    output: PathBuf,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    system: Option<LinearSystem>,
    noise: NoiseConfig,
}

fn parse_taps(s: &str) -> Result<Vec<f64>> {
    s.split(',')
        .map(|p| p.trim().parse::<f64>().context("Invalid tap value"))
        .collect()
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_system(toml: &TomlConfig, args: &Args) -> Result<LinearSystem> {
    let system = match (&args.taps, &toml.system) {
        (Some(taps), _) => LinearSystem::new(parse_taps(taps)?, args.delay)?,
        (None, Some(system)) => LinearSystem::new(system.taps.clone(), system.delay)?,
        (None, None) => LinearSystem::new(REFERENCE_TAPS.to_vec(), args.delay)?,
    };
    Ok(system)
}

fn build_noise_config(toml: &TomlConfig, args: &Args) -> NoiseConfig {
    let mut config = toml.noise.clone();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(snr) = args.snr {
        config = config.with_awgn(snr);
    }
    if let Some(offset) = args.dc_offset {
        config = config.with_dc_offset(offset);
    }
    config
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

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    let system = build_system(&toml_config, &args)?;
    let noise = build_noise_config(&toml_config, &args);

    let tables = MlsTables::build(args.order).context("Failed to build MLS tables")?;
    let clean = repeat_periods(&system.respond(tables.stimulus()), args.periods.max(1));
    let capture = apply_noise(&clean, &noise);

    save_buffer(&args.output, &capture, args.sample_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    eprintln!(
        "Wrote {} samples (order {}, {} taps, delay {}) to {}",
        capture.len(),
        args.order,
        system.taps.len(),
        system.delay,
        args.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_taps() {
        assert_eq!(parse_taps("2.0, 0.4,-0.8").unwrap(), vec![2.0, 0.4, -0.8]);
        assert!(parse_taps("1.0,x").is_err());
    }

    #[test]
    fn test_cli_taps_override_toml() {
        let toml: TomlConfig = toml::from_str(
            r#"
            [system]
            taps = [1.0, 0.5]
            delay = 3
            "#,
        )
        .unwrap();

        let args = Args::parse_from(["synthesize_capture", "--taps", "0.25"]);
        assert_eq!(build_system(&toml, &args).unwrap().taps, vec![0.25]);

        let args = Args::parse_from(["synthesize_capture"]);
        let system = build_system(&toml, &args).unwrap();
        assert_eq!(system.taps, vec![1.0, 0.5]);
        assert_eq!(system.delay, 3);
    }

    #[test]
    fn test_noise_overrides() {
        let toml: TomlConfig = toml::from_str("[noise]\nseed = 1\n").unwrap();
        let args = Args::parse_from(["synthesize_capture", "--snr", "40", "--dc-offset", "0.1"]);
        let noise = build_noise_config(&toml, &args);
        assert_eq!(noise.seed, Some(1));
        assert_eq!(noise.additive.map(|a| a.snr_db), Some(40.0));
        assert_eq!(noise.dc_offset, Some(0.1));
    }
}
