use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use mlsdeconv::MlsTables;
use mlsdeconv::analysis::ResponseSummary;
use mlsdeconv::capture::{align_to_period, average_captures, gate_silence};
use mlsdeconv::config::MeasurementConfig;
use mlsdeconv::mls::MlsOrder;
use mlsdeconv::output::{OutputFormat, create_formatter};
use mlsdeconv::storage::{self, load_capture, load_tables};

#[derive(Parser, Debug)]
#[command(name = "mlsdeconv")]
#[command(about = "Estimate an impulse response from MLS captures", long_about = None)]
struct Args {
    /// Captured responses (CSV or WAV); several captures are averaged
    #[arg(required = true)]
    captures: Vec<PathBuf>,

    /// MLS order used for the stimulus (3-18)
    #[arg(short = 'n', long)]
    order: Option<MlsOrder>,

    /// Directory of saved tables (mls.csv, tagS.csv, tagL.csv)
    #[arg(short = 't', long, conflicts_with = "order")]
    tables: Option<PathBuf>,

    /// TOML measurement configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Silence gate threshold for the lead-in and tail
    #[arg(long)]
    gate_threshold: Option<f64>,

    /// Do not trim silence before aligning
    #[arg(long, conflicts_with = "gate_threshold")]
    no_gate: bool,

    /// Samples to skip before the analysed period
    #[arg(long)]
    offset: Option<usize>,

    /// WAV channel holding the response
    #[arg(long)]
    channel: Option<u16>,

    /// Sample rate used for reported times, in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Number of strongest taps to report
    #[arg(long)]
    taps: Option<usize>,

    /// Output format: text, json, csv
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Write the full impulse response to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
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
    if let Some(threshold) = args.gate_threshold {
        config.capture.gate = true;
        config.capture.gate_threshold = threshold;
    }
    if args.no_gate {
        config.capture.gate = false;
    }
    if let Some(offset) = args.offset {
        config.capture.offset = offset;
    }
    if let Some(channel) = args.channel {
        config.audio.capture_channel = channel;
    }
    if let Some(sample_rate) = args.sample_rate {
        config.audio.sample_rate = sample_rate;
    }
    if let Some(taps) = args.taps {
        config.analysis.taps = taps;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn source_label(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| {
            p.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| p.display().to_string())
        })
        .collect::<Vec<_>>()
        .join("+")
}

fn load_averaged(paths: &[PathBuf], channel: u16) -> Result<Vec<f64>> {
    let captures = paths
        .iter()
        .map(|path| {
            load_capture(path, channel)
                .with_context(|| format!("Failed to read capture {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    average_captures(&captures).context("Failed to average captures")
}

fn obtain_tables(tables_dir: Option<&Path>, order: MlsOrder) -> Result<MlsTables> {
    match tables_dir {
        Some(dir) => {
            load_tables(dir).with_context(|| format!("Failed to load tables from {}", dir.display()))
        }
        None => MlsTables::build(order).context("Failed to build MLS tables"),
    }
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

    let config = load_config(&args)?;
    let tables = obtain_tables(args.tables.as_deref(), config.sequence.order)?;
    let period = tables.order().period();

    let averaged = load_averaged(&args.captures, config.audio.capture_channel)?;
    log::info!(
        "Averaged {} capture(s) into {} samples",
        args.captures.len(),
        averaged.len()
    );

    let gated = match config.capture.active_gate() {
        Some(threshold) => gate_silence(&averaged, threshold),
        None => averaged,
    };

    let recorded = align_to_period(&gated, config.capture.offset, period).with_context(|| {
        format!(
            "Capture too short for order {} at offset {}",
            tables.order(),
            config.capture.offset
        )
    })?;

    let mut deconvolver = tables.deconvolver();
    let resp = deconvolver
        .estimate(&recorded)
        .context("Deconvolution failed")?;

    let summary = ResponseSummary::from_response(resp, config.audio.sample_rate, config.analysis.taps)
        .context("Failed to summarize response")?;

    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&source_label(&args.captures), &summary));

    if let Some(path) = &args.output {
        storage::csv::save_samples(path, resp)
            .with_context(|| format!("Failed to write response {}", path.display()))?;
        log::info!("Response written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let args = Args::parse_from([
            "mlsdeconv",
            "--order",
            "10",
            "--no-gate",
            "--offset",
            "12",
            "--taps",
            "3",
            "capture.wav",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.sequence.order.get(), 10);
        assert_eq!(config.capture.active_gate(), None);
        assert_eq!(config.capture.offset, 12);
        assert_eq!(config.analysis.taps, 3);
    }

    #[test]
    fn test_invalid_order_rejected() {
        assert!(Args::try_parse_from(["mlsdeconv", "--order", "19", "x.csv"]).is_err());
    }

    #[test]
    fn test_tables_conflict_with_order() {
        assert!(
            Args::try_parse_from(["mlsdeconv", "--order", "8", "--tables", "t", "x.csv"]).is_err()
        );
    }

    #[test]
    fn test_source_label() {
        let paths = vec![PathBuf::from("a/run1.wav"), PathBuf::from("run2.csv")];
        assert_eq!(source_label(&paths), "run1.wav+run2.csv");
    }
}
