//! Pulseframe CLI - run the heart rate estimator from the shell
//!
//! Reads a request document (the same JSON shape the serving layer
//! speaks) from a file or stdin, or generates a synthetic trace, and
//! prints the response JSON to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Estimate from a captured request
//! pulseframe --input request.json
//!
//! # Pipe a request through stdin
//! cat request.json | pulseframe
//!
//! # Sanity-check the pipeline against a known synthetic rate
//! pulseframe --synthetic --bpm 72 --noise 1.5
//! ```
//!
//! # Environment Variables
//!
//! - `PULSEFRAME_CONFIG`: path to a TOML config file
//! - `RUST_LOG`: logging filter (default: warn)

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

use pulseframe::api::{handle, HeartRateRequest};
use pulseframe::config::EstimatorConfig;
use pulseframe::simulation::{brightness_trace, TraceSpec};

#[derive(Parser, Debug)]
#[command(name = "pulseframe")]
#[command(about = "rPPG heart rate estimation from per-frame brightness")]
#[command(version)]
struct Args {
    /// Request JSON file ({"brightness": [...], "fps": 30.0}).
    /// Reads stdin when absent.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Generate a synthetic trace instead of reading a request
    #[arg(long)]
    synthetic: bool,

    /// Synthetic trace: simulated heart rate in BPM
    #[arg(long, default_value_t = 72.0)]
    bpm: f64,

    /// Synthetic trace: sampling rate in fps
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Synthetic trace: duration in seconds
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Synthetic trace: Gaussian noise standard deviation
    #[arg(long, default_value_t = 0.0)]
    noise: f64,

    /// Synthetic trace: RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Config file (overrides the PULSEFRAME_CONFIG / cwd search order)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EstimatorConfig::load_from_file(path)
            .with_context(|| format!("Loading config from {}", path.display()))?,
        None => EstimatorConfig::load(),
    };

    let request = if args.synthetic {
        let spec = TraceSpec {
            bpm: args.bpm,
            fps: args.fps,
            duration_secs: args.duration,
            noise_std: args.noise,
            seed: args.seed,
            ..TraceSpec::default()
        };
        debug!(?spec, "Generating synthetic trace");
        HeartRateRequest {
            brightness: Some(brightness_trace(&spec)),
            fps: Some(args.fps),
        }
    } else {
        let raw = match &args.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Reading request from {}", path.display()))?,
            None => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Reading request from stdin")?;
                buf
            }
        };
        serde_json::from_str(&raw).context("Parsing request JSON")?
    };

    match handle(&request, &config) {
        Ok(response) => {
            println!("{}", serde_json::to_string(&response)?);
            Ok(())
        }
        Err(err) => {
            println!("{}", serde_json::to_string(&err.body())?);
            std::process::exit(1);
        }
    }
}
