//! Streetlight CLI - Command-line interface for Streetlight
//!
//! Commands:
//! - report: Print scoring reports for a street registry at a time of day
//! - histogram: Dump a street's busy histogram
//! - validate: Validate a registry configuration file

use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{Local, NaiveTime};
use streetlight::registry::RegistryConfig;
use streetlight::{ModelError, StreetRegistry, StreetReport, STREETLIGHT_VERSION};

/// Streetlight - per-street traffic and transit estimation engine
#[derive(Parser)]
#[command(name = "streetlight")]
#[command(version = STREETLIGHT_VERSION)]
#[command(about = "Estimate street traffic, accessibility, and transit importance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print scoring reports for every street in a registry
    Report {
        /// Registry config JSON (use - for stdin; omit for the built-in sample)
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// Time of day, HH:MM or HH:MM:SS (default: now)
        #[arg(short, long)]
        time: Option<String>,

        /// Report a single street by name
        #[arg(short, long)]
        street: Option<String>,

        /// Seed for histogram construction (reproducible reports)
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Dump a street's busy histogram
    Histogram {
        /// Street name
        street: String,

        /// Registry config JSON (use - for stdin; omit for the built-in sample)
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// Seed for histogram construction
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Output as JSON instead of a text sparkline
        #[arg(long)]
        json: bool,
    },

    /// Validate a registry configuration file
    Validate {
        /// Registry config JSON (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    Model(ModelError),
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<ModelError> for CliError {
    fn from(e: ModelError) -> Self {
        CliError::Model(e)
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Model(e) => write!(f, "{e}"),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Report {
            registry,
            time,
            street,
            seed,
            json,
        } => cmd_report(registry.as_deref(), time.as_deref(), street.as_deref(), seed, json),

        Commands::Histogram {
            street,
            registry,
            seed,
            json,
        } => cmd_histogram(&street, registry.as_deref(), seed, json),

        Commands::Validate { input } => cmd_validate(&input),
    }
}

fn load_registry(path: Option<&Path>, seed: u64) -> Result<StreetRegistry, CliError> {
    match path {
        Some(path) => {
            let json = read_input(path)?;
            Ok(StreetRegistry::from_json(&json, seed)?)
        }
        None => Ok(StreetRegistry::mountain_view(seed)?),
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn parse_time(time: Option<&str>) -> Result<NaiveTime, CliError> {
    match time {
        Some(raw) => NaiveTime::parse_from_str(raw, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
            .map_err(|_| CliError::Model(ModelError::InvalidTime(raw.to_string()))),
        None => Ok(Local::now().time()),
    }
}

fn cmd_report(
    registry: Option<&Path>,
    time: Option<&str>,
    street: Option<&str>,
    seed: u64,
    json: bool,
) -> Result<(), CliError> {
    let registry = load_registry(registry, seed)?;
    let time = parse_time(time)?;

    let reports: Vec<StreetReport> = match street {
        Some(name) => vec![StreetReport::build(name, registry.require(name)?, time)],
        None => registry
            .iter()
            .map(|(name, street)| StreetReport::build(name, street, time))
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&reports).map_err(ModelError::from)?);
    } else {
        println!("{}", registry.city());
        for report in &reports {
            println!("{report}");
        }
    }

    Ok(())
}

fn cmd_histogram(
    street: &str,
    registry: Option<&Path>,
    seed: u64,
    json: bool,
) -> Result<(), CliError> {
    let registry = load_registry(registry, seed)?;
    let street_model = registry.require(street)?;
    let histogram = street_model.histogram();

    if json {
        println!("{}", serde_json::to_string_pretty(histogram).map_err(ModelError::from)?);
        return Ok(());
    }

    let max_count = histogram
        .bins()
        .iter()
        .map(|bin| bin.count)
        .max()
        .unwrap_or(0)
        .max(1);
    println!("{street} busy histogram ({} samples)", histogram.sample_count());
    for bin in histogram.bins() {
        let width = (bin.count * 60 / max_count) as usize;
        println!(
            "{:05.2}-{:05.2} |{:<60}| {}",
            bin.start,
            bin.end,
            "#".repeat(width),
            bin.count
        );
    }

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), CliError> {
    let json = read_input(input)?;
    let config = RegistryConfig::from_json(&json)?;
    config.validate()?;
    println!(
        "ok: {} ({} streets)",
        config.city,
        config.streets.len()
    );
    Ok(())
}
