use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use imgdedupe::core::report::ReportEntry;
use imgdedupe::{DedupeOptions, build_report, find_duplicates};
use log::LevelFilter;
use serde::Serialize;
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// JSON output for a scan.
#[derive(Serialize)]
struct JsonOutput<'a> {
    generated_at: DateTime<Utc>,
    directory: &'a Path,
    images_processed: usize,
    skipped: usize,
    max_distance: u32,
    sets: &'a [ReportEntry],
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum Format {
    /// Human-readable keep/delete report
    Text,
    /// Machine-readable JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "imgdedupe", version, about = "CLI for finding visually duplicate images")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Duplicate workflows
    Duplicates {
        #[command(subcommand)]
        command: Dups,
    },
}

#[derive(Subcommand, Debug)]
enum Dups {
    /// Find and list duplicate sets
    Scan {
        /// Directory to scan (default: current directory)
        #[arg(short, long, value_name = "DIR")]
        path: Option<PathBuf>,
        /// Largest Hamming distance between fingerprints of duplicates
        #[arg(
            short = 'd',
            long,
            default_value_t = imgdedupe::DEFAULT_MAX_DISTANCE,
            value_parser = clap::value_parser!(u32).range(0..=64)
        )]
        max_distance: u32,
        /// Number of parallel hashing workers
        #[arg(short, long, default_value_t = imgdedupe::DEFAULT_WORKERS)]
        workers: usize,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Duplicates { command } => match command {
            Dups::Scan {
                path,
                max_distance,
                workers,
                format,
            } => {
                if workers == 0 {
                    anyhow::bail!("--workers must be at least 1");
                }
                let dir = match path {
                    Some(path) => path,
                    None => env::current_dir().context("Failed to determine current directory")?,
                };
                scan(&dir, max_distance, workers, format)?;
            }
        },
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn scan(dir: &Path, max_distance: u32, workers: usize, format: Format) -> Result<()> {
    let options = DedupeOptions {
        max_distance,
        workers,
        show_progress: format == Format::Text && std::io::stderr().is_terminal(),
    };

    if format == Format::Text {
        println!("▶ Scanning for duplicates in: {}", dir.display());
    }
    let run = find_duplicates(dir, &options)
        .with_context(|| format!("Failed to scan {} for duplicates", dir.display()))?;
    let report = build_report(&run.groups);

    match format {
        Format::Json => {
            let output = JsonOutput {
                generated_at: Utc::now(),
                directory: dir,
                images_processed: run.images_processed(),
                skipped: run.skipped(),
                max_distance,
                sets: &report.sets,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Format::Text => {
            if run.images_processed() == 0 {
                println!("No images found.");
                return Ok(());
            }
            println!(
                "▶ Processed {} image(s), {} skipped",
                run.images_processed(),
                run.skipped()
            );
            if !report.is_empty() {
                println!("Found {} duplicate set(s):", report.sets.len());
            }
            println!();
            print!("{}", report);
        }
    }

    Ok(())
}
