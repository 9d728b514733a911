//! Planeslice CLI - slices the integration plane of solver templates
//!
//! Usage:
//!   planeslice <INPUT> <AXIS> <COUNT> [options]
//!   planeslice template.inp u 5
//!
//! The second form produces template_0.inp .. template_4.inp, where the
//! integration plane has been subdivided into 5 equal strips along the
//! u vector.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use planeslice::{write_documents, Axis, InputDocument, Slicer};
use std::path::PathBuf;

/// Subdivide the planar integration region of a solver template into
/// equal slices, one output file per slice
#[derive(Parser, Debug)]
#[command(name = "planeslice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input template file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Spanning vector to subdivide
    #[arg(value_name = "AXIS", value_enum)]
    axis: Axis,

    /// Number of equal slices
    #[arg(value_name = "COUNT", value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Directory for the generated files (default: next to the input)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Number of threads for writing (0 = automatic)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.debug {
        LevelFilter::Debug
    } else if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    if !cli.input.exists() {
        eprintln!("ERROR file {} not found", cli.input.display());
        std::process::exit(1);
    }

    cmd_slice(
        cli.input,
        cli.axis,
        cli.count,
        cli.output_dir,
        cli.threads,
    )
}

fn cmd_slice(
    input: PathBuf,
    axis: Axis,
    count: u32,
    output_dir: Option<PathBuf>,
    threads: usize,
) -> Result<()> {
    info!("Loading template: {}", input.display());

    // Set thread count if specified
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to initialize thread pool")?;
    }

    // Create progress bar
    let progress = ProgressBar::new(100);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    progress.set_message("Parsing template...");
    progress.set_position(10);

    let doc = InputDocument::from_path(&input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let region = doc.region();
    info!("Integration region:");
    info!("  p1: {}", region.p1);
    info!("  u:  {} (|u| = {:.6})", region.u(), region.u().length());
    info!("  v:  {} (|v| = {:.6})", region.v(), region.v().length());
    info!("  k, l, m: {} {} {}", region.k, region.l, region.m);
    info!("  Plane area: {:.6}", region.area());

    progress.set_message(format!("Slicing along {axis} into {count} strips..."));
    progress.set_position(30);

    let slicer = Slicer::new(axis, count).context("Invalid slice request")?;

    progress.set_message(format!("Writing {count} files..."));
    progress.set_position(50);

    let paths = write_documents(&doc, slicer.slices(region), &input, output_dir.as_deref())
        .context("Failed to write slice files")?;

    progress.set_position(100);
    progress.finish_with_message(format!("Wrote {} files", paths.len()));

    for path in &paths {
        info!("  {}", path.display());
    }
    println!(
        "Sliced {} along {} into {} files",
        input.display(),
        axis,
        paths.len()
    );

    Ok(())
}
