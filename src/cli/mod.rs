//! Command-line interface for the image fidelity tool.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::color::ColorModel;
use crate::config::CompareConfig;
use crate::error::{PixfidError, Result};
use crate::grid::{ImageSource, SampleGrid};
use crate::metrics::{Comparator, Metric, MetricResult};

/// Image Fidelity Tool
///
/// Compares two images of the same size with full-reference metrics
/// (MSE, RMSE, SAM, RASE) under a configurable color projection.
#[derive(Parser, Debug)]
#[command(name = "pixfid")]
#[command(author = "Image Quality Team")]
#[command(version = "0.1.0")]
#[command(about = "Full-reference image fidelity metrics")]
#[command(long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two images
    Compare {
        /// Reference image
        first: PathBuf,

        /// Image to compare against the reference
        second: PathBuf,

        /// Metric to compute (repeatable)
        #[arg(short, long = "metric", default_value = "mse")]
        metrics: Vec<String>,

        /// Projection for MSE/RMSE (overrides the config file)
        #[arg(short, long, value_enum)]
        projection: Option<ProjectionArg>,

        /// Sum per-pixel terms in parallel
        #[arg(long)]
        parallel: bool,

        /// Worker threads for parallel reduction (implies --parallel)
        #[arg(short, long)]
        threads: Option<usize>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered metrics
    Metrics,

    /// Write an image's projection as a 16-bit gray image
    Project {
        /// Input image path
        #[arg(short, long)]
        input: PathBuf,

        /// Output image path (format from extension)
        #[arg(short, long)]
        output: PathBuf,

        /// Projection to render
        #[arg(short, long, value_enum, default_value = "luma709")]
        projection: ProjectionArg,
    },
}

/// Scalar projection argument.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ProjectionArg {
    /// ITU-R BT.601 luminance
    Luma601,
    /// SMPTE 240M luminance
    Luma240,
    /// ITU-R BT.709 luminance
    Luma709,
    /// ITU-R BT.2020 luminance
    Luma2020,
    /// Average of all four channels
    Gray,
}

impl From<ProjectionArg> for ColorModel {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Luma601 => ColorModel::Luma601,
            ProjectionArg::Luma240 => ColorModel::Luma240,
            ProjectionArg::Luma709 => ColorModel::Luma709,
            ProjectionArg::Luma2020 => ColorModel::Luma2020,
            ProjectionArg::Gray => ColorModel::Gray,
        }
    }
}

/// Run the CLI application.
pub fn run(cli: Cli) -> Result<()> {
    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .init();
    } else if !cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .init();
    }

    match cli.command {
        Commands::Compare {
            first,
            second,
            metrics,
            projection,
            parallel,
            threads,
            config,
            json,
        } => {
            let config = build_config(config.as_deref(), projection, parallel, threads)?;
            run_compare(&first, &second, &metrics, config, json, cli.quiet)
        }
        Commands::Metrics => {
            run_list_metrics();
            Ok(())
        }
        Commands::Project {
            input,
            output,
            projection,
        } => run_project(&input, &output, projection.into()),
    }
}

/// Merge the config file (if any) with command-line overrides.
fn build_config(
    path: Option<&Path>,
    projection: Option<ProjectionArg>,
    parallel: bool,
    threads: Option<usize>,
) -> Result<CompareConfig> {
    let mut config = match path {
        Some(path) => CompareConfig::from_file(path)?,
        None => CompareConfig::default(),
    };

    if let Some(projection) = projection {
        config.projection = projection.into();
    }
    if parallel || threads.is_some() {
        let threads = threads.or(config.threads);
        config = config.parallel(threads);
    }

    config.validate()?;
    Ok(config)
}

/// Parse metric names, rejecting unknown ones.
fn parse_metrics(names: &[String]) -> Result<Vec<Metric>> {
    names.iter().map(|name| name.parse()).collect()
}

/// Run compare command.
fn run_compare(
    first: &Path,
    second: &Path,
    metric_names: &[String],
    config: CompareConfig,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let metrics = parse_metrics(metric_names)?;

    let img1 = image::open(first)?;
    let img2 = image::open(second)?;
    check_same_size(&img1, &img2)?;

    let bounds = img1.bounds();
    log::info!(
        "Comparing {} and {} ({}x{})",
        first.display(),
        second.display(),
        bounds.width(),
        bounds.height()
    );

    let comparator = Comparator::new(config);
    let results = comparator.compare_all(&metrics, &img1, &img2)?;

    if quiet {
        return Ok(());
    }

    if json {
        let text =
            serde_json::to_string_pretty(&results).map_err(|e| PixfidError::Internal(e.to_string()))?;
        println!("{}", text);
    } else {
        print_results(&results);
    }

    Ok(())
}

/// The metrics treat a size mismatch as a caller bug, so reject it here first.
fn check_same_size<A: ImageSource, B: ImageSource>(a: &A, b: &B) -> Result<()> {
    let (ba, bb) = (a.bounds(), b.bounds());
    if (ba.width(), ba.height()) != (bb.width(), bb.height()) {
        return Err(PixfidError::InvalidInput(format!(
            "Image dimensions mismatch: {}x{} vs {}x{}",
            ba.width(),
            ba.height(),
            bb.width(),
            bb.height()
        )));
    }
    Ok(())
}

/// Run metrics command.
fn run_list_metrics() {
    println!("Registered Metrics");
    println!("==================");
    for metric in Metric::ALL {
        let status = if metric.is_implemented() {
            "implemented"
        } else {
            "not implemented"
        };
        println!("  {:<8} {}", metric.name(), status);
    }
}

/// Run project command.
fn run_project(input: &Path, output: &Path, model: ColorModel) -> Result<()> {
    let img = image::open(input)?;
    let grid = SampleGrid::new(&img, model)?;

    log::info!(
        "Projecting {} ({}x{}) through {}",
        input.display(),
        grid.cols(),
        grid.rows(),
        model
    );

    grid.render().save(output)?;
    Ok(())
}

/// Print comparison results.
fn print_results(results: &[MetricResult]) {
    println!("Comparison Results:");
    for result in results {
        println!("  {}", result);
    }
}
