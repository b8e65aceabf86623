//! Compute the second lowest cost Silver plan rate for every zip in slcsp.csv
//!
//! With no arguments reads slcsp.csv, zips.csv and plans.csv from the working
//! directory and prints the report to stdout. Diagnostics go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use slcsp::{run_pipeline, write_report, InputPaths, ReportFormat};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory the input files are resolved against
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    data_dir: PathBuf,

    /// JSON file with input paths (keys: targets, zips, plans)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target zip list
    #[arg(long, value_name = "FILE")]
    targets: Option<PathBuf>,

    /// Zip to rating area table
    #[arg(long, value_name = "FILE")]
    zips: Option<PathBuf>,

    /// Plan catalog
    #[arg(long, value_name = "FILE")]
    plans: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Log progress at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ReportFormat::Csv,
            Format::Json => ReportFormat::Json,
        }
    }
}

impl Args {
    fn input_paths(&self) -> Result<InputPaths> {
        let mut paths = match &self.config {
            Some(path) => InputPaths::from_json_file(path)?,
            None => InputPaths::default(),
        };
        if let Some(targets) = &self.targets {
            paths.targets = targets.clone();
        }
        if let Some(zips) = &self.zips {
            paths.zips = zips.clone();
        }
        if let Some(plans) = &self.plans {
            paths.plans = plans.clone();
        }
        Ok(paths.relative_to(&self.data_dir))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let start = Instant::now();
    let paths = args.input_paths()?;
    info!(
        "Inputs: targets={} zips={} plans={}",
        paths.targets.display(),
        paths.zips.display(),
        paths.plans.display()
    );

    let output = run_pipeline(&paths).context("SLCSP run failed")?;

    let summary = &output.summary;
    info!(
        "{} target zips ({} distinct): {} resolved, {} ambiguous, {} unresolved, {} with a rate",
        summary.targets,
        summary.distinct_targets,
        summary.resolved,
        summary.ambiguous,
        summary.unresolved,
        summary.determined
    );

    let format = ReportFormat::from(args.format);
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report {}", path.display()))?;
            write_report(&output.rows, format, BufWriter::new(file))
                .with_context(|| format!("writing report {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            write_report(&output.rows, format, stdout.lock()).context("writing report to stdout")?;
        }
    }

    info!("Done in {:?}", start.elapsed());
    Ok(())
}
