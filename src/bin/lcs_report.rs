use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use lcs_ops::input::read_input;
use lcs_ops::metrics::{read_metrics, GrowthAnalysis};
use lcs_ops::report::{write_output, ReportConfig, DEFAULT_MAX_TABLE_CELLS};
use lcs_ops::TieBreak;

/// Pairwise LCS with comparison counts, a text report and runtime metrics.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input file with one `name=sequence` entry per line
    in_file: PathBuf,

    /// Report file to write
    out_file: PathBuf,

    /// Run the growth analysis on the collected metrics (and render a chart
    /// when built with the `plot` feature)
    #[arg(long, short = 'p')]
    plot: bool,

    /// Directory receiving runtime_metrics.csv and the analysis outputs
    #[arg(long, default_value = "metrics")]
    metrics_dir: PathBuf,

    /// Direction taken on reconstruction ties
    #[arg(long, value_enum, default_value_t = TieBreakArg::Up)]
    tie_break: TieBreakArg,

    /// Skip pairs whose DP table would exceed this many cells
    #[arg(long, default_value_t = DEFAULT_MAX_TABLE_CELLS)]
    max_cells: usize,

    /// Process pairs on the rayon pool (requires the `parallel` feature)
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Debug output
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TieBreakArg {
    Up,
    Left,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Up => TieBreak::PreferUp,
            TieBreakArg::Left => TieBreak::PreferLeft,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

fn check_io_paths(in_path: &Path, out_path: &Path) -> Result<()> {
    if !in_path.is_file() {
        bail!("input file {} does not exist or is not a file", in_path.display());
    }
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            info!(dir = %parent.display(), "output directory does not exist, creating it");
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create output directory {}", parent.display()))?;
        }
    }
    Ok(())
}

fn run_analysis(metrics_path: &Path, metrics_dir: &Path) -> Result<()> {
    let rows = read_metrics(metrics_path)
        .with_context(|| format!("reading {}", metrics_path.display()))?;
    let analysis = GrowthAnalysis::from_rows(&rows);
    analysis.write_csvs(metrics_dir)?;

    #[cfg(feature = "plot")]
    {
        let chart = metrics_dir.join("runtime_metrics.png");
        info!(path = %chart.display(), "plotting runtime metric graph");
        lcs_ops::plot::render_growth_chart(&analysis, &chart)?;
    }
    #[cfg(not(feature = "plot"))]
    tracing::warn!("built without the `plot` feature; wrote analysis CSVs but no chart");

    Ok(())
}

fn run(args: Args) -> Result<()> {
    check_io_paths(&args.in_file, &args.out_file)?;

    let strings = read_input(&args.in_file)?;
    info!(count = strings.len(), "read input strings");

    let config = ReportConfig {
        tie_break: args.tie_break.into(),
        max_table_cells: args.max_cells,
        parallel: args.parallel,
    };
    let (_reports, metrics_path) =
        write_output(&args.out_file, &args.metrics_dir, &strings, &config)?;
    println!("Processing complete. Output written to {}.", args.out_file.display());

    if args.plot {
        run_analysis(&metrics_path, &args.metrics_dir)?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
