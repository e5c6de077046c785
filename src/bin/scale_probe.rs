use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use lcs_ops::utils::{lcs_len_linear, theoretical_comparisons};
use lcs_ops::{LcsEngine, OpCounts};

/// LCS scaling probe: comparison counts, wall time and memory across input sizes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Options {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Maximum input length to cross-check against the two-row baseline
    #[arg(long, default_value_t = 1024)]
    verify_limit: usize,

    /// Largest square size in the sweep
    #[arg(long, default_value_t = 2048)]
    max_len: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn write(self, measurements: &[Measurement]) -> Result<()> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone, Serialize)]
struct Measurement {
    scenario: &'static str,
    m: usize,
    n: usize,
    comparisons: u64,
    theoretical: u64,
    matches: u64,
    lcs_len: u32,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn main() {
    let options = Options::parse();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&options) {
        eprintln!("scale_probe: {err:#}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<()> {
    info!(
        verify_limit = options.verify_limit,
        max_len = options.max_len,
        "LCS scaling probe: comparisons should equal m*n exactly"
    );

    let mut sys = System::new();
    let mut measurements = Vec::new();

    info!("[1/2] square inputs (m = n)");
    measurements.extend(run_square(options, &mut sys));

    info!("[2/2] rectangular inputs (fixed m, growing n)");
    measurements.extend(run_rectangular(options, &mut sys));

    print_summary(&measurements, options);
    options
        .format
        .write(&measurements)
        .context("writing probe output")
}

fn square_sizes(max_len: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    let mut len = 16usize;
    while len <= max_len {
        sizes.push(len);
        len *= 2;
    }
    sizes
}

fn run_square(options: &Options, sys: &mut System) -> Vec<Measurement> {
    square_sizes(options.max_len)
        .into_iter()
        .map(|len| {
            let a = deterministic_symbols(len, 0);
            let b = deterministic_symbols(len, 3);
            measure("square", &a, &b, options, sys)
        })
        .collect()
}

fn run_rectangular(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const FIXED_M: usize = 64;
    square_sizes(options.max_len)
        .into_iter()
        .map(|n| {
            let a = deterministic_symbols(FIXED_M, 0);
            let b = deterministic_symbols(n, 5);
            measure("rectangular", &a, &b, options, sys)
        })
        .collect()
}

fn measure(
    scenario: &'static str,
    a: &[u8],
    b: &[u8],
    options: &Options,
    sys: &mut System,
) -> Measurement {
    let (m, n) = (a.len(), b.len());
    let before = rss_kib(sys);
    let start = Instant::now();
    let result = LcsEngine::new().compute(a, b);
    let wall_s = start.elapsed().as_secs_f64();
    let after = rss_kib(sys);

    let theoretical = theoretical_comparisons(m, n);
    let (status, detail) = verify(&result.counts, result.length, theoretical, a, b, options);
    let icon = match status {
        VerificationStatus::Passed => "✓",
        VerificationStatus::Failed => "✗",
        VerificationStatus::NotChecked => "○",
    };
    info!(
        "{icon} {scenario} m={m} n={n} comparisons={} lcs={} time={wall_s:.4}s status={}",
        result.counts.comparisons,
        result.length,
        status.label()
    );

    Measurement {
        scenario,
        m,
        n,
        comparisons: result.counts.comparisons,
        theoretical,
        matches: result.counts.matches,
        lcs_len: result.length,
        wall_s,
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

fn verify(
    counts: &OpCounts,
    length: u32,
    theoretical: u64,
    a: &[u8],
    b: &[u8],
    options: &Options,
) -> (VerificationStatus, Option<String>) {
    if counts.comparisons != theoretical {
        return (
            VerificationStatus::Failed,
            Some(format!(
                "expected {theoretical} comparisons, got {}",
                counts.comparisons
            )),
        );
    }
    if a.len().max(b.len()) > options.verify_limit {
        return (VerificationStatus::NotChecked, None);
    }
    let (baseline, baseline_counts) = lcs_len_linear(a, b);
    if baseline != length {
        (
            VerificationStatus::Failed,
            Some(format!("expected length {baseline}, got {length}")),
        )
    } else if baseline_counts != *counts {
        (
            VerificationStatus::Failed,
            Some(format!("baseline counts {baseline_counts:?} differ from {counts:?}")),
        )
    } else {
        (VerificationStatus::Passed, None)
    }
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    let total = measurements.len();
    let passed = measurements
        .iter()
        .filter(|m| m.verification_status == VerificationStatus::Passed)
        .count();
    let failed = measurements
        .iter()
        .filter(|m| m.verification_status == VerificationStatus::Failed)
        .count();
    let not_checked = total - passed - failed;
    info!(
        total,
        passed,
        failed,
        not_checked,
        verify_limit = options.verify_limit,
        "verification summary"
    );

    for m in measurements
        .iter()
        .filter(|m| m.verification_status == VerificationStatus::Failed)
    {
        warn!(
            scenario = m.scenario,
            m = m.m,
            n = m.n,
            detail = m.verification_detail.as_deref().unwrap_or(""),
            "verification failed"
        );
    }

    for scenario in ["square", "rectangular"] {
        let rows: Vec<&Measurement> = measurements
            .iter()
            .filter(|m| m.scenario == scenario)
            .collect();
        let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
            continue;
        };
        if first.wall_s > 0.0 && first.theoretical > 0 {
            info!(
                scenario,
                work_ratio = last.theoretical as f64 / first.theoretical as f64,
                time_ratio = last.wall_s / first.wall_s,
                "growth from smallest to largest input"
            );
        }
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<()> {
    println!("scenario,m,n,comparisons,theoretical,matches,lcs_len,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{},{},{},{},{},{:.6},{},{},\"{}\"",
            m.scenario,
            m.m,
            m.n,
            m.comparisons,
            m.theoretical,
            m.matches,
            m.lcs_len,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<()> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());

    println!(
        "{:<col1$}  {:>6}  {:>6}  {:>12}  {:>12}  {:>8}  {:>10}  {:>14}  {:>12}",
        "scenario", "m", "n", "comparisons", "m*n", "lcs_len", "wall_s", "rss_delta_kib", "status",
    );
    println!(
        "{:-<col1$}  {:-<6}  {:-<6}  {:-<12}  {:-<12}  {:-<8}  {:-<10}  {:-<14}  {:-<12}",
        "", "", "", "", "", "", "", "", "",
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:>6}  {:>6}  {:>12}  {:>12}  {:>8}  {:>10.4}  {:>14}  {:>12}",
            m.scenario,
            m.m,
            m.n,
            m.comparisons,
            m.theoretical,
            m.lcs_len,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<()> {
    let text = serde_json::to_string_pretty(measurements)?;
    println!("{text}");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

fn deterministic_symbols(len: usize, offset: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT0123";
    (0..len)
        .map(|i| ALPHABET[(i * 7 + offset + i / 3) % ALPHABET.len()])
        .collect()
}
