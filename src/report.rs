//! Pairwise runs over the input strings, the text report, and the
//! runtime-metrics CSV.
//!
//! Every unordered combination of input strings is processed in both
//! directions, so a file with `k` strings yields `k * (k - 1)` runs. Timing
//! is measured here, around each engine call; the engine itself knows
//! nothing about wall-clock time.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info, info_span};

use crate::builder::LcsEngineBuilder;
use crate::engine::{LcsEngine, OpCounts, TieBreak};
use crate::error::ReportError;
use crate::input::NamedString;
use crate::metrics::{write_runtime_metrics, MetricRow};
use crate::utils::table_cells;

/// Largest table (in cells) a single pair may allocate.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 1 << 28;
pub const METRICS_FILE_NAME: &str = "runtime_metrics.csv";
const SEPARATOR_WIDTH: usize = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub tie_break: TieBreak,
    /// Pairs whose `(m + 1) * (n + 1)` exceeds this are skipped.
    pub max_table_cells: usize,
    /// Run pairs on the rayon pool; needs the `parallel` feature.
    pub parallel: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
            parallel: false,
        }
    }
}

/// Result of one ordered pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairReport {
    pub name1: String,
    pub seq1: String,
    pub name2: String,
    pub seq2: String,
    pub lcs: String,
    pub counts: OpCounts,
    pub table_cells: u64,
    pub runtime_s: f64,
}

impl PairReport {
    pub fn str1_len(&self) -> usize {
        self.seq1.chars().count()
    }

    pub fn str2_len(&self) -> usize {
        self.seq2.chars().count()
    }

    pub fn lcs_len(&self) -> usize {
        self.lcs.chars().count()
    }

    pub fn pair_id(&self) -> String {
        format!("{}-{}", self.name1, self.name2)
    }

    pub fn metric_row(&self) -> MetricRow {
        MetricRow {
            pair_id: self.pair_id(),
            str1_len: self.str1_len(),
            str2_len: self.str2_len(),
            lcs_len: self.lcs_len(),
            comparisons: self.counts.comparisons,
            matches: self.counts.matches,
            runtime: self.runtime_s,
        }
    }

    /// Human-readable block, terminated by a separator and a blank line.
    pub fn write_block<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "String 1: {} - {}", self.name1, self.seq1)?;
        writeln!(out, "String 1 Length: {}", self.str1_len())?;
        writeln!(out, "String 2: {} - {}", self.name2, self.seq2)?;
        writeln!(out, "String 2 Length: {}", self.str2_len())?;
        writeln!(out, "LCS: {}", self.lcs)?;
        writeln!(out, "LCS Length: {}", self.lcs_len())?;
        writeln!(out, "Comparisons: {}", self.counts.comparisons)?;
        writeln!(out, "Matches: {}", self.counts.matches)?;
        writeln!(out, "Table cells: {}", self.table_cells)?;
        writeln!(out, "Runtime: {} seconds", self.runtime_s)?;
        writeln!(out, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        writeln!(out)
    }
}

/// Every combination `i < j` in input order, as `(i, j)` followed by `(j, i)`.
pub fn ordered_pairs(strings: &[NamedString]) -> Vec<(&NamedString, &NamedString)> {
    let mut pairs = Vec::with_capacity(strings.len() * strings.len().saturating_sub(1));
    for (i, first) in strings.iter().enumerate() {
        for second in &strings[i + 1..] {
            pairs.push((first, second));
            pairs.push((second, first));
        }
    }
    pairs
}

fn run_pair(engine: &LcsEngine, first: &NamedString, second: &NamedString) -> PairReport {
    let start = Instant::now();
    let result = engine.compute_str(&first.value, &second.value);
    let runtime_s = start.elapsed().as_secs_f64();
    info!(pair = %format!("{}-{}", first.name, second.name), length = result.length, "processed pair");
    PairReport {
        name1: first.name.clone(),
        seq1: first.value.clone(),
        name2: second.name.clone(),
        seq2: second.value.clone(),
        lcs: result.as_string(),
        counts: result.counts,
        table_cells: result.table_cells(),
        runtime_s,
    }
}

fn within_limit(first: &NamedString, second: &NamedString, limit: usize) -> bool {
    let m = first.value.chars().count();
    let n = second.value.chars().count();
    match table_cells(m, n) {
        Some(cells) if cells <= limit => true,
        _ => {
            error!(
                pair = %format!("{}-{}", first.name, second.name),
                m,
                n,
                limit,
                "table too large for pair, skipping"
            );
            false
        }
    }
}

/// Run the engine over every ordered pair, in [`ordered_pairs`] order.
///
/// Oversized pairs are logged and left out of the result.
pub fn run_pairs(strings: &[NamedString], config: &ReportConfig) -> Vec<PairReport> {
    let span = info_span!("run_pairs", strings = strings.len(), tie_break = %config.tie_break);
    let _enter = span.enter();

    let engine = LcsEngineBuilder::new()
        .with_tie_break(config.tie_break)
        .build();
    let pairs: Vec<_> = ordered_pairs(strings)
        .into_iter()
        .filter(|(a, b)| within_limit(a, b, config.max_table_cells))
        .collect();

    if config.parallel {
        #[cfg(feature = "parallel")]
        {
            return pairs
                .par_iter()
                .map(|(a, b)| run_pair(&engine, a, b))
                .collect();
        }
        #[cfg(not(feature = "parallel"))]
        tracing::warn!("parallel run requested but the `parallel` feature is disabled; running serially");
    }

    pairs
        .iter()
        .map(|(a, b)| run_pair(&engine, a, b))
        .collect()
}

/// Write the text report for `reports` to `path`.
pub fn write_report(path: &Path, reports: &[PairReport]) -> Result<(), ReportError> {
    let wrap = |source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(wrap)?;
    let mut out = BufWriter::new(file);
    for report in reports {
        report.write_block(&mut out).map_err(wrap)?;
    }
    out.flush().map_err(wrap)
}

/// Process all pairs, then write the report to `out_file` and the runtime
/// metrics to `<metrics_dir>/runtime_metrics.csv`.
///
/// Returns the reports and the metrics file path.
pub fn write_output(
    out_file: &Path,
    metrics_dir: &Path,
    strings: &[NamedString],
    config: &ReportConfig,
) -> Result<(Vec<PairReport>, PathBuf), ReportError> {
    info!("processing strings in the input file");
    let reports = run_pairs(strings, config);

    write_report(out_file, &reports)?;
    info!(path = %out_file.display(), pairs = reports.len(), "report written");

    fs::create_dir_all(metrics_dir).map_err(|source| ReportError::Write {
        path: metrics_dir.to_path_buf(),
        source,
    })?;
    let metrics_path = metrics_dir.join(METRICS_FILE_NAME);
    let rows: Vec<MetricRow> = reports.iter().map(PairReport::metric_row).collect();
    write_runtime_metrics(&metrics_path, &rows)?;

    Ok((reports, metrics_path))
}
