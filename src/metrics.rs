//! Runtime-metrics CSV files and growth analysis.
//!
//! The report layer writes one [`MetricRow`] per ordered pair. The growth
//! analysis reads those rows back, groups them by first-string length `m`,
//! adds a mirrored point for every `m != n` row, and compares the observed
//! comparison counts with the theoretical `m * n` through R².
//!
//! CSV files are plain comma-separated text; every field is numeric or an
//! alphanumeric pair id, so no quoting is needed.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::MetricsError;
use crate::utils::theoretical_comparisons;

pub const METRICS_HEADER: &str = "pair_id,str1_len,str2_len,lcs_len,comparisons,matches,runtime";
pub const ADDITIONAL_HEADER: &str = "str1_len,str2_len,comparisons,theoretical_ops,r_squared";
pub const COMBINED_FILE_NAME: &str = "combined_metrics.csv";
pub const ADDITIONAL_FILE_NAME: &str = "additional_metrics.csv";

/// One processed pair as stored in the metrics CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    /// `"<name1>-<name2>"`.
    pub pair_id: String,
    pub str1_len: usize,
    pub str2_len: usize,
    pub lcs_len: usize,
    pub comparisons: u64,
    pub matches: u64,
    /// Wall-clock seconds measured by the caller.
    pub runtime: f64,
}

impl MetricRow {
    fn csv_line(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.pair_id,
            self.str1_len,
            self.str2_len,
            self.lcs_len,
            self.comparisons,
            self.matches,
            self.runtime
        )
    }

    /// Same measurement with the two inputs swapped.
    pub fn mirrored(&self) -> MetricRow {
        MetricRow {
            pair_id: mirrored_pair_id(&self.pair_id),
            str1_len: self.str2_len,
            str2_len: self.str1_len,
            ..self.clone()
        }
    }
}

fn mirrored_pair_id(id: &str) -> String {
    match id.split_once('-') {
        Some((first, second)) => format!("{second}-{first}"),
        None => id.to_string(),
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> MetricsError + '_ {
    move |source| MetricsError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn write_lines<I>(path: &Path, header: &str, lines: I) -> Result<(), MetricsError>
where
    I: IntoIterator<Item = String>,
{
    let file = File::create(path).map_err(io_err(path))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "{header}").map_err(io_err(path))?;
    for line in lines {
        writeln!(out, "{line}").map_err(io_err(path))?;
    }
    out.flush().map_err(io_err(path))
}

/// Write the runtime-metrics CSV. A header-only file is written for no rows.
pub fn write_runtime_metrics(path: &Path, rows: &[MetricRow]) -> Result<(), MetricsError> {
    write_lines(path, METRICS_HEADER, rows.iter().map(MetricRow::csv_line))?;
    info!(path = %path.display(), rows = rows.len(), "runtime metrics written");
    Ok(())
}

/// Write rows sorted by `str1_len` (stable). Refuses an empty list.
pub fn write_sorted_metrics(path: &Path, rows: &[MetricRow]) -> Result<(), MetricsError> {
    if rows.is_empty() {
        return Err(MetricsError::Empty);
    }
    let mut sorted: Vec<&MetricRow> = rows.iter().collect();
    sorted.sort_by_key(|r| r.str1_len);
    write_lines(path, METRICS_HEADER, sorted.into_iter().map(MetricRow::csv_line))
}

struct Columns {
    pair_id: usize,
    str1_len: usize,
    str2_len: usize,
    lcs_len: usize,
    comparisons: usize,
    matches: usize,
    runtime: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self, MetricsError> {
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let find = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .ok_or_else(|| MetricsError::Parse {
                    line: 1,
                    message: format!("missing column '{name}'"),
                })
        };
        Ok(Self {
            pair_id: find("pair_id")?,
            str1_len: find("str1_len")?,
            str2_len: find("str2_len")?,
            lcs_len: find("lcs_len")?,
            comparisons: find("comparisons")?,
            matches: find("matches")?,
            runtime: find("runtime")?,
        })
    }
}

fn field<T: FromStr>(
    cells: &[&str],
    idx: usize,
    name: &str,
    line: usize,
) -> Result<T, MetricsError> {
    let raw = cells.get(idx).ok_or_else(|| MetricsError::Parse {
        line,
        message: format!("missing value for '{name}'"),
    })?;
    raw.trim().parse().map_err(|_| MetricsError::Parse {
        line,
        message: format!("invalid value '{raw}' for '{name}'"),
    })
}

/// Parse metrics CSV text. An empty text yields no rows; blank lines are ignored.
pub fn parse_metrics(text: &str) -> Result<Vec<MetricRow>, MetricsError> {
    let mut lines = text.lines();
    let Some(header) = lines.next() else {
        return Ok(Vec::new());
    };
    let cols = Columns::from_header(header)?;

    let mut rows = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split(',').collect();
        rows.push(MetricRow {
            pair_id: field(&cells, cols.pair_id, "pair_id", line_no)?,
            str1_len: field(&cells, cols.str1_len, "str1_len", line_no)?,
            str2_len: field(&cells, cols.str2_len, "str2_len", line_no)?,
            lcs_len: field(&cells, cols.lcs_len, "lcs_len", line_no)?,
            comparisons: field(&cells, cols.comparisons, "comparisons", line_no)?,
            matches: field(&cells, cols.matches, "matches", line_no)?,
            runtime: field(&cells, cols.runtime, "runtime", line_no)?,
        });
    }
    Ok(rows)
}

pub fn read_metrics(path: &Path) -> Result<Vec<MetricRow>, MetricsError> {
    let text = fs::read_to_string(path).map_err(io_err(path))?;
    parse_metrics(&text)
}

/// Coefficient of determination of `predicted` against `observed`.
///
/// When `observed` is constant the score is 1.0 for a perfect prediction and
/// 0.0 otherwise.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(observed.len(), predicted.len());
    if observed.is_empty() {
        return 1.0;
    }
    let mean = observed.iter().sum::<f64>() / observed.len() as f64;
    let ss_tot: f64 = observed.iter().map(|y| (y - mean).powi(2)).sum();
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum();
    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

/// One observed point: second-string length and counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthPoint {
    pub n: usize,
    pub observed: u64,
    pub theoretical: u64,
}

/// All points sharing the first-string length `m`, sorted by `n`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthGroup {
    pub m: usize,
    pub points: Vec<GrowthPoint>,
    pub r_squared: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalRow {
    pub str1_len: usize,
    pub str2_len: usize,
    pub comparisons: u64,
    pub theoretical_ops: u64,
    pub r_squared: f64,
}

/// Observed vs theoretical growth, grouped by first-string length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthAnalysis {
    /// Ascending by `m`.
    pub groups: Vec<GrowthGroup>,
    /// Input rows followed by their mirrored copies (`m != n` only).
    pub combined: Vec<MetricRow>,
}

impl GrowthAnalysis {
    pub fn from_rows(rows: &[MetricRow]) -> Self {
        let mut grouped: BTreeMap<usize, Vec<GrowthPoint>> = BTreeMap::new();
        let mut combined = Vec::with_capacity(rows.len() * 2);

        for row in rows {
            let (m, n) = (row.str1_len, row.str2_len);
            let theoretical = theoretical_comparisons(m, n);
            combined.push(row.clone());
            grouped.entry(m).or_default().push(GrowthPoint {
                n,
                observed: row.comparisons,
                theoretical,
            });
            if m != n {
                combined.push(row.mirrored());
                grouped.entry(n).or_default().push(GrowthPoint {
                    n: m,
                    observed: row.comparisons,
                    theoretical,
                });
            }
        }

        let groups = grouped
            .into_iter()
            .map(|(m, mut points)| {
                points.sort_by_key(|p| p.n);
                let observed: Vec<f64> = points.iter().map(|p| p.observed as f64).collect();
                let theoretical: Vec<f64> = points.iter().map(|p| p.theoretical as f64).collect();
                GrowthGroup {
                    m,
                    r_squared: r_squared(&observed, &theoretical),
                    points,
                }
            })
            .collect();

        Self { groups, combined }
    }

    pub fn additional_rows(&self) -> Vec<AdditionalRow> {
        self.groups
            .iter()
            .flat_map(|g| {
                g.points.iter().map(move |p| AdditionalRow {
                    str1_len: g.m,
                    str2_len: p.n,
                    comparisons: p.observed,
                    theoretical_ops: p.theoretical,
                    r_squared: g.r_squared,
                })
            })
            .collect()
    }

    /// Write `combined_metrics.csv` and `additional_metrics.csv` into `dir`.
    pub fn write_csvs(&self, dir: &Path) -> Result<(PathBuf, PathBuf), MetricsError> {
        let combined_path = dir.join(COMBINED_FILE_NAME);
        write_sorted_metrics(&combined_path, &self.combined)?;

        let additional = self.additional_rows();
        if additional.is_empty() {
            return Err(MetricsError::Empty);
        }
        let additional_path = dir.join(ADDITIONAL_FILE_NAME);
        write_lines(
            &additional_path,
            ADDITIONAL_HEADER,
            additional.iter().map(|r| {
                format!(
                    "{},{},{},{},{}",
                    r.str1_len, r.str2_len, r.comparisons, r.theoretical_ops, r.r_squared
                )
            }),
        )?;
        info!(
            combined = %combined_path.display(),
            additional = %additional_path.display(),
            groups = self.groups.len(),
            "growth analysis written"
        );
        Ok((combined_path, additional_path))
    }
}
