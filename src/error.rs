//! Error types for the collaborators around the engine.
//!
//! The engine itself is total and never fails; everything here belongs to
//! reading input, writing reports and metrics, and rendering charts.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or validating the input file.
///
/// Any of these aborts the run before the engine sees a single pair.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open input file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read input line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("duplicate key '{key}' found at line {line}")]
    DuplicateKey { key: String, line: usize },
    #[error("at least two valid strings are required, found {found}")]
    TooFewStrings { found: usize },
}

/// Failures while reading or writing metrics CSV files.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed metrics at line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("the metrics list is empty, nothing to write")]
    Empty,
}

/// Failures while writing the pairwise report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Failures while rendering the growth chart.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("no growth groups to plot")]
    NoData,
    #[error("chart rendering failed: {0}")]
    Render(String),
}
