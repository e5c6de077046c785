//! Instrumented Longest Common Subsequence (LCS)
//!
//! This crate computes the LCS of two sequences with the classic
//! table-filling dynamic program and counts every interior cell evaluation,
//! so the quadratic cost of the algorithm can be measured rather than assumed.
//!
//! ## Core idea
//! 1. [`build_table`] fills the (m+1)×(n+1) length table and returns an
//!    [`OpCounts`] value with exactly `m·n` comparisons.
//! 2. [`LcsEngine::reconstruct`] walks the table back from (m, n) under a
//!    fixed [`TieBreak`] policy and returns one longest common subsequence.
//! 3. [`LcsEngine::compute`] composes both. Every call owns its table and its
//!    counter, so independent pairs can run concurrently.
//!
//! ## Quick start
//! ```
//! use lcs_ops::LcsEngine;
//!
//! let result = LcsEngine::new().compute_str("ABCBDAB", "BDCABA");
//! assert_eq!(result.as_string(), "BCBA");
//! assert_eq!(result.length, 4);
//! assert_eq!(result.counts.comparisons, 42);
//! ```
//!
//! ## Around the engine
//! - [`input`]   : `key=value` input files with alphanumeric validation.
//! - [`report`]  : pairwise runs, text report and runtime-metrics CSV.
//! - [`metrics`] : growth analysis of observed vs theoretical counts.
//! - `plot`      : growth chart rendering (feature `plot`).

pub mod builder;
pub mod engine;
pub mod error;
pub mod input;
pub mod metrics;
#[cfg(feature = "plot")]
pub mod plot;
pub mod report;
pub mod table;
pub mod traits;
pub mod utils;

pub use crate::builder::LcsEngineBuilder;
pub use crate::engine::{build_table, LcsEngine, LcsResult, OpCounts, TieBreak};
pub use crate::table::LcsTable;
pub use crate::traits::CellObserver;
