//! Instrumented LCS engine.
//!
//! This module implements the two passes of the classic algorithm:
//! 1. [`build_table`] fills the length table row by row, reporting every
//!    interior cell to a [`CellObserver`] (by default an [`OpCounts`]).
//! 2. [`LcsEngine::reconstruct`] walks the table back from `(m, n)` and
//!    recovers one longest common subsequence under a fixed [`TieBreak`].
//!
//! The engine holds configuration only. Tables and counters are created per
//! call and returned by value, so concurrent calls never interfere.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::table::LcsTable;
use crate::traits::CellObserver;

/// Operation counts for one table construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpCounts {
    /// One per interior cell; always `m * n`.
    pub comparisons: u64,
    /// Interior cells whose symbols were equal.
    pub matches: u64,
}

impl CellObserver for OpCounts {
    #[inline]
    fn on_cell(&mut self, _i: usize, _j: usize, matched: bool) {
        self.comparisons += 1;
        self.matches += u64::from(matched);
    }
}

/// Direction taken during reconstruction when `table[i-1][j] == table[i][j-1]`
/// and the current symbols differ.
///
/// The policy decides which of several maximal subsequences is returned.
/// `PreferUp` on `(a, b)` yields the same subsequence as `PreferLeft` on
/// `(b, a)`, since the table of the swapped pair is the transpose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TieBreak {
    /// Decrement `i` (drop the last symbol of `a`).
    #[default]
    PreferUp,
    /// Decrement `j` (drop the last symbol of `b`).
    PreferLeft,
}

impl TieBreak {
    pub fn label(&self) -> &'static str {
        match self {
            TieBreak::PreferUp => "up",
            TieBreak::PreferLeft => "left",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "up" => Ok(TieBreak::PreferUp),
            "left" => Ok(TieBreak::PreferLeft),
            other => Err(format!("unknown tie-break '{other}' (expected 'up' or 'left')")),
        }
    }
}

/// Outcome of one [`LcsEngine::compute`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsResult<T> {
    /// One longest common subsequence, in input order.
    pub subsequence: Vec<T>,
    /// Final table cell; equals `subsequence.len()`.
    pub length: u32,
    pub counts: OpCounts,
    /// Length of the first input (`m`).
    pub lhs_len: usize,
    /// Length of the second input (`n`).
    pub rhs_len: usize,
}

impl<T> LcsResult<T> {
    /// Cells in the full table, `(m + 1) * (n + 1)`, border included.
    pub fn table_cells(&self) -> u64 {
        (self.lhs_len as u64 + 1) * (self.rhs_len as u64 + 1)
    }
}

impl LcsResult<char> {
    pub fn as_string(&self) -> String {
        self.subsequence.iter().collect()
    }
}

/// Fill the length table for `a` and `b`, counting comparisons.
///
/// Returns the populated table and an [`OpCounts`] whose `comparisons` is
/// exactly `a.len() * b.len()`.
pub fn build_table<T: PartialEq>(a: &[T], b: &[T]) -> (LcsTable, OpCounts) {
    let mut counts = OpCounts::default();
    let table = build_table_observed(a, b, &mut counts);
    (table, counts)
}

/// Fill the length table, reporting each interior cell to `observer`.
///
/// Cells are visited row-major; `(i-1, j)`, `(i, j-1)` and `(i-1, j-1)` are
/// always final when `(i, j)` is evaluated.
pub fn build_table_observed<T, O>(a: &[T], b: &[T], observer: &mut O) -> LcsTable
where
    T: PartialEq,
    O: CellObserver + ?Sized,
{
    let m = a.len();
    let n = b.len();
    let mut table = LcsTable::zeroed(m, n);

    for i in 1..=m {
        let ch = &a[i - 1];
        for j in 1..=n {
            let matched = *ch == b[j - 1];
            observer.on_cell(i, j, matched);
            let value = if matched {
                table.get(i - 1, j - 1) + 1
            } else {
                table.get(i - 1, j).max(table.get(i, j - 1))
            };
            table.set(i, j, value);
        }
    }

    table
}

/// Instrumented LCS engine for arbitrary symbol types.
///
/// Typical usage:
/// ```
/// use lcs_ops::{LcsEngine, TieBreak};
///
/// let engine = LcsEngine::with_tie_break(TieBreak::PreferLeft);
/// let result = engine.compute(b"ABCBDAB", b"BDCABA");
/// assert_eq!(result.subsequence, b"BDAB".to_vec());
/// assert_eq!(result.counts.comparisons, 42);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LcsEngine {
    tie_break: TieBreak,
}

impl LcsEngine {
    /// Engine with the default [`TieBreak::PreferUp`] policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tie_break(tie_break: TieBreak) -> Self {
        Self { tie_break }
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    /// Recover one LCS from a table built by [`build_table`] for `a` and `b`.
    ///
    /// Walks from `(m, n)` until either index reaches zero: matching symbols
    /// are emitted and the walk moves diagonally; otherwise it moves toward
    /// the larger neighbour, resolving ties with the engine's [`TieBreak`].
    /// Takes at most `m + n` steps.
    pub fn reconstruct<T>(&self, table: &LcsTable, a: &[T], b: &[T]) -> Vec<T>
    where
        T: PartialEq + Clone,
    {
        debug_assert_eq!(table.rows(), a.len() + 1);
        debug_assert_eq!(table.cols(), b.len() + 1);

        let mut i = a.len();
        let mut j = b.len();
        let mut rev = Vec::with_capacity(table.lcs_len() as usize);

        while i > 0 && j > 0 {
            if a[i - 1] == b[j - 1] {
                rev.push(a[i - 1].clone());
                i -= 1;
                j -= 1;
                continue;
            }
            let up = table.get(i - 1, j);
            let left = table.get(i, j - 1);
            match (up.cmp(&left), self.tie_break) {
                (Ordering::Greater, _) | (Ordering::Equal, TieBreak::PreferUp) => i -= 1,
                (Ordering::Less, _) | (Ordering::Equal, TieBreak::PreferLeft) => j -= 1,
            }
        }

        rev.reverse();
        rev
    }

    /// Build the table, reconstruct, and return the subsequence with its counts.
    pub fn compute<T: PartialEq + Clone>(&self, a: &[T], b: &[T]) -> LcsResult<T> {
        let (table, counts) = build_table(a, b);
        let subsequence = self.reconstruct(&table, a, b);
        let length = table.lcs_len();
        debug_assert_eq!(subsequence.len(), length as usize);
        debug!(
            m = a.len(),
            n = b.len(),
            comparisons = counts.comparisons,
            matches = counts.matches,
            length,
            "lcs computed"
        );
        LcsResult {
            subsequence,
            length,
            counts,
            lhs_len: a.len(),
            rhs_len: b.len(),
        }
    }

    /// [`compute`](Self::compute) over the `char`s of two strings.
    pub fn compute_str(&self, a: &str, b: &str) -> LcsResult<char> {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        self.compute(&a, &b)
    }

    /// Compute every pair in order on the current thread.
    pub fn compute_batch_serial<T, A, B>(&self, pairs: &[(A, B)]) -> Vec<LcsResult<T>>
    where
        T: PartialEq + Clone,
        A: AsRef<[T]>,
        B: AsRef<[T]>,
    {
        let span = tracing::debug_span!("compute_batch", pairs = pairs.len(), parallel = false);
        let _enter = span.enter();
        pairs
            .iter()
            .map(|(a, b)| self.compute(a.as_ref(), b.as_ref()))
            .collect()
    }

    /// Compute every pair; results keep the input order.
    ///
    /// With the `parallel` feature pairs are spread over the rayon pool.
    #[cfg(feature = "parallel")]
    pub fn compute_batch<T, A, B>(&self, pairs: &[(A, B)]) -> Vec<LcsResult<T>>
    where
        T: PartialEq + Clone + Send + Sync,
        A: AsRef<[T]> + Sync,
        B: AsRef<[T]> + Sync,
    {
        let span = tracing::debug_span!("compute_batch", pairs = pairs.len(), parallel = true);
        let _enter = span.enter();
        pairs
            .par_iter()
            .map(|(a, b)| self.compute(a.as_ref(), b.as_ref()))
            .collect()
    }

    /// Compute every pair; results keep the input order.
    #[cfg(not(feature = "parallel"))]
    pub fn compute_batch<T, A, B>(&self, pairs: &[(A, B)]) -> Vec<LcsResult<T>>
    where
        T: PartialEq + Clone,
        A: AsRef<[T]>,
        B: AsRef<[T]>,
    {
        self.compute_batch_serial(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_pair_prefers_up() {
        let r = LcsEngine::new().compute_str("ABCBDAB", "BDCABA");
        assert_eq!(r.as_string(), "BCBA");
        assert_eq!(r.length, 4);
        assert_eq!(r.counts.comparisons, 42);
        assert_eq!(r.table_cells(), 56);
    }

    #[test]
    fn textbook_pair_prefers_left() {
        let r = LcsEngine::with_tie_break(TieBreak::PreferLeft).compute_str("ABCBDAB", "BDCABA");
        assert_eq!(r.as_string(), "BDAB");
        assert_eq!(r.length, 4);
    }

    #[test]
    fn table_values_match_hand_computed_rows() {
        let (table, counts) = build_table(b"ABCB", b"BDCAB");
        assert_eq!(table.row(0), &[0, 0, 0, 0, 0, 0]);
        assert_eq!(table.row(1), &[0, 0, 0, 0, 1, 1]);
        assert_eq!(table.row(2), &[0, 1, 1, 1, 1, 2]);
        assert_eq!(table.row(3), &[0, 1, 1, 2, 2, 2]);
        assert_eq!(table.row(4), &[0, 1, 1, 2, 2, 3]);
        assert_eq!(counts.comparisons, 20);
        assert_eq!(counts.matches, 6);
    }

    #[test]
    fn empty_inputs_yield_zero_counts() {
        let engine = LcsEngine::new();
        for (a, b) in [("", ""), ("", "abc"), ("abc", "")] {
            let r = engine.compute_str(a, b);
            assert!(r.subsequence.is_empty());
            assert_eq!(r.length, 0);
            assert_eq!(r.counts, OpCounts::default());
        }
    }

    #[test]
    fn disjoint_inputs_count_every_cell() {
        let r = LcsEngine::new().compute_str("abc", "XYZ9");
        assert!(r.subsequence.is_empty());
        assert_eq!(r.counts.comparisons, 12);
        assert_eq!(r.counts.matches, 0);
    }

    #[test]
    fn tie_break_round_trips_through_str() {
        for tb in [TieBreak::PreferUp, TieBreak::PreferLeft] {
            assert_eq!(tb.label().parse::<TieBreak>(), Ok(tb));
        }
        assert!("diagonal".parse::<TieBreak>().is_err());
    }

    #[test]
    fn batch_keeps_input_order() {
        let pairs = vec![
            (b"ABCBDAB".to_vec(), b"BDCABA".to_vec()),
            (b"".to_vec(), b"XYZ".to_vec()),
            (b"abc123".to_vec(), b"123abc".to_vec()),
        ];
        let out: Vec<LcsResult<u8>> = LcsEngine::new().compute_batch(&pairs);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].subsequence, b"BCBA".to_vec());
        assert_eq!(out[1].length, 0);
        assert_eq!(out[2].subsequence, b"abc".to_vec());
    }
}
