//! Assorted helpers shared by the engine, the report layer and the probes.

use crate::engine::OpCounts;
use crate::traits::CellObserver;

/// Theoretical comparison count for inputs of lengths `m` and `n`.
#[inline]
pub fn theoretical_comparisons(m: usize, n: usize) -> u64 {
    m as u64 * n as u64
}

/// Number of cells in the full table, or `None` if it overflows `usize`.
#[inline]
pub fn table_cells(m: usize, n: usize) -> Option<usize> {
    m.checked_add(1)?.checked_mul(n.checked_add(1)?)
}

/// True when `needle` occurs in `haystack` in order, not necessarily contiguously.
pub fn is_subsequence<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|x| rest.any(|y| y == x))
}

/// LCS length of `a` and `b` keeping only two rows live.
///
/// Counts exactly like [`build_table`](crate::engine::build_table) but needs
/// O(min(m, n)) memory and cannot reconstruct the subsequence. The shorter
/// input indexes the columns.
pub fn lcs_len_linear<T: PartialEq>(a: &[T], b: &[T]) -> (u32, OpCounts) {
    let (rows, cols, swapped) = if b.len() <= a.len() {
        (a, b, false)
    } else {
        (b, a, true)
    };
    let width = cols.len();
    let mut counts = OpCounts::default();
    let mut prev = vec![0u32; width + 1];
    let mut curr = vec![0u32; width + 1];

    for (r, x) in rows.iter().enumerate() {
        for j in 1..=width {
            let matched = *x == cols[j - 1];
            if swapped {
                counts.on_cell(j, r + 1, matched);
            } else {
                counts.on_cell(r + 1, j, matched);
            }
            curr[j] = if matched {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (prev[width], counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theoretical_is_product() {
        assert_eq!(theoretical_comparisons(7, 6), 42);
        assert_eq!(theoretical_comparisons(0, 9), 0);
    }

    #[test]
    fn table_cells_detects_overflow() {
        assert_eq!(table_cells(0, 0), Some(1));
        assert_eq!(table_cells(7, 6), Some(56));
        assert_eq!(table_cells(usize::MAX, 1), None);
        assert_eq!(table_cells(usize::MAX / 2, 3), None);
    }

    #[test]
    fn subsequence_checks() {
        assert!(is_subsequence(b"", b""));
        assert!(is_subsequence(b"", b"abc"));
        assert!(is_subsequence(b"BCBA", b"ABCBDAB"));
        assert!(is_subsequence(b"BCBA", b"BDCABA"));
        assert!(!is_subsequence(b"BDAC", b"BDCABA"));
        assert!(!is_subsequence(b"aa", b"a"));
    }

    #[test]
    fn linear_len_basic_cases() {
        assert_eq!(lcs_len_linear(b"", b"").0, 0);
        assert_eq!(lcs_len_linear(b"A", b"").0, 0);
        assert_eq!(lcs_len_linear(b"", b"A").0, 0);
        assert_eq!(lcs_len_linear(b"A", b"A").0, 1);
        assert_eq!(lcs_len_linear(b"A", b"B").0, 0);
    }

    #[test]
    fn linear_len_counts_like_full_table() {
        let (len, counts) = lcs_len_linear(b"ABCBDAB", b"BDCABA");
        assert_eq!(len, 4);
        assert_eq!(counts.comparisons, 42);
        let (_, full) = crate::engine::build_table(b"ABCBDAB", b"BDCABA");
        assert_eq!(counts, full);

        let (len, counts) = lcs_len_linear(b"AC", b"ABCBDAB");
        assert_eq!(len, 2);
        assert_eq!(counts.comparisons, 14);
    }
}
