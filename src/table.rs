//! Dense DP length table.
//!
//! An [`LcsTable`] for inputs of lengths `m` and `n` has `m + 1` rows and
//! `n + 1` columns stored row-major in one allocation. Cell `(i, j)` holds the
//! LCS length of the first `i` symbols of `a` and the first `j` symbols of `b`.

/// Length table for one input pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcsTable {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LcsTable {
    /// Table for inputs of lengths `m` and `n`, every cell zero.
    ///
    /// Row 0 and column 0 stay zero for the lifetime of the table.
    pub fn zeroed(m: usize, n: usize) -> Self {
        let rows = m + 1;
        let cols = n + 1;
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Number of rows, `m + 1`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns, `n + 1`.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, `(m + 1) * (n + 1)`.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// # Panics
    /// Panics if `(i, j)` lies outside the table.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        assert!(j < self.cols, "column {j} out of range for {} columns", self.cols);
        self.cells[i * self.cols + j]
    }

    #[inline]
    pub(crate) fn set(&mut self, i: usize, j: usize, value: u32) {
        debug_assert!(i > 0 && j > 0, "border cells are fixed at zero");
        self.cells[i * self.cols + j] = value;
    }

    /// Row `i` as a slice of `n + 1` lengths.
    pub fn row(&self, i: usize) -> &[u32] {
        let start = i * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Final cell `(m, n)`: the LCS length of the full inputs.
    #[inline]
    pub fn lcs_len(&self) -> u32 {
        *self.cells.last().unwrap_or(&0)
    }
}
