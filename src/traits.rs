//! Observation hook for the table-filling pass.
//!
//! [`build_table`](crate::engine::build_table) reports every interior cell
//! evaluation to a [`CellObserver`]. [`OpCounts`](crate::engine::OpCounts) is
//! the observer behind the comparison count returned by the engine; tests and
//! probes can plug in their own to record visit order or per-row cost.
//!
//! Observers are owned by the caller and passed by `&mut`, never stored in the
//! engine, so two computations can never share a counter.

/// Receives one callback per interior DP cell.
///
/// Semantics:
/// - `on_cell(i, j, matched)` is called exactly once for every cell with
///   `1 <= i <= m` and `1 <= j <= n`,
/// - calls arrive in row-major order,
/// - `matched` is true when `a[i - 1] == b[j - 1]`.
///
/// Border cells (row 0, column 0) are initialised without a callback.
pub trait CellObserver {
    fn on_cell(&mut self, i: usize, j: usize, matched: bool);
}

impl<O: CellObserver + ?Sized> CellObserver for &mut O {
    #[inline]
    fn on_cell(&mut self, i: usize, j: usize, matched: bool) {
        (**self).on_cell(i, j, matched);
    }
}

/// Discards every event.
impl CellObserver for () {
    #[inline]
    fn on_cell(&mut self, _i: usize, _j: usize, _matched: bool) {}
}

#[cfg(test)]
mod tests {
    use super::CellObserver;

    #[derive(Default)]
    struct Tally {
        cells: usize,
        matched: usize,
    }

    impl CellObserver for Tally {
        fn on_cell(&mut self, _i: usize, _j: usize, matched: bool) {
            self.cells += 1;
            if matched {
                self.matched += 1;
            }
        }
    }

    #[test]
    fn mutable_reference_forwards_events() {
        fn feed<O: CellObserver>(mut observer: O) {
            observer.on_cell(1, 1, true);
            observer.on_cell(1, 2, false);
        }

        let mut tally = Tally::default();
        feed(&mut tally);
        assert_eq!(tally.cells, 2);
        assert_eq!(tally.matched, 1);
    }

    #[test]
    fn unit_observer_is_a_no_op() {
        CellObserver::on_cell(&mut (), 3, 4, true);
    }
}
