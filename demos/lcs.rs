//! Example: instrumented LCS of the textbook pair.
//!
//! Run with:
//! `cargo run --example lcs`

use std::fmt::Write;

use lcs_ops::{build_table, LcsEngine, LcsTable, TieBreak};

/// Lay out `table` with `b` across the top and `a` down the side.
///
/// Column 0 and row 0 are the zero borders, so both headers start with a
/// blank slot.
fn render_table(a: &[char], b: &[char], table: &LcsTable) -> String {
    let mut out = String::new();
    out.push_str("     ");
    for ch in std::iter::once(&' ').chain(b) {
        let _ = write!(out, " {ch}");
    }
    out.push('\n');
    for i in 0..table.rows() {
        let label = if i == 0 { ' ' } else { a[i - 1] };
        let _ = write!(out, "  {label}  ");
        for v in table.row(i) {
            let _ = write!(out, " {v}");
        }
        out.push('\n');
    }
    out
}

fn main() {
    let s = "ABCBDAB";
    let t = "BDCABA";

    for tie_break in [TieBreak::PreferUp, TieBreak::PreferLeft] {
        let result = LcsEngine::with_tie_break(tie_break).compute_str(s, t);
        println!(
            "tie-break {tie_break:<4} LCS: {} (length {}, {} comparisons, {} matches)",
            result.as_string(),
            result.length,
            result.counts.comparisons,
            result.counts.matches
        );
    }

    let a: Vec<char> = s.chars().collect();
    let b: Vec<char> = t.chars().collect();
    let (table, _counts) = build_table(&a, &b);
    print!("{}", render_table(&a, &b, &table));
}
