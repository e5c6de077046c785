#![cfg(feature = "parallel")]

use lcs_ops::{
    input::NamedString,
    report::{run_pairs, ReportConfig},
    LcsEngine, LcsResult, TieBreak,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn parallel_batch_matches_serial(
        pairs in prop::collection::vec(("[ACGT0-9]{0,24}", "[ACGT0-9]{0,24}"), 0..12)
    ) {
        let pairs: Vec<(Vec<u8>, Vec<u8>)> = pairs
            .into_iter()
            .map(|(a, b)| (a.into_bytes(), b.into_bytes()))
            .collect();
        for tie_break in [TieBreak::PreferUp, TieBreak::PreferLeft] {
            let engine = LcsEngine::with_tie_break(tie_break);
            let serial: Vec<LcsResult<u8>> = engine.compute_batch_serial(&pairs);
            let parallel: Vec<LcsResult<u8>> = engine.compute_batch(&pairs);
            prop_assert_eq!(serial, parallel);
        }
    }
}

#[test]
fn parallel_report_matches_serial_report() {
    let strings = vec![
        NamedString::new("S1", "ABCBDAB"),
        NamedString::new("S2", "BDCABA"),
        NamedString::new("S3", "abc123"),
        NamedString::new("S4", "123abc"),
    ];
    let serial = run_pairs(&strings, &ReportConfig::default());
    let parallel = run_pairs(
        &strings,
        &ReportConfig {
            parallel: true,
            ..ReportConfig::default()
        },
    );
    assert_eq!(serial.len(), 12);
    assert_eq!(serial.len(), parallel.len());
    for (s, p) in serial.iter().zip(&parallel) {
        assert_eq!(s.pair_id(), p.pair_id());
        assert_eq!(s.lcs, p.lcs);
        assert_eq!(s.counts, p.counts);
    }
}
