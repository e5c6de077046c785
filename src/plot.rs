//! Growth chart rendering.
//!
//! One colour per first-string length `m`: observed comparison counts are
//! drawn as a solid line with circles, the theoretical `m * n` as crosses.

use std::path::Path;

use plotters::prelude::*;
use tracing::info;

use crate::error::PlotError;
use crate::metrics::GrowthAnalysis;

const CHART_SIZE: (u32, u32) = (1200, 700);

fn render_err<E: std::fmt::Display>(stage: &'static str) -> impl FnOnce(E) -> PlotError {
    move |e| PlotError::Render(format!("{stage}: {e}"))
}

/// Render `analysis` as a PNG at `path`.
pub fn render_growth_chart(analysis: &GrowthAnalysis, path: &Path) -> Result<(), PlotError> {
    if analysis.groups.is_empty() {
        return Err(PlotError::NoData);
    }

    let max_n = analysis
        .groups
        .iter()
        .flat_map(|g| g.points.iter().map(|p| p.n))
        .max()
        .unwrap_or(0) as u64;
    let max_ops = analysis
        .groups
        .iter()
        .flat_map(|g| g.points.iter().map(|p| p.observed.max(p.theoretical)))
        .max()
        .unwrap_or(0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err("backend"))?;

    {
        let mut chart = ChartBuilder::on(&root)
            .margin(15)
            .caption(
                "LCS Operations: Observed vs. Theoretical Efficiency",
                ("sans-serif", 26.0),
            )
            .set_label_area_size(LabelAreaPosition::Left, 80)
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .build_cartesian_2d(0u64..max_n + 1, 0u64..max_ops + max_ops / 20 + 1)
            .map_err(render_err("chart build"))?;

        chart
            .configure_mesh()
            .x_desc("Length of String Y (n)")
            .y_desc("Number of Operations")
            .draw()
            .map_err(render_err("mesh"))?;

        for (idx, group) in analysis.groups.iter().enumerate() {
            let color = Palette99::pick(idx).to_rgba();
            let observed: Vec<(u64, u64)> = group
                .points
                .iter()
                .map(|p| (p.n as u64, p.observed))
                .collect();
            let theoretical: Vec<(u64, u64)> = group
                .points
                .iter()
                .map(|p| (p.n as u64, p.theoretical))
                .collect();

            chart
                .draw_series(LineSeries::new(observed.iter().copied(), color.stroke_width(2)))
                .map_err(render_err("observed line"))?
                .label(format!("(m = {})", group.m))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            chart
                .draw_series(
                    observed
                        .iter()
                        .map(|&pt| Circle::new(pt, 4, color.filled())),
                )
                .map_err(render_err("observed points"))?;
            chart
                .draw_series(
                    theoretical
                        .iter()
                        .map(|&pt| Cross::new(pt, 5, color.stroke_width(1))),
                )
                .map_err(render_err("theoretical points"))?;
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()
            .map_err(render_err("legend"))?;
    }

    root.present().map_err(render_err("present"))?;
    info!(path = %path.display(), groups = analysis.groups.len(), "growth chart rendered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricRow;

    #[test]
    fn empty_analysis_has_nothing_to_draw() {
        let dir = tempfile::tempdir().unwrap();
        let analysis = GrowthAnalysis::from_rows(&[]);
        let err = render_growth_chart(&analysis, &dir.path().join("chart.png")).unwrap_err();
        assert!(matches!(err, PlotError::NoData));
    }

    #[test]
    fn renders_png_for_measured_pairs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("growth.png");
        let engine = crate::LcsEngine::new();
        let pairs = [("ABCBDAB", "BDCABA"), ("BDCABA", "ABCBDAB"), ("abc", "123abc")];
        let rows: Vec<MetricRow> = pairs
            .iter()
            .enumerate()
            .map(|(i, (a, b))| {
                let r = engine.compute_str(a, b);
                MetricRow {
                    pair_id: format!("S{i}-T{i}"),
                    str1_len: a.len(),
                    str2_len: b.len(),
                    lcs_len: r.length as usize,
                    comparisons: r.counts.comparisons,
                    matches: r.counts.matches,
                    runtime: 0.0,
                }
            })
            .collect();
        let analysis = GrowthAnalysis::from_rows(&rows);
        assert_eq!(analysis.groups.len(), 3);

        render_growth_chart(&analysis, &path).unwrap();
        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.is_file());
        assert!(meta.len() > 0);
    }
}
