// MANET-EVAL: Aggregation and Comparison Plots for MANET Routing Simulation Results
// Copyright (C) 2024-2025 The manet-eval developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//! Comparative figure rendering: one subplot per network size, one styled line per router.
//!
//! Every render call builds its own [`plotly::Plot`] and writes it out before returning, so
//! figures cannot contaminate each other and independent figures may render in parallel.
use std::path::Path;

use plotly::{
    common::{Line, Marker, Mode, Orientation},
    layout::{Annotation, Axis, Layout, Legend, Margin, Shape, ShapeLine, ShapeType},
    Plot, Scatter,
};
use rayon::prelude::*;
use strum::IntoEnumIterator;

use crate::{
    aggregate::{EvalError, GroupKey},
    records::{Metric, Router},
    style::line_style,
    SummaryTable, INTERVAL_LABELS, MESSAGE_INTERVALS, NETWORK_SIZES,
};

/// Horizontal paper-coordinate extent of each subplot column.
const COLUMN_DOMAINS: [[f64; 2]; 3] = [[0.0, 0.29], [0.355, 0.645], [0.71, 1.0]];

/// Per-figure rendering options.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Draw the router legend into the figure.
    pub legend: bool,
    /// Put an `n=<size>` title above each subplot.
    pub title: bool,
    /// Figure dimensions in pixels.
    pub width: usize,
    pub height: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            legend: false,
            title: true,
            width: 960,
            height: 320,
        }
    }
}

/// Y-limits of the two stacked axes of a split figure.
#[derive(Clone, Debug)]
pub struct SplitConfig {
    /// Zoomed-in view shown in the bottom axes.
    pub zoom_range: (f64, f64),
    /// Outlier view shown in the top axes.
    pub outlier_range: (f64, f64),
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            zoom_range: (0.0, 700.0),
            outlier_range: (2000.0, 2500.0),
        }
    }
}

/// One router's series over the fixed interval buckets. Buckets without an aggregated group
/// map to NaN, which the backend renders as a gap rather than shifting the line.
pub fn interval_series(
    table: &SummaryTable,
    router: Router,
    nodes: u32,
    metric: Metric,
) -> Vec<f64> {
    MESSAGE_INTERVALS
        .iter()
        .map(|&interval| {
            table
                .get(&GroupKey::new(router, nodes, interval))
                .and_then(|row| row.get(metric))
                .map(|stat| stat.mean)
                .unwrap_or(f64::NAN)
        })
        .collect()
}

/// Renders the standard comparison figure for one metric and writes it to `output`.
pub fn render_metric(
    table: &SummaryTable,
    metric: Metric,
    ylabel: &str,
    output: impl AsRef<Path>,
    cfg: &RenderConfig,
) -> Result<(), EvalError> {
    let mut plot = Plot::new();
    for (col, &nodes) in NETWORK_SIZES.iter().enumerate() {
        let (xaxis, yaxis) = axis_ref(col);
        for router in Router::iter() {
            plot.add_trace(
                line_trace(table, router, nodes, metric)
                    .x_axis(&xaxis)
                    .y_axis(&yaxis)
                    .show_legend(cfg.legend && col == 0),
            );
        }
    }

    let shared_range = metric_range(table, metric);
    let yaxis = |col: usize| {
        let mut axis = Axis::new();
        if let Some((lo, hi)) = shared_range {
            axis = axis.range(vec![lo, hi]);
        }
        if col == 0 {
            axis = axis.title(ylabel.to_string());
        }
        axis
    };

    let layout = Layout::new()
        .width(cfg.width)
        .height(cfg.height)
        .show_legend(cfg.legend)
        .legend(Legend::new().orientation(Orientation::Horizontal))
        .annotations(figure_annotations(cfg.title))
        .x_axis(Axis::new().domain(&COLUMN_DOMAINS[0]))
        .x_axis2(Axis::new().domain(&COLUMN_DOMAINS[1]))
        .x_axis3(Axis::new().domain(&COLUMN_DOMAINS[2]))
        .y_axis(yaxis(0))
        .y_axis2(yaxis(1))
        .y_axis3(yaxis(2));

    plot.set_layout(layout);
    log::debug!("Plotting {:?}", output.as_ref());
    plot.write_html(output.as_ref());
    Ok(())
}

/// Renders the broken-axis variant: the same data drawn into two vertically stacked axes per
/// network size, a zoomed view below and an outlier view above, with diagonal break marks at
/// the seam.
pub fn render_split_metric(
    table: &SummaryTable,
    metric: Metric,
    ylabel: &str,
    output: impl AsRef<Path>,
    cfg: &RenderConfig,
    split: &SplitConfig,
) -> Result<(), EvalError> {
    let mut plot = Plot::new();
    for (col, &nodes) in NETWORK_SIZES.iter().enumerate() {
        let (bottom_x, bottom_y) = axis_ref(col);
        let (top_x, top_y) = axis_ref(col + NETWORK_SIZES.len());
        for router in Router::iter() {
            plot.add_trace(
                line_trace(table, router, nodes, metric)
                    .x_axis(&bottom_x)
                    .y_axis(&bottom_y)
                    .show_legend(cfg.legend && col == 0),
            );
            plot.add_trace(
                line_trace(table, router, nodes, metric)
                    .x_axis(&top_x)
                    .y_axis(&top_y)
                    .show_legend(false),
            );
        }
    }

    // axes pair up with their y counterparts through the traces referencing them together
    let bottom_x_axis = |col: usize| Axis::new().domain(&COLUMN_DOMAINS[col]).tick_angle(90.0);
    let top_x_axis =
        |col: usize| Axis::new().domain(&COLUMN_DOMAINS[col]).show_tick_labels(false);
    let bottom_y_axis = |col: usize| {
        let mut axis = Axis::new()
            .domain(&[0.0, 0.45])
            .range(vec![split.zoom_range.0, split.zoom_range.1]);
        if col == 0 {
            axis = axis.title(ylabel.to_string());
        }
        axis
    };
    let top_y_axis =
        |_col: usize| Axis::new().domain(&[0.55, 1.0]).range(vec![split.outlier_range.0, split.outlier_range.1]);

    let layout = Layout::new()
        .width(cfg.width)
        .height(cfg.height * 2)
        .show_legend(cfg.legend)
        .legend(Legend::new().orientation(Orientation::Horizontal))
        .annotations(figure_annotations(cfg.title))
        .shapes(break_marks())
        .x_axis(bottom_x_axis(0))
        .x_axis2(bottom_x_axis(1))
        .x_axis3(bottom_x_axis(2))
        .x_axis4(top_x_axis(0))
        .x_axis5(top_x_axis(1))
        .x_axis6(top_x_axis(2))
        .y_axis(bottom_y_axis(0))
        .y_axis2(bottom_y_axis(1))
        .y_axis3(bottom_y_axis(2))
        .y_axis4(top_y_axis(0))
        .y_axis5(top_y_axis(1))
        .y_axis6(top_y_axis(2));

    plot.set_layout(layout);
    log::debug!("Plotting {:?}", output.as_ref());
    plot.write_html(output.as_ref());
    Ok(())
}

/// Writes a legend-only figure built from proxy traces that carry no data.
pub fn export_legend(output: impl AsRef<Path>) -> Result<(), EvalError> {
    let mut plot = Plot::new();
    for router in Router::iter() {
        let style = line_style(router);
        plot.add_trace(
            Scatter::new(Vec::<f64>::new(), Vec::<f64>::new())
                .name(&router.to_string())
                .mode(Mode::LinesMarkers)
                .line(Line::new().color(style.color).dash(style.dash.clone()).width(1.0))
                .marker(Marker::new().symbol(style.marker.clone()).size(6)),
        );
    }
    plot.set_layout(
        Layout::new()
            .width(900)
            .height(90)
            .margin(Margin::new().left(10).right(10).top(10).bottom(10))
            .show_legend(true)
            .legend(Legend::new().orientation(Orientation::Horizontal).x(0.0).y(1.0))
            .x_axis(Axis::new().visible(false))
            .y_axis(Axis::new().visible(false)),
    );
    log::debug!("Plotting {:?}", output.as_ref());
    plot.write_html(output.as_ref());
    Ok(())
}

/// Renders the paper's fixed figure set into `output_dir`. The independent figures render in
/// parallel; the split variant and the legend follow.
pub fn render_all(table: &SummaryTable, output_dir: &Path) -> Result<(), EvalError> {
    let figures = [
        (
            Metric::LatencyAvg,
            "Latency (s)",
            "latency.html",
            RenderConfig::default(),
        ),
        (
            Metric::DeliveryProb,
            "Packet Delivery Ratio",
            "pdr.html",
            RenderConfig {
                title: false,
                ..Default::default()
            },
        ),
        (
            Metric::OverheadRatio,
            "Overhead Ratio",
            "or.html",
            RenderConfig {
                title: false,
                ..Default::default()
            },
        ),
    ];

    figures
        .into_par_iter()
        .try_for_each(|(metric, ylabel, filename, cfg)| {
            log::info!("Plotting {}", output_dir.join(filename).display());
            render_metric(table, metric, ylabel, output_dir.join(filename), &cfg)
        })?;

    render_split_metric(
        table,
        Metric::OverheadRatio,
        "Overhead Ratio",
        output_dir.join("overhead.html"),
        &RenderConfig::default(),
        &SplitConfig::default(),
    )?;
    export_legend(output_dir.join("legend.html"))?;
    Ok(())
}

/// Plotly axis pair for the subplot at the given index ("x"/"y", "x2"/"y2", ...).
fn axis_ref(idx: usize) -> (String, String) {
    if idx == 0 {
        ("x".to_string(), "y".to_string())
    } else {
        (format!("x{}", idx + 1), format!("y{}", idx + 1))
    }
}

fn line_trace(
    table: &SummaryTable,
    router: Router,
    nodes: u32,
    metric: Metric,
) -> Box<Scatter<String, f64>> {
    let style = line_style(router);
    Scatter::new(
        INTERVAL_LABELS.iter().map(|&label| label.to_string()).collect(),
        interval_series(table, router, nodes, metric),
    )
    .name(&router.to_string())
    .mode(Mode::LinesMarkers)
    .line(Line::new().color(style.color).dash(style.dash.clone()).width(1.0))
    .marker(Marker::new().symbol(style.marker.clone()).size(6))
}

/// Shared x-axis label below the figure plus the optional `n=<size>` subplot titles.
fn figure_annotations(title: bool) -> Vec<Annotation> {
    let mut annotations = vec![Annotation::new()
        .text("Message creation interval (s)")
        .x_ref("paper")
        .y_ref("paper")
        .x(0.5)
        .y(-0.35)
        .show_arrow(false)];
    if title {
        for (col, &nodes) in NETWORK_SIZES.iter().enumerate() {
            let center = (COLUMN_DOMAINS[col][0] + COLUMN_DOMAINS[col][1]) / 2.0;
            let label = format!("n={nodes}");
            annotations.push(
                Annotation::new()
                    .text(label.as_str())
                    .x_ref("paper")
                    .y_ref("paper")
                    .x(center)
                    .y(1.15)
                    .show_arrow(false),
            );
        }
    }
    annotations
}

/// Diagonal break marks at the seam between the stacked axes of a split figure.
fn break_marks() -> Vec<Shape> {
    let d = 0.008;
    let mut shapes = Vec::new();
    for domain in COLUMN_DOMAINS {
        for x in [domain[0], domain[1]] {
            for y in [0.45, 0.55] {
                shapes.push(
                    Shape::new()
                        .shape_type(ShapeType::Line)
                        .x_ref("paper")
                        .y_ref("paper")
                        .x0(x - d)
                        .y0(y - d)
                        .x1(x + d)
                        .y1(y + d)
                        .line(ShapeLine::new().color("#000000").width(1.0)),
                );
            }
        }
    }
    shapes
}

/// Shared y-range over every series of the figure, padded slightly, so all subplots use the
/// same scale. `None` when no group holds a finite value for the metric.
fn metric_range(table: &SummaryTable, metric: Metric) -> Option<(f64, f64)> {
    let values: Vec<f64> = NETWORK_SIZES
        .iter()
        .flat_map(|&nodes| {
            Router::iter().flat_map(move |router| interval_series(table, router, nodes, metric))
        })
        .filter(|value| value.is_finite())
        .collect();
    let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() {
        return None;
    }
    let pad = 0.05 * (hi - lo).max(1e-9);
    Some((lo - pad, hi + pad))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::aggregate::summarize;
    use crate::records::SimulationRecord;

    fn record(router: Router, nodes: u32, message_interval: &str, value: f64) -> SimulationRecord {
        SimulationRecord {
            router,
            nodes,
            message_interval: message_interval.to_string(),
            buffer_size: 150,
            delivery_prob: value,
            latency_avg: 100.0 * value,
            overhead_ratio: 10.0 * value,
            speed_avg: None,
        }
    }

    #[test]
    fn reindexing_leaves_gaps_for_missing_buckets() {
        let table = summarize(&[
            record(Router::Epidemic, 100, "5,25", 0.5),
            record(Router::Epidemic, 100, "35,60", 0.3),
        ]);
        let series = interval_series(&table, Router::Epidemic, 100, Metric::DeliveryProb);
        assert_eq!(series.len(), MESSAGE_INTERVALS.len());
        assert!((series[0] - 0.5).abs() < 1e-12);
        assert!(series[1].is_nan());
        assert!((series[2] - 0.3).abs() < 1e-12);
        assert!(series[3].is_nan());
    }

    #[test]
    fn absent_group_yields_all_gaps() {
        let table = summarize(&[record(Router::Epidemic, 100, "5,25", 0.5)]);
        let series = interval_series(&table, Router::Prophet, 400, Metric::DeliveryProb);
        assert!(series.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn shared_range_spans_all_subplots() {
        let table = summarize(&[
            record(Router::Epidemic, 100, "5,25", 0.2),
            record(Router::Prophet, 400, "60, 120", 0.8),
        ]);
        let (lo, hi) = metric_range(&table, Metric::DeliveryProb).unwrap();
        assert!(lo < 0.2 && hi > 0.8);
        assert!(metric_range(&summarize(&[]), Metric::DeliveryProb).is_none());
    }

    #[test]
    fn figures_render_with_gaps_and_without_data() {
        let dir = tempfile::tempdir().unwrap();
        let table = summarize(&[
            record(Router::Epidemic, 100, "5,25", 0.5),
            record(Router::Epidemic, 100, "5,25", 0.7),
            record(Router::Seer, 400, "60, 120", 0.4),
        ]);

        render_all(&table, dir.path()).unwrap();
        for filename in ["latency.html", "pdr.html", "or.html", "overhead.html", "legend.html"] {
            assert!(dir.path().join(filename).exists(), "{filename} missing");
        }

        // an empty table still renders, just with all-gap lines
        render_metric(
            &summarize(&[]),
            Metric::DeliveryProb,
            "Packet Delivery Ratio",
            dir.path().join("empty.html"),
            &RenderConfig::default(),
        )
        .unwrap();
        assert!(dir.path().join("empty.html").exists());
    }
}
