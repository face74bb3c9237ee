// Dweve Perfplot - Benchmark Result Analysis
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line and grouped-bar comparison charts.

use crate::config::ChartConfig;
use crate::error::{drawing, RenderError, Result};
use crate::palette::{series_color, HIGHLIGHT};
use perfplot_core::{ResultTable, Selection, Series};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use tracing::info;

/// How series are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    /// Lines with point markers over a numeric x axis.
    #[default]
    Line,
    /// Side-by-side bars per x category.
    GroupedBar,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// All rows of `table` as one series.
    pub fn from_table(
        label: impl Into<String>,
        table: &ResultTable,
        x: &str,
        y: &str,
    ) -> Result<Self> {
        let xs = table.numeric(x)?;
        let ys = table.numeric(y)?;
        Ok(Self::new(label, xs.into_iter().zip(ys).collect()))
    }

    /// The rows of one grouped series.
    pub fn from_series(
        label: impl Into<String>,
        table: &ResultTable,
        series: &Series,
        x: &str,
        y: &str,
    ) -> Result<Self> {
        Ok(Self::new(label, series.points(table, x, y)?))
    }
}

/// An emphasized point, drawn with a distinct marker and its own legend
/// entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

impl Highlight {
    /// Highlights the selected row's `(x, y)`.
    pub fn from_selection(
        table: &ResultTable,
        selection: &Selection,
        x: &str,
        label: impl Into<String>,
    ) -> Result<Self> {
        let xs = table.numeric(x)?;
        Ok(Self {
            x: xs.get(selection.row).copied().unwrap_or(f64::NAN),
            y: selection.value,
            label: label.into(),
        })
    }
}

/// A horizontal line across the whole plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub y: f64,
    pub label: String,
}

/// A comparison chart description.
///
/// # Examples
///
/// ```
/// use perfplot_render::{ChartKind, ChartSeries, ComparisonChart};
///
/// let chart = ComparisonChart::new("Stride vs Time", "Stride", "Time (ms)")
///     .series(ChartSeries::new("O0", vec![(1.0, 10.0), (2.0, 12.0)]))
///     .series(ChartSeries::new("O2", vec![(1.0, 4.0), (2.0, 6.0)]))
///     .x_ticks(20);
/// assert_eq!(chart.kind, ChartKind::Line);
/// assert_eq!(chart.series.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub series: Vec<ChartSeries>,
    pub highlight: Option<Highlight>,
    pub reference: Option<ReferenceLine>,
    /// Annotate every bar with its value using this many decimals.
    pub value_labels: Option<usize>,
    /// Unit appended to value annotations.
    pub value_suffix: String,
    /// Upper bound on the number of x tick labels.
    pub x_ticks: usize,
    /// Pad the y axis by 5% on both ends instead of starting at zero.
    pub tight_y: bool,
}

impl ComparisonChart {
    pub fn new(title: &str, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            kind: ChartKind::Line,
            series: Vec::new(),
            highlight: None,
            reference: None,
            value_labels: None,
            value_suffix: String::new(),
            x_ticks: 10,
            tight_y: false,
        }
    }

    pub fn kind(mut self, kind: ChartKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn series(mut self, series: ChartSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn highlight(mut self, highlight: Highlight) -> Self {
        self.highlight = Some(highlight);
        self
    }

    pub fn reference(mut self, y: f64, label: impl Into<String>) -> Self {
        self.reference = Some(ReferenceLine {
            y,
            label: label.into(),
        });
        self
    }

    pub fn value_labels(mut self, precision: usize, suffix: &str) -> Self {
        self.value_labels = Some(precision);
        self.value_suffix = suffix.to_string();
        self
    }

    pub fn x_ticks(mut self, ticks: usize) -> Self {
        self.x_ticks = ticks;
        self
    }

    pub fn tight_y(mut self) -> Self {
        self.tight_y = true;
        self
    }

    fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Distinct x values across all series, ascending. These are the bar
    /// categories of a grouped bar chart.
    pub fn categories(&self) -> Vec<f64> {
        let mut xs: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .filter(|x| !x.is_nan())
            .collect();
        xs.sort_by(f64::total_cmp);
        xs.dedup();
        xs
    }

    /// Y axis range covering every point, the highlight and the reference
    /// line.
    pub fn y_range(&self) -> Range<f64> {
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .chain(self.highlight.iter().map(|h| h.y))
            .chain(self.reference.iter().map(|r| r.y));
        let (lo, hi) = bounds(ys).unwrap_or((0.0, 1.0));

        if self.tight_y {
            pad(lo, hi, 0.05)
        } else {
            // Bars and unlabelled lines start at zero; leave headroom for
            // value annotations.
            let headroom = if self.value_labels.is_some() { 0.15 } else { 0.05 };
            let lo = lo.min(0.0);
            let hi = if hi > lo { hi + (hi - lo) * headroom } else { lo + 1.0 };
            lo..hi
        }
    }

    /// X axis range for line charts.
    pub fn x_range(&self) -> Range<f64> {
        let xs = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.0))
            .chain(self.highlight.iter().map(|h| h.x));
        let (lo, hi) = bounds(xs).unwrap_or((0.0, 1.0));
        pad(lo, hi, 0.03)
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn pad(lo: f64, hi: f64, fraction: f64) -> Range<f64> {
    if hi > lo {
        let margin = (hi - lo) * fraction;
        (lo - margin)..(hi + margin)
    } else {
        let margin = if lo == 0.0 { 1.0 } else { lo.abs() * fraction };
        (lo - margin)..(hi + margin)
    }
}

/// Formats an axis value: integers without decimals, others with two.
pub fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.2}", value)
    }
}

/// Renders `chart` to a PNG at `path`, overwriting any existing file.
///
/// # Errors
///
/// - [`RenderError::NoData`] if every series is empty; nothing is written
/// - [`RenderError::Drawing`] if the backend fails
pub fn render_comparison(
    chart: &ComparisonChart,
    path: impl AsRef<Path>,
    config: &ChartConfig,
) -> Result<()> {
    let path = path.as_ref();
    if chart.is_empty() {
        return Err(RenderError::NoData {
            chart: chart.title.clone(),
        });
    }

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| drawing(path, e))?;

    match chart.kind {
        ChartKind::Line => draw_lines(&root, chart, config, path)?,
        ChartKind::GroupedBar => draw_bars(&root, chart, config, path)?,
    }

    root.present().map_err(|e| drawing(path, e))?;
    info!("Saved: {}", path.display());
    Ok(())
}

fn draw_lines(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    chart: &ComparisonChart,
    config: &ChartConfig,
    path: &Path,
) -> Result<()> {
    let x_range = chart.x_range();
    let (x_lo, x_hi) = (x_range.start, x_range.end);

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (config.font, config.caption_size))
        .margin(config.margin)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, chart.y_range())
        .map_err(|e| drawing(path, e))?;

    ctx.configure_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(chart.x_ticks)
        .x_label_formatter(&|x: &f64| format_tick(*x))
        .label_style((config.font, config.tick_size))
        .axis_desc_style((config.font, config.axis_label_size))
        .draw()
        .map_err(|e| drawing(path, e))?;

    for (idx, series) in chart.series.iter().enumerate() {
        let color = series_color(idx);
        ctx.draw_series(LineSeries::new(
            series.points.iter().copied(),
            color.stroke_width(2),
        ))
        .map_err(|e| drawing(path, e))?
        .label(series.label.as_str())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        ctx.draw_series(
            series
                .points
                .iter()
                .map(|&p| Circle::new(p, 5, color.filled())),
        )
        .map_err(|e| drawing(path, e))?;
    }

    if let Some(reference) = &chart.reference {
        ctx.draw_series(LineSeries::new(
            vec![(x_lo, reference.y), (x_hi, reference.y)],
            HIGHLIGHT.stroke_width(2),
        ))
        .map_err(|e| drawing(path, e))?
        .label(reference.label.as_str())
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], HIGHLIGHT.stroke_width(2)));
    }

    if let Some(highlight) = &chart.highlight {
        ctx.draw_series(std::iter::once(Circle::new(
            (highlight.x, highlight.y),
            12,
            HIGHLIGHT.filled(),
        )))
        .map_err(|e| drawing(path, e))?
        .label(highlight.label.as_str())
        .legend(|(x, y)| Circle::new((x + 10, y), 6, HIGHLIGHT.filled()));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((config.font, config.tick_size))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(|e| drawing(path, e))?;

    Ok(())
}

fn draw_bars(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    chart: &ComparisonChart,
    config: &ChartConfig,
    path: &Path,
) -> Result<()> {
    let categories = chart.categories();
    let n = categories.len();
    let group_width = 0.7;
    let bar_width = group_width / chart.series.len().max(1) as f64;

    let label_for = |x: &f64| -> String {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        categories
            .get(idx as usize)
            .map(|c| format_tick(*c))
            .unwrap_or_default()
    };

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (config.font, config.caption_size))
        .margin(config.margin)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), chart.y_range())
        .map_err(|e| drawing(path, e))?;

    ctx.configure_mesh()
        .disable_x_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(n.max(1))
        .x_label_formatter(&label_for)
        .label_style((config.font, config.tick_size))
        .axis_desc_style((config.font, config.axis_label_size))
        .draw()
        .map_err(|e| drawing(path, e))?;

    let annotation = config
        .annotation_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));

    for (k, series) in chart.series.iter().enumerate() {
        let color = series_color(k);
        let bars: Vec<(f64, f64, f64)> = series
            .points
            .iter()
            .filter_map(|&(x, y)| {
                let i = categories.iter().position(|c| *c == x)?;
                let left = i as f64 - group_width / 2.0 + k as f64 * bar_width;
                Some((left, left + bar_width, y))
            })
            .collect();

        ctx.draw_series(
            bars.iter()
                .map(|&(l, r, y)| Rectangle::new([(l, 0.0), (r, y)], color.filled())),
        )
        .map_err(|e| drawing(path, e))?
        .label(series.label.as_str())
        .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));

        if let Some(precision) = chart.value_labels {
            ctx.draw_series(bars.iter().map(|&(l, r, y)| {
                Text::new(
                    format!("{:.*}{}", precision, y, chart.value_suffix),
                    ((l + r) / 2.0, y),
                    annotation.clone(),
                )
            }))
            .map_err(|e| drawing(path, e))?;
        }
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((config.font, config.tick_size))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()
        .map_err(|e| drawing(path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ComparisonChart {
        ComparisonChart::new("t", "x", "y")
            .series(ChartSeries::new("a", vec![(100.0, 0.5), (200.0, 4.0)]))
            .series(ChartSeries::new("b", vec![(200.0, 2.0), (100.0, 0.25)]))
    }

    #[test]
    fn test_categories_sorted_and_distinct() {
        assert_eq!(chart().categories(), vec![100.0, 200.0]);
    }

    #[test]
    fn test_y_range_starts_at_zero_with_headroom() {
        let range = chart().value_labels(2, "s").y_range();
        assert_eq!(range.start, 0.0);
        assert!((range.end - 4.6).abs() < 1e-9);
    }

    #[test]
    fn test_tight_y_range_includes_reference() {
        let range = chart().tight_y().reference(10.0, "peak").y_range();
        assert!(range.start < 0.25);
        assert!(range.end > 10.0);
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(64.0), "64");
        assert_eq!(format_tick(0.3), "0.30");
        assert_eq!(format_tick(-0.0), "0");
    }

    #[test]
    fn test_empty_chart_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        let chart = ComparisonChart::new("empty", "x", "y").series(ChartSeries::new("a", vec![]));
        let err = render_comparison(&chart, &path, &ChartConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::NoData { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_highlight_from_selection() {
        let table = perfplot_core::Loader::default()
            .read("t", "block_size,GFLOPS\n16,1.0\n32,3.0\n64,2.0\n".as_bytes())
            .unwrap();
        let sel = perfplot_core::select(&table, "GFLOPS", perfplot_core::Direction::Maximize)
            .unwrap();
        let h = Highlight::from_selection(&table, &sel, "block_size", "max").unwrap();
        assert_eq!((h.x, h.y), (32.0, 3.0));
    }

    const PNG_SIGNATURE: &[u8] = b"\x89PNG";

    fn render_twice(chart: &ComparisonChart) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        std::fs::write(&path, b"stale").unwrap();

        render_comparison(chart, &path, &ChartConfig::default()).unwrap();
        let first = std::fs::read(&path).unwrap();
        assert!(first.starts_with(PNG_SIGNATURE));

        render_comparison(chart, &path, &ChartConfig::default()).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(PNG_SIGNATURE));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_line_chart_overwrites_existing_file() {
        render_twice(&chart().reference(5.0, "peak").x_ticks(20));
    }

    #[test]
    fn test_line_chart_with_highlight() {
        let highlighted = chart().tight_y().highlight(Highlight {
            x: 200.0,
            y: 4.0,
            label: "Maximum: 4.00".to_string(),
        });
        render_twice(&highlighted);
    }

    #[test]
    fn test_grouped_bar_chart_with_value_labels() {
        render_twice(&chart().kind(ChartKind::GroupedBar).value_labels(2, "s"));
    }
}
