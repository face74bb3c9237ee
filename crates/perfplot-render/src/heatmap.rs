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

//! Annotated heatmaps over two discrete axes.

use crate::config::ChartConfig;
use crate::error::{drawing, RenderError, Result};
use crate::palette::{heat_color, needs_light_text, UNDEFINED_CELL};
use perfplot_core::HeatmapGrid;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::info;

/// Width of the colour bar panel in pixels.
const COLOR_BAR_WIDTH: u32 = 200;
const COLOR_BAR_STEPS: usize = 100;

/// Titles and annotation format for a heatmap.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Colour bar caption.
    pub value_label: String,
    /// Decimals in cell annotations.
    pub precision: usize,
}

impl HeatmapChart {
    pub fn new(title: &str, x_label: &str, y_label: &str, value_label: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            value_label: value_label.to_string(),
            precision: 1,
        }
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }
}

/// Position of `value` within `[lo, hi]`, mid-ramp when the range is flat.
fn normalized(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.5
    }
}

/// Tick label for the axis position `pos`, or empty between cells.
fn axis_label(labels: &[String], pos: f64) -> String {
    let idx = pos.round();
    if (pos - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

/// Renders `grid` as a PNG heatmap at `path`.
///
/// Grid row 0 is drawn at the top. Columns follow the grid's column order
/// left to right. Undefined cells are filled grey and carry no text.
///
/// # Errors
///
/// - [`RenderError::NoData`] if the grid has no defined cell
/// - [`RenderError::Drawing`] if the backend fails
pub fn render_heatmap(
    grid: &HeatmapGrid,
    chart: &HeatmapChart,
    path: impl AsRef<Path>,
    config: &ChartConfig,
) -> Result<()> {
    let path = path.as_ref();
    let (lo, hi) = grid.value_range().ok_or_else(|| RenderError::NoData {
        chart: chart.title.clone(),
    })?;

    let n_rows = grid.rows.len();
    let n_cols = grid.columns.len();
    let row_labels: Vec<String> = grid.rows.iter().map(ToString::to_string).collect();
    let col_labels: Vec<String> = grid.columns.iter().map(ToString::to_string).collect();
    // Screen y grows upwards in chart space, so row 0 sits at the highest y.
    let y_of = |i: usize| (n_rows - 1 - i) as f64;

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| drawing(path, e))?;
    let (main, bar) = root.split_horizontally(config.width.saturating_sub(COLOR_BAR_WIDTH));

    let mut ctx = ChartBuilder::on(&main)
        .caption(&chart.title, (config.font, config.caption_size))
        .margin(config.margin)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(-0.5..(n_cols as f64 - 0.5), -0.5..(n_rows as f64 - 0.5))
        .map_err(|e| drawing(path, e))?;

    ctx.configure_mesh()
        .disable_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .x_labels(n_cols)
        .y_labels(n_rows)
        .x_label_formatter(&|x: &f64| axis_label(&col_labels, *x))
        .y_label_formatter(&|y: &f64| {
            let flipped = (n_rows as f64 - 1.0) - *y;
            axis_label(&row_labels, flipped)
        })
        .label_style((config.font, config.tick_size))
        .axis_desc_style((config.font, config.axis_label_size))
        .draw()
        .map_err(|e| drawing(path, e))?;

    let cells: Vec<(usize, usize, Option<f64>)> = grid
        .cells
        .iter()
        .enumerate()
        .flat_map(|(i, row)| row.iter().enumerate().map(move |(j, v)| (i, j, *v)))
        .collect();

    ctx.draw_series(cells.iter().map(|&(i, j, value)| {
        let x = j as f64;
        let y = y_of(i);
        let fill = match value {
            Some(v) if !v.is_nan() => heat_color(normalized(v, lo, hi)),
            _ => UNDEFINED_CELL,
        };
        Rectangle::new([(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)], fill.filled())
    }))
    .map_err(|e| drawing(path, e))?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    ctx.draw_series(cells.iter().filter_map(|&(i, j, value)| {
        let v = value.filter(|v| !v.is_nan())?;
        let text_color = if needs_light_text(normalized(v, lo, hi)) {
            WHITE
        } else {
            BLACK
        };
        let style = config.annotation_font().color(&text_color).pos(centered);
        Some(Text::new(
            format!("{:.*}", chart.precision, v),
            (j as f64, y_of(i)),
            style,
        ))
    }))
    .map_err(|e| drawing(path, e))?;

    draw_color_bar(&bar, chart, config, lo, hi, path)?;

    root.present().map_err(|e| drawing(path, e))?;
    info!("Saved: {}", path.display());
    Ok(())
}

fn draw_color_bar(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    chart: &HeatmapChart,
    config: &ChartConfig,
    lo: f64,
    hi: f64,
    path: &Path,
) -> Result<()> {
    let (lo_axis, hi_axis) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let step = (hi_axis - lo_axis) / COLOR_BAR_STEPS as f64;

    let mut ctx = ChartBuilder::on(area)
        .margin_top(config.margin + config.caption_size + 10)
        .margin_bottom(config.margin + 60)
        .margin_right(config.margin)
        .y_label_area_size(90)
        .build_cartesian_2d(0.0..1.0, lo_axis..hi_axis)
        .map_err(|e| drawing(path, e))?;

    ctx.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(chart.value_label.as_str())
        .label_style((config.font, config.tick_size))
        .axis_desc_style((config.font, config.axis_label_size))
        .draw()
        .map_err(|e| drawing(path, e))?;

    ctx.draw_series((0..COLOR_BAR_STEPS).map(|k| {
        let y0 = lo_axis + k as f64 * step;
        let color = heat_color(normalized(y0 + step / 2.0, lo_axis, hi_axis));
        Rectangle::new([(0.0, y0), (1.0, y0 + step)], color.filled())
    }))
    .map_err(|e| drawing(path, e))?;

    Ok(())
}
