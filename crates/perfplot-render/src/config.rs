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

//! Image size and typography shared by all charts.

use plotters::style::{FontDesc, FontFamily, FontStyle};

/// Chart output configuration.
///
/// The default 1500×900 canvas matches a 10×6 inch figure at 150 dpi.
///
/// # Examples
///
/// ```
/// # use perfplot_render::ChartConfig;
/// let config = ChartConfig {
///     width: 800,
///     height: 600,
///     ..Default::default()
/// };
/// assert_eq!(config.font, "sans-serif");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Font family for all text.
    pub font: &'static str,
    /// Caption font size in pixels.
    pub caption_size: u32,
    /// Axis description font size.
    pub axis_label_size: u32,
    /// Tick label and legend font size.
    pub tick_size: u32,
    /// Value annotation font size (bar labels, heatmap cells).
    pub annotation_size: u32,
    /// Outer margin in pixels.
    pub margin: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1500,
            height: 900,
            font: "sans-serif",
            caption_size: 30,
            axis_label_size: 24,
            tick_size: 18,
            annotation_size: 16,
            margin: 20,
        }
    }
}

impl ChartConfig {
    /// Font for value annotations drawn inside the plot area.
    pub(crate) fn annotation_font(&self) -> FontDesc<'static> {
        FontDesc::new(
            FontFamily::Name(self.font),
            f64::from(self.annotation_size),
            FontStyle::Normal,
        )
    }
}
