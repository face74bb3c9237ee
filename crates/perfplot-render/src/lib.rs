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

//! PNG charts for benchmark result tables.
//!
//! Two chart families are provided:
//!
//! - [`ComparisonChart`]: one line or bar series per category over a shared
//!   x axis, with an optional highlighted extremum and a horizontal
//!   reference line (theoretical peak, 100% efficiency)
//! - [`HeatmapChart`]: a [`perfplot_core::HeatmapGrid`] drawn as coloured,
//!   value-annotated cells with a colour bar
//!
//! Each render call writes exactly one image, replacing any existing file.
//!
//! # Example
//!
//! ```no_run
//! use perfplot_render::{render_comparison, ChartConfig, ChartSeries, ComparisonChart};
//!
//! let chart = ComparisonChart::new("Memory Access Stride vs Bandwidth", "Stride", "Bandwidth (MB/s)")
//!     .series(ChartSeries::new("O0 (no optimization)", vec![(1.0, 760.0), (2.0, 720.0)]))
//!     .series(ChartSeries::new("O2 (optimized)", vec![(1.0, 2900.0), (2.0, 2100.0)]));
//! render_comparison(&chart, "stride_bandwidth.png", &ChartConfig::default())?;
//! # Ok::<(), perfplot_render::RenderError>(())
//! ```

mod comparison;
mod config;
mod error;
mod heatmap;
pub mod palette;

pub use comparison::{
    format_tick, render_comparison, ChartKind, ChartSeries, ComparisonChart, Highlight,
    ReferenceLine,
};
pub use config::ChartConfig;
pub use error::{RenderError, Result};
pub use heatmap::{render_heatmap, HeatmapChart};
