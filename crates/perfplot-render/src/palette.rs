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

//! Series and heatmap colours.

use plotters::style::RGBColor;

/// Per-series colours, cycled by series index.
const SERIES: [RGBColor; 8] = [
    RGBColor(70, 130, 180),  // steelblue
    RGBColor(255, 127, 80),  // coral
    RGBColor(46, 139, 87),   // seagreen
    RGBColor(148, 103, 189), // purple
    RGBColor(140, 86, 75),   // brown
    RGBColor(227, 119, 194), // pink
    RGBColor(127, 127, 127), // grey
    RGBColor(188, 189, 34),  // olive
];

/// Yellow-orange-red ramp, light to dark.
const YL_OR_RD: [(u8, u8, u8); 9] = [
    (255, 255, 204),
    (255, 237, 160),
    (254, 217, 118),
    (254, 178, 76),
    (253, 141, 60),
    (252, 78, 42),
    (227, 26, 28),
    (189, 0, 38),
    (128, 0, 38),
];

/// Fill for heatmap cells with no value.
pub const UNDEFINED_CELL: RGBColor = RGBColor(225, 225, 225);

/// Marker colour for highlighted extrema and reference lines.
pub const HIGHLIGHT: RGBColor = RGBColor(214, 39, 40);

pub fn series_color(index: usize) -> RGBColor {
    SERIES[index % SERIES.len()]
}

/// Colour at `t` in `[0, 1]` along the heatmap ramp. Out-of-range and NaN
/// inputs clamp to the ends.
pub fn heat_color(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (YL_OR_RD.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(YL_OR_RD.len() - 1);
    let frac = scaled - lo as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (YL_OR_RD[lo], YL_OR_RD[hi]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Whether text drawn over the ramp at `t` should be white for contrast.
pub fn needs_light_text(t: f64) -> bool {
    t > 0.65
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(255, 255, 204));
        assert_eq!(heat_color(1.0), RGBColor(128, 0, 38));
        assert_eq!(heat_color(-3.0), heat_color(0.0));
        assert_eq!(heat_color(f64::NAN), heat_color(0.0));
    }

    #[test]
    fn test_series_colors_cycle() {
        assert_eq!(series_color(0), series_color(8));
        assert_ne!(series_color(0), series_color(1));
    }
}
