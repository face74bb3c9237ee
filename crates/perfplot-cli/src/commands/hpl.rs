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

//! High-Performance Linpack results against a theoretical peak.

use super::{load_normalized, print_report, saved, OutputOptions};
use crate::error::CliError;
use perfplot_core::{
    derive, select, select_per_series, ColumnFormat, ColumnMatch, ColumnType, Direction,
    HeatmapGrid, Insight, Report, ResultTable, Rule, Schema, Summary, Value,
};
use perfplot_render::{render_heatmap, ChartSeries, ComparisonChart, HeatmapChart};
use std::path::Path;

/// Theoretical FP64 peak of the reference machine (10 cores at ~4.4 GHz,
/// 4 ops per cycle).
pub const DEFAULT_PEAK_GFLOPS: f64 = 176.0;

/// Name of the derived efficiency column.
pub const EFFICIENCY: &str = "Efficiency_%";

/// Required columns of an HPL results file. Other columns are kept.
pub fn hpl_schema() -> Schema {
    Schema::new().int("N").int("NB").float("GFLOPS")
}

/// Analyses HPL runs, printing the optimal configuration and writing
/// `hpl_performance.png`, `hpl_heatmap.png` and `hpl_efficiency.png`.
pub fn hpl(path: &Path, peak: f64, output: &OutputOptions) -> Result<(), CliError> {
    if !(peak.is_finite() && peak > 0.0) {
        return Err(CliError::InvalidInput(format!(
            "theoretical peak must be a positive number of GFLOPS, got {}",
            peak
        )));
    }

    let table = load_normalized(path, &hpl_schema(), ColumnMatch::ByNameKeepExtra)?;
    let table = derive(&table, &[Rule::percent_of(EFFICIENCY, "GFLOPS", peak)])?;
    // Duplicate configurations fail here, before any output.
    let grid = if output.charts {
        Some(HeatmapGrid::pivot(&table, "NB", "N", "GFLOPS")?)
    } else {
        None
    };

    print_report(&analysis_report(&table, peak)?, &table)?;
    output.export(&table)?;

    if let Some(grid) = grid {
        output.prepare()?;
        let performance = per_block_size(
            &table,
            "GFLOPS",
            ComparisonChart::new(
                "HPL Performance vs Matrix Size",
                "Matrix Size (N)",
                "Performance (GFLOPS)",
            ),
        )?
        .reference(peak, "Theoretical Peak");
        output.comparison(&performance, "hpl_performance.png")?;

        let heatmap_path = output.chart_path("hpl_heatmap.png");
        render_heatmap(
            &grid,
            &HeatmapChart::new(
                "HPL Performance Heatmap",
                "Matrix Size (N)",
                "Block Size (NB)",
                "GFLOPS",
            ),
            &heatmap_path,
            &output.chart,
        )?;
        saved(&heatmap_path);

        let efficiency = per_block_size(
            &table,
            EFFICIENCY,
            ComparisonChart::new(
                "HPL Efficiency vs Matrix Size",
                "Matrix Size (N)",
                "Efficiency (%)",
            ),
        )?
        .reference(100.0, "100% Efficiency");
        output.comparison(&efficiency, "hpl_efficiency.png")?;
    }

    Ok(())
}

fn analysis_report(table: &ResultTable, peak: f64) -> Result<Report, CliError> {
    let best = select(table, "GFLOPS", Direction::Maximize)?;
    let row = best.row_in(table);
    let field = |name: &str| {
        row.and_then(|r| r.get(name))
            .map(Value::to_string)
            .unwrap_or_default()
    };
    let efficiency = row.and_then(|r| r.f64(EFFICIENCY)).unwrap_or_default();

    let mut summary = Summary::new("Optimal Configuration:")
        .detail(format!("N = {}, NB = {}", field("N"), field("NB")))
        .detail(format!("Performance: {:.2} GFLOPS", best.value))
        .detail(format!("Efficiency: {:.1}%", efficiency));
    for (nb, selection) in select_per_series(table, "NB", "GFLOPS", Direction::Maximize)? {
        let n = selection
            .row_in(table)
            .and_then(|r| r.get("N"))
            .map(Value::to_string)
            .unwrap_or_default();
        summary = summary.detail(format!(
            "Best with NB = {}: {:.2} GFLOPS at N = {}",
            nb, selection.value, n
        ));
    }
    summary = summary.insight(&Insight::PeakEfficiency {
        peak_gflops: peak,
        efficiency_pct: efficiency,
    });

    let mut report = Report::new("HPL Benchmark Results Analysis")
        .rule_width(50)
        .separator("  ")
        .line(format!("Theoretical Peak: {:.1} GFLOPS", peak))
        .table_heading("All Results:");
    for column in table.columns() {
        let format = ColumnFormat::new(&column.name, &column.name);
        report = report.column(match column.ty {
            ColumnType::Float if column.name == EFFICIENCY => format.precision(1),
            ColumnType::Float => format.precision(2),
            ColumnType::Int | ColumnType::Str => format,
        });
    }
    Ok(report.summary(summary))
}

/// One line per block size, in first-occurrence order.
fn per_block_size(
    table: &ResultTable,
    metric: &str,
    mut chart: ComparisonChart,
) -> Result<ComparisonChart, CliError> {
    for series in table.series("NB")? {
        chart = chart.series(ChartSeries::from_series(
            format!("NB={}", series.key),
            table,
            &series,
            "N",
            metric,
        )?);
    }
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfplot_core::{normalize, Loader};

    const CSV: &str = "N,NB,GFLOPS,Time\n\
                       1000,64,44.0,0.015\n\
                       2000,64,88.0,0.060\n\
                       1000,128,52.8,0.013\n";

    fn table(peak: f64) -> ResultTable {
        let raw = Loader::default().read("hpl_results.csv", CSV.as_bytes()).unwrap();
        let t = normalize(&raw, &hpl_schema(), ColumnMatch::ByNameKeepExtra).unwrap();
        derive(&t, &[Rule::percent_of(EFFICIENCY, "GFLOPS", peak)]).unwrap()
    }

    #[test]
    fn test_extra_columns_survive() {
        let t = table(DEFAULT_PEAK_GFLOPS);
        assert_eq!(t.column_names(), vec!["N", "NB", "GFLOPS", "Time", EFFICIENCY]);
        assert_eq!(t.row(1).unwrap().f64(EFFICIENCY), Some(50.0));
    }

    #[test]
    fn test_analysis_report() {
        let t = table(DEFAULT_PEAK_GFLOPS);
        let text = analysis_report(&t, DEFAULT_PEAK_GFLOPS).unwrap().render(&t);
        assert!(text.contains("Theoretical Peak: 176.0 GFLOPS"));
        assert!(text.contains("  - N = 2000, NB = 64"));
        assert!(text.contains("  - Performance: 88.00 GFLOPS"));
        assert!(text.contains("  - Efficiency: 50.0%"));
        assert!(text.contains("  - Best with NB = 128: 52.80 GFLOPS at N = 1000"));
        assert!(text.contains("The optimal configuration reaches 50.0% of peak."));
    }

    #[test]
    fn test_per_block_size_lines() {
        let t = table(DEFAULT_PEAK_GFLOPS);
        let chart = per_block_size(&t, "GFLOPS", ComparisonChart::new("t", "x", "y")).unwrap();
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["NB=64", "NB=128"]);
        assert_eq!(chart.series[0].points, vec![(1000.0, 44.0), (2000.0, 88.0)]);
    }

    #[test]
    fn test_rejects_non_positive_peak() {
        let err = hpl(Path::new("unused.csv"), 0.0, &OutputOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
