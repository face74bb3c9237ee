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

//! Matrix multiplication loop order comparison.

use super::{load_normalized, print_report, OutputOptions};
use crate::error::CliError;
use perfplot_core::{
    pair_series, ColumnFormat, ColumnMatch, Insight, PairSpec, Report, ResultTable, Schema,
    Summary, TableError, Value,
};
use perfplot_render::{ChartKind, ChartSeries, ComparisonChart};
use std::path::Path;

const BASELINE: &str = "ijk";
const CANDIDATE: &str = "ikj";

/// Columns of a loop order results file.
pub fn mxm_schema() -> Schema {
    Schema::new()
        .int("size")
        .string("loop_order")
        .float("time_sec")
        .float("gflops")
}

/// Pairs the ijk and ikj rows of each matrix size; `speedup` is
/// ijk time over ikj time.
pub fn speedup_spec() -> PairSpec {
    PairSpec {
        group: "loop_order".to_string(),
        key: "size".to_string(),
        value: "time_sec".to_string(),
        baseline: Value::from(BASELINE),
        candidate: Value::from(CANDIDATE),
        ratio: "speedup".to_string(),
    }
}

/// Compares loop orders, printing the per-size speedup and writing
/// `mxm_time.png` and `mxm_gflops.png`.
pub fn mxm(path: &Path, output: &OutputOptions) -> Result<(), CliError> {
    let table = load_normalized(path, &mxm_schema(), ColumnMatch::ByName)?;
    let paired = pair_series(&table, &speedup_spec())?;
    if paired.is_empty() {
        return Err(TableError::EmptyTable {
            source_name: table.name().to_string(),
        }
        .into());
    }

    println!("Found {} data points for each loop order", paired.len());
    print_report(&speedup_report(&paired)?, &paired)?;
    output.export(&paired)?;

    if output.charts {
        output.prepare()?;
        let time = bar_chart(
            &table,
            "time_sec",
            "Matrix Multiplication: Execution Time (ijk vs ikj loop order)",
            "Time (seconds)",
        )?
        .value_labels(2, "s");
        output.comparison(&time, "mxm_time.png")?;

        let gflops = bar_chart(
            &table,
            "gflops",
            "Matrix Multiplication: Performance (ijk vs ikj loop order)",
            "GFLOPS",
        )?
        .value_labels(2, "");
        output.comparison(&gflops, "mxm_gflops.png")?;
    }

    Ok(())
}

fn speedup_report(paired: &ResultTable) -> Result<Report, CliError> {
    let spec = speedup_spec();
    let baseline_total: f64 = paired.numeric(&spec.baseline_column())?.iter().sum();
    let candidate_total: f64 = paired.numeric(&spec.candidate_column())?.iter().sum();
    let fastest = if candidate_total < baseline_total {
        CANDIDATE
    } else {
        BASELINE
    };

    Ok(Report::new("Results Summary:")
        .separator(" | ")
        .column(ColumnFormat::new("size", "N").width(6))
        .column(
            ColumnFormat::new(&spec.baseline_column(), "ijk Time")
                .width(10)
                .precision(3)
                .suffix("s"),
        )
        .column(
            ColumnFormat::new(&spec.candidate_column(), "ikj Time")
                .width(10)
                .precision(3)
                .suffix("s"),
        )
        .column(
            ColumnFormat::new("speedup", "Speedup")
                .width(8)
                .precision(2)
                .suffix("x"),
        )
        .summary(
            Summary::new(format!("Fastest loop order: {}", fastest)).insight(
                &Insight::LoopOrder {
                    fastest: fastest.to_string(),
                },
            ),
        ))
}

fn bar_chart(
    table: &ResultTable,
    metric: &str,
    title: &str,
    y_label: &str,
) -> Result<ComparisonChart, CliError> {
    let series = table.series("loop_order")?;
    let mut chart =
        ComparisonChart::new(title, "Matrix Size (N)", y_label).kind(ChartKind::GroupedBar);
    for order in [BASELINE, CANDIDATE] {
        let wanted = Value::from(order);
        if let Some(s) = series.iter().find(|s| s.key == wanted) {
            chart = chart.series(ChartSeries::from_series(order, table, s, "size", metric)?);
        }
    }
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfplot_core::{normalize, Loader};

    const CSV: &str = "size,loop_order,time_sec,gflops\n\
                       100,ijk,0.02,1.0\n\
                       100,ikj,0.01,2.0\n\
                       200,ijk,0.30,0.5\n\
                       200,ikj,0.10,1.6\n\
                       200,jik,0.40,0.4\n";

    fn table() -> ResultTable {
        let raw = Loader::default().read("results.csv", CSV.as_bytes()).unwrap();
        normalize(&raw, &mxm_schema(), ColumnMatch::ByName).unwrap()
    }

    #[test]
    fn test_speedup_report_rows() {
        let paired = pair_series(&table(), &speedup_spec()).unwrap();
        let text = speedup_report(&paired).unwrap().render(&paired);
        assert!(text.contains("   100 |     0.020s |     0.010s |    2.00x"));
        assert!(text.contains("   200 |     0.300s |     0.100s |    3.00x"));
        assert!(text.contains("Fastest loop order: ikj"));
    }

    #[test]
    fn test_bar_chart_ignores_other_orders() {
        let chart = bar_chart(&table(), "gflops", "t", "GFLOPS").unwrap();
        assert_eq!(chart.kind, ChartKind::GroupedBar);
        let labels: Vec<&str> = chart.series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["ijk", "ikj"]);
        assert_eq!(chart.series[1].points, vec![(100.0, 2.0), (200.0, 1.6)]);
    }

    #[test]
    fn test_missing_loop_order_is_schema_error() {
        let raw = Loader::default()
            .read("results.csv", "size,loop_order,time_sec,gflops\n100,ijk,0.02,1.0\n".as_bytes())
            .unwrap();
        let t = normalize(&raw, &mxm_schema(), ColumnMatch::ByName).unwrap();
        let err = pair_series(&t, &speedup_spec()).unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch { .. }));
    }
}
