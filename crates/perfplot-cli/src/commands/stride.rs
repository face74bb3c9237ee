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

//! Memory stride benchmark: unoptimized vs optimized build.

use super::{load_normalized, print_report, OutputOptions};
use crate::error::CliError;
use perfplot_core::{
    select, Column, ColumnFormat, ColumnMatch, ColumnType, Direction, Insight, Report,
    ResultTable, Schema, Summary, Value,
};
use perfplot_render::{ChartSeries, ComparisonChart};
use std::path::Path;

/// Label of the unoptimized build.
pub const O0_LABEL: &str = "O0 (no optimization)";
/// Label of the optimized build.
pub const O2_LABEL: &str = "O2 (optimized)";

/// Columns of a stride results file.
pub fn stride_schema() -> Schema {
    Schema::new()
        .int("stride")
        .float("time_ms")
        .float("bandwidth_MB_s")
        .float("sum")
}

/// Compares stride results of the two builds.
///
/// Prints one report per build and writes `stride_time.png` and
/// `stride_bandwidth.png`.
pub fn stride(o0: &Path, o2: &Path, output: &OutputOptions) -> Result<(), CliError> {
    let schema = stride_schema();
    let o0_table = load_normalized(o0, &schema, ColumnMatch::ByName)?;
    let o2_table = load_normalized(o2, &schema, ColumnMatch::ByName)?;

    for (label, table) in [("O0", &o0_table), ("O2", &o2_table)] {
        print_report(&level_report(label, table)?, table)?;
    }

    output.export(&combined(&o0_table, &o2_table)?)?;

    if output.charts {
        output.prepare()?;
        let time = ComparisonChart::new(
            "Memory Access Stride vs Execution Time",
            "Stride",
            "Time (ms)",
        )
        .series(ChartSeries::from_table(O0_LABEL, &o0_table, "stride", "time_ms")?)
        .series(ChartSeries::from_table(O2_LABEL, &o2_table, "stride", "time_ms")?)
        .x_ticks(20);
        output.comparison(&time, "stride_time.png")?;

        let bandwidth = ComparisonChart::new(
            "Memory Access Stride vs Bandwidth",
            "Stride",
            "Bandwidth (MB/s)",
        )
        .series(ChartSeries::from_table(O0_LABEL, &o0_table, "stride", "bandwidth_MB_s")?)
        .series(ChartSeries::from_table(O2_LABEL, &o2_table, "stride", "bandwidth_MB_s")?)
        .x_ticks(20);
        output.comparison(&bandwidth, "stride_bandwidth.png")?;
    }

    Ok(())
}

fn level_report(label: &str, table: &ResultTable) -> Result<Report, CliError> {
    let fastest = select(table, "time_ms", Direction::Minimize)?;
    let widest = select(table, "bandwidth_MB_s", Direction::Maximize)?;
    let stride_at = |row: usize| {
        table
            .row(row)
            .and_then(|r| r.get("stride").and_then(Value::as_i64))
            .unwrap_or_default()
    };
    let best_stride = stride_at(widest.row);

    Ok(Report::new(format!("STRIDE RESULTS: {} ({})", label, table.name()))
        .column(ColumnFormat::new("stride", "Stride"))
        .column(ColumnFormat::new("time_ms", "Time (ms)").width(12).precision(3))
        .column(ColumnFormat::new("bandwidth_MB_s", "Bandwidth (MB/s)").precision(1))
        .summary(
            Summary::new(format!("{} summary:", label))
                .detail(format!(
                    "Fastest: stride {} at {:.3} ms",
                    stride_at(fastest.row),
                    fastest.value
                ))
                .detail(format!(
                    "Peak bandwidth: {:.1} MB/s at stride {}",
                    widest.value, best_stride
                ))
                .insight(&Insight::StrideLocality { best_stride }),
        ))
}

/// Both builds in one table, tagged by an `opt_level` column.
fn combined(o0: &ResultTable, o2: &ResultTable) -> Result<ResultTable, CliError> {
    let mut columns = vec![Column::new("opt_level", ColumnType::Str)];
    columns.extend(o0.columns().iter().cloned());
    let mut out = ResultTable::new("stride_results", columns);
    for (level, table) in [("O0", o0), ("O2", o2)] {
        for row in table.rows() {
            let mut values = vec![Value::from(level)];
            values.extend(row.values().iter().cloned());
            out.push_row(values)?;
        }
    }
    Ok(out)
}
