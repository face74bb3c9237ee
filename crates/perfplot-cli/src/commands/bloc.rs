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

//! Blocked matrix multiplication: block size sweep.

use super::{load_normalized, print_report, OutputOptions};
use crate::error::CliError;
use perfplot_core::{
    derive, select, ColumnFormat, ColumnMatch, Direction, Insight, Report, ResultTable, Rule,
    Schema, Selection, Summary, Value,
};
use perfplot_render::{ChartSeries, ComparisonChart, Highlight};
use std::path::Path;

/// Columns of a block size results file, assigned by position whatever the
/// header says.
pub fn bloc_schema() -> Schema {
    Schema::new()
        .int("N")
        .int("block_size")
        .float("time_sec")
        .float("GFLOPS")
}

/// Reports the optimal block size and writes `bloc_time.png` and
/// `bloc_gflops.png`.
pub fn bloc(path: &Path, output: &OutputOptions) -> Result<(), CliError> {
    let table = load_normalized(path, &bloc_schema(), ColumnMatch::ByPosition)?;

    let optimal = select(&table, "GFLOPS", Direction::Maximize)?;
    let fastest = select(&table, "time_sec", Direction::Minimize)?;

    print_report(&summary_report(&table, &optimal)?, &table)?;

    let flagged = derive(
        &table,
        &[Rule::extremum_flag("optimal", "GFLOPS", Direction::Maximize, None)],
    )?;
    output.export(&flagged)?;

    if output.charts {
        output.prepare()?;
        let n = matrix_size(&table, &optimal);
        let ticks = table.unique_sorted("block_size")?.len();

        let time = ComparisonChart::new(
            &format!(
                "Block Matrix Multiplication: Block Size vs Execution Time (Matrix Size: {}x{})",
                n, n
            ),
            "Block Size",
            "Time (seconds)",
        )
        .series(ChartSeries::from_table("Execution Time", &table, "block_size", "time_sec")?)
        .highlight(Highlight::from_selection(
            &table,
            &fastest,
            "block_size",
            format!(
                "{}: {:.3}s @ block={}",
                Direction::Minimize.label(),
                fastest.value,
                block_size(&table, &fastest)
            ),
        )?)
        .x_ticks(ticks)
        .tight_y();
        output.comparison(&time, "bloc_time.png")?;

        let gflops = ComparisonChart::new(
            &format!(
                "Block Matrix Multiplication: Block Size vs Performance (Matrix Size: {}x{})",
                n, n
            ),
            "Block Size",
            "GFLOPS",
        )
        .series(ChartSeries::from_table(
            "Performance (GFLOPS)",
            &table,
            "block_size",
            "GFLOPS",
        )?)
        .highlight(Highlight::from_selection(
            &table,
            &optimal,
            "block_size",
            format!(
                "{}: {:.2} GFLOPS @ block={}",
                Direction::Maximize.label(),
                optimal.value,
                block_size(&table, &optimal)
            ),
        )?)
        .x_ticks(ticks)
        .tight_y();
        output.comparison(&gflops, "bloc_gflops.png")?;
    }

    Ok(())
}

fn summary_report(table: &ResultTable, optimal: &Selection) -> Result<Report, CliError> {
    let n = matrix_size(table, optimal);
    let best = block_size(table, optimal);
    let time = optimal
        .row_in(table)
        .and_then(|r| r.f64("time_sec"))
        .unwrap_or_default();
    let tested: Vec<String> = table
        .unique_sorted("block_size")?
        .iter()
        .map(Value::to_string)
        .collect();

    Ok(Report::new("BLOCK MATRIX MULTIPLICATION - RESULTS SUMMARY")
        .line(format!("Matrix Size: {}x{}", n, n))
        .line(format!("Block sizes tested: [{}]", tested.join(", ")))
        .table_heading("Detailed Results:")
        .separator(" ")
        .column(ColumnFormat::new("block_size", "Block Size").width(12).left())
        .column(ColumnFormat::new("time_sec", "Time (s)").width(12).precision(4).left())
        .column(ColumnFormat::new("GFLOPS", "GFLOPS").width(12).precision(2).left())
        .summary(
            Summary::new(format!("OPTIMAL BLOCK SIZE: {}", best))
                .detail(format!("Execution Time: {:.4} seconds", time))
                .detail(format!("Performance: {:.2} GFLOPS", optimal.value))
                .insight(&Insight::BlockCache { block_size: best }),
        ))
}

fn int_at(table: &ResultTable, selection: &Selection, column: &str) -> i64 {
    selection
        .row_in(table)
        .and_then(|r| r.get(column).and_then(Value::as_i64))
        .unwrap_or_default()
}

fn block_size(table: &ResultTable, selection: &Selection) -> i64 {
    int_at(table, selection, "block_size")
}

fn matrix_size(table: &ResultTable, selection: &Selection) -> i64 {
    int_at(table, selection, "N")
}
