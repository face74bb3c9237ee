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

//! Derived metric columns.
//!
//! Rules append new columns computed from existing ones; source cells are
//! never modified. Degenerate arithmetic (a zero denominator or a zero
//! reference constant) yields `0.0` instead of an error or infinity.

use crate::error::{Result, TableError};
use crate::schema::Column;
use crate::select::{extremum, Direction};
use crate::table::ResultTable;
use crate::value::{ColumnType, Value};
use tracing::debug;

/// Value used when a ratio or percentage has a zero denominator.
pub const DEGENERATE_SENTINEL: f64 = 0.0;

/// `numerator / denominator`, or [`DEGENERATE_SENTINEL`] when the
/// denominator is zero.
///
/// ```
/// use perfplot_core::derive::ratio;
///
/// assert_eq!(ratio(0.02, 0.01), 2.0);
/// assert_eq!(ratio(1.0, 0.0), 0.0);
/// ```
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        DEGENERATE_SENTINEL
    } else {
        numerator / denominator
    }
}

/// A derivation producing one new column.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// `numerator / denominator` per row.
    Ratio {
        output: String,
        numerator: String,
        denominator: String,
    },
    /// `column / constant * 100` per row.
    PercentOf {
        output: String,
        column: String,
        constant: f64,
    },
    /// `minuend - subtrahend` per row.
    Difference {
        output: String,
        minuend: String,
        subtrahend: String,
    },
    /// `1` on the row holding the extremum of `column` (within each series
    /// of `group`, when given), `0` elsewhere.
    ExtremumFlag {
        output: String,
        column: String,
        direction: Direction,
        group: Option<String>,
    },
}

impl Rule {
    pub fn ratio(output: &str, numerator: &str, denominator: &str) -> Self {
        Rule::Ratio {
            output: output.to_string(),
            numerator: numerator.to_string(),
            denominator: denominator.to_string(),
        }
    }

    pub fn percent_of(output: &str, column: &str, constant: f64) -> Self {
        Rule::PercentOf {
            output: output.to_string(),
            column: column.to_string(),
            constant,
        }
    }

    pub fn difference(output: &str, minuend: &str, subtrahend: &str) -> Self {
        Rule::Difference {
            output: output.to_string(),
            minuend: minuend.to_string(),
            subtrahend: subtrahend.to_string(),
        }
    }

    pub fn extremum_flag(
        output: &str,
        column: &str,
        direction: Direction,
        group: Option<&str>,
    ) -> Self {
        Rule::ExtremumFlag {
            output: output.to_string(),
            column: column.to_string(),
            direction,
            group: group.map(str::to_string),
        }
    }

    /// Name of the column this rule appends.
    pub fn output(&self) -> &str {
        match self {
            Rule::Ratio { output, .. }
            | Rule::PercentOf { output, .. }
            | Rule::Difference { output, .. }
            | Rule::ExtremumFlag { output, .. } => output,
        }
    }

    fn evaluate(&self, table: &ResultTable) -> Result<(Column, Vec<Value>)> {
        let output = self.output().to_string();
        match self {
            Rule::Ratio {
                numerator,
                denominator,
                ..
            } => {
                let num = table.numeric(numerator)?;
                let den = table.numeric(denominator)?;
                Ok(float_column(output, num.iter().zip(&den).map(|(&n, &d)| ratio(n, d))))
            }
            Rule::PercentOf {
                column, constant, ..
            } => {
                let values = table.numeric(column)?;
                Ok(float_column(
                    output,
                    values.iter().map(|&v| ratio(v, *constant) * 100.0),
                ))
            }
            Rule::Difference {
                minuend,
                subtrahend,
                ..
            } => {
                let a = table.numeric(minuend)?;
                let b = table.numeric(subtrahend)?;
                Ok(float_column(output, a.iter().zip(&b).map(|(&x, &y)| x - y)))
            }
            Rule::ExtremumFlag {
                column,
                direction,
                group,
                ..
            } => {
                let values = table.numeric(column)?;
                let mut flags = vec![0i64; values.len()];
                let groups: Vec<Vec<usize>> = match group {
                    Some(g) => table.series(g)?.into_iter().map(|s| s.rows).collect(),
                    None => vec![(0..values.len()).collect()],
                };
                for rows in groups {
                    let subset: Vec<f64> = rows.iter().map(|&i| values[i]).collect();
                    if let Some((pos, _)) = extremum(&subset, *direction) {
                        flags[rows[pos]] = 1;
                    }
                }
                Ok((
                    Column::new(output, ColumnType::Int),
                    flags.into_iter().map(Value::Int).collect(),
                ))
            }
        }
    }
}

fn float_column(name: String, values: impl Iterator<Item = f64>) -> (Column, Vec<Value>) {
    (
        Column::new(name, ColumnType::Float),
        values.map(Value::Float).collect(),
    )
}

/// Applies `rules` in order, returning a new table with one appended column
/// per rule. Later rules may read columns produced by earlier ones.
///
/// # Errors
///
/// [`TableError::SchemaMismatch`] if an input column is absent or not
/// numeric, or an output name is already taken.
///
/// # Examples
///
/// ```
/// use perfplot_core::{derive, Loader, Rule};
///
/// let table = Loader::default()
///     .read("hpl", "N,NB,GFLOPS\n1000,64,88.0\n".as_bytes())
///     .unwrap();
/// let derived = derive(&table, &[Rule::percent_of("Efficiency_%", "GFLOPS", 176.0)]).unwrap();
/// assert_eq!(derived.row(0).unwrap().f64("Efficiency_%"), Some(50.0));
/// ```
pub fn derive(table: &ResultTable, rules: &[Rule]) -> Result<ResultTable> {
    let mut out = table.clone();
    for rule in rules {
        let (column, values) = rule.evaluate(&out)?;
        debug!("Derived column '{}' for {}", column.name, out.name());
        out.append_column(column, values)?;
    }
    Ok(out)
}

/// Pairs two series of a grouped table row-by-row on a shared key.
#[derive(Debug, Clone, PartialEq)]
pub struct PairSpec {
    /// Categorical column separating the series (e.g. `loop_order`).
    pub group: String,
    /// Shared ordinal key matching rows across series (e.g. `size`).
    pub key: String,
    /// Numeric column being compared (e.g. `time_sec`).
    pub value: String,
    /// Series the ratio is taken from (numerator).
    pub baseline: Value,
    /// Series the ratio is taken against (denominator).
    pub candidate: Value,
    /// Name of the ratio column (e.g. `speedup`).
    pub ratio: String,
}

impl PairSpec {
    /// Column holding the baseline series' value.
    pub fn baseline_column(&self) -> String {
        format!("{}_{}", self.value, self.baseline)
    }

    /// Column holding the candidate series' value.
    pub fn candidate_column(&self) -> String {
        format!("{}_{}", self.value, self.candidate)
    }
}

/// Builds a comparison table with one row per key present in both series:
/// the key, the baseline value, the candidate value, and
/// `baseline / candidate` (zero-denominator sentinel applies).
///
/// Keys follow the baseline series' file order. Keys missing from either
/// series are skipped.
///
/// # Examples
///
/// ```
/// use perfplot_core::{pair_series, Loader, PairSpec, Value};
///
/// let csv = "size,loop_order,time_sec,gflops\n100,ijk,0.02,1.0\n100,ikj,0.01,2.0\n";
/// let table = Loader::default().read("results.csv", csv.as_bytes()).unwrap();
/// let spec = PairSpec {
///     group: "loop_order".into(),
///     key: "size".into(),
///     value: "time_sec".into(),
///     baseline: Value::from("ijk"),
///     candidate: Value::from("ikj"),
///     ratio: "speedup".into(),
/// };
/// let paired = pair_series(&table, &spec).unwrap();
/// assert_eq!(paired.row(0).unwrap().f64("speedup"), Some(2.0));
/// ```
pub fn pair_series(table: &ResultTable, spec: &PairSpec) -> Result<ResultTable> {
    let key_idx = table.column_index(&spec.key)?;
    let values = table.numeric(&spec.value)?;
    let series = table.series(&spec.group)?;

    let find = |wanted: &Value| {
        series
            .iter()
            .find(|s| &s.key == wanted)
            .ok_or_else(|| {
                TableError::schema(format!(
                    "{} has no series with {} = {}",
                    table.name(),
                    spec.group,
                    wanted
                ))
            })
    };
    let baseline = find(&spec.baseline)?;
    let candidate = find(&spec.candidate)?;

    let key_column = table.columns()[key_idx].clone();
    let mut out = ResultTable::new(
        table.name(),
        vec![
            key_column,
            Column::new(spec.baseline_column(), ColumnType::Float),
            Column::new(spec.candidate_column(), ColumnType::Float),
            Column::new(spec.ratio.clone(), ColumnType::Float),
        ],
    );

    let rows: Vec<_> = table.rows().collect();
    for &b in &baseline.rows {
        let key = &rows[b].values()[key_idx];
        let matched = candidate
            .rows
            .iter()
            .find(|&&c| &rows[c].values()[key_idx] == key);
        match matched {
            Some(&c) => out.push_row(vec![
                key.clone(),
                Value::Float(values[b]),
                Value::Float(values[c]),
                Value::Float(ratio(values[b], values[c])),
            ])?,
            None => debug!(
                "No {} = {} row for {} = {}, skipping",
                spec.group, spec.candidate, spec.key, key
            ),
        }
    }

    Ok(out)
}
