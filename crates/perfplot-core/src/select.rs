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

//! Optimal configuration selection by extremum.

use crate::error::{Result, TableError};
use crate::table::{ResultTable, Row};
use crate::value::Value;

/// Which extremum counts as optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Highest value wins (throughput, GFLOPS, bandwidth).
    Maximize,
    /// Lowest value wins (time).
    Minimize,
}

impl Direction {
    fn better(self, candidate: f64, best: f64) -> bool {
        match self {
            Direction::Maximize => candidate > best,
            Direction::Minimize => candidate < best,
        }
    }

    /// "Maximum" or "Minimum", for chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Maximize => "Maximum",
            Direction::Minimize => "Minimum",
        }
    }
}

/// The row holding an extremum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Zero-based row index in the table the selection was made on.
    pub row: usize,
    /// The extremal metric value.
    pub value: f64,
}

impl Selection {
    /// Row view in `table`.
    pub fn row_in<'a>(&self, table: &'a ResultTable) -> Option<Row<'a>> {
        table.row(self.row)
    }
}

/// Finds the row with the extremal value of `column`.
///
/// Ties keep the first occurrence in file order; NaN never wins.
///
/// # Errors
///
/// - [`TableError::EmptyTable`] if there are no rows (or only NaN values)
/// - [`TableError::SchemaMismatch`] if the column is absent or not numeric
///
/// # Examples
///
/// ```
/// use perfplot_core::{select, Direction, Loader};
///
/// let table = Loader::default()
///     .read("t", "x,m\n1,5.0\n2,9.0\n3,3.0\n".as_bytes())
///     .unwrap();
/// assert_eq!(select(&table, "m", Direction::Maximize).unwrap().row, 1);
/// assert_eq!(select(&table, "m", Direction::Minimize).unwrap().row, 2);
/// ```
pub fn select(table: &ResultTable, column: &str, direction: Direction) -> Result<Selection> {
    let values = table.numeric(column)?;
    extremum(&values, direction)
        .map(|(row, value)| Selection { row, value })
        .ok_or_else(|| TableError::EmptyTable {
            source_name: table.name().to_string(),
        })
}

/// One selection per series of `group`, in first-occurrence order of the
/// key. Row indices refer to the full table.
pub fn select_per_series(
    table: &ResultTable,
    group: &str,
    column: &str,
    direction: Direction,
) -> Result<Vec<(Value, Selection)>> {
    table.ensure_not_empty()?;
    let values = table.numeric(column)?;
    table
        .series(group)?
        .into_iter()
        .map(|series| {
            let subset: Vec<f64> = series.rows.iter().map(|&i| values[i]).collect();
            let (pos, value) = extremum(&subset, direction).ok_or_else(|| {
                TableError::EmptyTable {
                    source_name: format!("{} ({} = {})", table.name(), group, series.key),
                }
            })?;
            Ok((
                series.key,
                Selection {
                    row: series.rows[pos],
                    value,
                },
            ))
        })
        .collect()
}

pub(crate) fn extremum(values: &[f64], direction: Direction) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some((_, b)) if !direction.better(v, b) => {}
            _ => best = Some((i, v)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Loader;

    fn table(csv: &str) -> ResultTable {
        Loader::default().read("t.csv", csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_ties_keep_first_occurrence() {
        let t = table("x,m\n1,4.0\n2,7.0\n3,7.0\n");
        assert_eq!(select(&t, "m", Direction::Maximize).unwrap().row, 1);
        let t = table("x,m\n1,2.0\n2,2.0\n");
        assert_eq!(select(&t, "m", Direction::Minimize).unwrap().row, 0);
    }

    #[test]
    fn test_nan_never_wins() {
        let t = table("x,m\n1,NaN\n2,1.0\n");
        let sel = select(&t, "m", Direction::Maximize).unwrap();
        assert_eq!(sel.row, 1);
        assert_eq!(sel.value, 1.0);
    }

    #[test]
    fn test_empty_table() {
        let t = table("x,m\n");
        let t = crate::normalize(
            &t,
            &crate::Schema::new().int("x").float("m"),
            crate::ColumnMatch::ByName,
        )
        .unwrap();
        assert!(matches!(
            select(&t, "m", Direction::Maximize),
            Err(TableError::EmptyTable { .. })
        ));
    }

    #[test]
    fn test_string_column_rejected() {
        let t = table("order,m\nijk,1.0\n");
        assert!(matches!(
            select(&t, "order", Direction::Maximize),
            Err(TableError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_per_series() {
        let t = table("N,NB,GFLOPS\n1000,64,10\n2000,64,30\n1000,128,12\n2000,128,25\n");
        let picks = select_per_series(&t, "NB", "GFLOPS", Direction::Maximize).unwrap();
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].0, Value::Int(64));
        assert_eq!(picks[0].1.row, 1);
        assert_eq!(picks[1].1.row, 3);
        assert_eq!(picks[1].1.row_in(&t).unwrap().f64("N"), Some(2000.0));
    }
}
