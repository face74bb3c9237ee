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

//! Pivot a table into a two-axis grid for heatmap rendering.

use crate::error::{Result, TableError};
use crate::table::ResultTable;
use crate::value::Value;

/// A dense grid keyed by two discrete axes.
///
/// `cells[i][j]` holds the value for `rows[i]` × `columns[j]`, or `None`
/// when the input has no such combination.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapGrid {
    /// Name of the row axis column.
    pub row_axis: String,
    /// Name of the column axis column.
    pub column_axis: String,
    /// Name of the value column.
    pub value_name: String,
    /// Sorted distinct row-axis values.
    pub rows: Vec<Value>,
    /// Sorted distinct column-axis values.
    pub columns: Vec<Value>,
    /// Cell values, row-major.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl HeatmapGrid {
    /// Pivots `table` so rows are the sorted distinct values of `row_axis`
    /// and columns the sorted distinct values of `column_axis`.
    ///
    /// # Errors
    ///
    /// - [`TableError::EmptyTable`] if the table has no rows
    /// - [`TableError::SchemaMismatch`] if a column is absent, the value
    ///   column is not numeric, or an axis pair occurs more than once
    ///
    /// # Examples
    ///
    /// ```
    /// use perfplot_core::{HeatmapGrid, Loader};
    ///
    /// let csv = "A,B,v\n1,10,0.5\n1,20,1.5\n2,10,2.5\n";
    /// let table = Loader::default().read("t", csv.as_bytes()).unwrap();
    /// let grid = HeatmapGrid::pivot(&table, "A", "B", "v").unwrap();
    /// assert_eq!(grid.cells, vec![vec![Some(0.5), Some(1.5)], vec![Some(2.5), None]]);
    /// assert_eq!(grid.undefined_count(), 1);
    /// ```
    pub fn pivot(
        table: &ResultTable,
        row_axis: &str,
        column_axis: &str,
        value: &str,
    ) -> Result<Self> {
        table.ensure_not_empty()?;
        let rows = table.unique_sorted(row_axis)?;
        let columns = table.unique_sorted(column_axis)?;
        let values = table.numeric(value)?;
        let row_keys = table.values(row_axis)?;
        let col_keys = table.values(column_axis)?;

        let mut cells = vec![vec![None; columns.len()]; rows.len()];
        // A NaN key never equals itself and so has no axis position.
        let locate = |axis: &[Value], key: &Value, name: &str| {
            axis.iter().position(|x| x == key).ok_or_else(|| {
                TableError::schema(format!(
                    "{} has an undefined {} value ({})",
                    table.name(),
                    name,
                    key
                ))
            })
        };
        for ((r, c), v) in row_keys.iter().zip(&col_keys).zip(&values) {
            let i = locate(rows.as_slice(), *r, row_axis)?;
            let j = locate(columns.as_slice(), *c, column_axis)?;
            if cells[i][j].is_some() {
                return Err(TableError::schema(format!(
                    "duplicate entry for {} = {}, {} = {} in {}",
                    row_axis,
                    r,
                    column_axis,
                    c,
                    table.name()
                )));
            }
            cells[i][j] = Some(*v);
        }

        Ok(Self {
            row_axis: row_axis.to_string(),
            column_axis: column_axis.to_string(),
            value_name: value.to_string(),
            rows,
            columns,
            cells,
        })
    }

    /// Number of combinations with no input row.
    pub fn undefined_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_none()).count()
    }

    /// Smallest and largest defined values, or `None` if every cell is
    /// undefined.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.cells
            .iter()
            .flatten()
            .flatten()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::Loader;

    fn table(csv: &str) -> ResultTable {
        Loader::default().read("hpl_results.csv", csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_axes_are_sorted() {
        let t = table("N,NB,GFLOPS\n4000,128,30.5\n2000,64,20.25\n2000,128,22.0\n4000,64,31.0\n");
        let grid = HeatmapGrid::pivot(&t, "NB", "N", "GFLOPS").unwrap();
        assert_eq!(grid.rows, vec![Value::Int(64), Value::Int(128)]);
        assert_eq!(grid.columns, vec![Value::Int(2000), Value::Int(4000)]);
        assert_eq!(grid.cells[0], vec![Some(20.25), Some(31.0)]);
        assert_eq!(grid.cells[1], vec![Some(22.0), Some(30.5)]);
        assert_eq!(grid.value_range(), Some((20.25, 31.0)));
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let t = table("A,B,v\n1,10,1.0\n1,10,2.0\n");
        assert!(matches!(
            HeatmapGrid::pivot(&t, "A", "B", "v"),
            Err(TableError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_nan_axis_value_rejected() {
        let t = table("A,B,v\n1.5,10,1.0\nNaN,10,2.0\n");
        let err = HeatmapGrid::pivot(&t, "A", "B", "v").unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch { .. }));
        assert!(err.to_string().contains("undefined A value"));
    }

    #[test]
    fn test_missing_value_column() {
        let t = table("A,B\n1,10\n");
        assert!(HeatmapGrid::pivot(&t, "A", "B", "v").is_err());
    }
}
