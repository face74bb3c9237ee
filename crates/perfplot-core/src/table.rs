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

//! The in-memory result table and its read-only views.

use crate::error::{Result, TableError};
use crate::schema::{Column, Schema};
use crate::value::Value;

/// One parsed benchmark result set.
///
/// Rows are stored positionally against `columns`. The only mutation after
/// construction is [`ResultTable::append_column`], which never touches
/// existing cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    name: String,
    columns: Vec<Column>,
    rows: Vec<Vec<Value>>,
}

impl ResultTable {
    /// Creates an empty table with the given columns.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from rows, checking width and cell types.
    ///
    /// # Examples
    ///
    /// ```
    /// use perfplot_core::{ResultTable, Schema, Value};
    ///
    /// let schema = Schema::new().int("x").float("m");
    /// let table = ResultTable::from_rows(
    ///     "demo",
    ///     schema.columns().to_vec(),
    ///     vec![vec![Value::Int(1), Value::Float(5.0)]],
    /// )
    /// .unwrap();
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn from_rows(
        name: impl Into<String>,
        columns: Vec<Column>,
        rows: Vec<Vec<Value>>,
    ) -> Result<Self> {
        let mut table = Self::new(name, columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Appends a row. Its width and cell types must match the columns.
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<()> {
        let row = self.rows.len() + 1;
        if values.len() != self.columns.len() {
            return Err(TableError::MalformedRow {
                row,
                field: format!("#{}", values.len()),
                reason: format!(
                    "row has {} fields, expected {}",
                    values.len(),
                    self.columns.len()
                ),
            });
        }
        for (value, column) in values.iter().zip(&self.columns) {
            if value.column_type() != column.ty {
                return Err(TableError::conversion(
                    row,
                    &column.name,
                    column.ty,
                    &value.to_string(),
                ));
            }
        }
        self.rows.push(values);
        Ok(())
    }

    /// Source name, used in messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The table's current column set as a schema.
    pub fn schema(&self) -> Schema {
        self.columns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Fails with [`TableError::EmptyTable`] when there are no data rows.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(TableError::EmptyTable {
                source_name: self.name.clone(),
            });
        }
        Ok(())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    /// Position of a column, or a schema mismatch naming it.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| {
                TableError::schema(format!(
                    "required column '{}' not found in {} (columns: {})",
                    name,
                    self.name,
                    self.column_names().join(", ")
                ))
            })
    }

    /// Position of a column that must be numeric.
    pub fn numeric_column_index(&self, name: &str) -> Result<usize> {
        let idx = self.column_index(name)?;
        if !self.columns[idx].ty.is_numeric() {
            return Err(TableError::schema(format!(
                "column '{}' is {}, expected a numeric column",
                name, self.columns[idx].ty
            )));
        }
        Ok(idx)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Row view by index.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        (index < self.rows.len()).then_some(Row { table: self, index })
    }

    /// Iterates rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.rows.len()).map(move |index| Row { table: self, index })
    }

    /// All cells of one column.
    pub fn values(&self, name: &str) -> Result<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// All cells of a numeric column as `f64`.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.numeric_column_index(name)?;
        Ok(self
            .rows
            .iter()
            .map(|r| r[idx].as_f64().unwrap_or(f64::NAN))
            .collect())
    }

    /// Distinct values of a column, sorted by [`Value::total_cmp`].
    pub fn unique_sorted(&self, name: &str) -> Result<Vec<Value>> {
        let mut values: Vec<Value> = Vec::new();
        for value in self.values(name)? {
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
        values.sort_by(|a, b| a.total_cmp(b));
        Ok(values)
    }

    /// Appends a derived column.
    ///
    /// Fails if the name is already taken, the value count differs from the
    /// row count, or a value does not match the declared type.
    pub fn append_column(&mut self, column: Column, values: Vec<Value>) -> Result<()> {
        if self.has_column(&column.name) {
            return Err(TableError::schema(format!(
                "column '{}' already exists in {}",
                column.name, self.name
            )));
        }
        if values.len() != self.rows.len() {
            return Err(TableError::schema(format!(
                "column '{}' has {} values for {} rows",
                column.name,
                values.len(),
                self.rows.len()
            )));
        }
        if let Some((i, bad)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| v.column_type() != column.ty)
        {
            return Err(TableError::conversion(
                i + 1,
                &column.name,
                column.ty,
                &bad.to_string(),
            ));
        }
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        self.columns.push(column);
        Ok(())
    }

    /// Groups rows by a categorical key, in first-occurrence order.
    pub fn series(&self, group: &str) -> Result<Vec<Series>> {
        let idx = self.column_index(group)?;
        let mut series: Vec<Series> = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            let key = &row[idx];
            match series.iter_mut().find(|s| &s.key == key) {
                Some(s) => s.rows.push(i),
                None => series.push(Series {
                    key: key.clone(),
                    rows: vec![i],
                }),
            }
        }
        Ok(series)
    }

    /// A new table holding only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> ResultTable {
        ResultTable {
            name: self.name.clone(),
            columns: self.columns.clone(),
            rows: indices
                .iter()
                .filter_map(|&i| self.rows.get(i).cloned())
                .collect(),
        }
    }

    pub(crate) fn raw_rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub(crate) fn from_parts(name: String, columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            name,
            columns,
            rows,
        }
    }
}

/// Borrowed view of one row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a ResultTable,
    index: usize,
}

impl<'a> Row<'a> {
    /// Zero-based position in the table.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cells in column order.
    pub fn values(&self) -> &'a [Value] {
        &self.table.rows[self.index]
    }

    /// Cell by column name.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let idx = self.table.columns.iter().position(|c| c.name == name)?;
        self.table.rows[self.index].get(idx)
    }

    /// Numeric cell by column name.
    pub fn f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }
}

/// Rows sharing one categorical key value.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// The shared key.
    pub key: Value,
    /// Row indices into the source table, in file order.
    pub rows: Vec<usize>,
}

impl Series {
    /// `(x, y)` pairs for this series, in file order.
    pub fn points(&self, table: &ResultTable, x: &str, y: &str) -> Result<Vec<(f64, f64)>> {
        let xi = table.numeric_column_index(x)?;
        let yi = table.numeric_column_index(y)?;
        let rows = table.raw_rows();
        Ok(self
            .rows
            .iter()
            .filter_map(|&i| {
                let row = rows.get(i)?;
                Some((row[xi].as_f64()?, row[yi].as_f64()?))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ColumnType;

    fn sample() -> ResultTable {
        let schema = Schema::new().int("N").int("NB").float("GFLOPS");
        ResultTable::from_rows(
            "hpl",
            schema.columns().to_vec(),
            vec![
                vec![Value::Int(1000), Value::Int(64), Value::Float(10.0)],
                vec![Value::Int(2000), Value::Int(64), Value::Float(20.0)],
                vec![Value::Int(1000), Value::Int(128), Value::Float(12.0)],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_series_first_occurrence_order() {
        let table = sample();
        let series = table.series("NB").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].key, Value::Int(64));
        assert_eq!(series[0].rows, vec![0, 1]);
        assert_eq!(series[1].key, Value::Int(128));
        assert_eq!(
            series[0].points(&table, "N", "GFLOPS").unwrap(),
            vec![(1000.0, 10.0), (2000.0, 20.0)]
        );
    }

    #[test]
    fn test_append_column_is_append_only() {
        let mut table = sample();
        let err = table
            .append_column(
                Column::new("GFLOPS", ColumnType::Float),
                vec![Value::Float(0.0); 3],
            )
            .unwrap_err();
        assert!(matches!(err, TableError::SchemaMismatch { .. }));

        table
            .append_column(
                Column::new("flag", ColumnType::Int),
                vec![Value::Int(0), Value::Int(1), Value::Int(0)],
            )
            .unwrap();
        assert_eq!(table.columns().len(), 4);
        assert_eq!(table.row(1).unwrap().get("flag"), Some(&Value::Int(1)));
        assert_eq!(table.row(1).unwrap().f64("GFLOPS"), Some(20.0));
    }

    #[test]
    fn test_push_row_rejects_wrong_type() {
        let mut table = sample();
        let err = table
            .push_row(vec![Value::Int(1), Value::from("x"), Value::Float(1.0)])
            .unwrap_err();
        assert!(matches!(err, TableError::MalformedRow { row: 4, .. }));
    }

    #[test]
    fn test_unique_sorted() {
        let table = sample();
        assert_eq!(
            table.unique_sorted("N").unwrap(),
            vec![Value::Int(1000), Value::Int(2000)]
        );
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let table = sample();
        assert!(matches!(
            table.column_index("time_sec"),
            Err(TableError::SchemaMismatch { .. })
        ));
        assert!(table.numeric("GFLOPS").is_ok());
    }
}
