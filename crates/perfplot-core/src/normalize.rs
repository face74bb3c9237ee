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

//! Conform a loaded table to a canonical column schema.

use crate::error::{Result, TableError};
use crate::schema::{Column, Schema};
use crate::table::ResultTable;
use tracing::debug;

/// How source columns are matched to schema columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnMatch {
    /// Match by name (exact, then ASCII case-insensitive) and reorder to the
    /// schema's order. Extra source columns are dropped.
    #[default]
    ByName,
    /// As [`ColumnMatch::ByName`], but extra source columns are kept after
    /// the schema columns with their loaded types.
    ByNameKeepExtra,
    /// Rename columns to the schema's names by position. The column count
    /// must match exactly.
    ByPosition,
}

/// Produces a new table whose columns follow `schema`.
///
/// Cells are converted to the declared types (integer widens to float,
/// integral floats narrow to integer, numbers stringify, strings parse).
///
/// # Errors
///
/// - [`TableError::SchemaMismatch`] if a schema column is absent or the
///   column count differs in positional mode
/// - [`TableError::MalformedRow`] if a cell cannot be converted
///
/// # Examples
///
/// ```
/// use perfplot_core::{normalize, ColumnMatch, Loader, Schema};
///
/// let csv = "gflops,size\n1.5,100\n";
/// let raw = Loader::default().read("r.csv", csv.as_bytes()).unwrap();
/// let schema = Schema::new().int("size").float("gflops");
/// let table = normalize(&raw, &schema, ColumnMatch::ByName).unwrap();
/// assert_eq!(table.column_names(), vec!["size", "gflops"]);
/// ```
pub fn normalize(table: &ResultTable, schema: &Schema, mode: ColumnMatch) -> Result<ResultTable> {
    let source_columns = table.columns();

    let mapping: Vec<usize> = match mode {
        ColumnMatch::ByPosition => {
            if source_columns.len() != schema.len() {
                return Err(TableError::schema(format!(
                    "{} has {} columns, expected {} ({})",
                    table.name(),
                    source_columns.len(),
                    schema.len(),
                    schema.names().join(", ")
                )));
            }
            (0..schema.len()).collect()
        }
        ColumnMatch::ByName | ColumnMatch::ByNameKeepExtra => schema
            .columns()
            .iter()
            .map(|wanted| find_column(table, &wanted.name))
            .collect::<Result<_>>()?,
    };

    let mut columns: Vec<Column> = schema.columns().to_vec();
    let mut sources = mapping;

    if mode == ColumnMatch::ByNameKeepExtra {
        for (i, column) in source_columns.iter().enumerate() {
            if !sources.contains(&i) {
                columns.push(column.clone());
                sources.push(i);
            }
        }
    } else if mode == ColumnMatch::ByName && source_columns.len() > schema.len() {
        debug!(
            "Dropping {} extra column(s) from {}",
            source_columns.len() - schema.len(),
            table.name()
        );
    }

    let mut rows = Vec::with_capacity(table.len());
    for row in table.rows() {
        let values = row.values();
        let mut out = Vec::with_capacity(columns.len());
        for (column, &src) in columns.iter().zip(&sources) {
            let value = &values[src];
            let converted = value.coerce(column.ty).ok_or_else(|| {
                TableError::conversion(row.index() + 1, &column.name, column.ty, &value.to_string())
            })?;
            out.push(converted);
        }
        rows.push(out);
    }

    Ok(ResultTable::from_parts(table.name().to_string(), columns, rows))
}

fn find_column(table: &ResultTable, name: &str) -> Result<usize> {
    let columns = table.columns();
    columns
        .iter()
        .position(|c| c.name == name)
        .or_else(|| {
            columns
                .iter()
                .position(|c| c.name.eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| {
            TableError::schema(format!(
                "required column '{}' not found in {} (columns: {})",
                name,
                table.name(),
                table.column_names().join(", ")
            ))
        })
}
