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

//! Read delimited benchmark result files into a [`ResultTable`].

use crate::error::{Result, TableError};
use crate::schema::{Column, Schema};
use crate::table::ResultTable;
use crate::value::{infer_type, Value};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Default maximum number of data rows.
///
/// Benchmark sweeps are tiny; the limit only guards against pointing the
/// tool at an unrelated multi-gigabyte file.
pub const DEFAULT_MAX_ROWS: usize = 1_000_000;

/// Default remediation text for a missing input file.
pub const DEFAULT_MISSING_HINT: &str = "run 'make run' first to generate it.";

/// Configuration for reading result files.
///
/// # Examples
///
/// ```
/// # use perfplot_core::LoadConfig;
/// let config = LoadConfig::default();
/// assert_eq!(config.delimiter, b',');
/// assert!(config.has_headers);
/// assert!(config.trim);
///
/// let tsv = LoadConfig {
///     delimiter: b'\t',
///     ..Default::default()
/// };
/// assert_eq!(tsv.max_rows, 1_000_000);
/// ```
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,

    /// Whether the first row names the columns (default: `true`).
    ///
    /// When a schema is supplied the header row is still consumed, but the
    /// column names come from the schema.
    pub has_headers: bool,

    /// Trim surrounding whitespace from every field (default: `true`).
    pub trim: bool,

    /// Maximum number of data rows (default: [`DEFAULT_MAX_ROWS`]).
    pub max_rows: usize,

    /// Remediation text attached to [`TableError::NotFound`].
    pub missing_hint: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            trim: true,
            max_rows: DEFAULT_MAX_ROWS,
            missing_hint: DEFAULT_MISSING_HINT.to_string(),
        }
    }
}

/// Reads result files, optionally against an externally supplied schema.
///
/// Without a schema, column names come from the header row and each column
/// gets the narrowest type all of its fields parse as (integer, then float,
/// then string). With a schema, every field is converted to the declared
/// type and a failure is reported as [`TableError::MalformedRow`].
///
/// # Examples
///
/// ```
/// use perfplot_core::{ColumnType, Loader, LoadConfig};
///
/// let csv = "stride,time_ms,bandwidth_MB_s,sum\n1,12.5,640.0,1e6\n2,13,615.2,1e6\n";
/// let table = Loader::new(LoadConfig::default())
///     .read("results_O0.csv", csv.as_bytes())
///     .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.columns()[0].ty, ColumnType::Int);
/// assert_eq!(table.columns()[1].ty, ColumnType::Float);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Loader {
    config: LoadConfig,
    schema: Option<Schema>,
}

impl Loader {
    pub fn new(config: LoadConfig) -> Self {
        Self {
            config,
            schema: None,
        }
    }

    /// Names and types columns by position from `schema`.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    /// Loads a table from a file.
    ///
    /// # Errors
    ///
    /// - [`TableError::NotFound`] if the file does not exist
    /// - [`TableError::MalformedRow`] if a field fails to convert
    /// - [`TableError::SchemaMismatch`] if the header does not fit the schema
    pub fn load(&self, path: impl AsRef<Path>) -> Result<ResultTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => TableError::NotFound {
                path: path.to_path_buf(),
                hint: self.config.missing_hint.clone(),
            },
            _ => TableError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.read(name, file)
    }

    /// Reads a table from any reader. `name` identifies the source in
    /// error messages.
    pub fn read<R: Read>(&self, name: impl Into<String>, reader: R) -> Result<ResultTable> {
        let name = name.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(if self.config.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(reader);

        let mut records = csv_reader
            .records()
            .filter(|r| !matches!(r, Ok(rec) if rec.len() == 1 && rec[0].is_empty()));

        let header: Option<Vec<String>> = if self.config.has_headers {
            match records.next() {
                Some(rec) => Some(rec?.iter().map(str::to_string).collect()),
                None => Some(Vec::new()),
            }
        } else {
            None
        };

        let names = self.column_names(&name, header)?;
        let width = names.len();

        let mut raw_rows: Vec<Vec<String>> = Vec::new();
        for record in records {
            let record = record?;
            let row = raw_rows.len() + 1;
            if row > self.config.max_rows {
                return Err(TableError::TooManyRows {
                    limit: self.config.max_rows,
                });
            }
            if record.len() != width {
                return Err(TableError::MalformedRow {
                    row,
                    field: names
                        .get(record.len().min(width.saturating_sub(1)))
                        .cloned()
                        .unwrap_or_default(),
                    reason: format!("row has {} fields, expected {}", record.len(), width),
                });
            }
            raw_rows.push(record.iter().map(str::to_string).collect());
        }

        let columns: Vec<Column> = match &self.schema {
            Some(schema) => schema.columns().to_vec(),
            None => names
                .into_iter()
                .enumerate()
                .map(|(i, n)| {
                    let ty = infer_type(raw_rows.iter().map(|r| r[i].as_str()));
                    Column::new(n, ty)
                })
                .collect(),
        };

        let mut rows = Vec::with_capacity(raw_rows.len());
        for (r, raw) in raw_rows.iter().enumerate() {
            let mut values = Vec::with_capacity(width);
            for (field, column) in raw.iter().zip(&columns) {
                let value = Value::parse_as(field, column.ty)
                    .ok_or_else(|| TableError::conversion(r + 1, &column.name, column.ty, field))?;
                values.push(value);
            }
            rows.push(values);
        }

        debug!(
            "Loaded {} rows ({} columns) from {}",
            rows.len(),
            columns.len(),
            name
        );

        Ok(ResultTable::from_parts(name, columns, rows))
    }

    fn column_names(&self, source: &str, header: Option<Vec<String>>) -> Result<Vec<String>> {
        match (&self.schema, header) {
            (Some(schema), Some(header)) if !header.is_empty() && header.len() != schema.len() => {
                Err(TableError::schema(format!(
                    "{} has {} columns ({}), expected {} ({})",
                    source,
                    header.len(),
                    header.join(", "),
                    schema.len(),
                    schema.names().join(", ")
                )))
            }
            (Some(schema), _) => Ok(schema.names().into_iter().map(str::to_string).collect()),
            (None, Some(header)) => {
                if let Some(pos) = header.iter().position(|h| h.is_empty()) {
                    return Err(TableError::schema(format!(
                        "{} has an empty column name at position {}",
                        source, pos
                    )));
                }
                Ok(header)
            }
            (None, None) => Err(TableError::schema(format!(
                "{} has no header row and no schema was supplied",
                source
            ))),
        }
    }
}

/// Loads a file with the default configuration and inferred column types.
pub fn load_table(path: impl AsRef<Path>) -> Result<ResultTable> {
    Loader::default().load(path)
}
