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

//! Error types for result table operations.

use crate::value::ColumnType;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while loading, normalizing or analysing a result table.
///
/// Every variant is terminal for a run: callers report the message and stop.
///
/// # Examples
///
/// ```
/// use perfplot_core::TableError;
///
/// let err = TableError::MalformedRow {
///     row: 3,
///     field: "time_ms".to_string(),
///     reason: "expected float, got 'abc'".to_string(),
/// };
/// assert_eq!(
///     err.to_string(),
///     "Malformed row 3: field 'time_ms' expected float, got 'abc'"
/// );
/// ```
#[derive(Debug, Error)]
pub enum TableError {
    /// The declared input file does not exist.
    #[error("Results file '{}' not found. Please {hint}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
        /// Remediation text naming the upstream generation step.
        hint: String,
    },

    /// A required column is absent, or the column set has the wrong shape.
    #[error("Schema mismatch: {reason}")]
    SchemaMismatch {
        /// What did not match.
        reason: String,
    },

    /// A field could not be converted to its declared type.
    #[error("Malformed row {row}: field '{field}' {reason}")]
    MalformedRow {
        /// Data row index, 1-based, header excluded.
        row: usize,
        /// Column name of the offending field.
        field: String,
        /// Why the conversion failed.
        reason: String,
    },

    /// The table has no data rows.
    #[error("No data found in {source_name}")]
    EmptyTable {
        /// Name of the table source (usually the file name).
        source_name: String,
    },

    /// Row count exceeded the configured limit.
    #[error("Row limit exceeded: more than {limit} data rows")]
    TooManyRows {
        /// Maximum allowed rows.
        limit: usize,
    },

    /// I/O error while reading or writing a table.
    #[error("I/O error for '{}': {source}", path.display())]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Error from the underlying CSV library.
    #[error("CSV library error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error during export.
    #[error("JSON export error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    /// Shorthand for a [`TableError::SchemaMismatch`].
    pub fn schema(reason: impl Into<String>) -> Self {
        TableError::SchemaMismatch {
            reason: reason.into(),
        }
    }

    /// Builds a [`TableError::MalformedRow`] for a value that failed to
    /// convert to `expected`.
    pub fn conversion(row: usize, field: &str, expected: ColumnType, raw: &str) -> Self {
        TableError::MalformedRow {
            row,
            field: field.to_string(),
            reason: format!("expected {}, got '{}'", expected, raw),
        }
    }

    /// True for the missing-input case, which callers report with a hint.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TableError::NotFound { .. })
    }
}
