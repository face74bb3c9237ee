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

//! Column schemas a result table must conform to.

use crate::value::ColumnType;
use serde::{Deserialize, Serialize};

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name as it appears in the header.
    pub name: String,
    /// Declared cell type.
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

impl Column {
    /// Creates a column.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// An ordered list of columns.
///
/// # Examples
///
/// ```
/// use perfplot_core::{ColumnType, Schema};
///
/// let schema = Schema::new()
///     .int("size")
///     .string("loop_order")
///     .float("time_sec")
///     .float("gflops");
///
/// assert_eq!(schema.len(), 4);
/// assert_eq!(schema.position("time_sec"), Some(2));
/// assert_eq!(schema.columns()[1].ty, ColumnType::Str);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column of the given type.
    pub fn column(mut self, name: impl Into<String>, ty: ColumnType) -> Self {
        self.columns.push(Column::new(name, ty));
        self
    }

    /// Appends an integer column.
    pub fn int(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnType::Int)
    }

    /// Appends a float column.
    pub fn float(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnType::Float)
    }

    /// Appends a string column.
    pub fn string(self, name: impl Into<String>) -> Self {
        self.column(name, ColumnType::Str)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by exact name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Column names in order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

impl FromIterator<Column> for Schema {
    fn from_iter<T: IntoIterator<Item = Column>>(iter: T) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
