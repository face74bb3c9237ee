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

//! Typed benchmark result tables.
//!
//! This crate turns the CSV files written by external benchmarks (stride
//! access, loop-order and blocked matrix multiply, Linpack-style solvers)
//! into typed [`ResultTable`]s and runs the analysis pipeline on them:
//!
//! 1. **Load**: [`Loader`] reads a delimited file, inferring column types or
//!    converting against a supplied [`Schema`]
//! 2. **Normalize**: [`normalize`] conforms the table to a canonical schema
//! 3. **Derive**: [`derive`] appends computed columns ([`Rule`]) and
//!    [`pair_series`] compares two series on a shared key
//! 4. **Select**: [`select`] / [`select_per_series`] find optimal rows
//! 5. **Report**: [`Report`] prints a fixed-width summary
//!
//! [`HeatmapGrid`] pivots a table over two discrete axes for rendering.
//!
//! # Example
//!
//! ```no_run
//! use perfplot_core::{normalize, select, ColumnMatch, Direction, Loader, LoadConfig, Schema};
//!
//! let schema = Schema::new().int("N").int("NB").float("GFLOPS");
//! let raw = Loader::new(LoadConfig::default()).load("hpl_results.csv")?;
//! let table = normalize(&raw, &schema, ColumnMatch::ByName)?;
//! table.ensure_not_empty()?;
//!
//! let best = select(&table, "GFLOPS", Direction::Maximize)?;
//! println!("best run: {:?}", best.row_in(&table));
//! # Ok::<(), perfplot_core::TableError>(())
//! ```

pub mod derive;
mod error;
mod export;
mod heatmap;
mod loader;
mod normalize;
mod report;
mod schema;
mod select;
mod table;
mod value;

pub use derive::{derive, pair_series, PairSpec, Rule, DEGENERATE_SENTINEL};
pub use error::{Result, TableError};
pub use export::{export_table, to_csv_string, to_json_value, write_csv, write_json};
pub use heatmap::HeatmapGrid;
pub use loader::{load_table, LoadConfig, Loader, DEFAULT_MAX_ROWS, DEFAULT_MISSING_HINT};
pub use normalize::{normalize, ColumnMatch};
pub use report::{Align, ColumnFormat, Insight, Report, Summary};
pub use schema::{Column, Schema};
pub use select::{select, select_per_series, Direction, Selection};
pub use table::{ResultTable, Row, Series};
pub use value::{infer_type, ColumnType, Value};
