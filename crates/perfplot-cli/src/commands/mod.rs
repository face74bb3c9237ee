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

//! Command implementations.
//!
//! Each command loads every input before writing anything, prints its text
//! report to stdout, then renders charts into the output directory.

pub mod bloc;
pub mod hpl;
pub mod mxm;
pub mod stride;

pub use bloc::bloc;
pub use hpl::hpl;
pub use mxm::mxm;
pub use stride::stride;

use crate::cli::OutputArgs;
use crate::error::CliError;
use perfplot_core::{
    export_table, normalize, ColumnMatch, Loader, Report, ResultTable, Schema,
};
use perfplot_render::{render_comparison, ChartConfig, ComparisonChart};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Resolved output settings for one run.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub out_dir: PathBuf,
    pub charts: bool,
    pub export: Option<PathBuf>,
    pub chart: ChartConfig,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            charts: true,
            export: None,
            chart: ChartConfig::default(),
        }
    }
}

impl From<OutputArgs> for OutputOptions {
    fn from(args: OutputArgs) -> Self {
        Self {
            out_dir: args.out_dir,
            charts: !args.no_charts,
            export: args.export,
            chart: ChartConfig::default(),
        }
    }
}

impl OutputOptions {
    /// Path of a chart file inside the output directory.
    pub fn chart_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }

    /// Creates the output directory when charts will be written.
    pub(crate) fn prepare(&self) -> Result<(), CliError> {
        if self.charts {
            fs::create_dir_all(&self.out_dir)
                .map_err(|e| CliError::io_error(&self.out_dir, e))?;
        }
        Ok(())
    }

    /// Writes `table` to the export path, if one was requested.
    pub(crate) fn export(&self, table: &ResultTable) -> Result<(), CliError> {
        if let Some(path) = &self.export {
            export_table(table, path)?;
        }
        Ok(())
    }

    /// Renders one comparison chart and reports the file on stdout.
    pub(crate) fn comparison(
        &self,
        chart: &ComparisonChart,
        file_name: &str,
    ) -> Result<(), CliError> {
        let path = self.chart_path(file_name);
        render_comparison(chart, &path, &self.chart)?;
        saved(&path);
        Ok(())
    }
}

/// Loads `path` and conforms it to `schema`.
///
/// # Errors
///
/// Fails if the file is missing, malformed, lacks a required column or has
/// no data rows.
pub(crate) fn load_normalized(
    path: &Path,
    schema: &Schema,
    mode: ColumnMatch,
) -> Result<ResultTable, CliError> {
    let raw = Loader::default().load(path)?;
    let table = normalize(&raw, schema, mode)?;
    table.ensure_not_empty()?;
    info!("Read {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Prints a report for `table` on stdout.
pub(crate) fn print_report(report: &Report, table: &ResultTable) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    report
        .write_to(table, &mut handle)
        .and_then(|_| handle.flush())
        .map_err(|e| CliError::io_error("-", e))
}

pub(crate) fn saved(path: &Path) {
    debug!("Wrote {}", path.display());
    println!("Saved: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use perfplot_core::TableError;
    use tempfile::TempDir;

    #[test]
    fn test_chart_path_joins_out_dir() {
        let options = OutputOptions {
            out_dir: PathBuf::from("plots"),
            ..Default::default()
        };
        assert_eq!(
            options.chart_path("mxm_time.png"),
            PathBuf::from("plots").join("mxm_time.png")
        );
    }

    #[test]
    fn test_prepare_skips_directory_without_charts() {
        let dir = TempDir::new().unwrap();
        let options = OutputOptions {
            out_dir: dir.path().join("never"),
            charts: false,
            ..Default::default()
        };
        options.prepare().unwrap();
        assert!(!dir.path().join("never").exists());
    }

    #[test]
    fn test_prepare_creates_nested_directory() {
        let dir = TempDir::new().unwrap();
        let options = OutputOptions {
            out_dir: dir.path().join("a").join("b"),
            ..Default::default()
        };
        options.prepare().unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn test_load_normalized_rejects_header_only_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "N,NB,GFLOPS").unwrap();

        let schema = Schema::new().int("N").int("NB").float("GFLOPS");
        let err = load_normalized(&path, &schema, ColumnMatch::ByName).unwrap_err();
        assert!(matches!(
            err,
            CliError::Table(TableError::EmptyTable { .. })
        ));
    }
}
