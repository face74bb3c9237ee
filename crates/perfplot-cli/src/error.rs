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

//! Structured error types for the perfplot CLI.

use perfplot_core::TableError;
use perfplot_render::RenderError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for perfplot CLI operations.
///
/// Every variant ends the run; `main` prints the message and exits with a
/// failure status.
#[derive(Error, Debug)]
pub enum CliError {
    /// Loading, normalizing or analysing the input table failed.
    #[error(transparent)]
    Table(#[from] TableError),

    /// Producing a chart image failed.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// I/O operation failed (creating the output directory, writing stdout).
    #[error("I/O error for '{}': {message}", path.display())]
    Io {
        /// The path involved, or `-` for standard output.
        path: PathBuf,
        /// The error message.
        message: String,
    },

    /// A command-line value is out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl AsRef<Path>, err: io::Error) -> Self {
        CliError::Io {
            path: path.as_ref().to_path_buf(),
            message: err.to_string(),
        }
    }

    /// True when the run failed because an input file is absent.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, CliError::Table(e) if e.is_not_found())
    }
}
