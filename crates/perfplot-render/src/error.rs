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

//! Error types for chart rendering.

use perfplot_core::TableError;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while producing a chart image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The drawing backend failed (missing directory, font, encoder error).
    #[error("Failed to draw '{}': {message}", path.display())]
    Drawing {
        /// Output image path.
        path: PathBuf,
        /// Backend error message.
        message: String,
    },

    /// Every series of the chart is empty.
    #[error("Chart '{chart}' has no data to plot")]
    NoData {
        /// Chart title.
        chart: String,
    },

    /// Extracting chart data from the table failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Wraps a backend error as [`RenderError::Drawing`] for `path`.
pub(crate) fn drawing(path: &Path, err: impl Display) -> RenderError {
    RenderError::Drawing {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
