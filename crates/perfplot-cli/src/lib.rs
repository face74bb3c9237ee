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

//! perfplot CLI library for command-line parsing and execution.
//!
//! Each subcommand runs the same pipeline over one benchmark family:
//! load the CSV results, conform them to the family's schema, derive
//! metrics, pick the optimal configuration, print a text report and render
//! charts.
//!
//! # Commands
//!
//! - **stride**: memory stride timing and bandwidth, `-O0` vs `-O2` builds
//! - **mxm**: `ijk` vs `ikj` matrix multiplication loop order speedup
//! - **bloc**: block size sweep of a blocked matrix multiplication
//! - **hpl**: High-Performance Linpack efficiency against a theoretical peak
//!
//! Every command accepts `--out-dir`, `--no-charts` and `--export`.
//!
//! # Examples
//!
//! ```no_run
//! use perfplot_cli::commands::{hpl, OutputOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), perfplot_cli::error::CliError> {
//! let options = OutputOptions {
//!     charts: false,
//!     ..Default::default()
//! };
//! hpl(Path::new("hpl_results.csv"), 176.0, &options)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
