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

//! CLI command definitions and argument parsing.
//!
//! One subcommand per benchmark family. Every subcommand shares the
//! [`OutputArgs`] flags controlling where charts go and whether the derived
//! table is exported.

use crate::commands::{self, OutputOptions};
use crate::error::CliError;
use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Output flags shared by all commands.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory for chart images
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Print the text report only, without rendering charts
    #[arg(long)]
    pub no_charts: bool,

    /// Write the derived table to FILE (.json for JSON, CSV otherwise)
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use perfplot_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare memory stride results built at -O0 and -O2
    ///
    /// Reads two stride benchmark tables (stride, time_ms, bandwidth_MB_s,
    /// sum) and plots time and bandwidth against stride for both.
    Stride {
        /// Results of the unoptimized build
        #[arg(long, value_name = "FILE", default_value = "results_O0.csv")]
        o0: PathBuf,

        /// Results of the optimized build
        #[arg(long, value_name = "FILE", default_value = "results_O2.csv")]
        o2: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compare ijk and ikj matrix multiplication loop orders
    ///
    /// Reads (size, loop_order, time_sec, gflops) rows, prints the per-size
    /// speedup of ikj over ijk and draws grouped bar charts.
    Mxm {
        /// Results file
        #[arg(value_name = "FILE", default_value = "results.csv")]
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Find the optimal block size of a blocked matrix multiplication
    ///
    /// Reads (N, block_size, time_sec, GFLOPS) rows by position, marks the
    /// fastest and highest-throughput block sizes and explains the result.
    Bloc {
        /// Results file
        #[arg(value_name = "FILE", default_value = "results.csv")]
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Analyse High-Performance Linpack results against a theoretical peak
    ///
    /// Reads (N, NB, GFLOPS) rows, adds an efficiency column, reports the
    /// optimal configuration and draws performance, heatmap and efficiency
    /// charts.
    Hpl {
        /// Results file
        #[arg(value_name = "FILE", default_value = "hpl_results.csv")]
        file: PathBuf,

        /// Theoretical peak performance in GFLOPS
        #[arg(long, value_name = "GFLOPS", default_value_t = commands::hpl::DEFAULT_PEAK_GFLOPS)]
        peak: f64,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if an input file is missing or malformed, or if an
    /// output file cannot be written.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Stride { o0, o2, output } => {
                commands::stride(&o0, &o2, &OutputOptions::from(output))
            }
            Commands::Mxm { file, output } => commands::mxm(&file, &OutputOptions::from(output)),
            Commands::Bloc { file, output } => commands::bloc(&file, &OutputOptions::from(output)),
            Commands::Hpl { file, peak, output } => {
                commands::hpl(&file, peak, &OutputOptions::from(output))
            }
        }
    }
}
