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

//! perfplot command line interface

use clap::Parser;
use colored::Colorize;
use perfplot_cli::cli::Commands;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// perfplot - benchmark result analysis
///
/// Turns the CSV files written by the memory stride, loop order, blocked
/// multiplication and HPL benchmarks into text summaries and PNG charts.
///
/// # Examples
///
/// ```bash
/// # Compare -O0 and -O2 stride runs
/// perfplot stride --o0 results_O0.csv --o2 results_O2.csv
///
/// # Loop order speedup, report only
/// perfplot mxm results.csv --no-charts
///
/// # HPL analysis against a 200 GFLOPS peak, charts in plots/
/// perfplot hpl hpl_results.csv --peak 200 --out-dir plots
/// ```
#[derive(Parser)]
#[command(name = "perfplot")]
#[command(author, version, about = "perfplot - benchmark result analysis", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: u8) {
    let directive = match verbose {
        0 => "warn,perfplot=warn",
        1 => "warn,perfplot=info",
        _ => "warn,perfplot=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
