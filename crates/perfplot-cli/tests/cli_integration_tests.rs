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

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn perfplot_cmd() -> Command {
    Command::cargo_bin("perfplot").expect("Failed to find perfplot binary")
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Failed to write temp file");
}

fn png_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().map_or(false, |x| x == "png"))
        .count()
}

const MXM: &str = "size,loop_order,time_sec,gflops\n\
                   100,ijk,0.02,1.0\n\
                   100,ikj,0.01,2.0\n\
                   200,ijk,0.30,0.5\n\
                   200,ikj,0.10,1.6\n";

const HPL: &str = "N,NB,GFLOPS\n\
                   1000,64,44.0\n\
                   2000,64,88.0\n\
                   1000,128,52.8\n";

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    perfplot_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("perfplot - benchmark result analysis"))
        .stdout(predicate::str::contains("stride"))
        .stdout(predicate::str::contains("hpl"));
}

#[test]
fn test_version_output() {
    perfplot_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("perfplot"));
}

#[test]
fn test_no_subcommand_fails() {
    perfplot_cmd().assert().failure();
}

#[test]
fn test_hpl_help_shows_peak_default() {
    perfplot_cmd()
        .args(["hpl", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--peak"))
        .stdout(predicate::str::contains("176"));
}

// ===== Missing and Malformed Input =====

#[test]
fn test_missing_file_fails_without_output() {
    let dir = TempDir::new().unwrap();
    perfplot_cmd()
        .current_dir(dir.path())
        .arg("hpl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("hpl_results.csv"))
        .stderr(predicate::str::contains("not found"));
    assert_eq!(png_count(dir.path()), 0);
}

#[test]
fn test_stride_needs_both_files() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "results_O0.csv",
        "stride,time_ms,bandwidth_MB_s,sum\n1,10.0,800.0,5\n",
    );
    perfplot_cmd()
        .current_dir(dir.path())
        .arg("stride")
        .assert()
        .failure()
        .stderr(predicate::str::contains("results_O2.csv"));
    assert_eq!(png_count(dir.path()), 0);
}

#[test]
fn test_header_only_file_is_empty() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "results.csv", "size,loop_order,time_sec,gflops\n");
    perfplot_cmd()
        .current_dir(dir.path())
        .arg("mxm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No data found in results.csv"));
}

#[test]
fn test_malformed_row_names_field() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hpl_results.csv", "N,NB,GFLOPS\n1000,64,fast\n");
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--no-charts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GFLOPS"));
}

#[test]
fn test_missing_column_is_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hpl_results.csv", "N,GFLOPS\n1000,44.0\n");
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--no-charts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NB"));
}

#[test]
fn test_non_positive_peak_rejected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hpl_results.csv", HPL);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--no-charts", "--peak", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

// ===== Reports =====

#[test]
fn test_mxm_speedup_report() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "results.csv", MXM);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["mxm", "--no-charts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 data points for each loop order"))
        .stdout(predicate::str::contains("     N |   ijk Time |   ikj Time |  Speedup"))
        .stdout(predicate::str::contains("   100 |     0.020s |     0.010s |    2.00x"))
        .stdout(predicate::str::contains("The ikj loop order is faster"));
    assert_eq!(png_count(dir.path()), 0);
}

#[test]
fn test_bloc_positional_columns() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "sweep.csv",
        "matrix,bs,t,perf\n512,16,0.40,0.67\n512,32,0.25,1.07\n512,64,0.30,0.89\n",
    );
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["bloc", "sweep.csv", "--no-charts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Block sizes tested: [16, 32, 64]"))
        .stdout(predicate::str::contains("OPTIMAL BLOCK SIZE: 32"));
}

#[test]
fn test_stride_reports_both_levels() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "results_O0.csv",
        "stride,time_ms,bandwidth_MB_s,sum\n1,10.0,800.0,5\n2,12.0,650.0,5\n",
    );
    write(
        dir.path(),
        "results_O2.csv",
        "stride,time_ms,bandwidth_MB_s,sum\n1,4.0,2000.0,5\n2,5.0,1600.0,5\n",
    );
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["stride", "--no-charts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STRIDE RESULTS: O0"))
        .stdout(predicate::str::contains("STRIDE RESULTS: O2"))
        .stdout(predicate::str::contains("Peak bandwidth: 2000.0 MB/s at stride 1"));
}

#[test]
fn test_hpl_optimal_configuration() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hpl_results.csv", HPL);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--no-charts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theoretical Peak: 176.0 GFLOPS"))
        .stdout(predicate::str::contains("N = 2000, NB = 64"))
        .stdout(predicate::str::contains("Efficiency: 50.0%"));
}

#[test]
fn test_hpl_custom_peak() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hpl_results.csv", HPL);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--no-charts", "--peak", "88"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Efficiency: 100.0%"));
}

#[test]
fn test_duplicate_hpl_configuration_fails_before_charts() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "hpl_results.csv",
        "N,NB,GFLOPS\n1000,64,44.0\n1000,64,45.0\n",
    );
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--out-dir", "plots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate entry"));
    assert!(!dir.path().join("plots").exists());
}

#[test]
fn test_duplicate_hpl_configuration_reports_without_charts() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "hpl_results.csv",
        "N,NB,GFLOPS\n1000,64,44.0\n1000,64,45.0\n",
    );
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--no-charts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Performance: 45.00 GFLOPS"));
}

// ===== Charts =====

fn png_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

#[test]
fn test_hpl_writes_three_charts() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hpl_results.csv", HPL);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--out-dir", "plots"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved:"));
    assert_eq!(
        png_names(&dir.path().join("plots")),
        vec!["hpl_efficiency.png", "hpl_heatmap.png", "hpl_performance.png"]
    );
    assert_eq!(png_count(dir.path()), 0);
}

#[test]
fn test_bloc_writes_two_charts() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "results.csv",
        "N,block_size,time_sec,GFLOPS\n512,16,0.40,0.67\n512,32,0.25,1.07\n512,64,0.30,0.89\n",
    );
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["bloc", "--out-dir", "plots"])
        .assert()
        .success();
    assert_eq!(
        png_names(&dir.path().join("plots")),
        vec!["bloc_gflops.png", "bloc_time.png"]
    );
}

#[test]
fn test_mxm_rerun_overwrites_charts() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "results.csv", MXM);
    for _ in 0..2 {
        perfplot_cmd()
            .current_dir(dir.path())
            .arg("mxm")
            .assert()
            .success();
    }
    assert_eq!(png_names(dir.path()), vec!["mxm_gflops.png", "mxm_time.png"]);
}

// ===== Export =====

#[test]
fn test_export_json() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "hpl_results.csv", HPL);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["hpl", "--no-charts", "--export", "derived.json"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("derived.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 3);
    let names: Vec<&str> = json["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["N", "NB", "GFLOPS", "Efficiency_%"]);
}

#[test]
fn test_export_csv() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "results.csv", MXM);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["mxm", "--no-charts", "--export", "speedup.csv"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("speedup.csv")).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("size,time_sec_ijk,time_sec_ikj,speedup")
    );
    assert_eq!(lines.count(), 2);
}

#[test]
fn test_no_charts_does_not_create_out_dir() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "results.csv", MXM);
    perfplot_cmd()
        .current_dir(dir.path())
        .args(["mxm", "--no-charts", "--out-dir", "plots"])
        .assert()
        .success();
    assert!(!dir.path().join("plots").exists());
}
