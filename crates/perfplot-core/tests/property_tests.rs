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

//! Property-based tests for loading and CSV round-trips.

use perfplot_core::{to_csv_string, Loader, ResultTable, Schema, Value};
use proptest::prelude::*;

fn schema() -> Schema {
    Schema::new()
        .int("size")
        .string("label")
        .float("time_sec")
        .float("gflops")
}

fn row_strategy() -> impl Strategy<Value = (i64, String, f64, f64)> {
    (
        0i64..1_000_000,
        "[a-z]{1,6}",
        0.0f64..1.0e4,
        -1.0e6f64..1.0e6,
    )
}

fn build(rows: &[(i64, String, f64, f64)]) -> ResultTable {
    ResultTable::from_rows(
        "prop.csv",
        schema().columns().to_vec(),
        rows.iter()
            .map(|(n, l, t, g)| {
                vec![
                    Value::Int(*n),
                    Value::Str(l.clone()),
                    Value::Float(*t),
                    Value::Float(*g),
                ]
            })
            .collect(),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn prop_loader_keeps_row_count(rows in prop::collection::vec(row_strategy(), 1..50)) {
        let csv = to_csv_string(&build(&rows)).unwrap();
        let table = Loader::default()
            .with_schema(schema())
            .read("prop.csv", csv.as_bytes())
            .unwrap();
        prop_assert_eq!(table.len(), rows.len());
        prop_assert_eq!(table.columns().len(), 4);
    }

    #[test]
    fn prop_csv_round_trip_is_exact(rows in prop::collection::vec(row_strategy(), 1..50)) {
        let original = build(&rows);
        let csv = to_csv_string(&original).unwrap();
        let reloaded = Loader::default()
            .with_schema(schema())
            .read("prop.csv", csv.as_bytes())
            .unwrap();
        prop_assert_eq!(reloaded, original);
    }
}
