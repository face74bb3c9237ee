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

//! Write result tables back out as CSV or JSON.

use crate::error::{Result, TableError};
use crate::table::ResultTable;
use crate::value::Value;
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Formats one cell for CSV output.
///
/// Floats use the shortest representation that parses back to the same
/// bits, and always keep a decimal point or exponent so a reload infers
/// the float type again.
fn csv_field(value: &Value) -> String {
    match value {
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{:?}", f),
        Value::Str(s) => s.clone(),
    }
}

/// Writes `table` as comma-separated text with a header row.
pub fn write_csv<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(table.column_names())?;
    for row in table.rows() {
        wtr.write_record(row.values().iter().map(csv_field))?;
    }
    wtr.flush().map_err(|e| TableError::Csv(e.into()))?;
    Ok(())
}

/// Renders `table` as a CSV string.
pub fn to_csv_string(table: &ResultTable) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// JSON form of a table: its schema and positional rows, in column order.
pub fn to_json_value(table: &ResultTable) -> serde_json::Value {
    let rows: Vec<&[Value]> = table.rows().map(|r| r.values()).collect();
    json!({
        "name": table.name(),
        "columns": table.columns(),
        "rows": rows,
    })
}

/// Writes `table` as pretty-printed JSON.
pub fn write_json<W: Write>(table: &ResultTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &to_json_value(table))?;
    Ok(())
}

/// Exports a table to `path`, choosing JSON for a `.json` extension and
/// CSV otherwise. An existing file is overwritten.
pub fn export_table(table: &ResultTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| TableError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);

    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        write_json(table, &mut writer)?;
    } else {
        write_csv(table, &mut writer)?;
    }
    writer.flush().map_err(io_err)?;

    info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
