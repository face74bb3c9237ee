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

//! Typed scalar values held in result table cells.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Declared type of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// Categorical string label.
    Str,
}

impl ColumnType {
    /// True for `Int` and `Float`.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Int | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "integer",
            ColumnType::Float => "float",
            ColumnType::Str => "string",
        };
        f.write_str(name)
    }
}

/// A single cell value.
///
/// Serializes untagged, so JSON exports read as plain numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl Value {
    /// The type this value carries.
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Int(_) => ColumnType::Int,
            Value::Float(_) => ColumnType::Float,
            Value::Str(_) => ColumnType::Str,
        }
    }

    /// Numeric view of the value. Strings yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(_) => None,
        }
    }

    /// Integer view. Floats convert only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            _ => None,
        }
    }

    /// String view, for string cells only.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Parses a raw field as `ty`.
    ///
    /// Returns `None` when the text is not a valid literal of that type.
    pub fn parse_as(raw: &str, ty: ColumnType) -> Option<Value> {
        match ty {
            ColumnType::Int => raw.parse::<i64>().ok().map(Value::Int),
            ColumnType::Float => raw.parse::<f64>().ok().map(Value::Float),
            ColumnType::Str => Some(Value::Str(raw.to_string())),
        }
    }

    /// Converts an already typed value to `ty`.
    ///
    /// Int widens to Float, integral Float narrows to Int, numbers stringify,
    /// and strings are parsed. Returns `None` when no lossless conversion
    /// exists.
    pub fn coerce(&self, ty: ColumnType) -> Option<Value> {
        match (self, ty) {
            (Value::Int(_), ColumnType::Int)
            | (Value::Float(_), ColumnType::Float)
            | (Value::Str(_), ColumnType::Str) => Some(self.clone()),
            (Value::Int(i), ColumnType::Float) => Some(Value::Float(*i as f64)),
            (Value::Float(_), ColumnType::Int) => self.as_i64().map(Value::Int),
            (Value::Int(_) | Value::Float(_), ColumnType::Str) => Some(Value::Str(self.to_string())),
            (Value::Str(s), ty) => Value::parse_as(s, ty),
        }
    }

    /// Total order used for sorting axis values.
    ///
    /// Numbers compare numerically regardless of Int/Float, strings compare
    /// lexically, and every number sorts before every string.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.as_str().cmp(&other.as_str()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

/// Infers the narrowest column type that every sample parses as.
///
/// An empty sample set infers `Str`.
pub fn infer_type<'a, I>(samples: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_any = false;
    let mut all_int = true;
    let mut all_float = true;

    for raw in samples {
        seen_any = true;
        if all_int && raw.parse::<i64>().is_err() {
            all_int = false;
        }
        if raw.parse::<f64>().is_err() {
            all_float = false;
            break;
        }
    }

    match (seen_any, all_int, all_float) {
        (false, _, _) => ColumnType::Str,
        (true, true, _) => ColumnType::Int,
        (true, false, true) => ColumnType::Float,
        _ => ColumnType::Str,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_type() {
        assert_eq!(infer_type(["1", "2", "3"]), ColumnType::Int);
        assert_eq!(infer_type(["1", "2.5"]), ColumnType::Float);
        assert_eq!(infer_type(["ijk", "ikj"]), ColumnType::Str);
        assert_eq!(infer_type(["1", "ikj"]), ColumnType::Str);
        assert_eq!(infer_type(std::iter::empty::<&str>()), ColumnType::Str);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(Value::Int(3).coerce(ColumnType::Float), Some(Value::Float(3.0)));
        assert_eq!(Value::Float(4.0).coerce(ColumnType::Int), Some(Value::Int(4)));
        assert_eq!(Value::Float(4.5).coerce(ColumnType::Int), None);
        assert_eq!(
            Value::Str("0.25".to_string()).coerce(ColumnType::Float),
            Some(Value::Float(0.25))
        );
        assert_eq!(Value::Str("ijk".to_string()).coerce(ColumnType::Int), None);
        assert_eq!(
            Value::Int(64).coerce(ColumnType::Str),
            Some(Value::Str("64".to_string()))
        );
    }

    #[test]
    fn test_total_cmp_mixes_int_and_float() {
        assert_eq!(Value::Int(2).total_cmp(&Value::Float(1.5)), Ordering::Greater);
        assert_eq!(Value::Float(2.0).total_cmp(&Value::Int(2)), Ordering::Equal);
        assert_eq!(Value::Int(9).total_cmp(&"a".into()), Ordering::Less);
        assert_eq!(Value::from("ijk").total_cmp(&"ikj".into()), Ordering::Less);
    }
}
