// Copyright 2023 Datafuse Labs.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use ordered_float::OrderedFloat;
use serde::ser::Serialize;
use serde::ser::Serializer;

/// Represents a JSON number.
///
/// Numbers without a decimal point are 64-bit signed integers; numbers
/// with one are single-precision floats. Exponent notation is not
/// representable (the parsers reject it).
#[derive(Debug, Clone, Copy)]
pub enum Number {
    /// 64-bit signed integer
    Int64(i64),
    /// single-precision float
    Float32(f32),
}

impl Number {
    /// Returns the i64 representation of the number, if possible.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Int64(v) => Some(*v),
            Number::Float32(_) => None,
        }
    }

    /// Returns the f32 representation of the number, if possible.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Number::Int64(_) => None,
            Number::Float32(v) => Some(*v),
        }
    }

    /// Returns the f64 representation of the number.
    ///
    /// This method always returns a value, but may lose precision for
    /// very large integers.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int64(v) => *v as f64,
            Number::Float32(v) => *v as f64,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Number::Int64(l), Number::Int64(r)) => l.cmp(r),
            (l, r) => OrderedFloat(l.as_f64()).cmp(&OrderedFloat(r.as_f64())),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Number::Int64(v) => {
                let mut buffer = itoa::Buffer::new();
                let s = buffer.format(*v);
                write!(f, "{}", s)
            }
            Number::Float32(v) => {
                let mut buffer = ryu::Buffer::new();
                let s = buffer.format(*v);
                write!(f, "{}", s)
            }
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Number::Int64(v) => serializer.serialize_i64(*v),
            Number::Float32(v) => serializer.serialize_f32(*v),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int64(v)
    }
}

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float32(v)
    }
}
