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

use core::iter::FromIterator;
use std::borrow::Cow;
use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::value::Object;
use crate::value::Value;
use crate::Number;

macro_rules! from_signed_integer {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::Int64(n as i64))
                }
            }
        )*
    };
}

macro_rules! from_unsigned_integer {
    ($($ty:ident)*) => {
        $(
            impl<'a> From<$ty> for Value<'a> {
                fn from(n: $ty) -> Self {
                    Value::Number(Number::Int64(n as i64))
                }
            }
        )*
    };
}

from_signed_integer! {
    i8 i16 i32 i64
}
from_unsigned_integer! {
    u8 u16 u32
}

impl<'a> From<f32> for Value<'a> {
    fn from(n: f32) -> Self {
        Value::Number(Number::Float32(n))
    }
}

impl<'a> From<bool> for Value<'a> {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl<'a> From<String> for Value<'a> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        Value::String(s)
    }
}

impl<'a> From<Number> for Value<'a> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl<'a, T: Into<Value<'a>>> From<Vec<T>> for Value<'a> {
    fn from(vals: Vec<T>) -> Self {
        Value::Array(vals.into_iter().map(Into::into).collect())
    }
}

impl<'a, V: Into<Value<'a>>> From<BTreeMap<String, V>> for Value<'a> {
    fn from(map: BTreeMap<String, V>) -> Self {
        Value::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<'a, T: Into<Value<'a>>> FromIterator<T> for Value<'a> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl Value<'_> {
    /// Convert a `serde_json::Value`, applying the same null-dropping
    /// rules as the parsers: a null input yields `None` and null members
    /// of containers are omitted.
    pub fn from_serde(value: &JsonValue) -> Option<Value<'static>> {
        match value {
            JsonValue::Null => None,
            JsonValue::Bool(v) => Some(Value::Bool(*v)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Number(Number::Int64(i)))
                } else {
                    n.as_f64()
                        .map(|f| Value::Number(Number::Float32(f as f32)))
                }
            }
            JsonValue::String(s) => Some(Value::String(Cow::Owned(s.clone()))),
            JsonValue::Array(arr) => Some(Value::Array(
                arr.iter().filter_map(Value::from_serde).collect(),
            )),
            JsonValue::Object(obj) => Some(Value::Object(
                obj.iter()
                    .filter_map(|(k, v)| Value::from_serde(v).map(|v| (k.clone(), v)))
                    .collect::<Object<'static>>(),
            )),
        }
    }
}
