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

use std::borrow::Cow;
use std::collections::BTreeMap;

use super::constants::*;
use super::error::Error;
use super::error::Result;
use super::number::Number;
use super::raw::RawJson;
use super::util::parse_float;
use super::util::parse_integer;
use super::util::unescape_string;
use super::value::Object;
use super::value::Value;

/// A half-open `[from, to)` byte-offset range identifying where a value's
/// raw text lives in a buffer region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub from: usize,
    pub to: usize,
}

impl Span {
    pub(crate) fn new(from: usize, to: usize) -> Span {
        Self { from, to }
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }
}

pub type LazyObject<'a> = BTreeMap<String, LazyEntry<'a>>;

/// A scanned but unconverted JSON value: a read-only view into a buffer
/// region.
///
/// Scalar variants carry the owning region and the span of their raw
/// text; string spans still contain escape sequences, and conversion
/// (with all escape and control-character validation) happens on access.
/// Container variants own their children, built bottom-up during the one
/// scan pass. A conversion error on one entry does not affect siblings.
///
/// Entries borrow the region, so the borrow checker pins the backing
/// bytes for as long as any entry is alive. Nothing is mutated after the
/// scan: a completed tree can be shared across threads freely.
#[derive(Debug, Clone, PartialEq)]
pub enum LazyEntry<'a> {
    /// A number span without a decimal point
    Int(RawJson<'a>, Span),
    /// A number span with a decimal point
    Float(RawJson<'a>, Span),
    /// A literal span, recording the leading byte position only
    Bool(RawJson<'a>, Span),
    /// A string body span, escape sequences unresolved
    String(RawJson<'a>, Span),
    /// Child entries in document order, nulls dropped
    Array(Vec<LazyEntry<'a>>),
    /// Resolved keys mapped to child entries, nulls dropped
    Object(LazyObject<'a>),
}

impl<'a> LazyEntry<'a> {
    /// The kind name reported in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            LazyEntry::Int(_, _) => TYPE_INTEGER,
            LazyEntry::Float(_, _) => TYPE_FLOAT,
            LazyEntry::Bool(_, _) => TYPE_BOOLEAN,
            LazyEntry::String(_, _) => TYPE_STRING,
            LazyEntry::Array(_) => TYPE_ARRAY,
            LazyEntry::Object(_) => TYPE_OBJECT,
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::UnexpectedType {
            expected,
            actual: self.kind(),
        }
    }

    /// Convert an integer entry by digit accumulation over its span.
    pub fn to_i64(&self) -> Result<i64> {
        match self {
            LazyEntry::Int(region, span) => {
                Ok(parse_integer(&region.data[span.from..span.to]))
            }
            _ => Err(self.mismatch(TYPE_INTEGER)),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.to_i64().ok()
    }

    /// Convert a float entry from its span.
    pub fn to_f32(&self) -> Result<f32> {
        match self {
            LazyEntry::Float(region, span) => {
                parse_float(&region.data[span.from..span.to], span.from)
            }
            _ => Err(self.mismatch(TYPE_FLOAT)),
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.to_f32().ok()
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self {
            LazyEntry::Bool(region, span) => Ok(region.data[span.from] == b't'),
            _ => Err(self.mismatch(TYPE_BOOLEAN)),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.to_bool().ok()
    }

    /// Resolve a string entry's span into text.
    ///
    /// Escape and control-character validation runs here, not during the
    /// scan: a malformed escape surfaces as an error on this call and
    /// leaves sibling entries accessible. Escape-free spans borrow from
    /// the backing region.
    pub fn to_str(&self) -> Result<Cow<'a, str>> {
        match self {
            LazyEntry::String(region, span) => {
                unescape_string(&region.data[span.from..span.to], span.from)
            }
            _ => Err(self.mismatch(TYPE_STRING)),
        }
    }

    pub fn as_str(&self) -> Option<Cow<'a, str>> {
        self.to_str().ok()
    }

    pub fn to_object(&self) -> Result<&LazyObject<'a>> {
        match self {
            LazyEntry::Object(obj) => Ok(obj),
            _ => Err(self.mismatch(TYPE_OBJECT)),
        }
    }

    pub fn as_object(&self) -> Option<&LazyObject<'a>> {
        self.to_object().ok()
    }

    pub fn to_array(&self) -> Result<&Vec<LazyEntry<'a>>> {
        match self {
            LazyEntry::Array(entries) => Ok(entries),
            _ => Err(self.mismatch(TYPE_ARRAY)),
        }
    }

    pub fn as_array(&self) -> Option<&Vec<LazyEntry<'a>>> {
        self.to_array().ok()
    }

    pub fn is_object(&self) -> bool {
        matches!(self, LazyEntry::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, LazyEntry::Array(_))
    }

    /// Look up an object field by key.
    pub fn get(&self, name: &str) -> Result<&LazyEntry<'a>> {
        let obj = self.to_object()?;
        obj.get(name)
            .ok_or_else(|| Error::FieldNotFound(name.to_string()))
    }

    pub fn get_opt(&self, name: &str) -> Option<&LazyEntry<'a>> {
        self.as_object().and_then(|obj| obj.get(name))
    }

    /// Look up an array element by index, bounds checked.
    pub fn get_index(&self, index: usize) -> Result<&LazyEntry<'a>> {
        let entries = self.to_array()?;
        entries.get(index).ok_or(Error::IndexOutOfRange(index))
    }

    pub fn get_index_opt(&self, index: usize) -> Option<&LazyEntry<'a>> {
        self.as_array().and_then(|entries| entries.get(index))
    }

    /// Combined lookup: field `name` converted as a string, without
    /// handing out the intermediate entry.
    pub fn get_str(&self, name: &str) -> Result<Cow<'a, str>> {
        self.get(name)?.to_str()
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        self.get(name)?.to_i64()
    }

    pub fn get_f32(&self, name: &str) -> Result<f32> {
        self.get(name)?.to_f32()
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        self.get(name)?.to_bool()
    }

    /// Recursively convert the whole subtree into the shape the eager
    /// parser produces.
    ///
    /// This pays lazy-access overhead per node instead of one sequential
    /// pass, so it can be much slower than eager parsing for large
    /// subtrees; reach for it on small or targeted ones.
    pub fn parsed(&self) -> Result<Value<'a>> {
        match self {
            LazyEntry::Int(_, _) => Ok(Value::Number(Number::Int64(self.to_i64()?))),
            LazyEntry::Float(_, _) => Ok(Value::Number(Number::Float32(self.to_f32()?))),
            LazyEntry::Bool(_, _) => Ok(Value::Bool(self.to_bool()?)),
            LazyEntry::String(_, _) => Ok(Value::String(self.to_str()?)),
            LazyEntry::Array(entries) => {
                let mut values = Vec::with_capacity(entries.len());
                for entry in entries {
                    values.push(entry.parsed()?);
                }
                Ok(Value::Array(values))
            }
            LazyEntry::Object(obj) => {
                let mut map = Object::new();
                for (key, entry) in obj {
                    map.insert(key.clone(), entry.parsed()?);
                }
                Ok(Value::Object(map))
            }
        }
    }
}
