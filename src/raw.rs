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

use super::entry::LazyEntry;
use super::error::Result;
use super::parser::parse_value;
use super::scanner;
use super::value::Value;

/// A JSON text region wrapped around a borrowed, immutable slice of bytes.
///
/// It does not own the underlying data, allowing both engines to run
/// *without copying*. Every lazy entry derived from a `RawJson` borrows
/// the same lifetime, so the compiler keeps the caller's memory alive and
/// unmodified for as long as any entry is in use: the zero-copy mode
/// needs no unchecked contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawJson<'a> {
    /// The underlying byte slice holding the JSON text.
    pub(crate) data: &'a [u8],
}

impl<'a> RawJson<'a> {
    /// Creates a new RawJson from a byte slice, without copying.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Checks if the region is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of the region in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Eagerly parse the region into a fully materialized value tree.
    pub fn to_value(&self) -> Result<Option<Value<'a>>> {
        parse_value(self.data)
    }

    /// Scan the region once and return the root lazy entry.
    pub fn parse_root(&self) -> Result<Option<LazyEntry<'a>>> {
        scanner::scan(*self)
    }
}

/// Converts a borrowed byte slice into a RawJson.
/// This provides a convenient way to create a RawJson from existing data without copying.
impl<'a> From<&'a [u8]> for RawJson<'a> {
    fn from(data: &'a [u8]) -> Self {
        Self { data }
    }
}

/// Allows accessing the underlying byte slice as a reference.
/// This enables easy integration with functions that expect a &[u8].
impl AsRef<[u8]> for RawJson<'_> {
    fn as_ref(&self) -> &[u8] {
        self.data
    }
}
