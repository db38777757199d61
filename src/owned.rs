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

use std::fmt::Display;
use std::str::FromStr;

use crate::entry::LazyEntry;
use crate::error::Error;
use crate::error::Result;
use crate::parse_value;
use crate::RawJson;
use crate::Value;

/// A JSON text region that owns its bytes.
///
/// Construction copies the input, so the region outlives the caller's
/// original data; entries derived through [`OwnedJson::parse_root`]
/// borrow from the wrapper itself.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedJson {
    pub(crate) data: Vec<u8>,
}

impl OwnedJson {
    pub fn new(data: Vec<u8>) -> OwnedJson {
        Self { data }
    }

    /// Creates an OwnedJson by copying a byte slice.
    pub fn from_slice(data: &[u8]) -> OwnedJson {
        Self {
            data: data.to_vec(),
        }
    }

    pub fn as_raw(&self) -> RawJson<'_> {
        RawJson::new(self.data.as_slice())
    }

    pub fn to_vec(self) -> Vec<u8> {
        self.data
    }

    /// Eagerly parse the region into a fully materialized value tree.
    pub fn to_value(&self) -> Result<Option<Value<'_>>> {
        self.as_raw().to_value()
    }

    /// Scan the region once and return the root lazy entry, tied to this
    /// wrapper's borrow.
    pub fn parse_root(&self) -> Result<Option<LazyEntry<'_>>> {
        self.as_raw().parse_root()
    }
}

impl From<&[u8]> for OwnedJson {
    fn from(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl From<Vec<u8>> for OwnedJson {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

/// Parses the text eagerly to validate it, then stores the raw bytes.
impl FromStr for OwnedJson {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_value(s.as_bytes())?;
        Ok(Self {
            data: s.as_bytes().to_vec(),
        })
    }
}

impl AsRef<[u8]> for OwnedJson {
    fn as_ref(&self) -> &[u8] {
        self.data.as_ref()
    }
}

impl Display for OwnedJson {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.to_value() {
            Ok(Some(value)) => write!(f, "{}", value),
            Ok(None) => write!(f, "null"),
            Err(_) => write!(f, "{}", String::from_utf8_lossy(&self.data)),
        }
    }
}
