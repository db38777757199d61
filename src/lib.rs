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

//! `lazyjson` is a decode-only `JSON` parsing library offering two
//! complementary strategies over the same byte input.
//!
//! ## Engines
//!
//! - **Eager**: [`parse_value`] walks the buffer once and returns a fully
//!   materialized [`Value`] tree with no further dependency on the input
//!   (escape-free strings borrow, everything else is owned).
//! - **Lazy**: [`parse_lazy_entry`] walks the buffer once but returns a
//!   [`LazyEntry`] tree recording only the *span* of each value; the cost
//!   of converting a string or number is deferred until a caller actually
//!   accesses that field.
//!
//! Both engines share the same grammar: whitespace is any byte `0..=32`,
//! trailing commas before `}`/`]` are tolerated, `null` members are
//! dropped from containers rather than stored, duplicate object keys are
//! resolved last-write-wins, and bytes after the first complete top-level
//! value are ignored. Numbers without a decimal point convert to `i64`,
//! numbers with one convert to `f32`, and exponent notation is rejected.
//!
//! ## Buffer ownership
//!
//! [`RawJson`] borrows caller memory with no copy; every entry derived
//! from it carries the same lifetime, so the borrow checker enforces the
//! buffer-outlives-entries contract at compile time. [`OwnedJson`] copies
//! the input and hands out entries tied to its own borrow instead.
//!
//! ```
//! use lazyjson::parse_lazy_entry;
//!
//! let data = br#"[5, 5.5, "a\nb", {"k": "v"}]"#;
//! let root = parse_lazy_entry(data).unwrap().unwrap();
//! assert_eq!(root.get_index(0).unwrap().to_i64().unwrap(), 5);
//! assert_eq!(root.get_index(3).unwrap().get_str("k").unwrap(), "v");
//! ```

#![allow(clippy::uninlined_format_args)]

mod constants;
mod entry;
mod error;
mod from;
mod number;
mod owned;
mod parser;
mod raw;
mod scanner;
mod util;
mod value;

pub use entry::LazyEntry;
pub use entry::LazyObject;
pub use entry::Span;
pub use error::Error;
pub use error::ParseErrorCode;
pub use error::Result;
#[allow(unused_imports)]
pub use from::*;
pub use number::Number;
pub use owned::OwnedJson;
pub use parser::parse_value;
pub use raw::RawJson;
pub use scanner::parse_lazy_entry;
pub use value::Object;
pub use value::Value;
