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

// JSON text constants
pub(crate) const UNICODE_LEN: usize = 4;

// Fixed literal lengths, counted from the leading byte
pub(crate) const NULL_LEN: usize = 4;
pub(crate) const TRUE_LEN: usize = 4;
pub(crate) const FALSE_LEN: usize = 5;

// Bytes 0..=32 are skipped uniformly between values
pub(crate) const WHITESPACE_MAX: u8 = b' ';

// JSON text escape characters constants
pub(crate) const BS: char = '\x5C'; // \\ Backslash
pub(crate) const QU: char = '\x22'; // \" Double quotation mark
pub(crate) const SD: char = '\x2F'; // \/ Slash or divide
pub(crate) const BB: char = '\x08'; // \b Backspace
pub(crate) const FF: char = '\x0C'; // \f Formfeed Page Break
pub(crate) const NN: char = '\x0A'; // \n Newline
pub(crate) const RR: char = '\x0D'; // \r Carriage Return
pub(crate) const TT: char = '\x09'; // \t Horizontal Tab

// Kind names reported by typed accessors
pub(crate) const TYPE_INTEGER: &str = "integer";
pub(crate) const TYPE_FLOAT: &str = "float";
pub(crate) const TYPE_BOOLEAN: &str = "boolean";
pub(crate) const TYPE_STRING: &str = "string";
pub(crate) const TYPE_ARRAY: &str = "array";
pub(crate) const TYPE_OBJECT: &str = "object";

/// Structural delimiter bytes that terminate a number span.
#[inline]
pub(crate) fn is_delimiter(c: u8) -> bool {
    matches!(c, b'{' | b'}' | b'[' | b']' | b':' | b',')
}
