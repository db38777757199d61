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

use super::constants::*;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;
use super::number::Number;
use super::util::parse_float;
use super::util::parse_integer;
use super::util::scan_number;
use super::util::scan_string_span;
use super::util::unescape_string;
use super::value::Object;
use super::value::Value;

/// Eagerly parse JSON text into a fully materialized [`Value`] tree.
///
/// The returned tree owns no reference back into `buf` except for
/// escape-free strings, which borrow. A bare `null` document yields
/// `Ok(None)`; null members of containers are dropped. Bytes after the
/// first complete top-level value are ignored.
pub fn parse_value(buf: &[u8]) -> Result<Option<Value<'_>>> {
    let mut parser = Parser::new(buf);
    parser.parse()
}

struct Parser<'a> {
    buf: &'a [u8],
    idx: usize,
}

impl<'a> Parser<'a> {
    fn new(buf: &'a [u8]) -> Parser<'a> {
        Self { buf, idx: 0 }
    }

    fn parse(&mut self) -> Result<Option<Value<'a>>> {
        self.parse_json_value()
    }

    fn parse_json_value(&mut self) -> Result<Option<Value<'a>>> {
        self.skip_whitespace();
        let c = self.next()?;
        match c {
            b'n' => self.parse_json_null(),
            b't' => self.parse_json_true().map(Some),
            b'f' => self.parse_json_false().map(Some),
            b'0'..=b'9' | b'-' => self.parse_json_number().map(Some),
            b'"' => self.parse_json_string().map(Some),
            b'[' => self.parse_json_array().map(Some),
            b'{' => self.parse_json_object().map(Some),
            _ => {
                self.step();
                Err(self.error(ParseErrorCode::ExpectedSomeValue))
            }
        }
    }

    #[inline]
    fn next(&mut self) -> Result<&u8> {
        match self.buf.get(self.idx) {
            Some(c) => Ok(c),
            None => Err(self.error(ParseErrorCode::InvalidEOF)),
        }
    }

    #[inline]
    fn must_is(&mut self, c: u8) -> Result<()> {
        match self.buf.get(self.idx) {
            Some(v) => {
                self.step();
                if v == &c {
                    Ok(())
                } else {
                    Err(self.error(ParseErrorCode::ExpectedSomeValue))
                }
            }
            None => Err(self.error(ParseErrorCode::InvalidEOF)),
        }
    }

    #[inline]
    fn check_next(&mut self, c: u8) -> bool {
        if self.idx < self.buf.len() {
            let v = self.buf.get(self.idx).unwrap();
            if v == &c {
                return true;
            }
        }
        false
    }

    #[inline]
    fn step(&mut self) {
        self.idx += 1;
    }

    #[inline]
    fn step_by(&mut self, n: usize) {
        self.idx += n;
    }

    fn error(&self, code: ParseErrorCode) -> Error {
        let pos = self.idx;
        Error::Syntax(code, pos)
    }

    #[inline]
    fn ensure_remaining(&self, n: usize) -> Result<()> {
        if self.idx + n > self.buf.len() {
            Err(Error::Syntax(ParseErrorCode::InvalidEOF, self.buf.len()))
        } else {
            Ok(())
        }
    }

    // Every byte value 0..=32 is skippable, not just the four JSON
    // whitespace characters.
    #[inline]
    fn skip_whitespace(&mut self) {
        while self.idx < self.buf.len() {
            if self.buf[self.idx] > WHITESPACE_MAX {
                break;
            }
            self.idx += 1;
        }
    }

    // The literal spelling past the leading byte is not re-validated:
    // only its fixed length is consumed.
    fn parse_json_null(&mut self) -> Result<Option<Value<'a>>> {
        self.ensure_remaining(NULL_LEN)?;
        self.step_by(NULL_LEN);
        Ok(None)
    }

    fn parse_json_true(&mut self) -> Result<Value<'a>> {
        self.ensure_remaining(TRUE_LEN)?;
        self.step_by(TRUE_LEN);
        Ok(Value::Bool(true))
    }

    fn parse_json_false(&mut self) -> Result<Value<'a>> {
        self.ensure_remaining(FALSE_LEN)?;
        self.step_by(FALSE_LEN);
        Ok(Value::Bool(false))
    }

    /// Scan the number span with the shared grammar tracker, then convert
    /// it: decimal-point numbers become `f32`, everything else becomes
    /// `i64` by manual digit accumulation. Exponent numbers were already
    /// rejected by the tracker.
    fn parse_json_number(&mut self) -> Result<Value<'a>> {
        let num = scan_number(self.buf, &mut self.idx)?;
        let data = &self.buf[num.span.from..num.span.to];
        if num.float {
            let v = parse_float(data, num.span.from)?;
            Ok(Value::Number(Number::Float32(v)))
        } else {
            Ok(Value::Number(Number::Int64(parse_integer(data))))
        }
    }

    /// Two-pass string parse: locate the closing unescaped quote first,
    /// then resolve escapes. Escape-free strings borrow the input span
    /// without allocating.
    fn parse_json_string(&mut self) -> Result<Value<'a>> {
        self.must_is(b'"')?;
        let span = scan_string_span(self.buf, &mut self.idx)?;
        let s = unescape_string(&self.buf[span.from..span.to], span.from)?;
        Ok(Value::String(s))
    }

    fn parse_object_key(&mut self) -> Result<String> {
        self.must_is(b'"')?;
        let span = scan_string_span(self.buf, &mut self.idx)?;
        let key = unescape_string(&self.buf[span.from..span.to], span.from)?;
        Ok(key.into_owned())
    }

    fn parse_json_array(&mut self) -> Result<Value<'a>> {
        self.must_is(b'[')?;

        let mut values = Vec::new();
        self.skip_whitespace();
        if self.check_next(b']') {
            self.step();
            return Ok(Value::Array(values));
        }

        loop {
            // null elements are dropped, shifting the indices of
            // everything after them
            if let Some(value) = self.parse_json_value()? {
                values.push(value);
            }

            self.skip_whitespace();
            let c = self.next()?;
            match c {
                b']' => {
                    self.step();
                    break;
                }
                b',' => {
                    self.step();
                    self.skip_whitespace();
                    // trailing comma before the closing bracket
                    if self.check_next(b']') {
                        self.step();
                        break;
                    }
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedArrayCommaOrEnd)),
            }
        }
        Ok(Value::Array(values))
    }

    fn parse_json_object(&mut self) -> Result<Value<'a>> {
        self.must_is(b'{')?;

        let mut obj = Object::new();
        self.skip_whitespace();
        if self.check_next(b'}') {
            self.step();
            return Ok(Value::Object(obj));
        }

        loop {
            self.skip_whitespace();
            let c = self.next()?;
            if *c != b'"' {
                return Err(self.error(ParseErrorCode::ExpectedObjectKey));
            }
            let key = self.parse_object_key()?;

            self.skip_whitespace();
            let c = self.next()?;
            if *c != b':' {
                return Err(self.error(ParseErrorCode::ExpectedColon));
            }
            self.step();

            // a null member removes the key instead of storing a
            // placeholder; later duplicates overwrite earlier ones
            match self.parse_json_value()? {
                Some(value) => {
                    obj.insert(key, value);
                }
                None => {
                    obj.remove(&key);
                }
            }

            self.skip_whitespace();
            let c = self.next()?;
            match c {
                b'}' => {
                    self.step();
                    break;
                }
                b',' => {
                    self.step();
                    self.skip_whitespace();
                    // trailing comma before the closing brace
                    if self.check_next(b'}') {
                        self.step();
                        break;
                    }
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }
        Ok(Value::Object(obj))
    }
}
