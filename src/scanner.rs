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
use super::entry::LazyEntry;
use super::entry::LazyObject;
use super::entry::Span;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;
use super::raw::RawJson;
use super::util::scan_number;
use super::util::scan_string_span;
use super::util::unescape_string;

/// Scan JSON text once, recording the span of every value instead of
/// converting it.
///
/// The returned entry tree holds a back-reference to `buf`: string bodies
/// keep their escape sequences and numbers stay unconverted until
/// accessed. Object keys are the exception and are resolved during the
/// scan. A bare `null` document yields `Ok(None)`; bytes after the first
/// complete top-level value are ignored.
pub fn parse_lazy_entry(buf: &[u8]) -> Result<Option<LazyEntry<'_>>> {
    scan(RawJson::new(buf))
}

pub(crate) fn scan(region: RawJson<'_>) -> Result<Option<LazyEntry<'_>>> {
    let mut scanner = Scanner::new(region);
    scanner.parse()
}

/// Mirrors the eager [`Parser`](crate::parse_value) dispatch and grammar;
/// only the output model differs.
struct Scanner<'a> {
    region: RawJson<'a>,
    idx: usize,
}

impl<'a> Scanner<'a> {
    fn new(region: RawJson<'a>) -> Scanner<'a> {
        Self { region, idx: 0 }
    }

    #[inline]
    fn buf(&self) -> &'a [u8] {
        self.region.data
    }

    fn parse(&mut self) -> Result<Option<LazyEntry<'a>>> {
        self.scan_json_value()
    }

    fn scan_json_value(&mut self) -> Result<Option<LazyEntry<'a>>> {
        self.skip_whitespace();
        let c = self.next()?;
        match c {
            b'n' => self.scan_json_null(),
            b't' => self.scan_json_true().map(Some),
            b'f' => self.scan_json_false().map(Some),
            b'0'..=b'9' | b'-' => self.scan_json_number().map(Some),
            b'"' => self.scan_json_string().map(Some),
            b'[' => self.scan_json_array().map(Some),
            b'{' => self.scan_json_object().map(Some),
            _ => {
                self.step();
                Err(self.error(ParseErrorCode::ExpectedSomeValue))
            }
        }
    }

    #[inline]
    fn next(&mut self) -> Result<&u8> {
        match self.buf().get(self.idx) {
            Some(c) => Ok(c),
            None => Err(self.error(ParseErrorCode::InvalidEOF)),
        }
    }

    #[inline]
    fn must_is(&mut self, c: u8) -> Result<()> {
        match self.buf().get(self.idx) {
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
        if self.idx < self.buf().len() {
            let v = self.buf().get(self.idx).unwrap();
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
        if self.idx + n > self.buf().len() {
            Err(Error::Syntax(ParseErrorCode::InvalidEOF, self.buf().len()))
        } else {
            Ok(())
        }
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while self.idx < self.buf().len() {
            if self.buf()[self.idx] > WHITESPACE_MAX {
                break;
            }
            self.idx += 1;
        }
    }

    fn scan_json_null(&mut self) -> Result<Option<LazyEntry<'a>>> {
        self.ensure_remaining(NULL_LEN)?;
        self.step_by(NULL_LEN);
        Ok(None)
    }

    // Boolean spans record the leading byte only: the accessor compares
    // that one byte against the leading character of `true`.
    fn scan_json_true(&mut self) -> Result<LazyEntry<'a>> {
        let from = self.idx;
        self.ensure_remaining(TRUE_LEN)?;
        self.step_by(TRUE_LEN);
        Ok(LazyEntry::Bool(self.region, Span::new(from, from + 1)))
    }

    fn scan_json_false(&mut self) -> Result<LazyEntry<'a>> {
        let from = self.idx;
        self.ensure_remaining(FALSE_LEN)?;
        self.step_by(FALSE_LEN);
        Ok(LazyEntry::Bool(self.region, Span::new(from, from + 1)))
    }

    /// The grammar tracker runs in full, but the digits are not
    /// converted: the span is tagged Int or Float depending on whether a
    /// decimal point was observed.
    fn scan_json_number(&mut self) -> Result<LazyEntry<'a>> {
        let buf = self.buf();
        let num = scan_number(buf, &mut self.idx)?;
        if num.float {
            Ok(LazyEntry::Float(self.region, num.span))
        } else {
            Ok(LazyEntry::Int(self.region, num.span))
        }
    }

    /// The span covers the raw string body between the quotes, escape
    /// sequences included; de-escaping is deferred to access time.
    fn scan_json_string(&mut self) -> Result<LazyEntry<'a>> {
        self.must_is(b'"')?;
        let buf = self.buf();
        let span = scan_string_span(buf, &mut self.idx)?;
        Ok(LazyEntry::String(self.region, span))
    }

    // Keys are resolved eagerly: the object mapping needs them now.
    fn scan_object_key(&mut self) -> Result<String> {
        self.must_is(b'"')?;
        let buf = self.buf();
        let span = scan_string_span(buf, &mut self.idx)?;
        let key = unescape_string(&buf[span.from..span.to], span.from)?;
        Ok(key.into_owned())
    }

    fn scan_json_array(&mut self) -> Result<LazyEntry<'a>> {
        self.must_is(b'[')?;

        let mut entries = Vec::new();
        self.skip_whitespace();
        if self.check_next(b']') {
            self.step();
            return Ok(LazyEntry::Array(entries));
        }

        loop {
            if let Some(entry) = self.scan_json_value()? {
                entries.push(entry);
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
                    if self.check_next(b']') {
                        self.step();
                        break;
                    }
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedArrayCommaOrEnd)),
            }
        }
        Ok(LazyEntry::Array(entries))
    }

    fn scan_json_object(&mut self) -> Result<LazyEntry<'a>> {
        self.must_is(b'{')?;

        let mut obj = LazyObject::new();
        self.skip_whitespace();
        if self.check_next(b'}') {
            self.step();
            return Ok(LazyEntry::Object(obj));
        }

        loop {
            self.skip_whitespace();
            let c = self.next()?;
            if *c != b'"' {
                return Err(self.error(ParseErrorCode::ExpectedObjectKey));
            }
            let key = self.scan_object_key()?;

            self.skip_whitespace();
            let c = self.next()?;
            if *c != b':' {
                return Err(self.error(ParseErrorCode::ExpectedColon));
            }
            self.step();

            match self.scan_json_value()? {
                Some(entry) => {
                    obj.insert(key, entry);
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
                    if self.check_next(b'}') {
                        self.step();
                        break;
                    }
                }
                _ => return Err(self.error(ParseErrorCode::ExpectedObjectCommaOrEnd)),
            }
        }
        Ok(LazyEntry::Object(obj))
    }
}
