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

use super::constants::*;
use super::entry::Span;
use super::error::Error;
use super::error::ParseErrorCode;
use super::error::Result;

#[allow(clippy::zero_prefixed_literal)]
static HEX: [u8; 256] = {
    const __: u8 = 255; // not a hex digit
    [
        //   1   2   3   4   5   6   7   8   9   A   B   C   D   E   F
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 0
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2
        00, 01, 02, 03, 04, 05, 06, 07, 08, 09, __, __, __, __, __, __, // 3
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 4
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5
        __, 10, 11, 12, 13, 14, 15, __, __, __, __, __, __, __, __, __, // 6
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F
    ]
};

/// Advance `idx` past a string body to the closing unescaped quote and
/// return the span of the raw bytes between the quotes.
///
/// The span is not validated here: it may still contain escape sequences
/// and control bytes. `idx` must point at the first byte after the opening
/// quote and ends up one past the closing quote.
pub(crate) fn scan_string_span(buf: &[u8], idx: &mut usize) -> Result<Span> {
    let from = *idx;
    loop {
        match buf.get(*idx) {
            // an escaped byte can never terminate the string
            Some(b'\\') => *idx += 2,
            Some(b'"') => {
                let to = *idx;
                *idx += 1;
                return Ok(Span::new(from, to));
            }
            Some(_) => *idx += 1,
            None => return Err(Error::Syntax(ParseErrorCode::InvalidEOF, buf.len())),
        }
    }
}

/// Resolve the raw bytes of a string body into text.
///
/// Escape-free input borrows the bytes directly; an accumulating buffer is
/// only allocated once the first backslash is seen. Raw bytes below 0x20
/// are rejected, with the fragment decoded so far attached to the error.
/// `pos` is the absolute offset of `data[0]`, used for error positions.
pub(crate) fn unescape_string(data: &[u8], pos: usize) -> Result<Cow<'_, str>> {
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'\\' => break,
            c if c < 0x20 => {
                let fragment = String::from_utf8_lossy(&data[..i]).into_owned();
                return Err(Error::Syntax(
                    ParseErrorCode::ControlCharacterWhileParsingString(fragment),
                    pos + i,
                ));
            }
            _ => i += 1,
        }
    }
    if i == data.len() {
        let s = std::str::from_utf8(data)
            .map_err(|_| Error::Syntax(ParseErrorCode::InvalidStringValue, pos))?;
        return Ok(Cow::Borrowed(s));
    }

    let mut buf = Vec::with_capacity(data.len());
    buf.extend_from_slice(&data[..i]);
    while i < data.len() {
        let byte = data[i];
        if byte == b'\\' {
            i += 1;
            decode_escape(data, &mut i, pos, &mut buf)?;
        } else if byte < 0x20 {
            let fragment = String::from_utf8_lossy(&buf).into_owned();
            return Err(Error::Syntax(
                ParseErrorCode::ControlCharacterWhileParsingString(fragment),
                pos + i,
            ));
        } else {
            buf.push(byte);
            i += 1;
        }
    }
    let s =
        String::from_utf8(buf).map_err(|_| Error::Syntax(ParseErrorCode::InvalidStringValue, pos))?;
    Ok(Cow::Owned(s))
}

/// Decode one escape sequence. `i` points at the byte after the backslash
/// and is advanced past everything consumed; the resolved character is
/// appended to `buf` as UTF-8.
fn decode_escape(data: &[u8], i: &mut usize, pos: usize, buf: &mut Vec<u8>) -> Result<()> {
    let Some(&byte) = data.get(*i) else {
        return Err(Error::Syntax(ParseErrorCode::InvalidEOF, pos + *i));
    };
    *i += 1;
    let c = match byte {
        b'\\' => BS,
        b'"' => QU,
        b'/' => SD,
        b'b' => BB,
        b'f' => FF,
        b'n' => NN,
        b'r' => RR,
        b't' => TT,
        b'u' => {
            let n1 = decode_hex_escape(data, i, pos)?;
            match n1 {
                0xDC00..=0xDFFF => {
                    return Err(Error::Syntax(
                        ParseErrorCode::UnpairedSurrogate(n1),
                        pos + *i,
                    ));
                }

                // Non-BMP characters are encoded as two hex escapes
                // representing UTF-16 surrogates, which must pair up.
                0xD800..=0xDBFF => {
                    if data.get(*i) != Some(&b'\\') || data.get(*i + 1) != Some(&b'u') {
                        return Err(Error::Syntax(
                            ParseErrorCode::UnpairedSurrogate(n1),
                            pos + *i,
                        ));
                    }
                    *i += 2;
                    let n2 = decode_hex_escape(data, i, pos)?;
                    if !(0xDC00..=0xDFFF).contains(&n2) {
                        return Err(Error::Syntax(
                            ParseErrorCode::InvalidSurrogatePair(n1, n2),
                            pos + *i,
                        ));
                    }

                    #[allow(clippy::precedence)]
                    let n = (((n1 - 0xD800) as u32) << 10 | (n2 - 0xDC00) as u32) + 0x1_0000;

                    char::from_u32(n).ok_or(Error::Syntax(
                        ParseErrorCode::InvalidSurrogatePair(n1, n2),
                        pos + *i,
                    ))?
                }

                n => char::from_u32(n as u32).ok_or(Error::Syntax(
                    ParseErrorCode::UnpairedSurrogate(n),
                    pos + *i,
                ))?,
            }
        }
        other => {
            return Err(Error::Syntax(
                ParseErrorCode::InvalidEscaped(other),
                pos + *i - 1,
            ));
        }
    };
    let mut tmp = [0u8; 4];
    buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
    Ok(())
}

#[inline]
fn decode_hex_val(val: u8) -> Option<u16> {
    let n = HEX[val as usize] as u16;
    if n == 255 {
        None
    } else {
        Some(n)
    }
}

/// Decode 4 hex digits starting at `i` into one UTF-16 code unit.
#[inline]
fn decode_hex_escape(data: &[u8], i: &mut usize, pos: usize) -> Result<u16> {
    if data.len() < *i + UNICODE_LEN {
        return Err(Error::Syntax(
            ParseErrorCode::UnexpectedEndOfHexEscape,
            pos + data.len(),
        ));
    }
    let mut n = 0;
    for _ in 0..UNICODE_LEN {
        let number = data[*i];
        match decode_hex_val(number) {
            Some(hex) => n = (n << 4) + hex,
            None => return Err(Error::Syntax(ParseErrorCode::InvalidHex(number), pos + *i)),
        }
        *i += 1;
    }
    Ok(n)
}

/// The span of a number plus the kind detected while scanning it.
#[derive(Debug)]
pub(crate) struct NumberSpan {
    pub(crate) span: Span,
    pub(crate) float: bool,
}

#[derive(PartialEq)]
enum NumberState {
    Operand,
    DecimalPoint,
    Exponent,
    ExponentSign,
}

/// Walk a number with the 4-state grammar tracker, advancing `idx` to the
/// first terminator byte (which stays unconsumed).
///
/// Exponent syntax is validated in full and then rejected: the grammar
/// tracker reports `1e+5` at the right offset but the crate does not
/// convert exponent numbers.
pub(crate) fn scan_number(buf: &[u8], idx: &mut usize) -> Result<NumberSpan> {
    let from = *idx;
    if let Some(b'-') = buf.get(*idx) {
        *idx += 1;
    }
    let mut state = NumberState::Operand;
    // digits seen since the last control character
    let mut digits = false;
    loop {
        let Some(&c) = buf.get(*idx) else {
            break;
        };
        match c {
            b'0'..=b'9' => digits = true,
            b'.' => {
                if state != NumberState::Operand || !digits {
                    return Err(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx));
                }
                state = NumberState::DecimalPoint;
                digits = false;
            }
            b'e' | b'E' => {
                if !digits || matches!(state, NumberState::Exponent | NumberState::ExponentSign) {
                    return Err(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx));
                }
                state = NumberState::Exponent;
                digits = false;
            }
            b'+' | b'-' => {
                if state != NumberState::Exponent || digits {
                    return Err(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx));
                }
                state = NumberState::ExponentSign;
            }
            c if c <= WHITESPACE_MAX || is_delimiter(c) => break,
            _ => return Err(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx)),
        }
        *idx += 1;
    }
    match state {
        NumberState::Operand => {
            if !digits {
                return Err(Error::Syntax(ParseErrorCode::InvalidNumberValue, *idx));
            }
            Ok(NumberSpan {
                span: Span::new(from, *idx),
                float: false,
            })
        }
        NumberState::DecimalPoint => Ok(NumberSpan {
            span: Span::new(from, *idx),
            float: true,
        }),
        NumberState::Exponent | NumberState::ExponentSign => Err(Error::Syntax(
            ParseErrorCode::ExponentNotSupported,
            *idx,
        )),
    }
}

/// Convert an integer span by manual digit accumulation.
///
/// Fixed-width arithmetic: digit runs longer than an `i64` silently wrap.
/// `i64::MIN` round-trips through the wrap-then-negate path.
pub(crate) fn parse_integer(data: &[u8]) -> i64 {
    let (negative, digits) = match data.first() {
        Some(b'-') => (true, &data[1..]),
        _ => (false, data),
    };
    let mut value = 0_i64;
    for c in digits {
        value = value.wrapping_mul(10).wrapping_add((c - b'0') as i64);
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

/// Convert a float span.
pub(crate) fn parse_float(data: &[u8], pos: usize) -> Result<f32> {
    fast_float2::parse::<f32, _>(data)
        .map_err(|_| Error::Syntax(ParseErrorCode::InvalidNumberValue, pos))
}
