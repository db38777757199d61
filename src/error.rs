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
use std::fmt::Formatter;

pub type Result<T> = std::result::Result<T, Error>;

/// What went wrong while scanning JSON text, without the byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorCode {
    InvalidEOF,
    ExpectedSomeValue,
    ExpectedColon,
    ExpectedObjectKey,
    ExpectedObjectCommaOrEnd,
    ExpectedArrayCommaOrEnd,
    InvalidStringValue,
    InvalidEscaped(u8),
    InvalidHex(u8),
    UnexpectedEndOfHexEscape,
    UnpairedSurrogate(u16),
    InvalidSurrogatePair(u16, u16),
    // carries the string fragment decoded before the offending byte
    ControlCharacterWhileParsingString(String),
    InvalidNumberValue,
    ExponentNotSupported,
}

impl Display for ParseErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseErrorCode::InvalidEOF => write!(f, "EOF while parsing a value"),
            ParseErrorCode::ExpectedSomeValue => write!(f, "expected value"),
            ParseErrorCode::ExpectedColon => write!(f, "expected `:`"),
            ParseErrorCode::ExpectedObjectKey => write!(f, "expected object key"),
            ParseErrorCode::ExpectedObjectCommaOrEnd => write!(f, "expected `,` or `}}`"),
            ParseErrorCode::ExpectedArrayCommaOrEnd => write!(f, "expected `,` or `]`"),
            ParseErrorCode::InvalidStringValue => write!(f, "invalid string"),
            ParseErrorCode::InvalidEscaped(c) => {
                write!(f, "invalid escaped character `{}`", char::from(*c))
            }
            ParseErrorCode::InvalidHex(c) => write!(f, "invalid hex digit `{}`", char::from(*c)),
            ParseErrorCode::UnexpectedEndOfHexEscape => write!(f, "unexpected end of hex escape"),
            ParseErrorCode::UnpairedSurrogate(n) => {
                write!(f, "unpaired surrogate \\u{:04X}", n)
            }
            ParseErrorCode::InvalidSurrogatePair(n1, n2) => {
                write!(f, "invalid surrogate pair \\u{:04X}\\u{:04X}", n1, n2)
            }
            ParseErrorCode::ControlCharacterWhileParsingString(fragment) => {
                write!(f, "unescaped control character after {:?}", fragment)
            }
            ParseErrorCode::InvalidNumberValue => write!(f, "invalid number"),
            ParseErrorCode::ExponentNotSupported => {
                write!(f, "exponent number is not supported")
            }
        }
    }
}

/// Errors returned by the parse engines and by lazy entry accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Malformed JSON text, with the byte offset of the offending position.
    Syntax(ParseErrorCode, usize),
    /// A typed accessor was invoked against a mismatched entry kind.
    UnexpectedType {
        expected: &'static str,
        actual: &'static str,
    },
    /// Object lookup by a key that is not present.
    FieldNotFound(String),
    /// Array lookup past the end of the element sequence.
    IndexOutOfRange(usize),
    /// Raw bytes failed UTF-8 conversion.
    InvalidUtf8,
    Message(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Syntax(code, pos) => write!(f, "{}, pos {}", code, pos),
            Error::UnexpectedType { expected, actual } => {
                write!(f, "incorrect type requested, expected {expected} but value is {actual}")
            }
            Error::FieldNotFound(name) => write!(f, "field `{}` not found", name),
            Error::IndexOutOfRange(index) => write!(f, "index {} out of range", index),
            Error::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            Error::Message(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::str::Utf8Error> for Error {
    fn from(_: std::str::Utf8Error) -> Error {
        Error::InvalidUtf8
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(_: std::string::FromUtf8Error) -> Error {
        Error::InvalidUtf8
    }
}
