// SPDX-License-Identifier: Apache-2.0

use alloc::collections::TryReserveError;

/// Errors that can occur while parsing a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A literal word (`true`, `false`, `null`) was misspelled or ran into
    /// other word characters.
    InvalidLiteral,
    /// A number could not be decoded as an IEEE double.
    InvalidNumber,
    /// Input ended inside a string before the closing quote.
    UnterminatedString,
    /// Invalid character after a backslash.
    InvalidEscapeSequence,
    /// `\u` escape without exactly 4 hex digits.
    InvalidUnicodeHex,
    /// Valid hex digits but no decodable codepoint (e.g. a lone surrogate).
    InvalidUnicodeCodepoint,
    /// A string body contained a malformed UTF-8 byte sequence.
    InvalidUtf8,
    /// A value was expected but a separator or closing bracket was found.
    ExpectedValue,
    /// An object member must start with a string key.
    ExpectedObjectKey,
    /// A `:` separator was expected after an object key.
    ExpectedColon,
    /// A `,` or the matching closing bracket/brace was expected.
    ExpectedCommaOrClose,
    /// Input ended in the middle of a document.
    UnexpectedEnd,
    /// Non-whitespace content after the root value.
    TrailingCharacters,
    /// The same key appeared twice in one object.
    DuplicateKey,
    /// Containers nested deeper than the parser allows.
    MaxDepthExceeded,
    /// The allocator reported failure while building the tree.
    OutOfMemory,
}

/// Coarse classification of a [`ParseError`], so callers can tell a
/// malformed document from resource exhaustion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A single lexeme was malformed (bad literal, number, string or
    /// escape, invalid UTF-8).
    Lexical,
    /// The token stream did not match the value grammar.
    Grammar,
    /// An allocation failed while building the value tree.
    Allocation,
}

impl ParseError {
    /// The category this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ParseError::InvalidLiteral
            | ParseError::InvalidNumber
            | ParseError::UnterminatedString
            | ParseError::InvalidEscapeSequence
            | ParseError::InvalidUnicodeHex
            | ParseError::InvalidUnicodeCodepoint
            | ParseError::InvalidUtf8 => ErrorCategory::Lexical,
            ParseError::ExpectedValue
            | ParseError::ExpectedObjectKey
            | ParseError::ExpectedColon
            | ParseError::ExpectedCommaOrClose
            | ParseError::UnexpectedEnd
            | ParseError::TrailingCharacters
            | ParseError::DuplicateKey
            | ParseError::MaxDepthExceeded => ErrorCategory::Grammar,
            ParseError::OutOfMemory => ErrorCategory::Allocation,
        }
    }
}

impl From<TryReserveError> for ParseError {
    fn from(_: TryReserveError) -> Self {
        ParseError::OutOfMemory
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnterminatedString => write!(f, "unterminated string"),
            ParseError::TrailingCharacters => write!(f, "trailing characters after root value"),
            ParseError::DuplicateKey => write!(f, "duplicate object key"),
            ParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            ParseError::OutOfMemory => write!(f, "allocation failed"),
            _ => write!(f, "{self:?}"),
        }
    }
}
