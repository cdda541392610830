// SPDX-License-Identifier: Apache-2.0

//! Two-phase string decoding: a measuring pass that validates the whole
//! body and computes the exact unescaped length, and a materializing pass
//! that allocates once and decodes into it.

use alloc::string::String;
use alloc::vec::Vec;

use crate::escape_processor::EscapeProcessor;
use crate::parse_error::ParseError;
use crate::utf8;

/// Result of measuring a string lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StringMeasure {
    /// Source bytes consumed, including the closing quote.
    pub consumed: usize,
    /// Exact byte length of the unescaped string.
    pub unescaped_len: usize,
}

/// Validates the string body starting right after the opening quote, up to
/// the closing unescaped quote, and computes the unescaped byte length.
pub(crate) fn measure(bytes: &[u8]) -> Result<StringMeasure, ParseError> {
    let mut pos = 0;
    let mut unescaped_len = 0;
    loop {
        match bytes.get(pos) {
            None => return Err(ParseError::UnterminatedString),
            Some(b'"') => {
                return Ok(StringMeasure {
                    consumed: pos + 1,
                    unescaped_len,
                });
            }
            Some(b'\\') => {
                pos += 1;
                let escape = EscapeProcessor::measure(&bytes[pos..])?;
                pos += escape.consumed;
                unescaped_len += escape.produced;
            }
            Some(_) => {
                let len =
                    utf8::check_code_point(&bytes[pos..]).ok_or(ParseError::InvalidUtf8)?;
                pos += len;
                unescaped_len += len;
            }
        }
    }
}

/// Allocates exactly `unescaped_len` bytes and decodes `body` (the text
/// between the quotes, as measured) into an owned string.
///
/// The writer must land exactly on the measured boundary; a mismatch
/// between the two passes is a latent defect, caught by the debug assert.
pub(crate) fn materialize(body: &[u8], unescaped_len: usize) -> Result<String, ParseError> {
    let mut out = Vec::new();
    out.try_reserve_exact(unescaped_len)?;
    let mut pos = 0;
    while pos < body.len() {
        match body[pos] {
            b'\\' => {
                pos += 1;
                pos += EscapeProcessor::materialize(&body[pos..], &mut out)?;
            }
            _ => {
                let len =
                    utf8::check_code_point(&body[pos..]).ok_or(ParseError::InvalidUtf8)?;
                out.extend_from_slice(&body[pos..pos + len]);
                pos += len;
            }
        }
    }
    debug_assert_eq!(out.len(), unescaped_len);
    String::from_utf8(out).map_err(|_| ParseError::InvalidUtf8)
}
