// SPDX-License-Identifier: Apache-2.0

use log::debug;

use crate::json_array::JsonArray;
use crate::json_object;
use crate::json_object::JsonObject;
use crate::json_string;
use crate::json_value::JsonValue;
use crate::lexer::{Lexeme, Lexer};
use crate::parse_error::ParseError;

const ARRAY_INITIAL_CAPACITY: usize = 4;

/// Containers may nest this deep before the parser gives up instead of
/// risking the call stack.
const MAX_DEPTH: usize = 128;

/// Parses a JSON document into an owned value tree.
///
/// Exactly one root value is accepted; trailing non-whitespace content is
/// an error. On failure every partially built container is released.
///
/// # Example
/// ```
/// use treejson::{parse, JsonValue};
///
/// let value = parse(r#"{"id": 7, "tags": ["a", "b"]}"#).unwrap();
/// let object = value.as_object().unwrap();
/// assert_eq!(object.get("id").and_then(JsonValue::as_f64), Some(7.0));
/// ```
pub fn parse(input: &str) -> Result<JsonValue, ParseError> {
    parse_slice(input.as_bytes())
}

/// Parses a JSON document from raw bytes. See [`parse`].
pub fn parse_slice(input: &[u8]) -> Result<JsonValue, ParseError> {
    let mut parser = Parser {
        lexer: Lexer::new(input),
        depth: 0,
    };
    let result = parser.parse_document();
    match &result {
        Ok(value) => debug!("parsed document, {} root", value.kind()),
        Err(err) => debug!("parse failed: {err}"),
    }
    result
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn parse_document(&mut self) -> Result<JsonValue, ParseError> {
        let first = self.next_lexeme()?;
        let root = self.parse_value(first)?;
        match self.lexer.next() {
            Ok(None) => Ok(root),
            Ok(Some(_)) | Err(_) => Err(ParseError::TrailingCharacters),
        }
    }

    /// Pulls the next lexeme, treating end of input as an error; inside a
    /// document every construct still expects something.
    fn next_lexeme(&mut self) -> Result<Lexeme<'a>, ParseError> {
        self.lexer.next()?.ok_or(ParseError::UnexpectedEnd)
    }

    fn parse_value(&mut self, lexeme: Lexeme<'a>) -> Result<JsonValue, ParseError> {
        match lexeme {
            Lexeme::ObjectStart => {
                self.enter()?;
                let object = self.parse_object()?;
                self.depth -= 1;
                Ok(JsonValue::Object(object))
            }
            Lexeme::ArrayStart => {
                self.enter()?;
                let array = self.parse_array()?;
                self.depth -= 1;
                Ok(JsonValue::Array(array))
            }
            Lexeme::True => Ok(JsonValue::Bool(true)),
            Lexeme::False => Ok(JsonValue::Bool(false)),
            Lexeme::Null => Ok(JsonValue::Null),
            Lexeme::Str { body, unescaped_len } => Ok(JsonValue::String(
                json_string::materialize(body, unescaped_len)?,
            )),
            Lexeme::Number(value) => Ok(JsonValue::Number(value)),
            Lexeme::ObjectEnd | Lexeme::ArrayEnd | Lexeme::Comma | Lexeme::Colon => {
                Err(ParseError::ExpectedValue)
            }
        }
    }

    /// Parses the members after a `{`. A partially built object is owned
    /// here and dropped whole if any member fails.
    fn parse_object(&mut self) -> Result<JsonObject, ParseError> {
        let mut lexeme = self.next_lexeme()?;
        if lexeme == Lexeme::ObjectEnd {
            return Ok(JsonObject::new());
        }
        let mut object = JsonObject::with_capacity(json_object::INITIAL_CAPACITY)?;
        loop {
            let Lexeme::Str { body, unescaped_len } = lexeme else {
                return Err(ParseError::ExpectedObjectKey);
            };
            let key = json_string::materialize(body, unescaped_len)?;
            if self.next_lexeme()? != Lexeme::Colon {
                return Err(ParseError::ExpectedColon);
            }
            let first = self.next_lexeme()?;
            let value = self.parse_value(first)?;
            object.insert(key, value)?;
            match self.next_lexeme()? {
                Lexeme::ObjectEnd => break,
                Lexeme::Comma => lexeme = self.next_lexeme()?,
                _ => return Err(ParseError::ExpectedCommaOrClose),
            }
        }
        Ok(object)
    }

    /// Parses the elements after a `[`.
    fn parse_array(&mut self) -> Result<JsonArray, ParseError> {
        let mut lexeme = self.next_lexeme()?;
        if lexeme == Lexeme::ArrayEnd {
            return Ok(JsonArray::new());
        }
        let mut array = JsonArray::with_capacity(ARRAY_INITIAL_CAPACITY)?;
        loop {
            let value = self.parse_value(lexeme)?;
            array.push(value)?;
            match self.next_lexeme()? {
                Lexeme::ArrayEnd => break,
                Lexeme::Comma => lexeme = self.next_lexeme()?,
                _ => return Err(ParseError::ExpectedCommaOrClose),
            }
        }
        Ok(array)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(ParseError::MaxDepthExceeded);
        }
        self.depth += 1;
        Ok(())
    }
}
