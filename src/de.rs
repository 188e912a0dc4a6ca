//! Document deserialization.
//!
//! This module provides the [`Deserializer`] that parses document text into a
//! [`Value`] tree and drives `Deserialize` implementations from it.
//!
//! ## Grammars
//!
//! The parser accepts RFC 8259 JSON under [`Grammar::Strict`] and a relaxed
//! superset under [`Grammar::Relaxed`]:
//!
//! | Input                 | Strict       | Relaxed |
//! |-----------------------|--------------|---------|
//! | `{"val": 5}`          | ok           | ok      |
//! | `{val: 5}`            | syntax error | ok      |
//! | `{'val': 5}`          | syntax error | ok      |
//! | `{"val": 5,}`         | syntax error | ok      |
//! | `{"val": 5 /* c */}`  | syntax error | ok      |
//!
//! ```rust
//! use serde_record::{from_str, from_str_with_options, ParseOptions, Record};
//!
//! assert!(from_str::<Record>("{val: 5}").unwrap_err().is_parse());
//!
//! let record: Record = from_str_with_options("{val: 5}", &ParseOptions::relaxed()).unwrap();
//! assert_eq!(record.val(), 5);
//! ```
//!
//! ## Errors
//!
//! Syntax errors carry line, column, the offending source line with a caret,
//! and for the usual strict-mode stumbles a hint naming the relaxed grammar.
//! Errors raised while visiting object members and array elements carry the
//! member path (`$.val`, `$.items[1].val`).

use crate::options::{Grammar, ParseOptions};
use crate::{Error, Map, Number, Result, Value};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

const UNQUOTED_KEY_HELP: &str =
    "quote the key (\"val\" instead of val), or parse with Grammar::Relaxed";
const SINGLE_QUOTE_HELP: &str = "use double quotes, or parse with Grammar::Relaxed";
const TRAILING_COMMA_HELP: &str = "remove the trailing comma, or parse with Grammar::Relaxed";
const COMMENT_HELP: &str = "comments are only accepted by Grammar::Relaxed";

/// The document parser.
///
/// Created via [`Deserializer::from_str`] (strict grammar) or
/// [`Deserializer::with_options`]. Each call to a `deserialize_*` method
/// consumes one complete document.
pub struct Deserializer<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
    options: ParseOptions,
    depth: usize,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    pub fn with_options(input: &'de str, options: ParseOptions) -> Self {
        Deserializer {
            input,
            position: 0,
            line: 1,
            column: 1,
            options,
            depth: 0,
        }
    }

    pub fn grammar(&self) -> Grammar {
        self.options.grammar
    }

    /// Parses the whole input as one document.
    ///
    /// Only whitespace (and comments, in relaxed mode) may follow the document.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::{Deserializer, Value};
    ///
    /// let value = Deserializer::from_str(r#"{"val": 5}"#).parse_document().unwrap();
    /// assert_eq!(value.get("val"), Some(&Value::from(5)));
    /// ```
    pub fn parse_document(&mut self) -> Result<Value> {
        log::trace!(
            "parsing {} bytes with the {} grammar",
            self.input.len(),
            self.options.grammar
        );
        self.skip_insignificant()?;
        if self.at_end() {
            return Err(self.eof_error("a value"));
        }
        let value = self.parse_value()?;
        self.skip_insignificant()?;
        if !self.at_end() {
            return Err(Error::TrailingCharacters {
                line: self.line,
                col: self.column,
            });
        }
        log::trace!("parsed a document of type {}", value.type_name());
        Ok(value)
    }

    fn rest(&self) -> &'de str {
        &self.input[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// The current source line followed by a caret under the current column.
    fn context(&self) -> String {
        let start = self.input[..self.position]
            .rfind('\n')
            .map_or(0, |i| i + 1);
        let end = self
            .rest()
            .find('\n')
            .map_or(self.input.len(), |i| self.position + i);
        let line = self.input[start..end].trim_end_matches('\r');
        format!("{}\n{}^", line, " ".repeat(self.column - 1))
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax_with_context(self.line, self.column, msg, &self.context(), None)
    }

    fn error_with_help(&self, msg: &str, help: &str) -> Error {
        Error::syntax_with_context(self.line, self.column, msg, &self.context(), Some(help))
    }

    fn eof_error(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.line, self.column, expected, &self.context())
    }

    fn unexpected(&self, expected: &str) -> Error {
        match self.peek_char() {
            None => self.eof_error(expected),
            Some(ch) => self.error(&format!("unexpected {:?}, expected {}", ch, expected)),
        }
    }

    fn expect(&mut self, wanted: char, expected: &str) -> Result<()> {
        if self.peek_char() == Some(wanted) {
            self.next_char();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Skips whitespace, and comments when the grammar allows them.
    fn skip_insignificant(&mut self) -> Result<()> {
        loop {
            match self.peek_char() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.next_char();
                }
                Some('/') if self.options.grammar.is_relaxed() => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        if self.rest().starts_with("//") {
            while let Some(ch) = self.peek_char() {
                if ch == '\n' {
                    break;
                }
                self.next_char();
            }
            Ok(())
        } else if self.rest().starts_with("/*") {
            let opened_at = self.line;
            self.next_char();
            self.next_char();
            loop {
                if self.rest().starts_with("*/") {
                    self.next_char();
                    self.next_char();
                    return Ok(());
                }
                if self.next_char().is_none() {
                    return Err(self.eof_error(&format!(
                        "'*/' to close the comment opened on line {}",
                        opened_at
                    )));
                }
            }
        } else {
            Err(self.unexpected("'//' or '/*'"))
        }
    }

    /// Marks entry into an array or object, enforcing the nesting limit.
    fn enter_nested(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                line: self.line,
                col: self.column,
                limit: self.options.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_insignificant()?;

        match self.peek_char() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') => Ok(Value::String(self.parse_string()?)),
            Some('\'') if self.options.grammar.is_relaxed() => {
                Ok(Value::String(self.parse_string()?))
            }
            Some('\'') => Err(self.error_with_help("single-quoted string", SINGLE_QUOTE_HELP)),
            Some('t') => self.parse_literal("true", Value::Bool(true)),
            Some('f') => self.parse_literal("false", Value::Bool(false)),
            Some('n') => self.parse_literal("null", Value::Null),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => Ok(Value::Number(self.parse_number()?)),
            Some('/') => Err(self.error_with_help("unexpected '/'", COMMENT_HELP)),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if !self.rest().starts_with(word) {
            return Err(self.unexpected("a value"));
        }
        for _ in 0..word.len() {
            self.next_char();
        }
        Ok(value)
    }

    fn eat_digits(&mut self) -> bool {
        let start = self.position;
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            self.next_char();
        }
        self.position > start
    }

    fn parse_number(&mut self) -> Result<Number> {
        let start = self.position;

        if self.peek_char() == Some('-') {
            self.next_char();
        }

        match self.peek_char() {
            Some('0') => {
                self.next_char();
                if matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                    return Err(self.error("leading zeros are not allowed"));
                }
            }
            Some(ch) if ch.is_ascii_digit() => {
                self.eat_digits();
            }
            _ => return Err(self.unexpected("a digit")),
        }

        let mut integral = true;
        if self.peek_char() == Some('.') {
            integral = false;
            self.next_char();
            if !self.eat_digits() {
                return Err(self.unexpected("a digit after '.'"));
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            integral = false;
            self.next_char();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.next_char();
            }
            if !self.eat_digits() {
                return Err(self.unexpected("a digit in the exponent"));
            }
        }

        let text = &self.input[start..self.position];
        if integral {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Number::Integer(i));
            }
            if let Ok(u) = text.parse::<u64>() {
                return Ok(Number::Unsigned(u));
            }
        }
        // Integers beyond u64 fall back to floats, like other JSON readers.
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Number::Float(f)),
            _ => Err(self.error("number out of range")),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = match self.peek_char() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.unexpected("a string")),
        };
        self.next_char();

        let mut result = String::new();
        loop {
            match self.peek_char() {
                None => return Err(self.eof_error("closing quote")),
                Some(ch) if ch == quote => {
                    self.next_char();
                    return Ok(result);
                }
                Some('\\') => {
                    self.next_char();
                    result.push(self.parse_escape(quote)?);
                }
                Some(ch) if (ch as u32) < 0x20 => {
                    return Err(self.error("control characters in strings must be escaped"));
                }
                Some(ch) => {
                    self.next_char();
                    result.push(ch);
                }
            }
        }
    }

    fn parse_escape(&mut self, quote: char) -> Result<char> {
        let ch = match self.peek_char() {
            None => return Err(self.eof_error("an escape sequence")),
            Some('u') => {
                self.next_char();
                return self.parse_unicode_escape();
            }
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{0008}',
            Some('f') => '\u{000C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('\'') if quote == '\'' => '\'',
            Some(_) => return Err(self.error("invalid escape sequence")),
        };
        self.next_char();
        Ok(ch)
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            match self.peek_char().map(|ch| ch.to_digit(16)) {
                Some(Some(digit)) => {
                    code = code * 16 + digit;
                    self.next_char();
                }
                Some(None) => return Err(self.error("expected 4 hex digits in unicode escape")),
                None => return Err(self.eof_error("4 hex digits")),
            }
        }
        Ok(code)
    }

    fn parse_unicode_escape(&mut self) -> Result<char> {
        let first = self.parse_hex4()?;
        let code = match first {
            0xD800..=0xDBFF => {
                if !self.rest().starts_with("\\u") {
                    return Err(self.error("unpaired surrogate in unicode escape"));
                }
                self.next_char();
                self.next_char();
                let second = self.parse_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&second) {
                    return Err(self.error("invalid low surrogate in unicode escape"));
                }
                0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(self.error("unpaired surrogate in unicode escape")),
            _ => first,
        };
        char::from_u32(code).ok_or_else(|| self.error("invalid unicode code point"))
    }

    fn parse_identifier(&mut self) -> String {
        let start = self.position;
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$')
        {
            self.next_char();
        }
        self.input[start..self.position].to_string()
    }

    fn parse_key(&mut self) -> Result<String> {
        let relaxed = self.options.grammar.is_relaxed();
        match self.peek_char() {
            Some('"') => self.parse_string(),
            Some('\'') if relaxed => self.parse_string(),
            Some('\'') => Err(self.error_with_help("single-quoted object key", SINGLE_QUOTE_HELP)),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' || ch == '$' => {
                if relaxed {
                    Ok(self.parse_identifier())
                } else {
                    Err(self.error_with_help(
                        "expected '\"' to start an object key",
                        UNQUOTED_KEY_HELP,
                    ))
                }
            }
            _ => Err(self.unexpected("an object key")),
        }
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter_nested()?;
        self.next_char(); // consume '{'

        let mut map = Map::new();
        self.skip_insignificant()?;
        if self.peek_char() == Some('}') {
            self.next_char();
            self.depth -= 1;
            return Ok(Value::Object(map));
        }

        loop {
            let key = self.parse_key()?;
            self.skip_insignificant()?;
            self.expect(':', "':' after object key")?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_insignificant()?;
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                    self.skip_insignificant()?;
                    if self.peek_char() == Some('}') {
                        if !self.options.grammar.is_relaxed() {
                            return Err(self.error_with_help(
                                "trailing comma before '}'",
                                TRAILING_COMMA_HELP,
                            ));
                        }
                        self.next_char();
                        break;
                    }
                }
                Some('}') => {
                    self.next_char();
                    break;
                }
                _ => return Err(self.unexpected("',' or '}' after object member")),
            }
        }

        self.depth -= 1;
        Ok(Value::Object(map))
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter_nested()?;
        self.next_char(); // consume '['

        let mut elements = Vec::new();
        self.skip_insignificant()?;
        if self.peek_char() == Some(']') {
            self.next_char();
            self.depth -= 1;
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);

            self.skip_insignificant()?;
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                    self.skip_insignificant()?;
                    if self.peek_char() == Some(']') {
                        if !self.options.grammar.is_relaxed() {
                            return Err(self.error_with_help(
                                "trailing comma before ']'",
                                TRAILING_COMMA_HELP,
                            ));
                        }
                        self.next_char();
                        break;
                    }
                }
                Some(']') => {
                    self.next_char();
                    break;
                }
                _ => return Err(self.unexpected("',' or ']' after array element")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(elements))
    }
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_any(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_option(visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_newtype_struct(name, visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_enum(name, variants, visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        ValueDeserializer::new(self.parse_document()?).deserialize_struct(name, fields, visitor)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::iter::Enumerate<std::vec::IntoIter<Value>>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter().enumerate(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((index, value)) => seed
                .deserialize(ValueDeserializer::new(value))
                .map(Some)
                .map_err(|e| e.in_element(index)),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Value>,
    pending: Option<(String, Value)>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                let result = seed
                    .deserialize(MapKeyDeserializer { key: &key })
                    .map(Some)
                    .map_err(|e: Error| e.in_member(&key));
                self.pending = Some((key, value));
                result
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((key, value)) => seed
                .deserialize(ValueDeserializer::new(value))
                .map_err(|e| e.in_member(&key)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Object keys are always strings; integer targets parse them back, since
/// the serializer writes integer keys as their decimal text.
struct MapKeyDeserializer<'a> {
    key: &'a str,
}

macro_rules! deserialize_integer_key {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.key.parse() {
                    Ok(n) => visitor.$visit(n),
                    Err(_) => Err(de::Error::invalid_value(
                        de::Unexpected::Str(self.key),
                        &visitor,
                    )),
                }
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for MapKeyDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_str(self.key)
    }

    deserialize_integer_key! {
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let variant: de::value::StrDeserializer<'a, Error> = self.key.into_deserializer();
        visitor.visit_enum(variant)
    }

    forward_to_deserialize_any! {
        bool f32 f64 char str string bytes byte_buf option unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed
            .deserialize(self.variant.as_str().into_deserializer())
            .map_err(|e: Error| e.in_member(&self.variant))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            other => Err(Error::type_mismatch("unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            other => Err(Error::type_mismatch("tuple variant", other.type_name())),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => Err(Error::type_mismatch("struct variant", other.type_name())),
        }
    }
}

/// Drives a `Deserialize` implementation from an owned [`Value`].
pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Unsigned(u)) => visitor.visit_u64(u),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => {
                        visitor.visit_enum(EnumDeserializer { variant, value })
                    }
                    None => Err(Error::type_mismatch("enum variant", "empty object")),
                }
            }
            other => Err(Error::type_mismatch(
                "string or single-key object",
                other.type_name(),
            )),
        }
    }

    /// Structs come from objects only; arrays are not accepted positionally.
    fn deserialize_struct<V>(
        self,
        name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
            other => Err(Error::type_mismatch(
                &format!("object for struct {}", name),
                other.type_name(),
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn parse(input: &str, grammar: Grammar) -> Result<Value> {
        Deserializer::with_options(input, ParseOptions::new().with_grammar(grammar))
            .parse_document()
    }

    fn strict(input: &str) -> Result<Value> {
        parse(input, Grammar::Strict)
    }

    fn relaxed(input: &str) -> Result<Value> {
        parse(input, Grammar::Relaxed)
    }

    #[test]
    fn test_scalars() {
        assert_eq!(strict("null").unwrap(), Value::Null);
        assert_eq!(strict(" true ").unwrap(), Value::Bool(true));
        assert_eq!(strict("false").unwrap(), Value::Bool(false));
        assert_eq!(strict("-0").unwrap(), Value::from(0));
        assert_eq!(strict("42").unwrap(), Value::from(42));
        assert_eq!(strict("2.5e1").unwrap(), Value::from(25.0));
        assert_eq!(strict("1E2").unwrap(), Value::from(100.0));
    }

    #[test]
    fn test_integer_overflow() {
        assert_eq!(
            strict("18446744073709551615").unwrap(),
            Value::Number(Number::Unsigned(u64::MAX))
        );
        assert_eq!(
            strict("9223372036854775808").unwrap(),
            Value::Number(Number::Unsigned(1 << 63))
        );
        let value = strict("18446744073709551616").unwrap();
        assert!(matches!(value, Value::Number(Number::Float(_))));
    }

    #[test]
    fn test_number_grammar() {
        assert!(strict("01").unwrap_err().is_parse());
        assert!(strict("1.").unwrap_err().is_parse());
        assert!(strict("1e").unwrap_err().is_parse());
        assert!(strict("-").unwrap_err().is_parse());
        assert!(strict("1e400").unwrap_err().is_parse());
        assert!(strict(".5").unwrap_err().is_parse());
    }

    #[test]
    fn test_string_escapes() {
        let value = strict(r#""a\"b\\c\/d\né😀""#).unwrap();
        assert_eq!(value, Value::from("a\"b\\c/d\né😀"));
    }

    #[test]
    fn test_bad_strings() {
        assert!(strict(r#""\x""#).unwrap_err().is_parse());
        assert!(strict(r#""\ud83d""#).unwrap_err().is_parse());
        assert!(strict(r#""\u12""#).unwrap_err().is_parse());
        assert!(strict("\"tab\there\"").unwrap_err().is_parse());
        assert!(matches!(
            strict("\"open").unwrap_err(),
            Error::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_nested_document_keeps_member_order() {
        let value = strict(r#"{"b": [1, {"c": null}], "a": "x"}"#).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(value.get("b").and_then(Value::as_array).map(Vec::len), Some(2));
    }

    #[test]
    fn test_duplicate_keys_keep_last_value() {
        let value = strict(r#"{"val": 1, "val": 2}"#).unwrap();
        assert_eq!(value.get("val"), Some(&Value::from(2)));
    }

    #[test]
    fn test_unquoted_key_strict_has_help() {
        let err = strict("{val: 5}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert_eq!(err.position(), Some((1, 2)));
        let text = err.to_string();
        assert!(text.contains("{val: 5}\n ^"));
        assert!(text.contains("Help: quote the key"));
    }

    #[test]
    fn test_relaxed_extensions() {
        let value = relaxed(
            "// leading comment\n{val: 5, 'name': 'it''s', $x_1: [1, 2,], /* end */}",
        );
        // 'it''s' is two adjacent strings, which no grammar accepts
        assert!(value.unwrap_err().is_parse());

        let value = relaxed("{val: 5, 'name': 'it\\'s', $x_1: [1, 2,], /* end */}").unwrap();
        assert_eq!(value.get("val"), Some(&Value::from(5)));
        assert_eq!(value.get("name"), Some(&Value::from("it's")));
        assert_eq!(
            value.get("$x_1"),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );
    }

    #[test]
    fn test_strict_rejects_relaxed_extensions() {
        assert!(strict(r#"{'val': 5}"#).unwrap_err().is_parse());
        assert!(strict(r#"{"val": 5,}"#).unwrap_err().is_parse());
        assert!(strict(r#"[1,]"#).unwrap_err().is_parse());
        assert!(strict("{\"val\": 5 /* c */}").unwrap_err().is_parse());
        assert!(strict("// c\n{}").unwrap_err().is_parse());
    }

    #[test]
    fn test_relaxed_still_rejects_garbage() {
        assert!(relaxed("{val 5}").unwrap_err().is_parse());
        assert!(relaxed("{,}").unwrap_err().is_parse());
        assert!(relaxed("[1,,2]").unwrap_err().is_parse());
        assert!(relaxed("{5: 1}").unwrap_err().is_parse());
        assert!(matches!(
            relaxed("{} /* open").unwrap_err(),
            Error::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_trailing_characters() {
        let err = strict(r#"{"val": 5} x"#).unwrap_err();
        assert_eq!(err, Error::TrailingCharacters { line: 1, col: 12 });
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(strict("").unwrap_err(), Error::UnexpectedEof { .. }));
        assert!(matches!(
            relaxed("  // only a comment").unwrap_err(),
            Error::UnexpectedEof { .. }
        ));
    }

    #[test]
    fn test_line_tracking() {
        let err = strict("{\n  \"val\": 5,\n  oops: 1\n}").unwrap_err();
        assert_eq!(err.position(), Some((3, 3)));
    }

    #[test]
    fn test_integer_map_keys() {
        use std::collections::BTreeMap;

        let map: BTreeMap<u64, bool> =
            crate::from_str(r#"{"7": true, "18446744073709551615": false}"#).unwrap();
        assert_eq!(map.get(&7), Some(&true));
        assert_eq!(map.get(&u64::MAX), Some(&false));

        let err = crate::from_str::<BTreeMap<i8, bool>>(r#"{"300": true}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { ref path, .. } if path == "$.300"));

        let err = crate::from_str::<BTreeMap<i32, bool>>(r#"{"one": true}"#).unwrap_err();
        assert!(err.is_field());
    }

    #[test]
    fn test_depth_limit() {
        let options = ParseOptions::new().with_max_depth(2);
        assert!(Deserializer::with_options("[[1]]", options.clone())
            .parse_document()
            .is_ok());

        let err = Deserializer::with_options("[[[1]]]", options)
            .parse_document()
            .unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 2, col: 3, .. }));
    }
}
