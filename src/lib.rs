//! # serde_record
//!
//! A Serde-compatible decoder that turns JSON text into statically-typed
//! records, with the grammar strictness chosen explicitly by the caller.
//!
//! ## Grammars
//!
//! - [`Grammar::Strict`] (default): RFC 8259 JSON. `{val: 5}` is a syntax
//!   error because its key is unquoted.
//! - [`Grammar::Relaxed`]: JSON plus unquoted identifier keys, single-quoted
//!   strings, trailing commas and comments. `{val: 5}` decodes.
//!
//! Encoders always write strict JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_record::{from_str, from_str_with_options, to_string, ParseOptions};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! let point: Point = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//!
//! let point: Point = from_str_with_options("{x: 1, y: 2,}", &ParseOptions::relaxed()).unwrap();
//! assert_eq!(to_string(&point).unwrap(), r#"{"x":1,"y":2}"#);
//! ```
//!
//! ## Records
//!
//! [`Record`] is a single-field record (`val: i32`) with a strict [`decode`],
//! a grammar-selecting [`decode_with`], the [`extract_val`] accessor, and the
//! fixed entry point [`gimme_five`]:
//!
//! ```rust
//! use serde_record::{decode, extract_val, gimme_five};
//!
//! assert_eq!(extract_val(&decode(r#"{"val": 0}"#).unwrap()), 0);
//! assert_eq!(gimme_five().unwrap(), 5);
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`Error`], classified by [`Error::kind`] into parse
//! errors (malformed text, with line and column) and field errors (missing or
//! mistyped members, with a `$.path`). See the [`error`] module.
//!
//! ## Logging
//!
//! Parsing emits `trace` records and failed decodes emit `debug` records
//! through the [`log`] facade. No logger is installed by this crate.
//!
//! ## Thread Safety
//!
//! No global state. Every public type is `Send + Sync`, and independent
//! decodes may run concurrently without coordination.

pub mod de;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod record;
pub mod ser;
pub mod value;

pub use de::Deserializer;
pub use error::{Error, ErrorKind, Result};
pub use map::Map;
pub use options::{FormatOptions, Grammar, ParseOptions};
pub use record::{decode, decode_with, extract_val, gimme_five, Record, FIVE_DOCUMENT};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a compact JSON string.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a document
/// (for example a map with non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &FormatOptions::default())
}

/// Serialize any `T: Serialize` to a pretty-printed JSON string.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &FormatOptions::pretty())
}

/// Serialize any `T: Serialize` to a JSON string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &FormatOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let document = to_value(value)?;
    let mut output = String::with_capacity(64);
    ser::write_value(&mut output, &document, options, 0);
    Ok(output)
}

/// Serialize any `T: Serialize` to a writer as compact JSON.
///
/// # Examples
///
/// ```rust
/// use serde_record::{to_writer, Record};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Record::new(5)).unwrap();
/// assert_eq!(buffer, br#"{"val":5}"#);
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Build any `T: DeserializeOwned` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_record::{document, from_value, Record};
///
/// let record: Record = from_value(document!({ "val": 5 })).unwrap();
/// assert_eq!(record.val(), 5);
/// ```
///
/// # Errors
///
/// Returns a field error if the document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}

/// Deserialize an instance of type `T` from strict JSON text.
///
/// # Errors
///
/// Returns a parse error if the text is not strict JSON, or a field error if
/// the document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &ParseOptions::default())
}

/// Deserialize an instance of type `T` from text under the given options.
///
/// # Examples
///
/// ```rust
/// use serde_record::{from_str_with_options, Grammar, ParseOptions};
///
/// let options = ParseOptions::new().with_grammar(Grammar::Relaxed);
/// let tags: Vec<String> = from_str_with_options("['a', 'b',] // tags", &options).unwrap();
/// assert_eq!(tags, vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// Returns a parse error if the text is malformed under `options.grammar`, or
/// a field error if the document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &ParseOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let mut deserializer = Deserializer::with_options(s, options.clone());
    T::deserialize(&mut deserializer).map_err(|err| {
        log::debug!(
            "decoding {} failed under the {} grammar: {}",
            std::any::type_name::<T>(),
            options.grammar,
            err
        );
        err
    })
}

/// Deserialize an instance of type `T` from bytes of strict JSON.
///
/// # Errors
///
/// Returns a parse error if the bytes are not UTF-8 or not strict JSON, or a
/// field error if the document does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::InvalidUtf8(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of strict JSON.
///
/// # Examples
///
/// ```rust
/// use serde_record::{from_reader, Record};
/// use std::io::Cursor;
///
/// let record: Record = from_reader(Cursor::new(br#"{"val": 5}"#)).unwrap();
/// assert_eq!(record.val(), 5);
/// ```
///
/// # Errors
///
/// Returns an I/O error if reading fails (including non-UTF-8 input), then
/// the same errors as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}
