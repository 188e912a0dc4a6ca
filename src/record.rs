//! The single-field record and its decoder.
//!
//! A [`Record`] holds one integer, `val`. It is registered for document
//! conversion through `#[derive(Serialize, Deserialize)]`, and exposes that
//! conversion as an explicit pair: [`Record::to_document`] and
//! [`Record::from_document`].
//!
//! ```rust
//! use serde_record::{decode, extract_val, gimme_five};
//!
//! let record = decode(r#"{"val": 5}"#).unwrap();
//! assert_eq!(extract_val(&record), 5);
//!
//! assert_eq!(gimme_five().unwrap(), 5);
//! ```
//!
//! [`decode`] uses the strict grammar. Use [`decode_with`] to pick the
//! grammar explicitly.

use crate::options::ParseOptions;
use crate::{Result, Value};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The document [`gimme_five`] decodes. The key is unquoted on purpose.
pub const FIVE_DOCUMENT: &str = "{val: 5}";

/// A record with a single integer field.
///
/// The field is private: a record is immutable once decoded or constructed.
/// Extra members in the source document are ignored; a missing `val` is an
/// error, never a zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    val: i32,
}

impl Record {
    /// Creates a record holding `val`.
    #[must_use]
    pub const fn new(val: i32) -> Self {
        Record { val }
    }

    /// Returns the record's `val`.
    #[inline]
    #[must_use]
    pub const fn val(&self) -> i32 {
        self.val
    }

    /// Converts this record into a document tree.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::{document, Record};
    ///
    /// assert_eq!(Record::new(5).to_document(), document!({ "val": 5 }));
    /// ```
    #[must_use]
    pub fn to_document(&self) -> Value {
        let mut map = crate::Map::with_capacity(1);
        map.insert("val".to_string(), Value::from(self.val));
        Value::Object(map)
    }

    /// Builds a record from a document tree.
    ///
    /// # Errors
    ///
    /// Returns a field error if `val` is missing, not an integer, or outside the `i32` range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::{document, Record};
    ///
    /// let record = Record::from_document(document!({ "val": 0 })).unwrap();
    /// assert_eq!(record.val(), 0);
    ///
    /// let err = Record::from_document(document!({ "val": "five" })).unwrap_err();
    /// assert!(err.is_field());
    /// ```
    pub fn from_document(document: Value) -> Result<Self> {
        crate::from_value(document)
    }
}

impl From<i32> for Record {
    fn from(val: i32) -> Self {
        Record::new(val)
    }
}

/// Parses with the strict grammar.
impl FromStr for Record {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Decodes a record from strict JSON text.
///
/// # Errors
///
/// Returns a parse error for malformed text (including `{val: 5}`, whose key
/// is unquoted) and a field error when `val` is missing or not an `i32`.
///
/// # Examples
///
/// ```rust
/// use serde_record::decode;
///
/// assert_eq!(decode(r#"{"val": 5}"#).unwrap().val(), 5);
/// assert!(decode("{val: 5}").unwrap_err().is_parse());
/// assert!(decode(r#"{"val": "five"}"#).unwrap_err().is_field());
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(text: &str) -> Result<Record> {
    decode_with(text, &ParseOptions::strict())
}

/// Decodes a record using the given parse options.
///
/// # Examples
///
/// ```rust
/// use serde_record::{decode_with, ParseOptions};
///
/// let record = decode_with("{val: 5}", &ParseOptions::relaxed()).unwrap();
/// assert_eq!(record.val(), 5);
/// ```
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with(text: &str, options: &ParseOptions) -> Result<Record> {
    crate::from_str_with_options(text, options)
}

/// Returns the record's `val`.
#[inline]
#[must_use]
pub const fn extract_val(record: &Record) -> i32 {
    record.val
}

/// Decodes [`FIVE_DOCUMENT`] with the relaxed grammar and returns its `val`.
///
/// # Errors
///
/// Propagates any decode failure. The fixed document always decodes, so in
/// practice this returns `Ok(5)`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn gimme_five() -> Result<i32> {
    let record = decode_with(FIVE_DOCUMENT, &ParseOptions::relaxed())?;
    Ok(extract_val(&record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Grammar};

    #[test]
    fn test_gimme_five() {
        assert_eq!(gimme_five().unwrap(), 5);
    }

    #[test]
    fn test_five_document_needs_relaxed_grammar() {
        assert!(decode(FIVE_DOCUMENT).unwrap_err().is_parse());

        let options = ParseOptions::new().with_grammar(Grammar::Relaxed);
        assert_eq!(decode_with(FIVE_DOCUMENT, &options).unwrap(), Record::new(5));
    }

    #[test]
    fn test_to_document_matches_serialize() {
        let record = Record::new(-12);
        assert_eq!(record.to_document(), crate::to_value(&record).unwrap());
    }

    #[test]
    fn test_document_roundtrip() {
        for val in [i32::MIN, -1, 0, 5, i32::MAX] {
            let record = Record::new(val);
            assert_eq!(Record::from_document(record.to_document()).unwrap(), record);
        }
    }

    #[test]
    fn test_missing_val_is_not_zero() {
        let err = decode("{}").unwrap_err();
        assert_eq!(err, Error::missing_field("val"));
    }

    #[test]
    fn test_from_str() {
        let record: Record = r#"{"val": 7, "other": [1, 2]}"#.parse().unwrap();
        assert_eq!(record.val(), 7);
    }
}
