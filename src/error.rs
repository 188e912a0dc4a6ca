//! Error types for document parsing and record decoding.
//!
//! Every failure the crate reports is an [`Error`]. Callers that only care
//! about the broad category use [`Error::kind`]:
//!
//! - [`ErrorKind::Parse`]: the text is not well-formed under the selected
//!   [`Grammar`](crate::Grammar). Carries line and column.
//! - [`ErrorKind::Field`]: the text parsed, but a field is missing or has
//!   the wrong type or range for the target. Carries the member path
//!   (`$.val`).
//! - [`ErrorKind::Io`]: a reader or writer failed.
//! - [`ErrorKind::Other`]: unsupported types and custom messages.
//!
//! ## Examples
//!
//! ```rust
//! use serde_record::{decode, ErrorKind};
//!
//! let err = decode("{val: 5}").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Parse);
//! assert!(err.to_string().contains("line 1"));
//!
//! let err = decode(r#"{"val": "five"}"#).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Field);
//! assert!(err.to_string().contains("$.val"));
//! ```

use std::fmt;
use thiserror::Error;

/// Root of every member path carried by field errors.
const ROOT: &str = "$";

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed text under the selected grammar.
    Parse,
    /// Missing, mistyped or out-of-range field.
    Field,
    /// Reader or writer failure.
    Io,
    /// Anything else.
    Other,
}

/// Represents all possible errors that can occur while decoding or encoding documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Syntax error with detailed context
    #[error("Syntax error at line {line}, column {col}:\n{context}\n{msg}{suggestion}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
        suggestion: String,
    },

    /// Unexpected end of input
    #[error(
        "Unexpected end of input at line {line}, column {col}\n{context}\nExpected: {expected}"
    )]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
        context: String,
    },

    /// Non-whitespace content after the document
    #[error("Trailing characters at line {line}, column {col}: expected end of document")]
    TrailingCharacters { line: usize, col: usize },

    /// Arrays and objects nested deeper than the configured limit
    #[error("Nesting exceeds {limit} levels at line {line}, column {col}")]
    DepthLimitExceeded {
        line: usize,
        col: usize,
        limit: usize,
    },

    /// Byte input that is not UTF-8
    #[error("Invalid UTF-8 in input: {0}")]
    InvalidUtf8(String),

    /// A required field is absent
    #[error("Missing field `{field}` at {path}")]
    MissingField { path: String, field: String },

    /// Type mismatch during deserialization
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// Right type, unacceptable value (out of range, wrong length)
    #[error("Invalid value at {path}: expected {expected}, found {found}")]
    InvalidValue {
        path: String,
        expected: String,
        found: String,
    },

    /// Field rejected by a type that denies unknown fields
    #[error("Unknown field `{field}` at {path}, expected {expected}")]
    UnknownField {
        path: String,
        field: String,
        expected: String,
    },

    /// Enum variant name not recognised
    #[error("Unknown variant `{variant}` at {path}, expected {expected}")]
    UnknownVariant {
        path: String,
        variant: String,
        expected: String,
    },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::{Error, ErrorKind};
    ///
    /// let err = Error::syntax(10, 5, "unexpected token");
    /// assert!(err.to_string().contains("line 10"));
    /// assert_eq!(err.kind(), ErrorKind::Parse);
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: String::new(),
            suggestion: String::new(),
        }
    }

    /// Creates a syntax error with the offending source line and an optional suggestion.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::Error;
    ///
    /// let err = Error::syntax_with_context(
    ///     1,
    ///     2,
    ///     "expected '\"' to start an object key",
    ///     "{val: 5}",
    ///     Some("quote the key, or parse with Grammar::Relaxed"),
    /// );
    /// assert!(err.to_string().contains("Help:"));
    /// ```
    pub fn syntax_with_context(
        line: usize,
        col: usize,
        msg: &str,
        context: &str,
        suggestion: Option<&str>,
    ) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
            suggestion: suggestion
                .map(|s| format!("\nHelp: {}", s))
                .unwrap_or_default(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str, context: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates a type mismatch error rooted at the document root.
    ///
    /// The path grows as the error propagates out of nested objects and arrays.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::Error;
    ///
    /// let err = Error::type_mismatch("i32", "string \"five\"");
    /// assert!(err.to_string().contains("expected i32"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            path: ROOT.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a missing field error rooted at the document root.
    pub fn missing_field(field: &str) -> Self {
        Error::MissingField {
            path: ROOT.to_string(),
            field: field.to_string(),
        }
    }

    /// Creates an unsupported type error for values that cannot be represented as a document.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the broad category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Syntax { .. }
            | Error::UnexpectedEof { .. }
            | Error::TrailingCharacters { .. }
            | Error::DepthLimitExceeded { .. }
            | Error::InvalidUtf8(_) => ErrorKind::Parse,
            Error::MissingField { .. }
            | Error::TypeMismatch { .. }
            | Error::InvalidValue { .. }
            | Error::UnknownField { .. }
            | Error::UnknownVariant { .. } => ErrorKind::Field,
            Error::Io(_) => ErrorKind::Io,
            Error::UnsupportedType(_) | Error::Custom(_) => ErrorKind::Other,
        }
    }

    /// Returns `true` for errors raised because the text is malformed.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self.kind(), ErrorKind::Parse)
    }

    /// Returns `true` for errors raised because a field is missing or mistyped.
    #[must_use]
    pub const fn is_field(&self) -> bool {
        matches!(self.kind(), ErrorKind::Field)
    }

    /// Line and column of a parse error, if this error has a source position.
    #[must_use]
    pub const fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. }
            | Error::UnexpectedEof { line, col, .. }
            | Error::TrailingCharacters { line, col }
            | Error::DepthLimitExceeded { line, col, .. } => Some((*line, *col)),
            _ => None,
        }
    }

    /// Member path of a field error (`$`, `$.val`, `$.items[2].val`).
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::MissingField { path, .. }
            | Error::TypeMismatch { path, .. }
            | Error::InvalidValue { path, .. }
            | Error::UnknownField { path, .. }
            | Error::UnknownVariant { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Prefixes the path of a field error with `.key`. Other errors pass through.
    pub(crate) fn in_member(self, key: &str) -> Self {
        self.prefix_path(&format!(".{}", key))
    }

    /// Prefixes the path of a field error with `[index]`.
    pub(crate) fn in_element(self, index: usize) -> Self {
        self.prefix_path(&format!("[{}]", index))
    }

    fn prefix_path(mut self, segment: &str) -> Self {
        match &mut self {
            Error::MissingField { path, .. }
            | Error::TypeMismatch { path, .. }
            | Error::InvalidValue { path, .. }
            | Error::UnknownField { path, .. }
            | Error::UnknownVariant { path, .. } => {
                let rest = path.strip_prefix(ROOT).unwrap_or(path.as_str()).to_string();
                *path = format!("{}{}{}", ROOT, segment, rest);
            }
            _ => {}
        }
        self
    }
}

fn one_of(names: &[&str]) -> String {
    if names.is_empty() {
        return "none".to_string();
    }
    let quoted: Vec<String> = names.iter().map(|n| format!("`{}`", n)).collect();
    format!("one of {}", quoted.join(", "))
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::type_mismatch(&exp.to_string(), &unexp.to_string())
    }

    fn invalid_value(unexp: serde::de::Unexpected<'_>, exp: &dyn serde::de::Expected) -> Self {
        Error::InvalidValue {
            path: ROOT.to_string(),
            expected: exp.to_string(),
            found: unexp.to_string(),
        }
    }

    fn invalid_length(len: usize, exp: &dyn serde::de::Expected) -> Self {
        Error::InvalidValue {
            path: ROOT.to_string(),
            expected: exp.to_string(),
            found: format!("{} elements", len),
        }
    }

    fn unknown_variant(variant: &str, expected: &'static [&'static str]) -> Self {
        Error::UnknownVariant {
            path: ROOT.to_string(),
            variant: variant.to_string(),
            expected: one_of(expected),
        }
    }

    fn unknown_field(field: &str, expected: &'static [&'static str]) -> Self {
        Error::UnknownField {
            path: ROOT.to_string(),
            field: field.to_string(),
            expected: one_of(expected),
        }
    }

    fn missing_field(field: &'static str) -> Self {
        Error::missing_field(field)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::Error as _;

    #[test]
    fn test_kinds() {
        assert_eq!(Error::syntax(1, 1, "x").kind(), ErrorKind::Parse);
        assert_eq!(Error::missing_field("val").kind(), ErrorKind::Field);
        assert_eq!(Error::io("broken pipe").kind(), ErrorKind::Io);
        assert_eq!(Error::custom("boom").kind(), ErrorKind::Other);
        assert!(Error::TrailingCharacters { line: 1, col: 3 }.is_parse());
        assert!(Error::type_mismatch("i32", "string").is_field());
    }

    #[test]
    fn test_paths_accumulate_outwards() {
        let err = Error::missing_field("val").in_member("inner").in_element(2);
        assert_eq!(err.path(), Some("$[2].inner"));
        assert_eq!(err.to_string(), "Missing field `val` at $[2].inner");
    }

    #[test]
    fn test_prefix_ignores_parse_errors() {
        let err = Error::syntax(3, 4, "bad").in_member("val");
        assert_eq!(err.position(), Some((3, 4)));
        assert_eq!(err.path(), None);
    }

    #[test]
    fn test_serde_overrides_are_field_errors() {
        let err = Error::unknown_field("vale", &["val"]);
        assert!(err.is_field());
        assert!(err.to_string().contains("one of `val`"));

        let err = Error::unknown_variant("Five", &[]);
        assert!(err.to_string().contains("expected none"));
    }

    #[test]
    fn test_suggestion_rendering() {
        let err = Error::syntax_with_context(1, 2, "unquoted key", "{val: 5}", Some("quote it"));
        let text = err.to_string();
        assert!(text.contains("{val: 5}"));
        assert!(text.ends_with("\nHelp: quote it"));
    }
}
