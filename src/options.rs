//! Configuration options for parsing and formatting documents.
//!
//! - [`Grammar`]: how strictly input text is parsed
//! - [`ParseOptions`]: grammar plus nesting limit, used by the decoding functions
//! - [`FormatOptions`]: compact or pretty output, used by the encoding functions
//!
//! ## Examples
//!
//! ```rust
//! use serde_record::{from_str_with_options, Grammar, ParseOptions, Record};
//!
//! let options = ParseOptions::relaxed().with_max_depth(8);
//! let record: Record = from_str_with_options("{val: 5, /* note */}", &options).unwrap();
//! assert_eq!(record.val(), 5);
//! ```

use std::fmt;

/// Nesting limit applied when none is configured.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Grammar strictness for document text.
///
/// - **Strict**: RFC 8259 JSON. Object keys must be double-quoted strings.
/// - **Relaxed**: strict JSON plus unquoted identifier keys, single-quoted
///   strings, one trailing comma before `]` or `}`, and `//` / `/* */` comments.
///
/// Encoders always emit strict JSON, which both grammars accept.
///
/// # Examples
///
/// ```rust
/// use serde_record::Grammar;
///
/// assert_eq!(Grammar::default(), Grammar::Strict);
/// assert_eq!(Grammar::Relaxed.as_str(), "relaxed");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Grammar {
    #[default]
    Strict,
    Relaxed,
}

impl Grammar {
    /// Returns the lowercase name of this grammar.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Grammar::Strict => "strict",
            Grammar::Relaxed => "relaxed",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_relaxed(&self) -> bool {
        matches!(self, Grammar::Relaxed)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling how document text is parsed.
///
/// # Examples
///
/// ```rust
/// use serde_record::{Grammar, ParseOptions};
///
/// let options = ParseOptions::new();
/// assert_eq!(options.grammar, Grammar::Strict);
/// assert_eq!(options.max_depth, 128);
///
/// let options = ParseOptions::new().with_grammar(Grammar::Relaxed);
/// assert!(options.grammar.is_relaxed());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub grammar: Grammar,
    /// Deepest allowed nesting of arrays and objects.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            grammar: Grammar::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default options (strict grammar, nesting limit of 128).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for the strict grammar.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Creates options for the relaxed grammar.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_record::{Grammar, ParseOptions};
    ///
    /// assert_eq!(ParseOptions::relaxed().grammar, Grammar::Relaxed);
    /// ```
    #[must_use]
    pub fn relaxed() -> Self {
        ParseOptions {
            grammar: Grammar::Relaxed,
            ..Default::default()
        }
    }

    /// Sets the grammar strictness.
    #[must_use]
    pub fn with_grammar(mut self, grammar: Grammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Sets the nesting limit. A limit of 0 rejects every array and object.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling how documents are written.
///
/// # Examples
///
/// ```rust
/// use serde_record::{to_string_with_options, FormatOptions, Record};
///
/// let record = Record::new(5);
/// let text = to_string_with_options(&record, &FormatOptions::pretty().with_indent(4)).unwrap();
/// assert_eq!(text, "{\n    \"val\": 5\n}");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub pretty: bool,
    /// Spaces per nesting level. Only affects pretty output.
    pub indent: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            pretty: false,
            indent: 2,
        }
    }
}

impl FormatOptions {
    /// Creates default options (compact output).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with newlines and 2-space indentation.
    #[must_use]
    pub fn pretty() -> Self {
        FormatOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation size.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}
