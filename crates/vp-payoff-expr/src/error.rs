//! Expression errors with byte-span diagnostics.

use std::fmt;
use thiserror::Error;

/// Half-open byte range `start..end` into the expression source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub end: usize,
}

impl Span {
    /// Create a span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors raised while parsing or evaluating a payoff expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Blank input.
    #[error("payoff expression cannot be empty")]
    Empty,

    /// Unexpected character or malformed number.
    #[error("lex error at {span}: {message}")]
    Lex {
        /// What went wrong.
        message: String,
        /// Where.
        span: Span,
    },

    /// Unexpected token or missing construct.
    #[error("parse error at {span}: {message}")]
    Parse {
        /// What went wrong.
        message: String,
        /// Where.
        span: Span,
    },

    /// Identifier that is neither `s`, a constant, nor a known function.
    #[error("unknown name `{name}` at {span}")]
    UnknownName {
        /// The offending identifier.
        name: String,
        /// Where.
        span: Span,
    },

    /// Known function called with the wrong number of arguments.
    #[error("`{function}` takes {expected} argument(s), got {found} at {span}")]
    Arity {
        /// Function name.
        function: &'static str,
        /// Accepted argument counts, e.g. `"1"` or `"at least 1"`.
        expected: &'static str,
        /// Arguments supplied.
        found: usize,
        /// Where.
        span: Span,
    },

    /// Arithmetic or domain failure while evaluating.
    #[error("{message} at {span}")]
    Evaluation {
        /// What went wrong.
        message: String,
        /// Sub-expression that failed.
        span: Span,
    },
}

impl ExprError {
    /// Source span of the error, if it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Empty => None,
            Self::Lex { span, .. }
            | Self::Parse { span, .. }
            | Self::UnknownName { span, .. }
            | Self::Arity { span, .. }
            | Self::Evaluation { span, .. } => Some(*span),
        }
    }

    pub(crate) fn evaluation(message: impl Into<String>, span: Span) -> Self {
        Self::Evaluation {
            message: message.into(),
            span,
        }
    }
}

impl From<ExprError> for vp_core::Error {
    fn from(e: ExprError) -> Self {
        vp_core::Error::InvalidParameter(e.to_string())
    }
}

/// Render `source` with a caret line under `span`.
///
/// ```
/// use vp_payoff_expr::{annotate_source, Span};
///
/// let text = annotate_source("max(s - 100, q)", Span::new(13, 14));
/// assert_eq!(text, "max(s - 100, q)\n             ^");
/// ```
pub fn annotate_source(source: &str, span: Span) -> String {
    let start = source
        .get(..span.start.min(source.len()))
        .map_or(span.start, |prefix| prefix.chars().count());
    let width = source
        .get(span.start.min(source.len())..span.end.min(source.len()))
        .map_or(1, |s| s.chars().count())
        .max(1);
    format!("{source}\n{}{}", " ".repeat(start), "^".repeat(width))
}
