//! Error taxonomy.
//!
//! Three classes, deliberately kept apart:
//!
//! - **Match failure** is not an error type at all. It is recoverable by
//!   backtracking, signaled as `None` out of a matcher, and surfaces only
//!   through the failure tracker if no enclosing alternative consumes it.
//! - [`GrammarError`] is a defect in the grammar itself (malformed
//!   repetition bounds, an invalid pattern). It is fatal to the calling
//!   grammar and signaled by panic at construction or first use.
//! - [`SyntaxError`] / [`PegError`] are the reporting surface for a
//!   top-level parse failure, built from the furthest-failure record and
//!   rendered through `miette`.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A defect in the grammar, not in the input. Never recoverable.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("malformed repetition bounds: max {max} is less than min {min}")]
    MalformedQuantifier { min: usize, max: usize },

    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// A top-level parse failure at the furthest point any branch reached.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(cutpeg::syntax_error))]
pub struct SyntaxError {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("{message}")]
    pub span: SourceSpan,

    /// Byte offset of the furthest failure.
    pub offset: usize,
    /// 1-based line of the furthest failure.
    pub line: usize,
    /// 1-based character column of the furthest failure.
    pub column: usize,
    /// The text of the failing line, without its terminator.
    pub line_text: String,
    /// What the deepest failing matcher expected, if it said.
    pub expected: Option<String>,
    /// Enclosing rule names at the failure, outermost first.
    pub trace: Vec<String>,

    #[help]
    pub help: Option<String>,
}

/// Errors out of the rule registry's parse entry point.
#[derive(Debug, Error, Diagnostic)]
pub enum PegError {
    #[error("no rule named `{0}` is registered")]
    #[diagnostic(code(cutpeg::unknown_rule))]
    UnknownRule(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),
}
