//! cutpeg: a backtracking PEG combinator runtime with cut points and
//! furthest-failure diagnostics.
//!
//! A grammar is a set of mutually recursive host functions taking
//! `&mut Session` and composing primitive matchers through the combinators:
//! sequence, ordered choice, optional, bounded repetition, lookahead,
//! text/bounds capture, and identifier-boundary token matching. The runtime
//! guarantees exact cursor rollback on every failure path, tracks the
//! furthest failure for precise error locations, and supports the PEG cut
//! operator: once an alternative commits, no enclosing choice falls back to
//! a sibling, which keeps well-structured grammars effectively linear and
//! makes failures report the true syntax error.
//!
//! ```
//! use cutpeg::Session;
//!
//! fn number<'s>(s: &mut Session<'s>) -> Option<&'s str> {
//!     s.pattern(r"\d+")
//! }
//!
//! let mut s = Session::new("42 + 7");
//! assert_eq!(number(&mut s), Some("42"));
//! s.skip_whitespace();
//! assert!(s.token("+").is_some());
//! assert_eq!(number(&mut s), Some("7"));
//! assert!(s.at_end());
//! ```
//!
//! Match results are `Option<T>`: `Some` is success whatever the payload
//! carries, `None` is failure with the explanation held by the session's
//! failure tracker, never embedded in the payload. Sessions are
//! single-threaded, one logical parse each, and recursion uses the ordinary
//! call stack.

pub mod combinators;
pub mod cut;
pub mod diagnostics;
pub mod errors;
pub mod failure;
pub mod grammar;
pub mod matchers;
pub mod session;
pub mod source;
pub mod token;

pub use crate::cut::{CutScope, CutStack};
pub use crate::errors::{GrammarError, PegError, SyntaxError};
pub use crate::failure::{Failure, FailureTracker};
pub use crate::grammar::Grammar;
pub use crate::session::Session;
pub use crate::source::{Position, Source};
pub use crate::token::IDENTIFIER;
