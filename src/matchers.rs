//! Primitive matchers: any-character, literal, and pattern matching at the
//! cursor.
//!
//! Patterns are ordinary `regex` source strings, compiled once per distinct
//! source into an anchored `Regex` and cached process-wide, so a pattern
//! used on every parse of a hot rule is never recompiled. Primitives fail by
//! recording with the failure tracker at the current offset and returning
//! `None` without moving the cursor.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::GrammarError;
use crate::session::Session;

static PATTERNS: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Compiles `pattern` anchored at the match start, memoized by its source.
///
/// # Panics
///
/// An invalid pattern is a grammar-construction defect and panics at first
/// use with [`GrammarError::InvalidPattern`].
pub(crate) fn compiled(pattern: &str) -> Regex {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = cache.get(pattern) {
        return regex.clone();
    }
    let regex = Regex::new(&format!(r"\A(?:{pattern})")).unwrap_or_else(|source| {
        panic!(
            "{}",
            GrammarError::InvalidPattern {
                pattern: pattern.to_owned(),
                source,
            }
        )
    });
    cache.insert(pattern.to_owned(), regex.clone());
    regex
}

impl<'s> Session<'s> {
    /// Consumes and returns one character; fails at end of input.
    pub fn any_char(&mut self) -> Option<char> {
        match self.rest().chars().next() {
            Some(ch) => {
                self.offset += ch.len_utf8();
                Some(ch)
            }
            None => self.fail(Some("any character".to_owned())),
        }
    }

    /// Matches `text` exactly at the cursor and consumes it.
    pub fn literal(&mut self, text: &str) -> Option<()> {
        if self.rest().starts_with(text) {
            self.offset += text.len();
            Some(())
        } else {
            self.fail(Some(format!("{text:?}")))
        }
    }

    /// Matches `pattern` anchored at the cursor, consuming and returning the
    /// matched text (possibly empty, if the pattern allows it).
    pub fn pattern(&mut self, pattern: &str) -> Option<&'s str> {
        let regex = compiled(pattern);
        match regex.find(self.rest()) {
            Some(found) => {
                let start = self.offset;
                self.offset += found.end();
                Some(&self.source.text()[start..self.offset])
            }
            None => self.fail(Some(format!("/{pattern}/"))),
        }
    }
}
