//! Identifier-boundary token matching.
//!
//! A keyword like `for` must not match against input `foreach`: for tokens
//! that are themselves identifier-shaped, the matcher greedily takes a whole
//! identifier at the cursor and requires it to equal the requested token.
//! Tokens that are not identifier-shaped (`+=`, `(`, …) fall back to plain
//! literal matching. Each distinct token is classified once, memoized by its
//! text.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::matchers::compiled;
use crate::session::Session;

/// The identifier shape used for token-boundary classification.
pub const IDENTIFIER: &str = r"[A-Za-z_][A-Za-z0-9_]*";

static TOKEN_CLASSES: Lazy<Mutex<HashMap<String, bool>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn identifier_shaped(token: &str) -> bool {
    let mut classes = TOKEN_CLASSES.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(&shaped) = classes.get(token) {
        return shaped;
    }
    let shaped = compiled(IDENTIFIER)
        .find(token)
        .is_some_and(|found| found.end() == token.len());
    classes.insert(token.to_owned(), shaped);
    shaped
}

impl<'s> Session<'s> {
    /// Matches `token` with identifier-boundary protection, then consumes
    /// trailing whitespace so the next rule starts past it.
    ///
    /// The whitespace consumption belongs to the token's own all-or-nothing
    /// attempt: it is not rolled back independently of the token.
    pub fn token(&mut self, token: &str) -> Option<()> {
        self.attempt(|s| {
            let start = s.offset;
            if identifier_shaped(token) {
                let word = s.pattern(IDENTIFIER)?;
                if word != token {
                    return s.fail_at(start, Some(format!("{token:?}")));
                }
            } else {
                s.literal(token)?;
            }
            s.skip_whitespace();
            Some(())
        })
    }

    /// Consumes whitespace at the cursor, if any. Never fails.
    pub fn skip_whitespace(&mut self) {
        let _ = self.pattern(r"\s*");
    }
}
