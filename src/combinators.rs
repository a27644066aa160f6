//! The combinator set: sequence, ordered choice, optional, bounded
//! repetition, lookahead, and text/bounds capture.
//!
//! Everything here is expressed through [`Session::attempt`], which is what
//! guarantees strict rollback on every failure path. Payloads are carried in
//! `Option<T>`: `Some` is success whatever the payload. A rule that
//! legitimately produces `false` or an empty value is never mistaken for a
//! failed match.

use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};

use crate::errors::GrammarError;
use crate::session::Session;

impl<'s> Session<'s> {
    /// Runs a `?`-composed body with a single rollback point.
    ///
    /// The first failing step aborts the whole sequence and the cursor is
    /// restored to where it was before the first step. Intermediate offsets
    /// are never kept.
    ///
    /// ```
    /// # use cutpeg::Session;
    /// let mut s = Session::new("hello");
    /// let matched = s.sequence(|s| {
    ///     s.literal("he")?;
    ///     s.literal("llo")?;
    ///     Some(())
    /// });
    /// assert!(matched.is_some());
    /// ```
    pub fn sequence<T>(&mut self, body: impl FnOnce(&mut Session<'s>) -> Option<T>) -> Option<T> {
        self.attempt(body)
    }

    /// Tries `alternatives` in order from the same starting offset and
    /// returns the first success.
    ///
    /// The whole choice runs inside its own cut scope: an alternative that
    /// calls [`cut`](Session::cut) after consuming enough input to be certain
    /// it is the right one commits this choice (and every enclosing one) to
    /// that alternative. If it then fails, no further alternatives are tried
    /// and the failure reports the real syntax error rather than a wrong
    /// sibling's mismatch.
    ///
    /// # Panics
    ///
    /// Panics if an alternative fails without restoring the cursor; that is
    /// a combinator implementation bug, never tolerated silently.
    pub fn choice<T>(
        &mut self,
        alternatives: &mut [&mut dyn FnMut(&mut Session<'s>) -> Option<T>],
    ) -> Option<T> {
        let start = self.offset;
        let scope = self.cuts.enter_scope();
        let mut chosen = None;
        for alternative in alternatives.iter_mut() {
            match self.attempt(|s| alternative(s)) {
                Some(value) => {
                    chosen = Some(value);
                    break;
                }
                None => {
                    assert_eq!(
                        self.offset, start,
                        "choice alternative failed without restoring the cursor"
                    );
                    if !self.cuts.can_continue() {
                        break;
                    }
                }
            }
        }
        self.cuts.exit_scope(scope);
        chosen
    }

    /// Attempts `step` and always succeeds, with `None` as the payload when
    /// the step failed.
    ///
    /// The failed attempt's record is deliberately left in the tracker: a
    /// skipped optional is often the best diagnostic candidate when the
    /// parse fails further on.
    pub fn optional<T>(
        &mut self,
        step: impl FnOnce(&mut Session<'s>) -> Option<T>,
    ) -> Option<Option<T>> {
        Some(self.attempt(step))
    }

    /// Attempts `step` repeatedly, collecting payloads in order.
    ///
    /// `step` receives `true` on the first iteration only, which is where
    /// separator-vs-none logic lives. Matching stops at the first failing
    /// attempt, or after `max` repetitions when a bound is given. The
    /// repetition succeeds iff at least `min` items were collected;
    /// otherwise the cursor rolls back to before the whole repetition and
    /// the deepest sub-failure stands as the diagnostic.
    ///
    /// # Panics
    ///
    /// `max < min` is a grammar-construction defect and panics immediately
    /// with [`GrammarError::MalformedQuantifier`].
    pub fn repeat<T>(
        &mut self,
        min: usize,
        max: Option<usize>,
        mut step: impl FnMut(&mut Session<'s>, bool) -> Option<T>,
    ) -> Option<Vec<T>> {
        if let Some(max) = max {
            if max < min {
                panic!("{}", GrammarError::MalformedQuantifier { min, max });
            }
        }
        self.attempt(|s| {
            let mut items = Vec::new();
            loop {
                if max.is_some_and(|max| items.len() >= max) {
                    break;
                }
                let first = items.is_empty();
                match s.attempt(|s| step(s, first)) {
                    Some(item) => items.push(item),
                    None => break,
                }
            }
            if items.len() >= min {
                Some(items)
            } else {
                s.fail(None)
            }
        })
    }

    /// Positive (`positive = true`) or negative lookahead. Consumes no input
    /// on any outcome.
    ///
    /// On success the failure record from before the lookahead is put back,
    /// so a failed step inside a successful negative lookahead leaves no
    /// residual diagnostic. On failure, a record is made at the lookahead's
    /// own offset.
    pub fn lookahead<T>(
        &mut self,
        positive: bool,
        step: impl FnOnce(&mut Session<'s>) -> Option<T>,
    ) -> Option<()> {
        let saved_offset = self.offset;
        let saved_failure = self.failures.snapshot();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| step(&mut *self)));
        self.offset = saved_offset;
        let matched = match outcome {
            Ok(result) => result.is_some(),
            Err(fault) => panic::resume_unwind(fault),
        };
        if matched == positive {
            self.failures.restore(saved_failure);
            Some(())
        } else {
            self.fail(None)
        }
    }

    /// Matches end of input without consuming anything.
    pub fn eof(&mut self) -> Option<()> {
        self.lookahead(false, |s| s.any_char())
    }

    /// Runs `step` and returns the input it consumed as a string slice.
    /// Failure propagates untouched.
    pub fn capture_text<T>(
        &mut self,
        step: impl FnOnce(&mut Session<'s>) -> Option<T>,
    ) -> Option<&'s str> {
        let start = self.offset;
        self.attempt(step)?;
        Some(&self.source.text()[start..self.offset])
    }

    /// Runs `step` and returns the `[start, end)` byte span it consumed.
    /// Failure propagates untouched.
    pub fn capture_bounds<T>(
        &mut self,
        step: impl FnOnce(&mut Session<'s>) -> Option<T>,
    ) -> Option<Range<usize>> {
        let start = self.offset;
        self.attempt(step)?;
        Some(start..self.offset)
    }
}
