//! The parse session: one input, one cursor, one failure tracker, one cut
//! chain.
//!
//! All matching state lives here and is threaded through every rule and
//! combinator as `&mut Session`, with no ambient globals. The
//! [`attempt`](Session::attempt) executor is the only place cursor motion is
//! made durable; every combinator is built on it, which is what makes the
//! rollback invariant hold transitively: after any failing call, the cursor
//! is exactly where it was before the call.

use std::panic::{self, AssertUnwindSafe};

use crate::cut::CutStack;
use crate::failure::{Failure, FailureTracker};
use crate::source::{Position, Source};

/// A single parse over one input. Create one per parse; sessions are not
/// reused across unrelated inputs and are not meant to be shared between
/// logical parses.
#[derive(Debug)]
pub struct Session<'s> {
    pub(crate) source: Source<'s>,
    pub(crate) offset: usize,
    pub(crate) failures: FailureTracker,
    pub(crate) cuts: CutStack,
    pub(crate) rule_stack: Vec<String>,
    pub(crate) source_name: Option<String>,
}

impl<'s> Session<'s> {
    pub fn new(text: &'s str) -> Self {
        Self::at(text, 0)
    }

    /// Starts the session at `offset` instead of the beginning of the input.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the input or not on a character
    /// boundary.
    pub fn at(text: &'s str, offset: usize) -> Self {
        assert!(
            text.is_char_boundary(offset),
            "start offset {offset} is not a character boundary of the input"
        );
        Self {
            source: Source::new(text),
            offset,
            failures: FailureTracker::new(),
            cuts: CutStack::new(),
            rule_stack: Vec::new(),
            source_name: None,
        }
    }

    /// Attaches a name to the input for diagnostics (a file path, usually).
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.source_name = Some(name.into());
        self
    }

    /// In verbose mode every failure overwrites the record, ties included,
    /// and is reported to stderr as it happens.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.failures.set_verbose(verbose);
    }

    pub fn source(&self) -> &Source<'s> {
        &self.source
    }

    /// Current byte offset of the cursor. Also the save half of the
    /// save/restore pair; [`restore`](Session::restore) is the other half.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Character offset of the cursor, for external reporting on multi-byte
    /// input.
    pub fn char_offset(&self) -> usize {
        self.source.char_offset(self.offset)
    }

    /// Moves the cursor back to a previously saved offset.
    ///
    /// Grammar code rarely needs this directly: [`attempt`](Session::attempt)
    /// and the combinators built on it handle rollback. It is exposed for
    /// rules that manage their own scanning.
    pub fn restore(&mut self, offset: usize) {
        assert!(
            self.source.text().is_char_boundary(offset),
            "restored offset {offset} is not a character boundary of the input"
        );
        self.offset = offset;
    }

    /// The input from the cursor to end-of-input.
    pub fn rest(&self) -> &'s str {
        &self.source.text()[self.offset..]
    }

    pub fn at_end(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Line/column position of the cursor.
    pub fn position(&self) -> Position<'s> {
        self.source.position(self.offset)
    }

    /// The backtracking executor.
    ///
    /// Saves the cursor and runs `op`. On success the cursor stays where `op`
    /// left it and any failure record at or behind the new offset is retired
    /// as superseded. On failure the cursor is restored and the failure
    /// record is left alone, since it may be the best explanation of a later
    /// top-level failure. On a panic out of `op`, the cursor is restored
    /// before the unwind resumes, so even faults cannot leak partial cursor
    /// state.
    pub fn attempt<T>(&mut self, op: impl FnOnce(&mut Session<'s>) -> Option<T>) -> Option<T> {
        let saved = self.offset;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| op(&mut *self)));
        match outcome {
            Ok(Some(value)) => {
                self.failures.retire_if_stale(self.offset);
                Some(value)
            }
            Ok(None) => {
                self.offset = saved;
                None
            }
            Err(fault) => {
                self.offset = saved;
                panic::resume_unwind(fault)
            }
        }
    }

    /// Runs `op` as a named rule. The name participates in the diagnostic
    /// trace attached to failures recorded while the rule is active.
    pub fn rule<T>(
        &mut self,
        name: &str,
        op: impl FnOnce(&mut Session<'s>) -> Option<T>,
    ) -> Option<T> {
        self.rule_stack.push(name.to_owned());
        let result = self.attempt(op);
        self.rule_stack.pop();
        result
    }

    /// Commits the innermost choice and every enclosing one: no sibling
    /// alternative of any enclosing choice will be tried after this point.
    pub fn cut(&mut self) {
        self.cuts.cut();
    }

    /// False once a cut has fired in the innermost choice scope.
    pub fn can_continue(&self) -> bool {
        self.cuts.can_continue()
    }

    /// Records a match failure at the cursor and returns `None`.
    ///
    /// Primitive matchers call this; rule code may too, to fail with a
    /// domain-specific expectation.
    pub fn fail<T>(&mut self, expected: Option<String>) -> Option<T> {
        self.fail_at(self.offset, expected)
    }

    /// Records a match failure at an explicit offset and returns `None`.
    pub fn fail_at<T>(&mut self, offset: usize, expected: Option<String>) -> Option<T> {
        if self.failures.verbose() {
            let position = self.source.position(offset);
            match &expected {
                Some(expected) => eprintln!(
                    "cutpeg: failed (expected {expected}) at {}:{}",
                    position.line, position.column
                ),
                None => eprintln!("cutpeg: failed at {}:{}", position.line, position.column),
            }
        }
        self.failures.record(Failure {
            offset,
            expected,
            trace: self.rule_stack.clone(),
        });
        None
    }

    /// The deepest failure recorded so far, if any.
    pub fn failure(&self) -> Option<&Failure> {
        self.failures.furthest()
    }

    /// Position of the deepest recorded failure.
    pub fn failure_position(&self) -> Option<Position<'s>> {
        self.failures
            .furthest()
            .map(|failure| self.source.position(failure.offset))
    }

    /// Takes the deepest failure out of the tracker, resetting it.
    pub fn take_failure(&mut self) -> Option<Failure> {
        self.failures.take()
    }
}
