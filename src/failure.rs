//! The furthest-failure tracker.
//!
//! Every primitive matcher that fails records where and what it expected.
//! Only the deepest record survives: when a parse ultimately fails, the
//! furthest point any branch reached is the most informative explanation of
//! the syntax error. Records behind successful progress are retired, since
//! the branch they described has been superseded.

/// A single recorded match failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Byte offset at which the match failed.
    pub offset: usize,
    /// Description of what was expected, when the failing matcher knew it.
    pub expected: Option<String>,
    /// Names of the enclosing rules at record time, outermost first.
    pub trace: Vec<String>,
}

/// Session-scoped record of the deepest failure seen so far.
///
/// The stored offset is monotonically non-decreasing for the lifetime of a
/// session, except at an explicit [`restore`](FailureTracker::restore) from a
/// snapshot or when verbose mode forces an overwrite.
#[derive(Debug, Default)]
pub struct FailureTracker {
    furthest: Option<Failure>,
    verbose: bool,
}

impl FailureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// In verbose mode every record overwrites, ties included, so a debugging
    /// run sees the full failure trace rather than only the deepest one.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Stores `failure` if it is strictly deeper than the current record
    /// (or unconditionally in verbose mode). Returns true if stored.
    pub fn record(&mut self, failure: Failure) -> bool {
        let deeper = match &self.furthest {
            Some(current) => failure.offset > current.offset,
            None => true,
        };
        if deeper || self.verbose {
            self.furthest = Some(failure);
            true
        } else {
            false
        }
    }

    /// Discards the record if successful progress has reached or passed it.
    /// A failure ahead of `new_offset` is kept: it is still the best
    /// candidate explanation for an eventual top-level failure.
    pub fn retire_if_stale(&mut self, new_offset: usize) {
        if let Some(failure) = &self.furthest {
            if failure.offset <= new_offset {
                self.furthest = None;
            }
        }
    }

    pub fn furthest(&self) -> Option<&Failure> {
        self.furthest.as_ref()
    }

    pub fn take(&mut self) -> Option<Failure> {
        self.furthest.take()
    }

    /// Snapshot for lookahead: the caller saves the record, runs a
    /// sub-match, and puts the saved record back on success.
    pub fn snapshot(&self) -> Option<Failure> {
        self.furthest.clone()
    }

    pub fn restore(&mut self, snapshot: Option<Failure>) {
        self.furthest = snapshot;
    }
}
