//! The cut-point stack implementing the PEG commit operator.
//!
//! Each [`choice`](crate::session::Session::choice) opens a scope. An
//! alternative that has consumed enough input to know it is the only viable
//! one calls [`cut`](CutStack::cut); from then on neither this choice nor any
//! enclosing one may fall back to a sibling alternative. Commitment
//! propagates outward to every ancestor scope and is never reset: popping a
//! committed scope leaves its ancestors committed.

/// Handle for one commit scope; returned by `enter_scope` and consumed by
/// `exit_scope` so scopes cannot be popped out of order.
#[derive(Debug)]
#[must_use = "a cut scope must be exited with exit_scope"]
pub struct CutScope(usize);

/// Stack of commit flags, innermost last. The root scope is created with the
/// session and never popped.
#[derive(Debug)]
pub struct CutStack {
    committed: Vec<bool>,
}

impl CutStack {
    pub fn new() -> Self {
        Self {
            committed: vec![false],
        }
    }

    pub fn enter_scope(&mut self) -> CutScope {
        self.committed.push(false);
        CutScope(self.committed.len() - 1)
    }

    pub fn exit_scope(&mut self, scope: CutScope) {
        assert_eq!(
            scope.0,
            self.committed.len() - 1,
            "cut scopes exited out of order"
        );
        assert!(scope.0 > 0, "the root cut scope is never exited");
        self.committed.pop();
    }

    /// Commits the innermost scope and every ancestor.
    pub fn cut(&mut self) {
        for flag in &mut self.committed {
            *flag = true;
        }
    }

    /// False once a cut has fired in the innermost scope: the enclosing
    /// choice must not try further alternatives.
    pub fn can_continue(&self) -> bool {
        !*self.committed.last().unwrap_or(&false)
    }

    pub fn depth(&self) -> usize {
        self.committed.len()
    }
}

impl Default for CutStack {
    fn default() -> Self {
        Self::new()
    }
}
