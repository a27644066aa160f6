//! The named-rule registry.
//!
//! Rules are host callables; the registry only provides the symbolic entry
//! point: register rules under names, then start a parse at any of them.
//! Mutually recursive rules call each other directly as functions taking
//! `&mut Session`; the registry is a lookup table, not a dispatch layer.

use std::collections::HashMap;

use crate::errors::PegError;
use crate::session::Session;

type RuleFn<T> = Box<dyn for<'s> Fn(&mut Session<'s>) -> Option<T>>;

/// A set of named rules producing payloads of type `T`.
pub struct Grammar<T> {
    rules: HashMap<String, RuleFn<T>>,
}

impl<T> Grammar<T> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Registers `rule` under `name`, replacing any previous rule of that
    /// name.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        rule: impl for<'s> Fn(&mut Session<'s>) -> Option<T> + 'static,
    ) {
        self.rules.insert(name.into(), Box::new(rule));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Parses `input` starting at the rule named `start`.
    pub fn parse(&self, start: &str, input: &str) -> Result<T, PegError> {
        self.parse_named(start, input, "<input>")
    }

    /// Like [`parse`](Grammar::parse), with a source name (a file path,
    /// usually) attached to the session for diagnostics.
    pub fn parse_named(
        &self,
        start: &str,
        input: &str,
        source_name: &str,
    ) -> Result<T, PegError> {
        let rule = self
            .rules
            .get(start)
            .ok_or_else(|| PegError::UnknownRule(start.to_owned()))?;
        let mut session = Session::new(input).named(source_name);
        match session.rule(start, |s| rule(s)) {
            Some(value) => Ok(value),
            None => Err(PegError::Syntax(session.syntax_error())),
        }
    }
}

impl<T> Default for Grammar<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Grammar<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.rules.keys().collect();
        names.sort();
        f.debug_struct("Grammar").field("rules", &names).finish()
    }
}
