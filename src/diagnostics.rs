//! Furthest-failure reporting.
//!
//! Two renderings of the same record: a plain-text report written to any
//! sink (the failing line, a caret under the failing column, and the
//! enclosing-rule trace), and a [`SyntaxError`] carrying a labeled span for
//! `miette`'s fancy terminal output.

use std::io::{self, Write};

use miette::NamedSource;
use unicode_width::UnicodeWidthChar;

use crate::errors::SyntaxError;
use crate::session::Session;

/// Display width of a line prefix, for caret placement. Tabs count as 8
/// columns, matching the report's own tab rendering.
fn caret_column(line_text: &str, column: usize) -> usize {
    line_text
        .chars()
        .take(column - 1)
        .map(|ch| {
            if ch == '\t' {
                8
            } else {
                UnicodeWidthChar::width(ch).unwrap_or(0)
            }
        })
        .sum()
}

fn expand_tabs(line_text: &str) -> String {
    line_text.replace('\t', &" ".repeat(8))
}

impl<'s> Session<'s> {
    /// Writes a plain-text report of the deepest recorded failure to `out`:
    /// header with position (and source name, if set), the failing line, a
    /// caret under the failing column, and the rule trace when one exists.
    ///
    /// Does nothing if no failure has been recorded.
    pub fn report_failure(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let Some(failure) = self.failure() else {
            return Ok(());
        };
        let position = self.source.position(failure.offset);

        match &failure.expected {
            Some(expected) => write!(
                out,
                "Failed (expected {expected}) at {}:{}",
                position.line, position.column
            )?,
            None => write!(out, "Failed at {}:{}", position.line, position.column)?,
        }
        if let Some(name) = &self.source_name {
            write!(out, " of {name}")?;
        }
        writeln!(out, ":")?;

        writeln!(out, "{}", expand_tabs(position.line_text))?;
        writeln!(
            out,
            "{}^",
            " ".repeat(caret_column(position.line_text, position.column))
        )?;

        if !failure.trace.is_empty() {
            writeln!(out, "Rule stack:")?;
            for name in failure.trace.iter().rev() {
                writeln!(out, "  {name}")?;
            }
        }
        Ok(())
    }

    /// Builds a [`SyntaxError`] from the deepest recorded failure, for
    /// callers that want `miette`'s rendering or a structured value.
    ///
    /// When no failure was recorded (a rule returned failure without ever
    /// touching a matcher), the error points at the session's current offset.
    pub fn syntax_error(&self) -> SyntaxError {
        let name = self
            .source_name
            .clone()
            .unwrap_or_else(|| "<input>".to_owned());
        let text = self.source.text();

        let (offset, expected, trace) = match self.failure() {
            Some(failure) => (
                failure.offset,
                failure.expected.clone(),
                failure.trace.clone(),
            ),
            None => (self.offset, None, self.rule_stack.clone()),
        };
        let position = self.source.position(offset);

        let message = match &expected {
            Some(expected) => format!("expected {expected}"),
            None => "the parse failed here".to_owned(),
        };
        let span_len = usize::from(offset < text.len());
        let help = trace.last().map(|rule| format!("in rule `{rule}`"));

        SyntaxError {
            message,
            src: NamedSource::new(name, text.to_owned()),
            span: (offset, span_len).into(),
            offset,
            line: position.line,
            column: position.column,
            line_text: position.line_text.to_owned(),
            expected,
            trace,
            help,
        }
    }
}
