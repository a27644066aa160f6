//! Source text and position derivation.
//!
//! A [`Source`] borrows the input for the lifetime of a parse session and
//! precomputes a table of line-start byte offsets so that any byte offset can
//! be converted to a human-readable `{line, column, line text}` position with
//! a binary search instead of a rescan.

/// Immutable input text plus its line-start table.
#[derive(Debug, Clone)]
pub struct Source<'s> {
    text: &'s str,
    line_starts: Vec<usize>,
}

/// A human-readable location derived from a byte offset.
///
/// `line` and `column` are 1-based. `column` counts characters from the line
/// start, not bytes, so multi-byte input reports the column a reader would
/// expect. `char_offset` is the character index of the offset within the
/// whole input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position<'s> {
    pub line: usize,
    pub column: usize,
    pub line_text: &'s str,
    pub char_offset: usize,
}

impl<'s> Source<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            line_starts: compute_line_starts(text),
        }
    }

    pub fn text(&self) -> &'s str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character index of `offset` within the input.
    pub fn char_offset(&self, offset: usize) -> usize {
        self.text[..offset].chars().count()
    }

    /// Derives the position of `offset`.
    ///
    /// An offset at end-of-input whose preceding character is a line
    /// terminator reports a fresh, empty line one past the last; otherwise it
    /// reports one past the final column of the last line.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the input or not on a character
    /// boundary: positions are only ever derived from cursor offsets, so an
    /// out-of-range offset is a caller defect, not an input error.
    pub fn position(&self, offset: usize) -> Position<'s> {
        assert!(
            offset <= self.text.len(),
            "offset {} is past the end of the input ({} bytes)",
            offset,
            self.text.len()
        );

        // Last line whose start is at or before `offset`.
        let index = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[index];

        let line_text = match self.text[line_start..].find(|ch| ch == '\n' || ch == '\r') {
            Some(len) => &self.text[line_start..line_start + len],
            None => &self.text[line_start..],
        };

        Position {
            line: index + 1,
            column: self.text[line_start..offset].chars().count() + 1,
            line_text,
            char_offset: self.char_offset(offset),
        }
    }
}

/// Byte offsets at which each line begins, recognizing `\n`, `\r` and `\r\n`
/// terminators. A trailing terminator contributes a final, empty line.
fn compute_line_starts(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => starts.push(i + 1),
            b'\r' => {
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                starts.push(i + 1);
            }
            _ => {}
        }
        i += 1;
    }

    starts
}
