//! Byte-range text edits.

use std::ops::Range;

/// Replace `range` of the source with `text`. An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Splice {
    range: Range<usize>,
    text: String,
}

impl Splice {
    pub(crate) fn insert(at: usize, text: impl Into<String>) -> Self {
        Self {
            range: at..at,
            text: text.into(),
        }
    }

    pub(crate) fn replace(range: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// Source text plus the line conventions edits must follow.
pub(crate) struct SourceText<'a> {
    text: &'a str,
    newline: &'static str,
}

impl<'a> SourceText<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let newline = if text.contains("\r\n") { "\r\n" } else { "\n" };
        Self { text, newline }
    }

    pub(crate) fn as_str(&self) -> &'a str {
        self.text
    }

    pub(crate) fn slice(&self, range: Range<usize>) -> &'a str {
        &self.text[range]
    }

    pub(crate) fn newline(&self) -> &'static str {
        self.newline
    }

    /// Leading whitespace of the line containing `offset`.
    pub(crate) fn indent_at(&self, offset: usize) -> &'a str {
        let start = self.text[..offset].rfind('\n').map_or(0, |i| i + 1);
        let line = &self.text[start..];
        let width = line
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(line.len());
        &line[..width]
    }

    /// Offset just past the newline ending the line that contains `offset`,
    /// or `None` on the last line.
    pub(crate) fn next_line_start(&self, offset: usize) -> Option<usize> {
        self.text[offset..].find('\n').map(|i| offset + i + 1)
    }

    /// Apply splices. Ranges must not overlap.
    pub(crate) fn apply(&self, mut splices: Vec<Splice>) -> String {
        // Back to front, so earlier offsets stay valid.
        splices.sort_by(|a, b| b.range.start.cmp(&a.range.start));

        let mut out = self.text.to_string();
        for splice in splices {
            out.replace_range(splice.range, &splice.text);
        }
        out
    }
}
