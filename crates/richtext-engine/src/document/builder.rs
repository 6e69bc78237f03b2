use crate::span::{Span, SpanRange};

use super::{Annotation, Fragment};

/// Stand-in character occupied by replacement spans (images, video).
pub const PLACEHOLDER: char = '\u{FFFC}';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Range {start}..{end} outside text of length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
    #[error("Range start {start} after end {end}")]
    Inverted { start: usize, end: usize },
}

/// Mutable output of one fragment: text plus span annotations.
///
/// Offsets are byte offsets into the text. Annotations keep
/// exclusive-exclusive bounds when text is inserted later.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    text: String,
    annotations: Vec<Annotation>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// True when nothing has been written yet or the last char is a newline.
    pub fn at_line_start(&self) -> bool {
        self.text.is_empty() || self.text.ends_with('\n')
    }

    /// Appends `s` and returns the range it occupies.
    pub fn append(&mut self, s: &str) -> SpanRange {
        let start = self.text.len();
        self.text.push_str(s);
        SpanRange::new(start, self.text.len())
    }

    pub fn append_placeholder(&mut self) -> SpanRange {
        let mut buf = [0; 4];
        self.append(PLACEHOLDER.encode_utf8(&mut buf))
    }

    /// Attaches `span` over `range`, validated against the current text.
    pub fn set_span(&mut self, span: Span, range: SpanRange) -> Result<(), RangeError> {
        self.check_range(range)?;
        self.annotations.push(Annotation { span, range });
        Ok(())
    }

    /// Inserts `s` at byte offset `at`, shifting annotations.
    pub fn insert(&mut self, at: usize, s: &str) -> Result<(), RangeError> {
        self.check_offset(at)?;
        self.text.insert_str(at, s);
        for annotation in &mut self.annotations {
            annotation.range.shift_for_insert(at, s.len());
        }
        Ok(())
    }

    /// Makes the text end with at least `count` newlines. Does nothing on
    /// an empty builder, so fragments never start with blank lines.
    pub fn ensure_newlines(&mut self, count: usize) {
        if self.text.is_empty() {
            return;
        }
        let trailing = self.text.bytes().rev().take_while(|b| *b == b'\n').count();
        for _ in trailing..count {
            self.text.push('\n');
        }
    }

    pub fn finish(self) -> Fragment {
        Fragment {
            text: self.text,
            annotations: self.annotations,
        }
    }

    fn check_range(&self, range: SpanRange) -> Result<(), RangeError> {
        if range.start > range.end {
            return Err(RangeError::Inverted {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.text.len() {
            return Err(RangeError::OutOfBounds {
                start: range.start,
                end: range.end,
                len: self.text.len(),
            });
        }
        self.check_offset(range.start)?;
        self.check_offset(range.end)
    }

    fn check_offset(&self, offset: usize) -> Result<(), RangeError> {
        if offset > self.text.len() {
            return Err(RangeError::OutOfBounds {
                start: offset,
                end: offset,
                len: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(offset) {
            return Err(RangeError::NotCharBoundary(offset));
        }
        Ok(())
    }
}
