use serde::{Deserialize, Serialize};

/// A byte range `[start, end)` into a fragment's text.
///
/// Ranges are exclusive-exclusive with respect to later insertions: text
/// inserted exactly at `start` or `end` is never absorbed by the range
/// (see [`DocumentBuilder::insert`](crate::DocumentBuilder::insert)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpanRange {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl SpanRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the range is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Shifts the range for `inserted` bytes placed at `at`.
    pub(crate) fn shift_for_insert(&mut self, at: usize, inserted: usize) {
        if at <= self.start {
            self.start += inserted;
            self.end += inserted;
        } else if at < self.end {
            self.end += inserted;
        }
    }
}
