//! # Document
//!
//! Output of a compile: a [`RichDocument`] is an ordered list of
//! [`Fragment`]s, each a run of text with span annotations. A new fragment
//! starts whenever the compiler splits its output.
//!
//! ## Modules
//!
//! - **`builder`**: [`DocumentBuilder`], the mutable fragment under construction

pub mod builder;

pub use builder::{DocumentBuilder, PLACEHOLDER, RangeError};

use crate::span::{Span, SpanRange, Surface, ViewLifecycle};

/// A span over a byte range of its fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub span: Span,
    pub range: SpanRange,
}

/// One finished segment of a document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fragment {
    pub text: String,
    pub annotations: Vec<Annotation>,
}

impl Fragment {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.annotations.is_empty()
    }

    /// Text covered by `range`, or `None` if the range does not fit.
    pub fn slice(&self, range: SpanRange) -> Option<&str> {
        self.text.get(range.start..range.end)
    }

    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.annotations.iter().map(|a| &a.span)
    }

    /// Shows the fragment on `surface`: every span is told it was set to the
    /// view, then attached. Returns how many spans refused to attach.
    pub fn attach_to(&mut self, surface: &dyn Surface) -> usize {
        for annotation in &mut self.annotations {
            annotation.span.on_spanned_set_to_view(surface);
        }
        let mut refused = 0;
        for annotation in &mut self.annotations {
            if !annotation.span.on_attached_to_view(surface) {
                refused += 1;
            }
        }
        refused
    }

    pub fn detach_from(&mut self, surface: &dyn Surface) {
        for annotation in &mut self.annotations {
            annotation.span.on_detached_from_view(surface);
        }
    }
}

/// A compiled document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichDocument {
    fragments: Vec<Fragment>,
}

impl RichDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    pub fn fragments_mut(&mut self) -> &mut [Fragment] {
        &mut self.fragments
    }

    pub fn into_fragments(self) -> Vec<Fragment> {
        self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn span_count(&self) -> usize {
        self.fragments.iter().map(|f| f.annotations.len()).sum()
    }

    /// All fragment texts concatenated.
    pub fn plain_text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

impl From<Vec<Fragment>> for RichDocument {
    fn from(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }
}
