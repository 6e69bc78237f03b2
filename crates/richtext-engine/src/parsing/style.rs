/// Read-only style queries consumed by handlers and the compiler.
///
/// Zero or `None` means "no constraint" throughout.
pub trait Style: Send + Sync {
    /// Widest image to lay out, in pixels.
    fn max_image_width(&self) -> u32 {
        0
    }

    /// Text length in bytes after which the compiler starts a new fragment.
    fn fragment_limit(&self) -> Option<usize> {
        None
    }

    /// Newlines separating block elements.
    fn paragraph_break(&self) -> usize {
        2
    }
}

/// Plain-value [`Style`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultStyle {
    pub max_image_width: u32,
    pub fragment_limit: Option<usize>,
    pub paragraph_break: usize,
}

impl Default for DefaultStyle {
    fn default() -> Self {
        Self {
            max_image_width: 0,
            fragment_limit: None,
            paragraph_break: 2,
        }
    }
}

impl DefaultStyle {
    pub fn with_max_image_width(mut self, width: u32) -> Self {
        self.max_image_width = width;
        self
    }

    pub fn with_fragment_limit(mut self, limit: usize) -> Self {
        self.fragment_limit = Some(limit);
        self
    }
}

impl Style for DefaultStyle {
    fn max_image_width(&self) -> u32 {
        self.max_image_width
    }

    fn fragment_limit(&self) -> Option<usize> {
        self.fragment_limit.filter(|limit| *limit > 0)
    }

    fn paragraph_break(&self) -> usize {
        self.paragraph_break
    }
}
