use serde::{Deserialize, Serialize};

/// An inline image drawn over a placeholder unit.
///
/// Dimensions of `0` mean "auto": the renderer uses the intrinsic size of the
/// image, bounded by `max_width` when that is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlBitmapSpan {
    pub uri: String,
    pub width: u32,
    pub height: u32,
    pub max_width: u32,
}

impl UrlBitmapSpan {
    pub fn new(uri: impl Into<String>, width: u32, height: u32, max_width: u32) -> Self {
        Self {
            uri: uri.into(),
            width,
            height,
            max_width,
        }
    }

    /// Size to lay out before the image itself is known.
    ///
    /// Returns `None` when either dimension is auto.
    pub fn layout_size(&self) -> Option<(u32, u32)> {
        (self.width > 0 && self.height > 0).then_some((self.width, self.height))
    }
}
