//! # Built-in Handlers
//!
//! ## Modules
//!
//! - **`default`**: [`DefaultHandler`], the fallback for unknown tags
//! - **`image`**: `img` placeholder with a bitmap span
//! - **`inline`**: font styles, decorations and links over their content
//! - **`block`**: paragraphs, line breaks, headings and blockquotes
//! - **`list`**: `ul`/`ol` scopes and numbered or bulleted `li`
//! - **`video`**: embedded video that closes the current fragment

pub mod block;
pub mod default;
pub mod image;
pub mod inline;
pub mod list;
pub mod video;

pub use block::{BlockquoteHandler, BrHandler, HeadingHandler, ParagraphHandler};
pub use default::DefaultHandler;
pub use image::ImgHandler;
pub use inline::{Decoration, DecorationHandler, LinkHandler, StyleHandler};
pub use list::{ListHandler, ListItemHandler};
pub use video::VideoHandler;

use crate::document::DocumentBuilder;
use crate::span::{Span, SpanRange};

/// Context keys shared between built-in handlers.
pub mod keys {
    /// `Flag`: inside a bold element.
    pub const BOLD: &str = "style.bold";
    /// `Flag`: inside an italic element.
    pub const ITALIC: &str = "style.italic";
    /// `Number`: nesting depth of the innermost list.
    pub const LIST_DEPTH: &str = "list.depth";
    /// `Flag`: the innermost list is ordered.
    pub const LIST_ORDERED: &str = "list.ordered";
}

/// Attaches `span` over everything written since `start`, skipping empty
/// content.
pub(crate) fn span_since(out: &mut DocumentBuilder, start: usize, span: Span) {
    let range = SpanRange::new(start, out.len());
    if range.is_empty() {
        return;
    }
    if let Err(e) = out.set_span(span, range) {
        log::warn!("dropping span over {}..{}: {e}", range.start, range.end);
    }
}
