//! # Markup
//!
//! Input side of the compiler: tokenizer events, tag occurrences and the
//! tag tree used for ancestor queries.
//!
//! ## Modules
//!
//! - **`event`**: [`MarkupEvent`] stream consumed by the compiler
//! - **`tag`**: [`MarkupTag`], [`TagId`], [`Attributes`] and the bound handler
//! - **`tree`**: [`TagTree`] parent links, handler kinds and item counters
//! - **`scan`**: lenient scanner producing a well-nested event stream

pub mod event;
pub mod scan;
pub mod tag;
pub mod tree;

pub use event::MarkupEvent;
pub use scan::scan;
pub use tag::{Attributes, BoundHandler, MarkupTag, TagId};
pub use tree::{Ancestor, TagTree};
