//! # richtext-engine
//!
//! Compiles a stream of markup tag events into a [`RichDocument`]: ordered
//! text fragments annotated with [`Span`] decorations.
//!
//! ## Modules
//!
//! - **`markup`**: tag events, [`MarkupTag`], the tag tree and a lenient scanner
//! - **`handlers`**: the [`TagHandler`] trait, the handler registry and the
//!   built-in handler kinds (img, b/i, a, lists, video, ...)
//! - **`parsing`**: [`ParseContext`] (open/close protocol, scoped values) and
//!   the [`Compiler`] that drives events and splits output
//! - **`document`**: [`DocumentBuilder`] and the finished fragments
//! - **`span`**: span variants, their codec and view lifecycle
//! - **`media`**: playback engine seam and the media player state machine
//! - **`store`**: binary persistence of whole documents

pub mod document;
pub mod handlers;
pub mod markup;
pub mod media;
pub mod parsing;
pub mod span;
pub mod store;

pub use document::{Annotation, DocumentBuilder, Fragment, RichDocument};
pub use handlers::{HandlerKind, HandlerRegistry, TagHandler, TagHandlerFactory};
pub use markup::{Attributes, MarkupEvent, MarkupTag, TagId};
pub use parsing::{Compiler, ContextValue, DefaultStyle, ParseContext, Style, compile, compile_markup};
pub use span::{FontStyle, Span, SpanKind, SpanRange};
