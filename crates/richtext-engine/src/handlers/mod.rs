//! # Tag Handlers
//!
//! Per-tag behaviour. A handler is instantiated for every tag occurrence,
//! bound to the [`MarkupTag`] at open and reused for its close, so any
//! per-tag state (start offsets, parsed attributes) lives in the handler
//! value itself.
//!
//! ## Modules
//!
//! - **`registry`**: [`HandlerRegistry`] tag name to factory table
//! - **`dimension`**: lenient width/height attribute parsing
//! - **`kinds`**: built-in handlers, one module per tag family

pub mod dimension;
pub mod kinds;
pub mod registry;

pub use kinds::DefaultHandler;
pub use registry::HandlerRegistry;

use crate::document::DocumentBuilder;
use crate::markup::MarkupTag;
use crate::parsing::ParseContext;

/// Identifies what a bound handler does, for ancestor queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Default,
    Image,
    Style,
    Decoration,
    Link,
    LineBreak,
    Paragraph,
    Heading,
    Blockquote,
    List,
    ListItem,
    Video,
    /// Handlers registered by embedders.
    Custom(&'static str),
}

/// Behaviour bound to one tag occurrence.
///
/// Every method has a default, so a handler that does nothing is an empty
/// `impl`. When the compiler is splitting its output, `on_tag_open` and
/// `on_tag_close` only run if the matching `*_when_splitting` predicate
/// returns `true`.
pub trait TagHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Default
    }

    fn on_tag_open(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, _out: &mut DocumentBuilder) {}

    fn on_tag_close(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, _out: &mut DocumentBuilder) {}

    fn open_when_splitting(&self) -> bool {
        true
    }

    fn close_when_splitting(&self) -> bool {
        true
    }

    /// Context for the tag's content. Return `ctx.child()` to open a scope.
    fn replace_context(&mut self, ctx: &ParseContext) -> ParseContext {
        ctx.clone()
    }

    /// Context to continue with after the tag closes; `captured` is the
    /// context that was current when the tag opened.
    fn initial_context(&self, captured: &ParseContext) -> ParseContext {
        captured.clone()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("No handler registered for <{0}>")]
    Unregistered(String),
    #[error("Handler construction failed: {0}")]
    Construction(String),
}

/// Builds a fresh handler for each tag occurrence.
pub trait TagHandlerFactory: Send + Sync {
    fn instantiate(&self) -> Result<Box<dyn TagHandler>, ResolveError>;
}

impl<F> TagHandlerFactory for F
where
    F: Fn() -> Box<dyn TagHandler> + Send + Sync,
{
    fn instantiate(&self) -> Result<Box<dyn TagHandler>, ResolveError> {
        Ok(self())
    }
}
