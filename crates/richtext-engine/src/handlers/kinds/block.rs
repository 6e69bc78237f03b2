//! Block-level handlers: they separate their content with newlines.

use super::{keys, span_since};
use crate::document::DocumentBuilder;
use crate::handlers::{HandlerKind, TagHandler};
use crate::markup::MarkupTag;
use crate::parsing::ParseContext;
use crate::span::Span;

/// `br`: a single newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrHandler;

impl TagHandler for BrHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::LineBreak
    }

    fn on_tag_open(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.append("\n");
    }

    fn open_when_splitting(&self) -> bool {
        false
    }

    fn close_when_splitting(&self) -> bool {
        false
    }
}

/// `p`, `div`: paragraph breaks before and after.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParagraphHandler;

impl TagHandler for ParagraphHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Paragraph
    }

    fn on_tag_open(&mut self, ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.ensure_newlines(ctx.style().paragraph_break());
    }

    fn on_tag_close(&mut self, ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.ensure_newlines(ctx.style().paragraph_break());
    }
}

/// `h1`..`h6`.
#[derive(Debug, Clone, Copy)]
pub struct HeadingHandler {
    level: u8,
    start: usize,
}

impl HeadingHandler {
    /// `level` is clamped into 1..=6.
    pub fn new(level: u8) -> Self {
        Self {
            level: level.clamp(1, 6),
            start: 0,
        }
    }
}

impl TagHandler for HeadingHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Heading
    }

    fn on_tag_open(&mut self, ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.ensure_newlines(ctx.style().paragraph_break());
        self.start = out.len();
    }

    fn on_tag_close(&mut self, ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        span_since(out, self.start, Span::Heading(self.level));
        out.ensure_newlines(ctx.style().paragraph_break());
    }
}

/// `blockquote`.
///
/// Lists inside a quote start over at depth 1, so the quote clears the
/// enclosing list state for its content.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockquoteHandler {
    start: usize,
}

impl TagHandler for BlockquoteHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Blockquote
    }

    fn on_tag_open(&mut self, ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.ensure_newlines(ctx.style().paragraph_break());
        self.start = out.len();
    }

    fn on_tag_close(&mut self, ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        span_since(out, self.start, Span::Quote);
        out.ensure_newlines(ctx.style().paragraph_break());
    }

    fn replace_context(&mut self, ctx: &ParseContext) -> ParseContext {
        let child = ctx.child();
        child.set_value(keys::LIST_DEPTH, None);
        child.set_value(keys::LIST_ORDERED, None);
        child
    }
}
