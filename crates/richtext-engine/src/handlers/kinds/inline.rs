//! Handlers that decorate the text between their open and close.

use super::{keys, span_since};
use crate::document::DocumentBuilder;
use crate::handlers::{HandlerKind, TagHandler};
use crate::markup::MarkupTag;
use crate::parsing::ParseContext;
use crate::span::{FontStyle, LinkSpan, Span};

/// Bold and italic elements.
///
/// Each opens a scope flagging its style, so an italic inside a bold (or
/// the reverse) produces a [`FontStyle::BoldItalic`] span over its content.
#[derive(Debug, Clone, Copy)]
pub struct StyleHandler {
    style: FontStyle,
    start: usize,
}

impl StyleHandler {
    pub fn new(style: FontStyle) -> Self {
        Self { style, start: 0 }
    }
}

impl TagHandler for StyleHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Style
    }

    fn on_tag_open(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        self.start = out.len();
    }

    fn on_tag_close(&mut self, ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        let style = match (ctx.flag(keys::BOLD), ctx.flag(keys::ITALIC)) {
            (true, true) => FontStyle::BoldItalic,
            (true, false) => FontStyle::Bold,
            (false, true) => FontStyle::Italic,
            (false, false) => self.style,
        };
        span_since(out, self.start, Span::Style(style));
    }

    fn replace_context(&mut self, ctx: &ParseContext) -> ParseContext {
        let child = ctx.child();
        match self.style {
            FontStyle::Bold => child.set_flag(keys::BOLD, true),
            FontStyle::Italic => child.set_flag(keys::ITALIC, true),
            FontStyle::BoldItalic => {
                child.set_flag(keys::BOLD, true);
                child.set_flag(keys::ITALIC, true);
            }
        }
        child
    }
}

/// Flag-like decorations that map one to one onto a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Underline,
    Strikethrough,
    Monospace,
    Superscript,
    Subscript,
}

impl Decoration {
    pub fn span(self) -> Span {
        match self {
            Decoration::Underline => Span::Underline,
            Decoration::Strikethrough => Span::Strikethrough,
            Decoration::Monospace => Span::Monospace,
            Decoration::Superscript => Span::Superscript,
            Decoration::Subscript => Span::Subscript,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DecorationHandler {
    decoration: Decoration,
    start: usize,
}

impl DecorationHandler {
    pub fn new(decoration: Decoration) -> Self {
        Self {
            decoration,
            start: 0,
        }
    }
}

impl TagHandler for DecorationHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Decoration
    }

    fn on_tag_open(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        self.start = out.len();
    }

    fn on_tag_close(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        span_since(out, self.start, self.decoration.span());
    }
}

/// `a`: a [`Span::Link`] over the content when `href` is present.
#[derive(Debug, Clone, Default)]
pub struct LinkHandler {
    href: Option<String>,
    start: usize,
}

impl TagHandler for LinkHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Link
    }

    fn on_tag_open(&mut self, _ctx: &ParseContext, tag: &MarkupTag, out: &mut DocumentBuilder) {
        self.href = tag.attributes().get_non_empty("href").map(str::to_string);
        self.start = out.len();
    }

    fn on_tag_close(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        if let Some(href) = self.href.take() {
            span_since(out, self.start, Span::Link(LinkSpan::new(href)));
        }
    }
}
