use super::{keys, span_since};
use crate::document::DocumentBuilder;
use crate::handlers::{HandlerKind, TagHandler};
use crate::markup::MarkupTag;
use crate::parsing::{ContextValue, ParseContext};
use crate::span::{BulletSpan, Span};

/// `ul` and `ol`.
///
/// Opens a scope recording list depth and whether items are numbered. An
/// `ol` seeds its item counter from the `start` attribute (default 1).
#[derive(Debug, Clone, Copy)]
pub struct ListHandler {
    ordered: bool,
}

impl ListHandler {
    pub fn new(ordered: bool) -> Self {
        Self { ordered }
    }
}

impl TagHandler for ListHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::List
    }

    fn on_tag_open(&mut self, ctx: &ParseContext, tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.ensure_newlines(1);
        if self.ordered {
            let first = match tag.attribute("start").map(|v| v.trim().parse::<u32>()) {
                Some(Ok(n)) => n,
                Some(Err(_)) => {
                    log::debug!("malformed <ol start>, counting from 1");
                    1
                }
                None => 1,
            };
            ctx.start_items(tag.id(), first);
        }
    }

    fn on_tag_close(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.ensure_newlines(1);
    }

    fn replace_context(&mut self, ctx: &ParseContext) -> ParseContext {
        let depth = ctx.number(keys::LIST_DEPTH).unwrap_or(0);
        let child = ctx.child();
        child.set_value(keys::LIST_DEPTH, Some(ContextValue::Number(depth + 1)));
        child.set_flag(keys::LIST_ORDERED, self.ordered);
        child
    }
}

/// `li`: a [`BulletSpan`] over the item content.
///
/// Numbering comes from the nearest enclosing list's item counter, which
/// lives in the tag tree. The item does not re-open after an output split,
/// so the counter advances once per item and the marker is not repeated at
/// the top of the next fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListItemHandler {
    start: usize,
    bullet: Option<BulletSpan>,
}

impl TagHandler for ListItemHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::ListItem
    }

    fn on_tag_open(&mut self, ctx: &ParseContext, tag: &MarkupTag, out: &mut DocumentBuilder) {
        out.ensure_newlines(1);
        self.start = out.len();

        let depth = ctx.number(keys::LIST_DEPTH).unwrap_or(1).clamp(1, i64::from(u8::MAX));
        let ordinal = if ctx.flag(keys::LIST_ORDERED) {
            ctx.parent(tag, HandlerKind::List)
                .map(|list| ctx.advance_item(list.id))
        } else {
            None
        };
        self.bullet = Some(BulletSpan {
            depth: depth as u8,
            ordinal,
        });
    }

    fn on_tag_close(&mut self, _ctx: &ParseContext, _tag: &MarkupTag, out: &mut DocumentBuilder) {
        if let Some(bullet) = self.bullet.take() {
            span_since(out, self.start, Span::Bullet(bullet));
        }
        out.ensure_newlines(1);
    }

    fn open_when_splitting(&self) -> bool {
        false
    }
}
