use crate::document::DocumentBuilder;
use crate::handlers::{HandlerKind, TagHandler};
use crate::markup::MarkupTag;
use crate::parsing::ParseContext;
use crate::span::{Span, VideoSpan};

/// `video` and `iframe`: a placeholder carrying a [`VideoSpan`].
///
/// A video ends the current fragment: the handler asks for an output split
/// once its placeholder is written, so following content lands in a new
/// fragment.
#[derive(Debug, Default, Clone, Copy)]
pub struct VideoHandler;

impl TagHandler for VideoHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Video
    }

    fn on_tag_open(&mut self, ctx: &ParseContext, tag: &MarkupTag, out: &mut DocumentBuilder) {
        let Some(src) = tag.attributes().get_non_empty("src") else {
            log::debug!("<{}> without src ignored", tag.name());
            return;
        };
        let unit = out.append_placeholder();
        if let Err(e) = out.set_span(Span::Video(VideoSpan::new(src)), unit) {
            log::warn!("dropping video span for {src}: {e}");
            return;
        }
        ctx.request_split();
    }

    fn open_when_splitting(&self) -> bool {
        false
    }

    fn close_when_splitting(&self) -> bool {
        false
    }
}
