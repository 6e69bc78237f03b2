use crate::document::DocumentBuilder;
use crate::handlers::dimension::{clamp_to_width, parse_image_dimension};
use crate::handlers::{HandlerKind, TagHandler};
use crate::markup::MarkupTag;
use crate::parsing::ParseContext;
use crate::span::{Span, UrlBitmapSpan};

/// `img`: one placeholder unit carrying a [`UrlBitmapSpan`].
///
/// Width defaults to the style's maximum image width and height to 0
/// (auto). A width above a non-zero maximum is clamped and the height
/// scaled with it. Tags without a `src` are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImgHandler;

impl TagHandler for ImgHandler {
    fn kind(&self) -> HandlerKind {
        HandlerKind::Image
    }

    fn on_tag_open(&mut self, ctx: &ParseContext, tag: &MarkupTag, out: &mut DocumentBuilder) {
        let Some(src) = tag.attributes().get_non_empty("src") else {
            log::debug!("<img> without src ignored");
            return;
        };

        let max_width = ctx.style().max_image_width();
        let width = parse_image_dimension(tag.attribute("width"), max_width, max_width);
        let height = parse_image_dimension(tag.attribute("height"), 0, 0);
        let (width, height) = clamp_to_width(width, height, max_width);

        let unit = out.append_placeholder();
        let span = Span::UrlBitmap(UrlBitmapSpan::new(src, width, height, max_width));
        if let Err(e) = out.set_span(span, unit) {
            log::warn!("dropping image span for {src}: {e}");
        }
    }

    fn open_when_splitting(&self) -> bool {
        false
    }

    fn close_when_splitting(&self) -> bool {
        false
    }
}
