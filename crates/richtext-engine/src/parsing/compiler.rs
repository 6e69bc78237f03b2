use std::sync::Arc;

use super::{DefaultStyle, ParseContext, Style};
use crate::document::{DocumentBuilder, RichDocument};
use crate::handlers::HandlerRegistry;
use crate::markup::{Attributes, MarkupEvent, MarkupTag, scan};

/// Drives a [`MarkupEvent`] stream through a [`ParseContext`] into a
/// [`RichDocument`].
///
/// The compiler owns the stack of open tags and the current
/// [`DocumentBuilder`]. A split finishes the current builder as a fragment:
/// every open tag is closed on the old builder and reopened on a fresh one,
/// both with `splitting = true` so handlers can keep their effects from
/// leaking into the new fragment.
pub struct Compiler {
    root: ParseContext,
    context: ParseContext,
    open: Vec<MarkupTag>,
    builder: DocumentBuilder,
    document: RichDocument,
}

impl Compiler {
    pub fn new(style: Arc<dyn Style>, registry: Arc<HandlerRegistry>) -> Self {
        let root = ParseContext::new(style, registry);
        Self {
            context: root.clone(),
            root,
            open: Vec::new(),
            builder: DocumentBuilder::new(),
            document: RichDocument::new(),
        }
    }

    /// Standard handlers with an unconstrained style.
    pub fn with_defaults() -> Self {
        Self::new(
            Arc::new(DefaultStyle::default()),
            Arc::new(HandlerRegistry::standard()),
        )
    }

    /// The context the next event will be processed in.
    pub fn context(&self) -> &ParseContext {
        &self.context
    }

    pub fn root(&self) -> &ParseContext {
        &self.root
    }

    pub fn open_tags(&self) -> &[MarkupTag] {
        &self.open
    }

    pub fn builder(&self) -> &DocumentBuilder {
        &self.builder
    }

    /// Fragments finished so far.
    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn feed(&mut self, event: MarkupEvent) {
        match event {
            MarkupEvent::Open { name, attributes } => self.open(&name, attributes),
            MarkupEvent::Close { name } => self.close(&name),
            MarkupEvent::Text(content) => self.text(&content),
        }
    }

    pub fn open(&mut self, name: &str, attributes: Attributes) {
        let parent = self.open.last().map(MarkupTag::id);
        let mut tag = self.context.create_tag(name, attributes, parent);
        self.context = self.context.on_tag_open(&mut tag, &mut self.builder, false);
        self.open.push(tag);
        self.split_if_requested();
    }

    /// Closes the innermost open tag.
    ///
    /// # Panics
    ///
    /// If no tag is open.
    pub fn close(&mut self, name: &str) {
        let Some(mut tag) = self.open.pop() else {
            panic!("</{name}> with no open tag");
        };
        if !tag.name().eq_ignore_ascii_case(name) {
            log::warn!("</{name}> closes <{}>", tag.name());
        }
        self.context = self.context.on_tag_close(&mut tag, &mut self.builder, false);
        self.split_if_requested();
    }

    /// Appends text with HTML whitespace rules: runs collapse to one space
    /// and a space is dropped at the start of a line.
    pub fn text(&mut self, content: &str) {
        let suppress_leading = self.builder.at_line_start() || self.builder.text().ends_with(' ');
        let collapsed = collapse_whitespace(content, suppress_leading);
        if collapsed.is_empty() {
            return;
        }
        self.builder.append(&collapsed);

        if let Some(limit) = self.root.style().fragment_limit()
            && self.builder.len() >= limit
        {
            self.split();
        }
    }

    /// Finishes the current fragment and continues in a new one.
    pub fn split(&mut self) {
        for tag in self.open.iter_mut().rev() {
            self.context = self.context.on_tag_close(tag, &mut self.builder, true);
        }

        let fragment = std::mem::take(&mut self.builder).finish();
        if !fragment.is_empty() {
            self.document.push(fragment);
        }

        // Gated closes leave their scope in place; reopen from the root.
        self.context = self.root.clone();
        for tag in self.open.iter_mut() {
            self.context = self.context.on_tag_open(tag, &mut self.builder, true);
        }
        if self.root.take_split_request() {
            log::debug!("split requested while reopening tags ignored");
        }
    }

    /// Closes anything still open and returns the document.
    pub fn finish(mut self) -> RichDocument {
        while let Some(name) = self.open.last().map(|tag| tag.name().to_string()) {
            log::debug!("closing unterminated <{name}>");
            self.close(&name);
        }
        let fragment = self.builder.finish();
        if !fragment.is_empty() {
            self.document.push(fragment);
        }
        self.document
    }

    fn split_if_requested(&mut self) {
        if self.root.take_split_request() {
            self.split();
        }
    }
}

fn collapse_whitespace(content: &str, suppress_leading: bool) -> String {
    let mut out = String::with_capacity(content.len());
    let mut last_space = suppress_leading;
    for c in content.chars() {
        if c.is_ascii_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}

/// Compiles an event stream.
pub fn compile<I>(events: I, style: Arc<dyn Style>, registry: Arc<HandlerRegistry>) -> RichDocument
where
    I: IntoIterator<Item = MarkupEvent>,
{
    let mut compiler = Compiler::new(style, registry);
    for event in events {
        compiler.feed(event);
    }
    compiler.finish()
}

/// Scans `source` leniently and compiles it.
pub fn compile_markup(
    source: &str,
    style: Arc<dyn Style>,
    registry: Arc<HandlerRegistry>,
) -> RichDocument {
    compile(scan(source), style, registry)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::document::PLACEHOLDER;
    use crate::span::{BulletSpan, FontStyle, Span, SpanKind};

    fn compile_default(source: &str) -> RichDocument {
        compile_markup(
            source,
            Arc::new(DefaultStyle::default().with_max_image_width(100)),
            Arc::new(HandlerRegistry::standard()),
        )
    }

    fn kinds(doc: &RichDocument) -> Vec<SpanKind> {
        doc.fragments()
            .iter()
            .flat_map(|f| f.spans().map(Span::kind))
            .collect()
    }

    #[rstest]
    #[case("a  b\n c", false, "a b c")]
    #[case("  lead", true, "lead")]
    #[case("  lead", false, " lead")]
    #[case("\t\n", true, "")]
    fn whitespace_collapse(#[case] input: &str, #[case] suppress: bool, #[case] expected: &str) {
        assert_eq!(collapse_whitespace(input, suppress), expected);
    }

    #[test]
    fn nested_styles_combine() {
        let doc = compile_default("<b>x <i>y</i></b>");
        let fragment = &doc.fragments()[0];
        assert_eq!(fragment.text, "x y");
        let styles: Vec<_> = fragment
            .annotations
            .iter()
            .map(|a| (a.span.clone(), fragment.slice(a.range).unwrap().to_string()))
            .collect();
        assert_eq!(
            styles,
            vec![
                (Span::Style(FontStyle::BoldItalic), "y".to_string()),
                (Span::Style(FontStyle::Bold), "x y".to_string()),
            ]
        );
    }

    #[test]
    fn paragraphs_are_separated() {
        let doc = compile_default("<p>one</p><p>two</p>");
        assert_eq!(doc.plain_text(), "one\n\ntwo\n\n");
    }

    #[rstest]
    #[case(r#"<ol start="0"><li>a</li><li>b</li></ol>"#, vec![0, 1])]
    #[case(r#"<ol start="1"><li>a</li><li>b</li></ol>"#, vec![1, 2])]
    #[case(r#"<ol start="x"><li>a</li><li>b</li></ol>"#, vec![1, 2])]
    #[case("<ol><li>a</li><li>b</li><li>c</li></ol>", vec![1, 2, 3])]
    fn ordered_list_start_attribute(#[case] source: &str, #[case] expected: Vec<u32>) {
        let doc = compile_default(source);
        let ordinals: Vec<_> = doc.fragments()[0]
            .spans()
            .filter_map(|s| match s {
                Span::Bullet(b) => b.ordinal,
                _ => None,
            })
            .collect();
        assert_eq!(ordinals, expected);
    }

    #[test]
    fn ordered_list_numbers_items() {
        let doc = compile_default(r#"<ol start="3"><li>a</li><li>b</li></ol>"#);
        let bullets: Vec<_> = doc.fragments()[0]
            .spans()
            .filter_map(|s| match s {
                Span::Bullet(b) => Some(*b),
                _ => None,
            })
            .collect();
        assert_eq!(
            bullets,
            vec![
                BulletSpan {
                    depth: 1,
                    ordinal: Some(3)
                },
                BulletSpan {
                    depth: 1,
                    ordinal: Some(4)
                },
            ]
        );
    }

    #[test]
    fn nested_unordered_list_depth() {
        let doc = compile_default("<ol><li>a<ul><li>b</li></ul></li></ol>");
        let bullets: Vec<_> = doc.fragments()[0]
            .spans()
            .filter_map(|s| match s {
                Span::Bullet(b) => Some(*b),
                _ => None,
            })
            .collect();
        assert!(bullets.contains(&BulletSpan {
            depth: 2,
            ordinal: None
        }));
        assert!(bullets.contains(&BulletSpan {
            depth: 1,
            ordinal: Some(1)
        }));
    }

    #[test]
    fn video_starts_new_fragment() {
        let doc = compile_default(r#"before<video src="v.mp4"></video>after"#);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.fragments()[0].text, format!("before{PLACEHOLDER}"));
        assert_eq!(doc.fragments()[1].text, "after");
        assert_eq!(kinds(&doc), vec![SpanKind::Video]);
    }

    #[test]
    fn split_carries_open_styles_into_next_fragment() {
        let doc = compile_default(r#"<b>x<iframe src="v"></iframe>y</b>"#);
        assert_eq!(doc.len(), 2);
        assert_eq!(
            kinds(&doc),
            vec![SpanKind::Video, SpanKind::Style, SpanKind::Style]
        );
        assert_eq!(doc.fragments()[1].text, "y");
    }

    #[test]
    fn list_items_are_not_renumbered_across_splits() {
        let doc = compile_default(r#"<ol><li>a<video src="v"></video>b</li><li>c</li></ol>"#);
        let ordinals: Vec<_> = doc
            .fragments()
            .iter()
            .flat_map(|f| f.spans())
            .filter_map(|s| match s {
                Span::Bullet(b) => b.ordinal,
                _ => None,
            })
            .collect();
        assert_eq!(ordinals, vec![1, 2]);
    }

    #[test]
    fn fragment_limit_splits_long_text() {
        let doc = compile_markup(
            "<p>aaaa</p><p>bbbb</p>",
            Arc::new(DefaultStyle::default().with_fragment_limit(4)),
            Arc::new(HandlerRegistry::standard()),
        );
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.fragments()[0].text, "aaaa\n\n");
        assert_eq!(doc.fragments()[1].text, "bbbb\n\n");
    }

    #[test]
    fn finish_closes_open_tags() {
        let mut compiler = Compiler::with_defaults();
        compiler.open("u", Attributes::new());
        compiler.text("x");
        let doc = compiler.finish();
        assert_eq!(kinds(&doc), vec![SpanKind::Underline]);
    }

    #[test]
    #[should_panic(expected = "with no open tag")]
    fn close_without_open_panics() {
        Compiler::with_defaults().close("b");
    }
}
