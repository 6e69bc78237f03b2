use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::kinds::{
    BlockquoteHandler, BrHandler, Decoration, DecorationHandler, HeadingHandler, ImgHandler,
    LinkHandler, ListHandler, ListItemHandler, ParagraphHandler, StyleHandler, VideoHandler,
};
use super::{TagHandler, TagHandlerFactory};
use crate::span::FontStyle;

/// Maps tag names to handler factories.
///
/// Names are matched case-insensitively (keys are stored uppercased).
/// Unregistered names are not an error: the parse context falls back to
/// [`DefaultHandler`](super::DefaultHandler).
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    factories: HashMap<String, Arc<dyn TagHandlerFactory>>,
}

impl HandlerRegistry {
    /// A registry with no handlers; every tag resolves to the default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry with every built-in handler.
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        registry.register_with("img", || ImgHandler);
        registry.register_with("br", || BrHandler);
        registry.register_with("a", LinkHandler::default);
        registry.register_with("blockquote", BlockquoteHandler::default);
        registry.register_with("ul", || ListHandler::new(false));
        registry.register_with("ol", || ListHandler::new(true));
        registry.register_with("li", ListItemHandler::default);
        registry.register_with("video", || VideoHandler);
        registry.register_with("iframe", || VideoHandler);

        for tag in ["p", "div"] {
            registry.register_with(tag, || ParagraphHandler);
        }
        for level in 1..=6u8 {
            registry.register_with(&format!("h{level}"), move || HeadingHandler::new(level));
        }
        for (tag, style) in [
            ("b", FontStyle::Bold),
            ("strong", FontStyle::Bold),
            ("i", FontStyle::Italic),
            ("em", FontStyle::Italic),
            ("cite", FontStyle::Italic),
            ("dfn", FontStyle::Italic),
        ] {
            registry.register_with(tag, move || StyleHandler::new(style));
        }
        for (tag, decoration) in [
            ("u", Decoration::Underline),
            ("ins", Decoration::Underline),
            ("s", Decoration::Strikethrough),
            ("strike", Decoration::Strikethrough),
            ("del", Decoration::Strikethrough),
            ("code", Decoration::Monospace),
            ("tt", Decoration::Monospace),
            ("kbd", Decoration::Monospace),
            ("sup", Decoration::Superscript),
            ("sub", Decoration::Subscript),
        ] {
            registry.register_with(tag, move || DecorationHandler::new(decoration));
        }

        registry
    }

    /// Registers `factory` for `name`, replacing any earlier registration.
    pub fn register(&mut self, name: &str, factory: impl TagHandlerFactory + 'static) {
        self.factories.insert(name.to_uppercase(), Arc::new(factory));
    }

    /// Registers a constructor closure for `name`.
    pub fn register_with<H, F>(&mut self, name: &str, make: F)
    where
        H: TagHandler + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        self.register(name, move || Box::new(make()) as Box<dyn TagHandler>);
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn TagHandlerFactory>> {
        self.factories.get(&name.to_uppercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("HandlerRegistry").field("tags", &names).finish()
    }
}
