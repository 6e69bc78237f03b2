use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::Style;
use crate::document::DocumentBuilder;
use crate::handlers::{
    DefaultHandler, HandlerKind, HandlerRegistry, ResolveError, TagHandler, TagHandlerFactory,
};
use crate::markup::{Ancestor, Attributes, BoundHandler, MarkupTag, TagId, TagTree};

/// A scoped value handlers use to talk to each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

/// State of one parse, shared by every context handle.
struct Shared {
    style: Arc<dyn Style>,
    registry: Arc<HandlerRegistry>,
    resolved: RefCell<HashMap<String, Arc<dyn TagHandlerFactory>>>,
    tree: RefCell<TagTree>,
    split_requested: Cell<bool>,
}

/// One level of the scope chain. `None` entries shadow outer scopes.
struct Scope {
    values: RefCell<HashMap<String, Option<ContextValue>>>,
    parent: Option<Rc<Scope>>,
    depth: usize,
}

impl Scope {
    fn lookup(&self, key: &str) -> Option<ContextValue> {
        if let Some(entry) = self.values.borrow().get(key) {
            return entry.clone();
        }
        self.parent.as_ref().and_then(|parent| parent.lookup(key))
    }
}

/// Parse state at one point of the tag tree.
///
/// Cloning is cheap and yields a handle to the *same* scope: writes through
/// either handle are visible to both. [`child`](Self::child) opens a nested
/// scope whose writes stay local to it. The style, registry, resolution
/// cache and tag tree are shared by every context of a parse.
#[derive(Clone)]
pub struct ParseContext {
    shared: Rc<Shared>,
    scope: Rc<Scope>,
}

impl ParseContext {
    pub fn new(style: Arc<dyn Style>, registry: Arc<HandlerRegistry>) -> Self {
        Self {
            shared: Rc::new(Shared {
                style,
                registry,
                resolved: RefCell::default(),
                tree: RefCell::default(),
                split_requested: Cell::new(false),
            }),
            scope: Rc::new(Scope {
                values: RefCell::default(),
                parent: None,
                depth: 0,
            }),
        }
    }

    pub fn style(&self) -> &dyn Style {
        self.shared.style.as_ref()
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.shared.registry
    }

    /// A context for a nested scope.
    pub fn child(&self) -> ParseContext {
        ParseContext {
            shared: self.shared.clone(),
            scope: Rc::new(Scope {
                values: RefCell::default(),
                parent: Some(self.scope.clone()),
                depth: self.scope.depth + 1,
            }),
        }
    }

    /// Number of nested scopes above the root.
    pub fn scope_depth(&self) -> usize {
        self.scope.depth
    }

    /// True when both handles point at the same scope.
    pub fn same_scope(&self, other: &ParseContext) -> bool {
        Rc::ptr_eq(&self.scope, &other.scope)
    }

    /// Sets `key` in this scope. `None` clears it, hiding any outer value.
    pub fn set_value(&self, key: &str, value: Option<ContextValue>) {
        self.scope.values.borrow_mut().insert(key.to_string(), value);
    }

    pub fn set_flag(&self, key: &str, on: bool) {
        self.set_value(key, Some(ContextValue::Flag(on)));
    }

    /// Innermost value of `key`.
    pub fn value(&self, key: &str) -> Option<ContextValue> {
        self.scope.lookup(key)
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.value(key), Some(ContextValue::Flag(true)))
    }

    pub fn number(&self, key: &str) -> Option<i64> {
        match self.value(key) {
            Some(ContextValue::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<String> {
        match self.value(key) {
            Some(ContextValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    /// Registers a new tag occurrence under `parent`.
    pub fn create_tag(&self, name: &str, attributes: Attributes, parent: Option<TagId>) -> MarkupTag {
        let id = self.shared.tree.borrow_mut().open(name, parent);
        MarkupTag::new(id, name, attributes, parent)
    }

    /// Instantiates the handler for `name`.
    ///
    /// Factories are looked up in this parse's cache, then the registry.
    /// A missing registration or a failed construction yields a
    /// [`DefaultHandler`]; only successful factories are cached.
    pub fn resolve(&self, name: &str) -> Box<dyn TagHandler> {
        let key = name.to_uppercase();
        let cached = self.shared.resolved.borrow().get(&key).cloned();
        let Some(factory) = cached.or_else(|| self.shared.registry.lookup(&key)) else {
            log::debug!("{}, using default handler", ResolveError::Unregistered(name.to_string()));
            return Box::new(DefaultHandler);
        };
        match factory.instantiate() {
            Ok(handler) => {
                self.shared.resolved.borrow_mut().entry(key).or_insert(factory);
                handler
            }
            Err(e) => {
                log::debug!("{e}, using default handler for <{name}>");
                Box::new(DefaultHandler)
            }
        }
    }

    /// Number of tag names resolved to a registered factory so far.
    pub fn cached_resolutions(&self) -> usize {
        self.shared.resolved.borrow().len()
    }

    /// Output substitution hook. Returns `out` unchanged.
    pub fn replace_builder<'a>(&self, out: &'a mut DocumentBuilder) -> &'a mut DocumentBuilder {
        out
    }

    /// Binds a handler to `tag` and runs its open behaviour.
    ///
    /// While `splitting`, the open only runs if the handler opts in through
    /// [`TagHandler::open_when_splitting`]; otherwise `self` is returned
    /// unchanged. The handler is bound either way, capturing `self` as the
    /// context to restore on close.
    pub fn on_tag_open(
        &self,
        tag: &mut MarkupTag,
        out: &mut DocumentBuilder,
        splitting: bool,
    ) -> ParseContext {
        let out = self.replace_builder(out);
        let mut handler = self.resolve(tag.name());
        self.shared
            .tree
            .borrow_mut()
            .set_kind(tag.id(), handler.kind());

        let replaced = !splitting || handler.open_when_splitting();
        let next = if replaced {
            handler.on_tag_open(self, tag, out);
            handler.replace_context(self)
        } else {
            self.clone()
        };

        tag.handler = Some(BoundHandler {
            handler,
            captured: self.clone(),
            replaced,
        });
        next
    }

    /// Runs the close behaviour of the handler bound at open.
    ///
    /// While `splitting`, `on_tag_close` only runs if the handler opts in
    /// through [`TagHandler::close_when_splitting`]. The context returned is
    /// the handler's [`TagHandler::initial_context`] when its open replaced
    /// the context, and the captured context otherwise. Every executed
    /// `replace_context` is matched by exactly one `initial_context`,
    /// whatever the handler's splitting predicates.
    ///
    /// # Panics
    ///
    /// If `tag` was never opened through [`on_tag_open`](Self::on_tag_open).
    pub fn on_tag_close(
        &self,
        tag: &mut MarkupTag,
        out: &mut DocumentBuilder,
        splitting: bool,
    ) -> ParseContext {
        let out = self.replace_builder(out);
        let Some(mut bound) = tag.handler.take() else {
            panic!("<{}> closed without a bound handler", tag.name());
        };

        if !splitting || bound.handler.close_when_splitting() {
            bound.handler.on_tag_close(self, tag, out);
        }
        let next = if std::mem::take(&mut bound.replaced) {
            bound.handler.initial_context(&bound.captured)
        } else {
            bound.captured.clone()
        };

        tag.handler = Some(bound);
        next
    }

    /// Nearest ancestor of `tag` whose bound handler is of `kind`.
    pub fn parent(&self, tag: &MarkupTag, kind: HandlerKind) -> Option<Ancestor> {
        self.shared.tree.borrow().nearest_ancestor(tag.id(), kind)
    }

    /// Seeds the item counter of `id` unless it is already counting.
    pub fn start_items(&self, id: TagId, first: u32) {
        self.shared.tree.borrow_mut().start_items(id, first);
    }

    /// Next item number under `id`.
    pub fn advance_item(&self, id: TagId) -> u32 {
        self.shared.tree.borrow_mut().advance_item(id)
    }

    /// Asks the compiler to start a new fragment after the current event.
    pub fn request_split(&self) {
        self.shared.split_requested.set(true);
    }

    pub(crate) fn take_split_request(&self) -> bool {
        self.shared.split_requested.replace(false)
    }
}

impl fmt::Debug for ParseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseContext")
            .field("scope_depth", &self.scope.depth)
            .field("values", &self.scope.values.borrow().len())
            .finish()
    }
}
