use std::fmt;

use crate::handlers::{HandlerKind, TagHandler};
use crate::parsing::ParseContext;

/// Identity of a tag occurrence within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagId(pub u32);

/// Ordered attribute map. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Non-empty value after trimming whitespace.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).map(str::trim).filter(|v| !v.is_empty())
    }

    /// Sets `name`, replacing an earlier value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| key.eq_ignore_ascii_case(&name)) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (k, v) in iter {
            attributes.insert(k, v);
        }
        attributes
    }
}

/// A handler bound to a tag at open, with the context that was current then.
pub struct BoundHandler {
    pub(crate) handler: Box<dyn TagHandler>,
    pub(crate) captured: ParseContext,
    /// `replace_context` ran for this binding and awaits its restore.
    pub(crate) replaced: bool,
}

impl BoundHandler {
    pub fn kind(&self) -> HandlerKind {
        self.handler.kind()
    }
}

/// One occurrence of a tag in the source.
///
/// The handler bound when the tag opens is the instance used when it closes.
pub struct MarkupTag {
    id: TagId,
    name: String,
    attributes: Attributes,
    parent: Option<TagId>,
    pub(crate) handler: Option<BoundHandler>,
}

impl MarkupTag {
    pub(crate) fn new(id: TagId, name: &str, attributes: Attributes, parent: Option<TagId>) -> Self {
        Self {
            id,
            name: name.to_ascii_lowercase(),
            attributes,
            parent,
            handler: None,
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    /// Lowercased tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }

    pub fn parent(&self) -> Option<TagId> {
        self.parent
    }

    pub fn handler_kind(&self) -> Option<HandlerKind> {
        self.handler.as_ref().map(BoundHandler::kind)
    }

    pub fn is_bound(&self) -> bool {
        self.handler.is_some()
    }
}

impl fmt::Debug for MarkupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkupTag")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("parent", &self.parent)
            .field("handler", &self.handler_kind())
            .finish()
    }
}
