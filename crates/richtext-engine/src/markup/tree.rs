use crate::handlers::HandlerKind;

use super::TagId;

/// Nearest enclosing tag found by [`TagTree::nearest_ancestor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub id: TagId,
    pub name: String,
}

#[derive(Debug)]
struct Node {
    name: String,
    parent: Option<TagId>,
    kind: Option<HandlerKind>,
    /// Ordinal the next item will take.
    next_item: Option<u32>,
}

/// Parent links of every tag seen in one parse.
///
/// Nodes outlive their tag's close so ids stay valid for the whole parse.
/// Item counters live here rather than in handlers, so they survive the
/// handler rebinding that happens when output is split.
#[derive(Debug, Default)]
pub struct TagTree {
    nodes: Vec<Node>,
}

impl TagTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, name: &str, parent: Option<TagId>) -> TagId {
        let id = TagId(self.nodes.len() as u32);
        self.nodes.push(Node {
            name: name.to_ascii_lowercase(),
            parent,
            kind: None,
            next_item: None,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn name(&self, id: TagId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: TagId) -> Option<TagId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn kind(&self, id: TagId) -> Option<HandlerKind> {
        self.node(id).and_then(|n| n.kind)
    }

    pub fn set_kind(&mut self, id: TagId, kind: HandlerKind) {
        if let Some(node) = self.node_mut(id) {
            node.kind = Some(kind);
        }
    }

    /// Closest strict ancestor of `id` whose bound handler is `kind`.
    pub fn nearest_ancestor(&self, id: TagId, kind: HandlerKind) -> Option<Ancestor> {
        self.ancestors(id)
            .find(|(_, node)| node.kind == Some(kind))
            .map(|(id, node)| Ancestor {
                id,
                name: node.name.clone(),
            })
    }

    /// Seeds the item counter of `id` unless it already has one.
    pub fn start_items(&mut self, id: TagId, first: u32) {
        if let Some(node) = self.node_mut(id) {
            node.next_item.get_or_insert(first);
        }
    }

    /// Returns the next ordinal under `id` and advances the counter.
    /// Unseeded counters start at 1.
    pub fn advance_item(&mut self, id: TagId) -> u32 {
        match self.node_mut(id) {
            Some(node) => {
                let current = node.next_item.unwrap_or(1);
                node.next_item = Some(current.saturating_add(1));
                current
            }
            None => 0,
        }
    }

    fn node(&self, id: TagId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: TagId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    fn ancestors(&self, id: TagId) -> impl Iterator<Item = (TagId, &Node)> {
        let mut next = self.parent(id);
        std::iter::from_fn(move || {
            let id = next?;
            let node = self.node(id)?;
            next = node.parent;
            Some((id, node))
        })
    }
}
