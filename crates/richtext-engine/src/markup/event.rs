use super::Attributes;

/// One tokenizer event.
///
/// Streams handed to the compiler must be well nested: every `Open` has a
/// matching `Close` in LIFO order. Self-closing tags are an `Open`
/// immediately followed by its `Close`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Open { name: String, attributes: Attributes },
    Close { name: String },
    Text(String),
}

impl MarkupEvent {
    pub fn open(name: impl Into<String>, attributes: Attributes) -> Self {
        MarkupEvent::Open {
            name: name.into(),
            attributes,
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        MarkupEvent::Close { name: name.into() }
    }

    pub fn text(content: impl Into<String>) -> Self {
        MarkupEvent::Text(content.into())
    }
}
