use serde::{Deserialize, Serialize};

/// Hyperlink target of a [`Span::Link`](crate::Span::Link).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpan {
    pub url: String,
}

impl LinkSpan {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
