//! # Document Store
//!
//! Binary persistence of a [`RichDocument`].
//!
//! The envelope is postcard. Every span is stored as an independent
//! `[discriminator][payload]` record (see [`crate::span::codec`]), so a
//! record that fails to decode, whose range no longer fits its text, or
//! whose image or video no longer sits on a placeholder, drops only that
//! span; the rest of the document still loads.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::document::{DocumentBuilder, Fragment, PLACEHOLDER, RichDocument};
use crate::span::SpanRange;
use crate::span::codec::{self, SpanCodecError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access document store: {0}")]
    Io(#[from] std::io::Error),
    #[error("Document encoding error: {0}")]
    Serialization(#[from] postcard::Error),
    #[error("Span encoding error: {0}")]
    Span(#[from] SpanCodecError),
}

/// Versioned on-disk format.
#[derive(Debug, Serialize, Deserialize)]
enum StoreFormat {
    V1(StoredDocument),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub fragments: Vec<StoredFragment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFragment {
    pub text: String,
    pub spans: Vec<StoredSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSpan {
    pub start: u64,
    pub end: u64,
    /// Output of [`codec::encode`].
    pub record: Vec<u8>,
}

impl StoredDocument {
    pub fn from_document(document: &RichDocument) -> Result<Self, StoreError> {
        let fragments = document
            .fragments()
            .iter()
            .map(StoredFragment::from_fragment)
            .collect::<Result<_, _>>()?;
        Ok(Self { fragments })
    }

    /// Rebuilds the document, dropping spans that cannot be restored.
    pub fn into_document(self) -> RichDocument {
        self.fragments
            .into_iter()
            .map(StoredFragment::into_fragment)
            .collect::<Vec<_>>()
            .into()
    }
}

impl StoredFragment {
    fn from_fragment(fragment: &Fragment) -> Result<Self, StoreError> {
        let spans = fragment
            .annotations
            .iter()
            .map(|a| {
                Ok(StoredSpan {
                    start: a.range.start as u64,
                    end: a.range.end as u64,
                    record: codec::encode(&a.span)?,
                })
            })
            .collect::<Result<_, StoreError>>()?;
        Ok(Self {
            text: fragment.text.clone(),
            spans,
        })
    }

    fn into_fragment(self) -> Fragment {
        let mut builder = DocumentBuilder::new();
        builder.append(&self.text);
        for stored in self.spans {
            let span = match codec::decode(&stored.record) {
                Ok(span) => span,
                Err(e) => {
                    log::warn!("dropping stored span: {e}");
                    continue;
                }
            };
            let (Ok(start), Ok(end)) = (usize::try_from(stored.start), usize::try_from(stored.end))
            else {
                log::warn!("dropping stored span with unaddressable range");
                continue;
            };
            if span.is_replacement() && !covers_placeholder(builder.text(), start, end) {
                log::warn!("dropping stored {:?} span not over a placeholder", span.kind());
                continue;
            }
            if let Err(e) = builder.set_span(span, SpanRange::new(start, end)) {
                log::warn!("dropping stored span: {e}");
            }
        }
        builder.finish()
    }
}

fn covers_placeholder(text: &str, start: usize, end: usize) -> bool {
    text.get(start..end)
        .is_some_and(|covered| covered.chars().eq([PLACEHOLDER]))
}

impl RichDocument {
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        let stored = StoredDocument::from_document(self)?;
        Ok(postcard::to_stdvec(&StoreFormat::V1(stored))?)
    }

    /// Fails only when the envelope itself is unreadable.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        match postcard::from_bytes(bytes)? {
            StoreFormat::V1(stored) => Ok(stored.into_document()),
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), StoreError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, StoreError> {
        Self::from_bytes(&std::fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::document::Annotation;
    use crate::span::{FontStyle, LinkSpan, Span, UrlBitmapSpan, VideoSpan};

    fn sample() -> RichDocument {
        let mut first = DocumentBuilder::new();
        let word = first.append("hello");
        first.set_span(Span::Style(FontStyle::Bold), word).unwrap();
        let unit = first.append_placeholder();
        first
            .set_span(Span::UrlBitmap(UrlBitmapSpan::new("a.png", 50, 30, 100)), unit)
            .unwrap();

        let mut second = DocumentBuilder::new();
        let unit = second.append_placeholder();
        second
            .set_span(Span::Video(VideoSpan::new("v.mp4")), unit)
            .unwrap();
        let link = second.append("link");
        second
            .set_span(Span::Link(LinkSpan::new("https://example.com")), link)
            .unwrap();

        RichDocument::from(vec![first.finish(), second.finish()])
    }

    #[test]
    fn document_round_trips() {
        let doc = sample();
        let restored = RichDocument::from_bytes(&doc.to_bytes().unwrap()).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn corrupt_span_is_dropped_alone() {
        let doc = sample();
        let mut stored = StoredDocument::from_document(&doc).unwrap();
        stored.fragments[0].spans[0].record = vec![0xff, 0xff, 1, 2, 3];
        stored.fragments[1].spans[1].end = 999;

        let restored = stored.into_document();
        assert_eq!(restored.span_count(), doc.span_count() - 2);
        assert_eq!(restored.plain_text(), doc.plain_text());
        assert!(matches!(
            restored.fragments()[0].annotations[..],
            [Annotation {
                span: Span::UrlBitmap(_),
                ..
            }]
        ));
    }

    #[test]
    fn media_span_off_its_placeholder_is_dropped() {
        let doc = sample();
        let mut stored = StoredDocument::from_document(&doc).unwrap();
        let link = stored.fragments[1].spans[1].clone();
        let video = &mut stored.fragments[1].spans[0];
        video.start = link.start;
        video.end = link.end;

        let restored = stored.into_document();
        assert_eq!(restored.fragments()[0], doc.fragments()[0]);
        assert!(matches!(
            restored.fragments()[1].annotations[..],
            [Annotation {
                span: Span::Link(_),
                ..
            }]
        ));
    }

    #[test]
    fn record_with_trailing_bytes_is_dropped() {
        let doc = sample();
        let mut stored = StoredDocument::from_document(&doc).unwrap();
        stored.fragments[0].spans[0].record.push(0);

        let restored = stored.into_document();
        assert_eq!(restored.fragments()[0].annotations.len(), 1);
        assert_eq!(restored.fragments()[1], doc.fragments()[1]);
    }

    #[test]
    fn unreadable_envelope_is_an_error() {
        assert!(matches!(
            RichDocument::from_bytes(&[9, 9, 9]),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn save_and_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.rtd");
        let doc = sample();

        doc.save_to_path(&path).unwrap();
        assert_eq!(RichDocument::load_from_path(&path).unwrap(), doc);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = RichDocument::load_from_path(&dir.path().join("absent.rtd"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
