//! # Spans
//!
//! Decorations attached to byte ranges of a fragment.
//!
//! [`Span`] is a closed tagged union. Every variant has a [`SpanKind`] whose
//! discriminator is fixed forever: it prefixes the serialized form and is the
//! only thing [`codec::decode`] needs to rebuild the variant.
//!
//! ## Modules
//!
//! - **`range`**: [`SpanRange`] byte ranges with exclusive-exclusive insertion
//! - **`kinds`**: variant payloads that carry more than a flag
//! - **`codec`**: `[discriminator][payload]` encode/decode
//! - **`lifecycle`**: [`Surface`] seam and [`ViewLifecycle`] notifications

pub mod codec;
pub mod kinds;
pub mod lifecycle;
pub mod range;

use serde::{Deserialize, Serialize};

pub use kinds::{BulletSpan, LinkSpan, UrlBitmapSpan, VideoSpan};
pub use lifecycle::{Surface, SurfaceId, ViewLifecycle};
pub use range::SpanRange;

/// Typeface variation applied by [`Span::Style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Bold,
    Italic,
    BoldItalic,
}

/// Stable type discriminator of a span variant.
///
/// Values are assigned once and never reused for another variant; removing a
/// variant retires its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SpanKind {
    Underline = 1,
    Style = 2,
    Strikethrough = 3,
    Link = 4,
    UrlBitmap = 5,
    Video = 6,
    Heading = 7,
    Bullet = 8,
    Quote = 9,
    Monospace = 10,
    Superscript = 11,
    Subscript = 12,
}

impl SpanKind {
    pub const ALL: [SpanKind; 12] = [
        SpanKind::Underline,
        SpanKind::Style,
        SpanKind::Strikethrough,
        SpanKind::Link,
        SpanKind::UrlBitmap,
        SpanKind::Video,
        SpanKind::Heading,
        SpanKind::Bullet,
        SpanKind::Quote,
        SpanKind::Monospace,
        SpanKind::Superscript,
        SpanKind::Subscript,
    ];

    pub const fn discriminator(self) -> u16 {
        self as u16
    }

    pub fn from_discriminator(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.discriminator() == value)
    }
}

/// A decoration over a range of a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Underline,
    Style(FontStyle),
    Strikethrough,
    Link(LinkSpan),
    UrlBitmap(UrlBitmapSpan),
    Video(VideoSpan),
    /// Heading level, 1..=6.
    Heading(u8),
    Bullet(BulletSpan),
    Quote,
    Monospace,
    Superscript,
    Subscript,
}

impl Span {
    pub fn kind(&self) -> SpanKind {
        match self {
            Span::Underline => SpanKind::Underline,
            Span::Style(_) => SpanKind::Style,
            Span::Strikethrough => SpanKind::Strikethrough,
            Span::Link(_) => SpanKind::Link,
            Span::UrlBitmap(_) => SpanKind::UrlBitmap,
            Span::Video(_) => SpanKind::Video,
            Span::Heading(_) => SpanKind::Heading,
            Span::Bullet(_) => SpanKind::Bullet,
            Span::Quote => SpanKind::Quote,
            Span::Monospace => SpanKind::Monospace,
            Span::Superscript => SpanKind::Superscript,
            Span::Subscript => SpanKind::Subscript,
        }
    }

    /// Spans that occupy a placeholder unit rather than decorating text.
    pub fn is_replacement(&self) -> bool {
        matches!(self, Span::UrlBitmap(_) | Span::Video(_))
    }
}

impl ViewLifecycle for Span {
    fn on_spanned_set_to_view(&mut self, surface: &dyn Surface) {
        if let Span::Video(video) = self {
            video.on_spanned_set_to_view(surface);
        }
    }

    fn on_attached_to_view(&mut self, surface: &dyn Surface) -> bool {
        match self {
            Span::Video(video) => video.on_attached_to_view(surface),
            _ => true,
        }
    }

    fn on_detached_from_view(&mut self, surface: &dyn Surface) {
        if let Span::Video(video) = self {
            video.on_detached_from_view(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminators_are_unique_and_resolvable() {
        let mut seen = std::collections::HashSet::new();
        for kind in SpanKind::ALL {
            assert!(seen.insert(kind.discriminator()));
            assert_eq!(SpanKind::from_discriminator(kind.discriminator()), Some(kind));
        }
    }

    #[test]
    fn unknown_discriminator_does_not_resolve() {
        assert_eq!(SpanKind::from_discriminator(0), None);
        assert_eq!(SpanKind::from_discriminator(999), None);
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(Span::Style(FontStyle::Bold).kind(), SpanKind::Style);
        assert_eq!(Span::Heading(2).kind(), SpanKind::Heading);
        assert_eq!(
            Span::Video(VideoSpan::new("http://x/v.mp4")).kind(),
            SpanKind::Video
        );
    }

    #[test]
    fn replacement_spans() {
        assert!(Span::UrlBitmap(UrlBitmapSpan::new("a.png", 1, 1, 0)).is_replacement());
        assert!(!Span::Underline.is_replacement());
    }
}
