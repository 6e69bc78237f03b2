//! # Span Kinds
//!
//! Payload types for span variants that carry data. Flag-like variants
//! (underline, quote, ...) have no payload and live directly on
//! [`Span`](super::Span).

pub mod bitmap;
pub mod bullet;
pub mod link;
pub mod video;

pub use bitmap::UrlBitmapSpan;
pub use bullet::BulletSpan;
pub use link::LinkSpan;
pub use video::VideoSpan;
