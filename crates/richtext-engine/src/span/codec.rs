//! Span wire format: `[u16 little-endian discriminator][postcard payload]`.
//!
//! Flag variants have an empty payload. A record must be consumed exactly:
//! trailing bytes after the payload make it invalid.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{BulletSpan, FontStyle, LinkSpan, Span, SpanKind, UrlBitmapSpan, VideoSpan};

#[derive(Debug, thiserror::Error)]
pub enum SpanCodecError {
    #[error("Span record shorter than its discriminator")]
    Truncated,
    #[error("Unknown span discriminator {0}")]
    UnknownDiscriminator(u16),
    #[error("Span payload error: {0}")]
    Payload(#[from] postcard::Error),
    #[error("Invalid span payload: {0}")]
    InvalidPayload(&'static str),
    #[error("{0} trailing byte(s) after span payload")]
    TrailingBytes(usize),
}

pub fn encode(span: &Span) -> Result<Vec<u8>, SpanCodecError> {
    let mut out = span.kind().discriminator().to_le_bytes().to_vec();
    match span {
        Span::Underline
        | Span::Strikethrough
        | Span::Quote
        | Span::Monospace
        | Span::Superscript
        | Span::Subscript => {}
        Span::Style(style) => write_payload(&mut out, style)?,
        Span::Link(link) => write_payload(&mut out, link)?,
        Span::UrlBitmap(bitmap) => write_payload(&mut out, bitmap)?,
        Span::Video(video) => write_payload(&mut out, video)?,
        Span::Heading(level) => write_payload(&mut out, level)?,
        Span::Bullet(bullet) => write_payload(&mut out, bullet)?,
    }
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<Span, SpanCodecError> {
    let (head, payload) = bytes
        .split_first_chunk::<2>()
        .ok_or(SpanCodecError::Truncated)?;
    let discriminator = u16::from_le_bytes(*head);
    let kind = SpanKind::from_discriminator(discriminator)
        .ok_or(SpanCodecError::UnknownDiscriminator(discriminator))?;

    let span = match kind {
        SpanKind::Underline => flag(payload, Span::Underline)?,
        SpanKind::Strikethrough => flag(payload, Span::Strikethrough)?,
        SpanKind::Quote => flag(payload, Span::Quote)?,
        SpanKind::Monospace => flag(payload, Span::Monospace)?,
        SpanKind::Superscript => flag(payload, Span::Superscript)?,
        SpanKind::Subscript => flag(payload, Span::Subscript)?,
        SpanKind::Style => Span::Style(read_payload::<FontStyle>(payload)?),
        SpanKind::Link => Span::Link(read_payload::<LinkSpan>(payload)?),
        SpanKind::UrlBitmap => Span::UrlBitmap(read_payload::<UrlBitmapSpan>(payload)?),
        SpanKind::Video => Span::Video(read_payload::<VideoSpan>(payload)?),
        SpanKind::Heading => {
            let level = read_payload::<u8>(payload)?;
            if !(1..=6).contains(&level) {
                return Err(SpanCodecError::InvalidPayload("heading level outside 1..=6"));
            }
            Span::Heading(level)
        }
        SpanKind::Bullet => {
            let bullet = read_payload::<BulletSpan>(payload)?;
            if bullet.depth == 0 {
                return Err(SpanCodecError::InvalidPayload("bullet depth 0"));
            }
            Span::Bullet(bullet)
        }
    };
    Ok(span)
}

fn write_payload<T: Serialize>(out: &mut Vec<u8>, value: &T) -> Result<(), SpanCodecError> {
    out.extend(postcard::to_stdvec(value)?);
    Ok(())
}

fn read_payload<T: DeserializeOwned>(payload: &[u8]) -> Result<T, SpanCodecError> {
    let (value, rest) = postcard::take_from_bytes(payload)?;
    if !rest.is_empty() {
        return Err(SpanCodecError::TrailingBytes(rest.len()));
    }
    Ok(value)
}

fn flag(payload: &[u8], span: Span) -> Result<Span, SpanCodecError> {
    if !payload.is_empty() {
        return Err(SpanCodecError::TrailingBytes(payload.len()));
    }
    Ok(span)
}
