//! Lenient markup scanner.
//!
//! Turns HTML-like source into a well-nested [`MarkupEvent`] stream. It is
//! forgiving rather than compliant: unknown constructs become text,
//! unmatched close tags are dropped, a close tag implicitly closes anything
//! opened after its match, and whatever is still open at the end of input is
//! closed.

mod cursor;

use cursor::Cursor;

use super::{Attributes, MarkupEvent};

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &["img", "br", "hr", "source", "meta", "link", "input", "wbr"];

/// Elements whose content is skipped entirely.
const RAW_ELEMENTS: &[&str] = &["script", "style"];

pub fn scan(source: &str) -> Vec<MarkupEvent> {
    let mut scanner = Scanner {
        cur: Cursor::new(source),
        events: Vec::new(),
        open: Vec::new(),
        text: String::new(),
    };
    scanner.run();
    scanner.events
}

struct Scanner<'a> {
    cur: Cursor<'a>,
    events: Vec<MarkupEvent>,
    open: Vec<String>,
    text: String,
}

impl<'a> Scanner<'a> {
    fn run(&mut self) {
        while !self.cur.eof() {
            if self.cur.starts_with(b"<!--") {
                self.cur.skip_past("-->");
            } else if self.cur.starts_with(b"<!") || self.cur.starts_with(b"<?") {
                self.cur.skip_past(">");
            } else if self.cur.starts_with(b"</") && is_name_start(self.cur.peek_at(2)) {
                self.close_tag();
            } else if self.cur.starts_with(b"<") && is_name_start(self.cur.peek_at(1)) {
                self.open_tag();
            } else {
                let start = self.cur.i;
                if self.cur.peek() == Some(b'<') {
                    self.cur.bump();
                }
                self.cur.eat_while(|b| b != b'<');
                self.text.push_str(&self.cur.s[start..self.cur.i]);
            }
        }
        self.flush_text();
        while let Some(name) = self.open.pop() {
            self.events.push(MarkupEvent::Close { name });
        }
    }

    fn open_tag(&mut self) {
        self.cur.bump();
        let name = self.cur.eat_while(is_name_byte).to_ascii_lowercase();
        let mut attributes = Attributes::new();
        let mut self_closing = false;

        loop {
            self.cur.skip_whitespace();
            match self.cur.peek() {
                None => break,
                Some(b'>') => {
                    self.cur.bump();
                    break;
                }
                Some(b'/') => {
                    self.cur.bump();
                    if self.cur.peek() == Some(b'>') {
                        self_closing = true;
                    }
                }
                Some(_) => {
                    if let Some((key, value)) = self.attribute() {
                        attributes.insert(key, value);
                    }
                }
            }
        }

        self.flush_text();
        self.events.push(MarkupEvent::open(name.clone(), attributes));

        if RAW_ELEMENTS.contains(&name.as_str()) && !self_closing {
            self.skip_raw_content(&name);
            self.events.push(MarkupEvent::close(name));
        } else if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            self.events.push(MarkupEvent::close(name));
        } else {
            self.open.push(name);
        }
    }

    fn attribute(&mut self) -> Option<(String, String)> {
        let key = self
            .cur
            .eat_while(|b| !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/'));
        if key.is_empty() {
            // Stray '=' or similar; consume it so the loop makes progress.
            self.cur.bump();
            return None;
        }
        let key = key.to_ascii_lowercase();

        self.cur.skip_whitespace();
        if self.cur.peek() != Some(b'=') {
            return Some((key, String::new()));
        }
        self.cur.bump();
        self.cur.skip_whitespace();

        let raw = match self.cur.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                self.cur.bump();
                let value = self.cur.eat_while(|b| b != quote);
                self.cur.bump();
                value
            }
            _ => self
                .cur
                .eat_while(|b| !b.is_ascii_whitespace() && b != b'>'),
        };
        Some((key, html_escape::decode_html_entities(raw).into_owned()))
    }

    fn close_tag(&mut self) {
        self.cur.bump_n(2);
        let name = self.cur.eat_while(is_name_byte).to_ascii_lowercase();
        self.cur.skip_past(">");

        let Some(at) = self.open.iter().rposition(|open| *open == name) else {
            log::debug!("dropping unmatched </{name}>");
            return;
        };
        self.flush_text();
        for name in self.open.drain(at..).rev() {
            self.events.push(MarkupEvent::Close { name });
        }
    }

    fn skip_raw_content(&mut self, name: &str) {
        let close = format!("</{name}");
        while !self.cur.eof() {
            if self.cur.starts_with_ignore_case(close.as_bytes()) {
                self.cur.skip_past(">");
                return;
            }
            self.cur.bump_char();
            self.cur.eat_while(|b| b != b'<');
        }
    }

    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let decoded = html_escape::decode_html_entities(&self.text).into_owned();
        self.text.clear();
        self.events.push(MarkupEvent::Text(decoded));
    }
}

fn is_name_start(b: Option<u8>) -> bool {
    b.is_some_and(|b| b.is_ascii_alphabetic())
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b':'
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn open(name: &str, attrs: &[(&str, &str)]) -> MarkupEvent {
        MarkupEvent::open(name, attrs.iter().copied().collect())
    }

    #[test]
    fn nested_tags_and_text() {
        assert_eq!(
            scan("<b>x <I>y</i></B>"),
            vec![
                open("b", &[]),
                MarkupEvent::text("x "),
                open("i", &[]),
                MarkupEvent::text("y"),
                MarkupEvent::close("i"),
                MarkupEvent::close("b"),
            ]
        );
    }

    #[test]
    fn attribute_forms() {
        assert_eq!(
            scan(r#"<img src="http://x/y.png" width=50 height='30' hidden>"#),
            vec![
                open(
                    "img",
                    &[
                        ("src", "http://x/y.png"),
                        ("width", "50"),
                        ("height", "30"),
                        ("hidden", ""),
                    ]
                ),
                MarkupEvent::close("img"),
            ]
        );
    }

    #[test]
    fn self_closing_and_void() {
        assert_eq!(
            scan("a<br>b<span/>c"),
            vec![
                MarkupEvent::text("a"),
                open("br", &[]),
                MarkupEvent::close("br"),
                MarkupEvent::text("b"),
                open("span", &[]),
                MarkupEvent::close("span"),
                MarkupEvent::text("c"),
            ]
        );
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            scan(r#"<a href="?a=1&amp;b=2">&lt;&eacute;&gt;</a>"#),
            vec![
                open("a", &[("href", "?a=1&b=2")]),
                MarkupEvent::text("<é>"),
                MarkupEvent::close("a"),
            ]
        );
    }

    #[test]
    fn comments_doctype_and_scripts_are_skipped() {
        assert_eq!(
            scan("<!DOCTYPE html><!-- <b> --><p>x<script>if (a < b) {}</script></p>"),
            vec![
                open("p", &[]),
                MarkupEvent::text("x"),
                open("script", &[]),
                MarkupEvent::close("script"),
                MarkupEvent::close("p"),
            ]
        );
    }

    #[test]
    fn raw_content_with_multibyte_text_is_skipped() {
        assert_eq!(
            scan("<p>a<script>é</script>b</p>"),
            vec![
                open("p", &[]),
                MarkupEvent::text("a"),
                open("script", &[]),
                MarkupEvent::close("script"),
                MarkupEvent::text("b"),
                MarkupEvent::close("p"),
            ]
        );
        assert_eq!(
            scan("<style>€{}</style>x"),
            vec![
                open("style", &[]),
                MarkupEvent::close("style"),
                MarkupEvent::text("x"),
            ]
        );
        assert_eq!(
            scan("<script>日本<b>語"),
            vec![open("script", &[]), MarkupEvent::close("script")]
        );
    }

    #[test]
    fn unmatched_close_is_dropped() {
        assert_eq!(scan("a</b>c"), vec![MarkupEvent::text("ac")]);
    }

    #[test]
    fn close_implicitly_closes_inner_tags() {
        assert_eq!(
            scan("<p><b>x</p>y"),
            vec![
                open("p", &[]),
                open("b", &[]),
                MarkupEvent::text("x"),
                MarkupEvent::close("b"),
                MarkupEvent::close("p"),
                MarkupEvent::text("y"),
            ]
        );
    }

    #[test]
    fn open_tags_are_closed_at_eof() {
        assert_eq!(
            scan("<ul><li>one"),
            vec![
                open("ul", &[]),
                open("li", &[]),
                MarkupEvent::text("one"),
                MarkupEvent::close("li"),
                MarkupEvent::close("ul"),
            ]
        );
    }

    #[test]
    fn stray_angle_bracket_is_text() {
        assert_eq!(scan("1 < 2"), vec![MarkupEvent::text("1 < 2")]);
    }
}
