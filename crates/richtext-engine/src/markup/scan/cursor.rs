/// Byte cursor over markup source.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.s.as_bytes().get(self.i + offset).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..].starts_with(pat)
    }

    /// Case-insensitive [`starts_with`](Self::starts_with) for ASCII patterns.
    pub fn starts_with_ignore_case(&self, pat: &[u8]) -> bool {
        self.s.as_bytes()[self.i.min(self.s.len())..]
            .get(..pat.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(pat))
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Advances past the whole char at the cursor.
    pub fn bump_char(&mut self) {
        if let Some(c) = self.s.get(self.i..).and_then(|rest| rest.chars().next()) {
            self.i += c.len_utf8();
        }
    }

    pub fn bump_n(&mut self, n: usize) {
        self.i = (self.i + n).min(self.s.len());
    }

    /// Consumes bytes while `pred` holds and returns them.
    ///
    /// Predicates must only accept ASCII or only reject ASCII so the
    /// returned slice ends on a char boundary.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let start = self.i;
        while self.peek().is_some_and(&pred) {
            self.i += 1;
        }
        &self.s[start..self.i]
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(|b| b.is_ascii_whitespace());
    }

    /// Moves past the next occurrence of `pat`, or to the end when absent.
    /// Returns whether `pat` was found.
    pub fn skip_past(&mut self, pat: &str) -> bool {
        match self.s[self.i..].find(pat) {
            Some(at) => {
                self.i += at + pat.len();
                true
            }
            None => {
                self.i = self.s.len();
                false
            }
        }
    }
}
