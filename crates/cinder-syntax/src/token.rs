use std::fmt;

use text_size::{TextRange, TextSize};

use crate::SyntaxKind;

/// Index of a token inside a [`TokenBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(u32);

impl TokenId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub const fn index(self) -> u32 {
        self.0
    }

    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub const fn prev(self) -> Option<Self> {
        match self.0.checked_sub(1) {
            Some(index) => Some(Self(index)),
            None => None,
        }
    }
}

impl From<u32> for TokenId {
    fn from(index: u32) -> Self {
        Self::new(index)
    }
}

/// Half-open range of tokens, `start..end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenRange {
    pub start: TokenId,
    pub end: TokenId,
}

impl TokenRange {
    pub const fn new(start: TokenId, end: TokenId) -> Self {
        Self { start, end }
    }

    /// Range covering `first..=last`.
    pub const fn inclusive(first: TokenId, last: TokenId) -> Self {
        Self { start: first, end: last.next() }
    }

    pub const fn len(self) -> u32 {
        self.end.0.saturating_sub(self.start.0)
    }

    pub const fn is_empty(self) -> bool {
        self.end.0 <= self.start.0
    }

    pub const fn contains(self, token: TokenId) -> bool {
        self.start.0 <= token.0 && token.0 < self.end.0
    }

    pub const fn last(self) -> Option<TokenId> {
        if self.is_empty() { None } else { self.end.prev() }
    }

    pub fn iter(self) -> impl Iterator<Item = TokenId> {
        (self.start.0..self.end.0).map(TokenId)
    }
}

impl fmt::Display for TokenRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.0, self.end.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
    /// The token maps back to literal source text and can be rewritten in place.
    pub modifiable: bool,
}

impl Token {
    pub const fn new(kind: SyntaxKind, range: TextRange) -> Self {
        Self { kind, range, modifiable: true }
    }

    /// Location of the token's first character.
    pub fn offset(&self) -> TextSize {
        self.range.start()
    }
}

/// Source text together with its token stream.
///
/// A well-formed buffer ends with a single `EOF` token which never becomes
/// part of a syntax tree.
#[derive(Clone, Debug)]
pub struct TokenBuffer {
    text: String,
    tokens: Vec<Token>,
}

impl TokenBuffer {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self { text: text.into(), tokens }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// All tokens, including the trailing `EOF`.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn get(&self, id: TokenId) -> Option<&Token> {
        self.tokens.get(id.0 as usize)
    }

    #[track_caller]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.0 as usize]
    }

    pub fn kind(&self, id: TokenId) -> SyntaxKind {
        self.get(id).map_or(SyntaxKind::EOF, |token| token.kind)
    }

    #[track_caller]
    pub fn token_text(&self, id: TokenId) -> &str {
        &self.text[self.token(id).range]
    }

    pub fn ends_with_eof(&self) -> bool {
        self.tokens.last().is_some_and(|token| token.kind == SyntaxKind::EOF)
    }

    /// Every token except the trailing `EOF`.
    pub fn spelled(&self) -> TokenRange {
        let len = self.tokens.len() - usize::from(self.ends_with_eof());
        TokenRange::new(TokenId(0), TokenId(len as u32))
    }

    /// Source text covered by `range`, or an empty range at the end of input.
    pub fn text_range(&self, range: TokenRange) -> TextRange {
        let eof = TextSize::of(self.text.as_str());
        match (self.get(range.start), range.last().and_then(|last| self.get(last))) {
            (Some(first), Some(last)) => first.range.cover(last.range),
            (Some(first), None) => TextRange::empty(first.offset()),
            _ => TextRange::empty(eof),
        }
    }

    /// Flags every token inside `range` as produced by expansion rather than
    /// spelled in the source.
    pub fn mark_unmodifiable(&mut self, range: TextRange) {
        for token in &mut self.tokens {
            if range.contains_range(token.range) && token.kind != SyntaxKind::EOF {
                token.modifiable = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::new(start), TextSize::new(end))
    }

    fn buffer() -> TokenBuffer {
        let tokens = vec![
            Token::new(SyntaxKind::INT_KW, range(0, 3)),
            Token::new(SyntaxKind::IDENT, range(4, 5)),
            Token::new(SyntaxKind::SEMICOLON, range(5, 6)),
            Token::new(SyntaxKind::EOF, range(6, 6)),
        ];
        TokenBuffer::new("int a;", tokens)
    }

    #[test]
    fn spelled_excludes_eof() {
        let buffer = buffer();
        assert!(buffer.ends_with_eof());
        assert_eq!(buffer.spelled(), TokenRange::new(TokenId::new(0), TokenId::new(3)));
        assert_eq!(buffer.token_text(TokenId::new(1)), "a");
    }

    #[test]
    fn text_range_of_tokens() {
        let buffer = buffer();
        let range = TokenRange::inclusive(TokenId::new(1), TokenId::new(2));
        assert_eq!(&buffer.text()[buffer.text_range(range)], "a;");
        assert_eq!(range.to_string(), "[1, 3)");
    }

    #[test]
    fn unmodifiable_tokens() {
        let mut buffer = buffer();
        buffer.mark_unmodifiable(range(0, 5));

        let flags = buffer.tokens().iter().map(|token| token.modifiable).collect::<Vec<_>>();
        assert_eq!(flags, [false, false, true, true]);
    }
}
