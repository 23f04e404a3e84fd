use cinder_sema::{Loc, SourceRange};
use cinder_syntax::{SyntaxKind, TokenBuffer, TokenId, TokenRange};
use rustc_hash::FxHashMap;

use crate::{BuildError, Result};

/// Maps the location of a token's first character to the token.
#[derive(Debug)]
pub(crate) struct Locator {
    tokens: FxHashMap<Loc, TokenId>,
}

impl Locator {
    pub(crate) fn new(buffer: &TokenBuffer) -> Result<Self> {
        if !buffer.ends_with_eof() {
            return Err(BuildError::MissingEof);
        }

        let spelled = buffer.spelled();
        let mut tokens =
            FxHashMap::with_capacity_and_hasher(spelled.len() as usize, Default::default());
        for id in spelled.iter() {
            let token = buffer.token(id);
            if token.kind == SyntaxKind::EOF {
                return Err(BuildError::StrayEof(id));
            }
            if tokens.insert(token.offset(), id).is_some() {
                return Err(BuildError::DuplicateLocation(token.offset()));
            }
        }

        Ok(Self { tokens })
    }

    pub(crate) fn find(&self, loc: Loc) -> Result<TokenId> {
        self.tokens.get(&loc).copied().ok_or(BuildError::UnknownLocation(loc))
    }

    /// Tokens from the one at `first` up to and including the one at `last`.
    pub(crate) fn span(&self, first: Loc, last: Loc) -> Result<TokenRange> {
        let start = self.find(first)?;
        let end = self.find(last)?;
        if end < start {
            return Err(BuildError::ReversedRange { first, last });
        }
        Ok(TokenRange::inclusive(start, end))
    }

    pub(crate) fn range(&self, range: SourceRange) -> Result<TokenRange> {
        self.span(range.begin, range.end)
    }
}

#[cfg(test)]
mod tests {
    use cinder_syntax::Token;
    use text_size::{TextRange, TextSize};

    use super::*;

    #[test]
    fn finds_tokens_by_offset() {
        let buffer = cinder_tokenizer::tokenize("int  a;");
        let locator = Locator::new(&buffer).unwrap();

        assert_eq!(locator.find(TextSize::new(5)), Ok(TokenId::new(1)));
        assert_eq!(
            locator.find(TextSize::new(4)),
            Err(BuildError::UnknownLocation(TextSize::new(4)))
        );
        assert_eq!(
            locator.span(TextSize::new(0), TextSize::new(6)),
            Ok(TokenRange::new(TokenId::new(0), TokenId::new(3)))
        );
    }

    #[test]
    fn reversed_span() {
        let buffer = cinder_tokenizer::tokenize("a b");
        let locator = Locator::new(&buffer).unwrap();

        assert_eq!(
            locator.span(TextSize::new(2), TextSize::new(0)),
            Err(BuildError::ReversedRange { first: TextSize::new(2), last: TextSize::new(0) })
        );
    }

    #[test]
    fn eof_before_the_end() {
        let at = |start, end| TextRange::new(TextSize::new(start), TextSize::new(end));
        let tokens = vec![
            Token::new(SyntaxKind::IDENT, at(0, 1)),
            Token::new(SyntaxKind::EOF, at(1, 1)),
            Token::new(SyntaxKind::IDENT, at(2, 3)),
            Token::new(SyntaxKind::EOF, at(3, 3)),
        ];
        let buffer = TokenBuffer::new("a b", tokens);

        assert_eq!(Locator::new(&buffer).unwrap_err(), BuildError::StrayEof(TokenId::new(1)));
    }

    #[test]
    fn buffer_without_eof() {
        let buffer = TokenBuffer::new("", Vec::new());
        assert!(matches!(Locator::new(&buffer), Err(BuildError::MissingEof)));
    }
}
