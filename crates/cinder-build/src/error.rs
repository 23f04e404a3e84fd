use cinder_errors::Diagnostic;
use cinder_sema::{Loc, SemaNode};
use cinder_syntax::{InvariantError, NodeRole, SyntaxKind, TokenBuffer, TokenId, TokenRange};
use text_size::TextRange;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

/// Reasons a build is rejected.
///
/// All of them mean the semantic tree and the token buffer disagree; no partial
/// tree is handed out.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("token buffer does not end with EOF")]
    MissingEof,

    #[error("EOF at token {0:?} before the end of the buffer")]
    StrayEof(TokenId),

    #[error("two tokens start at offset {0:?}")]
    DuplicateLocation(Loc),

    #[error("no token starts at offset {0:?}")]
    UnknownLocation(Loc),

    #[error("range ending at {last:?} starts after it, at {first:?}")]
    ReversedRange { first: Loc, last: Loc },

    #[error("cannot fold the empty range {0}")]
    EmptyRange(TokenRange),

    #[error("{kind:?} over {range} crosses the boundary of an existing subtree")]
    CrossesBoundary { kind: SyntaxKind, range: TokenRange },

    #[error("no pending subtree covers exactly {range}")]
    NoSuchTree { range: TokenRange },

    #[error("{kind:?} at {range} has already been folded into a parent")]
    NotPending { kind: SyntaxKind, range: TokenRange },

    #[error("{kind:?} at {range} already plays {role:?}, cannot make it {new:?}")]
    RoleReassigned { kind: SyntaxKind, range: TokenRange, role: NodeRole, new: NodeRole },

    #[error("{0:?} already owns a syntax node")]
    MappedTwice(SemaNode),

    #[error("{0:?} has no syntax node yet")]
    NotMapped(SemaNode),

    #[error("{0} subtrees remain after the final fold")]
    Unfinished(usize),

    #[error("initializer ends at {init:?}, before the declarator end at {end:?}")]
    InitializerBeforeDeclarator { end: Loc, init: Loc },

    #[error("expected {expected:?} at token {token:?}, found {found:?}")]
    UnexpectedToken { token: TokenId, expected: SyntaxKind, found: SyntaxKind },

    #[error("{0:?} is not spelled in the source")]
    MissingRange(SemaNode),

    #[error("name specifier at {range} spans {len} tokens instead of one")]
    SpecifierTokenCount { range: TokenRange, len: u32 },

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl BuildError {
    /// Points the error at the offending source text.
    pub fn to_diagnostic(&self, tokens: &TokenBuffer) -> Diagnostic {
        let (range, label) = match *self {
            Self::DuplicateLocation(loc) | Self::UnknownLocation(loc) => {
                (TextRange::empty(loc), "at this offset")
            }
            Self::ReversedRange { first, last } => {
                (TextRange::new(last.min(first), first.max(last)), "reversed range")
            }
            Self::InitializerBeforeDeclarator { end, .. } => {
                (TextRange::empty(end), "declarator ends here")
            }
            Self::CrossesBoundary { range, .. } => (tokens.text_range(range), "folded range"),
            Self::EmptyRange(range)
            | Self::NoSuchTree { range }
            | Self::NotPending { range, .. }
            | Self::RoleReassigned { range, .. }
            | Self::SpecifierTokenCount { range, .. } => (tokens.text_range(range), "here"),
            Self::UnexpectedToken { token, .. } => {
                (tokens.text_range(TokenRange::new(token, token.next())), "unexpected token")
            }
            Self::StrayEof(token) => {
                (tokens.text_range(TokenRange::new(token, token.next())), "stray EOF")
            }
            Self::MissingEof
            | Self::MappedTwice(_)
            | Self::NotMapped(_)
            | Self::Unfinished(_)
            | Self::MissingRange(_)
            | Self::Invariant(_) => (tokens.text_range(tokens.spelled()), "in this input"),
        };

        Diagnostic::error(self.to_string(), range).with_label(label)
    }
}
