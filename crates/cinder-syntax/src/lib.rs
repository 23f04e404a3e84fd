//! Token-exact concrete syntax trees.
//!
//! Every leaf wraps exactly one token of a [`TokenBuffer`] and every inner node
//! covers a contiguous run of tokens. Nodes live in a [`SyntaxArena`] and are
//! navigated through borrowed [`SyntaxNode`] handles.

mod arena;
mod invariants;
mod role;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod token;

/// Node storage and raw node records.
pub use arena::{Content, NodeData, NodeId, SyntaxArena};
/// Structural checks run over a finished tree.
pub use invariants::InvariantError;
/// Roles children play inside their parent.
pub use role::NodeRole;
/// Navigation handles and the owned tree.
pub use syntax::{SyntaxNode, SyntaxTree};
/// Token and node kinds.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Tokens as produced by the lexer.
pub use token::{Token, TokenBuffer, TokenId, TokenRange};
