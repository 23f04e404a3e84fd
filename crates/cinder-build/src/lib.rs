//! Builds a token-exact syntax tree out of a semantic tree.
//!
//! Every spelled token ends up as exactly one leaf. The semantic tree is
//! walked children first; each construct folds the pending subtrees under its
//! tokens into a new node and tells the children which role they play.
//! Whatever is left at the end becomes the translation unit.

mod builder;
mod error;
mod forest;
mod locator;
mod mapping;
mod range;
mod visitor;


use cinder_sema::{Decl, SemaTree};
use cinder_syntax::{NodeId, SyntaxArena, SyntaxTree, TokenBuffer};

pub use error::{BuildError, Result};

use crate::builder::TreeBuilder;
use crate::visitor::Visitor;

#[derive(Clone, Copy, Debug)]
pub struct BuildOptions {
    /// Check the structural invariants of the finished tree.
    pub verify: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { verify: true }
    }
}

/// Builds the tree for `root` into `arena` and returns its root node.
pub fn build_syntax_tree(
    arena: &mut SyntaxArena<'_>,
    sema: &SemaTree,
    root: Decl,
) -> Result<NodeId> {
    build_syntax_tree_with(arena, sema, root, BuildOptions::default())
}

pub fn build_syntax_tree_with(
    arena: &mut SyntaxArena<'_>,
    sema: &SemaTree,
    root: Decl,
    options: BuildOptions,
) -> Result<NodeId> {
    let builder = TreeBuilder::new(arena, sema, options)?;
    let mut visitor = Visitor::new(sema, builder);
    visitor.traverse_decl(root, None)?;
    visitor.finish()
}

/// Convenience wrapper that owns the arena.
pub fn build<'t>(tokens: &'t TokenBuffer, sema: &SemaTree, root: Decl) -> Result<SyntaxTree<'t>> {
    let mut arena = SyntaxArena::new(tokens);
    let root = build_syntax_tree(&mut arena, sema, root)?;
    Ok(SyntaxTree::new(arena, root))
}
