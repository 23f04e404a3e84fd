use std::collections::BTreeMap;
use std::fmt::Write as _;

use cinder_syntax::{NodeId, NodeRole, SyntaxArena, SyntaxKind, TokenId, TokenRange};
use tracing::trace;

use crate::{BuildError, Result};

/// Subtrees that have not been folded into a parent yet.
///
/// Pending trees are keyed by their first token and always tile the spelled
/// tokens: the tree at one key ends where the next key starts.
#[derive(Debug)]
pub(crate) struct Forest {
    trees: BTreeMap<TokenId, NodeId>,
    end: TokenId,
}

impl Forest {
    /// Starts with one leaf per spelled token.
    pub(crate) fn new(arena: &mut SyntaxArena<'_>) -> Self {
        let spelled = arena.tokens().spelled();
        let trees = spelled.iter().map(|token| (token, arena.alloc_leaf(token))).collect();
        Self { trees, end: spelled.end }
    }

    pub(crate) fn len(&self) -> usize {
        self.trees.len()
    }

    /// First token after the pending tree starting at `key`.
    fn end_of(&self, key: TokenId) -> TokenId {
        self.trees.range(key.next()..).next().map_or(self.end, |(&next, _)| next)
    }

    fn is_boundary(&self, token: TokenId) -> bool {
        token == self.end || self.trees.contains_key(&token)
    }

    /// The pending tree covering exactly `range`.
    pub(crate) fn tree_at(&self, range: TokenRange) -> Result<NodeId> {
        match self.trees.get(&range.start) {
            Some(&node) if self.end_of(range.start) == range.end => Ok(node),
            _ => Err(BuildError::NoSuchTree { range }),
        }
    }

    pub(crate) fn assign_role(
        &mut self,
        arena: &mut SyntaxArena<'_>,
        range: TokenRange,
        role: NodeRole,
    ) -> Result<NodeId> {
        let node = self.tree_at(range)?;
        set_role(arena, node, role)?;
        Ok(node)
    }

    /// Like [`Forest::assign_role`], for a node known by identity.
    pub(crate) fn assign_role_to(
        &mut self,
        arena: &mut SyntaxArena<'_>,
        node: NodeId,
        role: NodeRole,
    ) -> Result<()> {
        let data = arena.data(node);
        if self.trees.get(&data.range.start) != Some(&node) {
            return Err(BuildError::NotPending { kind: data.kind, range: data.range });
        }
        set_role(arena, node, role)
    }

    /// Replaces the pending trees inside `range` with a new `kind` tree.
    pub(crate) fn fold(
        &mut self,
        arena: &mut SyntaxArena<'_>,
        range: TokenRange,
        kind: SyntaxKind,
    ) -> Result<NodeId> {
        if range.is_empty() {
            return Err(BuildError::EmptyRange(range));
        }
        if !self.trees.contains_key(&range.start) || !self.is_boundary(range.end) {
            return Err(BuildError::CrossesBoundary { kind, range });
        }

        let adopted: Vec<_> =
            self.trees.range(range.start..range.end).map(|(&key, &node)| (key, node)).collect();
        for (key, _) in &adopted {
            self.trees.remove(key);
        }

        let children = adopted.into_iter().map(|(_, node)| node).collect();
        let node = arena.alloc_tree(kind, range, children);
        self.trees.insert(range.start, node);

        trace!(?kind, %range, pending = self.trees.len(), "fold");
        Ok(node)
    }

    /// Hands out the only remaining tree.
    pub(crate) fn finalize(self) -> Result<NodeId> {
        let len = self.trees.len();
        let mut trees = self.trees.into_values();
        match (trees.next(), trees.next()) {
            (Some(root), None) => Ok(root),
            _ => Err(BuildError::Unfinished(len)),
        }
    }

    /// One line per pending tree, for tracing a stuck build.
    pub(crate) fn dump(&self, arena: &SyntaxArena<'_>) -> String {
        let mut out = String::new();
        for (&start, &node) in &self.trees {
            let data = arena.data(node);
            let range = TokenRange::new(start, self.end_of(start));
            let _ = writeln!(out, "{:?} {range} {:?}", data.kind, data.role);
        }
        out
    }
}

fn set_role(arena: &mut SyntaxArena<'_>, node: NodeId, role: NodeRole) -> Result<()> {
    let data = arena.data(node);
    if data.role.is_assigned() {
        return Err(BuildError::RoleReassigned {
            kind: data.kind,
            range: data.range,
            role: data.role,
            new: role,
        });
    }

    trace!(kind = ?data.kind, range = %data.range, ?role, "assign role");
    arena.set_role(node, role);
    Ok(())
}

#[cfg(test)]
mod tests {
    use cinder_syntax::TokenBuffer;
    use expect_test::expect;

    use super::*;

    fn range(start: u32, end: u32) -> TokenRange {
        TokenRange::new(TokenId::new(start), TokenId::new(end))
    }

    fn buffer() -> TokenBuffer {
        cinder_tokenizer::tokenize("a + b * c ;")
    }

    #[test]
    fn fold_adopts_pending_trees() {
        let buffer = buffer();
        let mut arena = SyntaxArena::new(&buffer);
        let mut forest = Forest::new(&mut arena);
        assert_eq!(forest.len(), 6);

        let product =
            forest.fold(&mut arena, range(2, 5), SyntaxKind::BINARY_OPERATOR_EXPRESSION).unwrap();
        forest.assign_role(&mut arena, range(2, 5), NodeRole::RightHandSide).unwrap();
        forest.fold(&mut arena, range(0, 5), SyntaxKind::BINARY_OPERATOR_EXPRESSION).unwrap();

        assert_eq!(forest.len(), 2);
        assert_eq!(arena.data(product).role, NodeRole::RightHandSide);
        expect![[r#"
            BINARY_OPERATOR_EXPRESSION [0, 5) Detached
            SEMICOLON [5, 6) Detached
        "#]]
        .assert_eq(&forest.dump(&arena));
    }

    #[test]
    fn fold_rejects_crossing_start() {
        let buffer = buffer();
        let mut arena = SyntaxArena::new(&buffer);
        let mut forest = Forest::new(&mut arena);

        forest.fold(&mut arena, range(1, 3), SyntaxKind::UNKNOWN_EXPRESSION).unwrap();
        assert_eq!(
            forest.fold(&mut arena, range(2, 5), SyntaxKind::UNKNOWN_EXPRESSION),
            Err(BuildError::CrossesBoundary {
                kind: SyntaxKind::UNKNOWN_EXPRESSION,
                range: range(2, 5)
            })
        );
        assert_eq!(forest.len(), 5);
    }

    #[test]
    fn fold_rejects_crossing_end() {
        let buffer = buffer();
        let mut arena = SyntaxArena::new(&buffer);
        let mut forest = Forest::new(&mut arena);

        forest.fold(&mut arena, range(1, 3), SyntaxKind::UNKNOWN_EXPRESSION).unwrap();
        assert!(matches!(
            forest.fold(&mut arena, range(0, 2), SyntaxKind::UNKNOWN_EXPRESSION),
            Err(BuildError::CrossesBoundary { .. })
        ));
        assert!(matches!(
            forest.fold(&mut arena, range(4, 7), SyntaxKind::UNKNOWN_EXPRESSION),
            Err(BuildError::CrossesBoundary { .. })
        ));
        assert_eq!(
            forest.fold(&mut arena, range(3, 3), SyntaxKind::UNKNOWN_EXPRESSION),
            Err(BuildError::EmptyRange(range(3, 3)))
        );
    }

    #[test]
    fn role_is_assigned_once() {
        let buffer = buffer();
        let mut arena = SyntaxArena::new(&buffer);
        let mut forest = Forest::new(&mut arena);

        forest.assign_role(&mut arena, range(1, 2), NodeRole::OperatorToken).unwrap();
        assert!(matches!(
            forest.assign_role(&mut arena, range(1, 2), NodeRole::Unknown),
            Err(BuildError::RoleReassigned {
                role: NodeRole::OperatorToken,
                new: NodeRole::Unknown,
                ..
            })
        ));
        assert_eq!(
            forest.assign_role(&mut arena, range(1, 3), NodeRole::Operand),
            Err(BuildError::NoSuchTree { range: range(1, 3) })
        );
    }

    #[test]
    fn folded_node_is_no_longer_pending() {
        let buffer = buffer();
        let mut arena = SyntaxArena::new(&buffer);
        let mut forest = Forest::new(&mut arena);

        let inner = forest.fold(&mut arena, range(0, 1), SyntaxKind::ID_EXPRESSION).unwrap();
        forest.fold(&mut arena, range(0, 3), SyntaxKind::UNKNOWN_EXPRESSION).unwrap();

        assert!(matches!(
            forest.assign_role_to(&mut arena, inner, NodeRole::LeftHandSide),
            Err(BuildError::NotPending { kind: SyntaxKind::ID_EXPRESSION, .. })
        ));
        assert_eq!(arena.data(inner).role, NodeRole::Unknown);
    }

    #[test]
    fn finalize_needs_a_single_tree() {
        let buffer = buffer();
        let mut arena = SyntaxArena::new(&buffer);
        let mut forest = Forest::new(&mut arena);
        forest.fold(&mut arena, range(0, 5), SyntaxKind::UNKNOWN_EXPRESSION).unwrap();
        assert_eq!(forest.finalize(), Err(BuildError::Unfinished(2)));

        let mut arena = SyntaxArena::new(&buffer);
        let mut forest = Forest::new(&mut arena);
        let root =
            forest.fold(&mut arena, buffer.spelled(), SyntaxKind::TRANSLATION_UNIT).unwrap();
        assert_eq!(forest.finalize(), Ok(root));
        assert_eq!(arena.check_invariants(root), Ok(()));
    }
}
