use thiserror::Error;

use crate::{Content, NodeId, NodeRole, SyntaxArena, SyntaxKind, TokenId, TokenRange};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("root covers {actual} but the buffer spells {expected}")]
    IncompleteCoverage { expected: TokenRange, actual: TokenRange },

    #[error("{kind:?} at {range} has no children")]
    EmptyTree { kind: SyntaxKind, range: TokenRange },

    #[error("leaf for token {token:?} claims {range}")]
    LeafRange { token: TokenId, range: TokenRange },

    #[error("{child:?} at {range} does not point back to its {parent:?} parent")]
    BrokenParent { parent: SyntaxKind, child: SyntaxKind, range: TokenRange },

    #[error("{child:?} at {range} inside {parent:?} was never given a role")]
    DetachedChild { parent: SyntaxKind, child: SyntaxKind, range: TokenRange },

    #[error("children of {kind:?} do not tile {range}: expected a child at token {at:?}")]
    NotContiguous { kind: SyntaxKind, range: TokenRange, at: TokenId },

    #[error("{child:?} at {range} cannot have role {role:?}")]
    RoleMismatch { child: SyntaxKind, role: NodeRole, range: TokenRange },

    #[error("{kind:?} at {range} disagrees with its children about modifiability")]
    CanModifyMismatch { kind: SyntaxKind, range: TokenRange },
}

impl SyntaxArena<'_> {
    /// Walks the tree under `root` and checks that it is a lossless cover of
    /// the token buffer.
    pub fn check_invariants(&self, root: NodeId) -> Result<(), InvariantError> {
        let expected = self.tokens().spelled();
        let actual = self.data(root).range;
        if actual != expected {
            return Err(InvariantError::IncompleteCoverage { expected, actual });
        }

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            self.check_node(node)?;
            stack.extend(self.data(node).children().iter().rev());
        }

        Ok(())
    }

    fn check_node(&self, node: NodeId) -> Result<(), InvariantError> {
        let data = self.data(node);
        let children = match &data.content {
            Content::Leaf(token) => {
                if data.range != TokenRange::new(*token, token.next()) {
                    return Err(InvariantError::LeafRange { token: *token, range: data.range });
                }
                return Ok(());
            }
            Content::Tree(children) => children,
        };

        if children.is_empty() {
            return Err(InvariantError::EmptyTree { kind: data.kind, range: data.range });
        }

        let mut at = data.range.start;
        let mut can_modify = true;
        for &child in children {
            let child_data = self.data(child);
            if child_data.parent != Some(node) {
                return Err(InvariantError::BrokenParent {
                    parent: data.kind,
                    child: child_data.kind,
                    range: child_data.range,
                });
            }
            if !child_data.role.is_assigned() {
                return Err(InvariantError::DetachedChild {
                    parent: data.kind,
                    child: child_data.kind,
                    range: child_data.range,
                });
            }
            if !child_data.role.admits(child_data.kind) {
                return Err(InvariantError::RoleMismatch {
                    child: child_data.kind,
                    role: child_data.role,
                    range: child_data.range,
                });
            }
            if child_data.range.start != at || child_data.range.is_empty() {
                let (kind, range) = (data.kind, data.range);
                return Err(InvariantError::NotContiguous { kind, range, at });
            }
            at = child_data.range.end;
            can_modify &= child_data.can_modify;
        }

        if at != data.range.end {
            return Err(InvariantError::NotContiguous { kind: data.kind, range: data.range, at });
        }
        if can_modify != data.can_modify {
            return Err(InvariantError::CanModifyMismatch { kind: data.kind, range: data.range });
        }

        Ok(())
    }
}
