use la_arena::{Arena, Idx};

use crate::{NodeRole, SyntaxKind, SyntaxNode, TokenBuffer, TokenId, TokenRange};

pub type NodeId = Idx<NodeData>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Content {
    Leaf(TokenId),
    Tree(Vec<NodeId>),
}

#[derive(Clone, Debug)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub role: NodeRole,
    pub parent: Option<NodeId>,
    pub range: TokenRange,
    /// Produced from real source content rather than synthesized.
    pub original: bool,
    /// Every token underneath is modifiable.
    pub can_modify: bool,
    pub content: Content,
}

impl NodeData {
    pub fn children(&self) -> &[NodeId] {
        match &self.content {
            Content::Leaf(_) => &[],
            Content::Tree(children) => children,
        }
    }
}

/// Owner of every node built over one token buffer.
///
/// Nodes are never freed individually; they live as long as the arena.
#[derive(Debug)]
pub struct SyntaxArena<'t> {
    tokens: &'t TokenBuffer,
    nodes: Arena<NodeData>,
}

impl<'t> SyntaxArena<'t> {
    pub fn new(tokens: &'t TokenBuffer) -> Self {
        Self { tokens, nodes: Arena::new() }
    }

    pub fn tokens(&self) -> &'t TokenBuffer {
        self.tokens
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node]
    }

    pub fn node(&self, node: NodeId) -> SyntaxNode<'_> {
        SyntaxNode::new(self, node)
    }

    pub fn alloc_leaf(&mut self, token: TokenId) -> NodeId {
        let token_data = self.tokens.token(token);
        self.nodes.alloc(NodeData {
            kind: token_data.kind,
            role: NodeRole::Detached,
            parent: None,
            range: TokenRange::new(token, token.next()),
            original: true,
            can_modify: token_data.modifiable,
            content: Content::Leaf(token),
        })
    }

    /// Allocates a tree adopting `children`, which must already tile `range`.
    ///
    /// Children that were never given a role become [`NodeRole::Unknown`].
    pub fn alloc_tree(
        &mut self,
        kind: SyntaxKind,
        range: TokenRange,
        children: Vec<NodeId>,
    ) -> NodeId {
        let can_modify = children.iter().all(|&child| self.nodes[child].can_modify);
        let node = self.nodes.alloc(NodeData {
            kind,
            role: NodeRole::Detached,
            parent: None,
            range,
            original: true,
            can_modify,
            content: Content::Tree(Vec::new()),
        });

        for &child in &children {
            let child = &mut self.nodes[child];
            child.parent = Some(node);
            if !child.role.is_assigned() {
                child.role = NodeRole::Unknown;
            }
        }
        self.nodes[node].content = Content::Tree(children);

        node
    }

    /// Overwrites the role of `node` without any checks.
    pub fn set_role(&mut self, node: NodeId, role: NodeRole) {
        self.nodes[node].role = role;
    }
}
