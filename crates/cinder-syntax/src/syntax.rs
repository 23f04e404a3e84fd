use std::fmt;

use crate::{
    Content, NodeData, NodeId, NodeRole, SyntaxArena, SyntaxKind, Token, TokenId, TokenRange,
};

/// Borrowed handle to a node inside a [`SyntaxArena`].
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    arena: &'a SyntaxArena<'a>,
    id: NodeId,
}

impl<'a> SyntaxNode<'a> {
    pub(crate) fn new(arena: &'a SyntaxArena<'a>, id: NodeId) -> Self {
        Self { arena, id }
    }

    fn data(&self) -> &'a NodeData {
        self.arena.data(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn role(&self) -> NodeRole {
        self.data().role
    }

    pub fn range(&self) -> TokenRange {
        self.data().range
    }

    pub fn can_modify(&self) -> bool {
        self.data().can_modify
    }

    pub fn is_original(&self) -> bool {
        self.data().original
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.data().content, Content::Leaf(_))
    }

    pub fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| Self::new(self.arena, id))
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        let arena = self.arena;
        self.data().children().iter().map(move |&id| SyntaxNode::new(arena, id))
    }

    pub fn child_by_role(&self, role: NodeRole) -> Option<SyntaxNode<'a>> {
        self.children().find(|child| child.role() == role)
    }

    /// The token wrapped by a leaf.
    pub fn token(&self) -> Option<&'a Token> {
        match self.data().content {
            Content::Leaf(token) => Some(self.arena.tokens().token(token)),
            Content::Tree(_) => None,
        }
    }

    /// Tokens under this node, in source order.
    pub fn leaves(&self) -> Vec<TokenId> {
        let mut leaves = Vec::with_capacity(self.range().len() as usize);
        let mut stack = vec![self.id];

        while let Some(node) = stack.pop() {
            match &self.arena.data(node).content {
                Content::Leaf(token) => leaves.push(*token),
                Content::Tree(children) => stack.extend(children.iter().rev()),
            }
        }

        leaves
    }

    /// Source text spanned by the node, trivia between tokens included.
    pub fn text(&self) -> &'a str {
        let tokens = self.arena.tokens();
        &tokens.text()[tokens.text_range(self.range())]
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        match self.data().content {
            Content::Leaf(token) => write!(f, "'{}'", self.arena.tokens().token_text(token))?,
            Content::Tree(_) => write!(f, "{:?}", self.kind())?,
        }
        if !matches!(self.role(), NodeRole::Detached | NodeRole::Unknown) {
            write!(f, " {:?}", self.role())?;
        }
        if !self.can_modify() {
            f.write_str(" unmodifiable")?;
        }
        writeln!(f)?;

        self.children().try_for_each(|child| child.dump(f, depth + 1))
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.range())
    }
}

/// Renders the subtree one node per line: kinds for trees, quoted text for
/// leaves, followed by the role and an `unmodifiable` marker when relevant.
impl fmt::Display for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump(f, 0)
    }
}

/// A finished tree together with the arena that owns its nodes.
#[derive(Debug)]
pub struct SyntaxTree<'t> {
    arena: SyntaxArena<'t>,
    root: NodeId,
}

impl<'t> SyntaxTree<'t> {
    pub fn new(arena: SyntaxArena<'t>, root: NodeId) -> Self {
        Self { arena, root }
    }

    pub fn arena(&self) -> &SyntaxArena<'t> {
        &self.arena
    }

    pub fn root(&self) -> SyntaxNode<'_> {
        self.arena.node(self.root)
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }
}

impl fmt::Display for SyntaxTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}
