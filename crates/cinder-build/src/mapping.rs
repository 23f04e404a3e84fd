use std::collections::hash_map::Entry;

use cinder_sema::SemaNode;
use cinder_syntax::NodeId;
use rustc_hash::FxHashMap;

use crate::{BuildError, Result};

/// Syntax nodes owned by semantic nodes, so that parents visited later can
/// find their children.
#[derive(Debug, Default)]
pub(crate) struct Mapping {
    nodes: FxHashMap<SemaNode, NodeId>,
}

impl Mapping {
    pub(crate) fn add(&mut self, from: SemaNode, node: NodeId) -> Result<()> {
        match self.nodes.entry(from) {
            Entry::Occupied(_) => Err(BuildError::MappedTwice(from)),
            Entry::Vacant(entry) => {
                entry.insert(node);
                Ok(())
            }
        }
    }

    pub(crate) fn find(&self, from: SemaNode) -> Result<NodeId> {
        self.nodes.get(&from).copied().ok_or(BuildError::NotMapped(from))
    }
}
