use std::ops;

use super::{BvhNode, BvhNodeId};

/// Arena holding all nodes of a tree; children are addressed by index and
/// the whole tree is freed at once together with the arena.
#[derive(Clone, Debug, Default)]
pub struct BvhNodes {
    nodes: Vec<BvhNode>,
}

impl BvhNodes {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, node: BvhNode) -> BvhNodeId {
        self.nodes.push(node);

        BvhNodeId::new((self.nodes.len() - 1) as u32)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BvhNodeId, &BvhNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (BvhNodeId::new(id as u32), node))
    }
}

impl ops::Index<BvhNodeId> for BvhNodes {
    type Output = BvhNode;

    fn index(&self, index: BvhNodeId) -> &Self::Output {
        &self.nodes[index.get() as usize]
    }
}

impl ops::IndexMut<BvhNodeId> for BvhNodes {
    fn index_mut(&mut self, index: BvhNodeId) -> &mut Self::Output {
        &mut self.nodes[index.get() as usize]
    }
}
