use crate::aabb::Aabb;

use super::{NodeId, ObjectId, Octant, Octree};

/// Read-only view of one instantiated node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeView<'a> {
    pub id: NodeId,
    pub depth: u32,
    pub bounds: Aabb,
    pub objects: &'a [ObjectId],
    pub has_children: bool,
}

/// Depth-first walk over the instantiated nodes, children in octant order.
pub struct NodeIterator<'a, T> {
    octree: &'a Octree<T>,
    stack: Vec<(NodeId, u32)>,
}

impl<'a, T> NodeIterator<'a, T> {
    pub fn new(octree: &'a Octree<T>) -> Self {
        Self {
            octree,
            stack: vec![(octree.root(), 0)],
        }
    }
}

impl<'a, T> Iterator for NodeIterator<'a, T> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = &self.octree[id];

        if let Some(first) = node.children {
            for octant in Octant::ALL.iter().rev() {
                self.stack.push((first + octant.index() as NodeId, depth + 1));
            }
        }

        Some(NodeView {
            id,
            depth,
            bounds: node.bounds,
            objects: &node.objects,
            has_children: !node.is_leaf(),
        })
    }
}

impl<T> Octree<T> {
    pub fn iter_nodes(&self) -> NodeIterator<'_, T> {
        NodeIterator::new(self)
    }
}
