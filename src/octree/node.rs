use serde::Serialize;

use crate::aabb::Aabb;

use super::{ObjectId, Octant};

/// Index of a node in the octree's node arena.
pub type NodeId = u32;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OctreeNode {
    pub bounds: Aabb,
    /// Bounds of the 8 children, indexed by [`Octant`]. Computed up front even
    /// if the children are never created.
    pub child_bounds: [Aabb; 8],
    /// Index of the first of 8 contiguous child nodes.
    pub children: Option<NodeId>,
    pub objects: Vec<ObjectId>,
}

impl OctreeNode {
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            child_bounds: Octant::subdivide(&bounds),
            children: None,
            objects: Vec::new(),
        }
    }

    pub const fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Edge length of the node's cube.
    pub fn size(&self) -> f32 {
        self.bounds.size().x
    }

    pub fn child(&self, octant: Octant) -> Option<NodeId> {
        self.children.map(|first| first + octant.index() as NodeId)
    }

    pub fn add_object(&mut self, object: ObjectId) {
        self.objects.push(object);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn new_node_is_an_empty_leaf() {
        let node = OctreeNode::new(Aabb::from_center_size(Vec3::ZERO, Vec3::splat(4.0)));

        assert!(node.is_leaf());
        assert!(node.objects.is_empty());
        assert_eq!(node.size(), 4.0);
        assert_eq!(node.child(Octant::new(3)), None);
        assert_eq!(node.child_bounds[7].center(), Vec3::ONE);
        assert_eq!(node.child_bounds[0].center(), Vec3::NEG_ONE);
    }

    #[test]
    fn child_ids_are_contiguous() {
        let mut node = OctreeNode::new(Aabb::from_center_size(Vec3::ZERO, Vec3::ONE));
        node.children = Some(9);

        assert!(!node.is_leaf());
        assert_eq!(node.child(Octant::new(0)), Some(9));
        assert_eq!(node.child(Octant::new(7)), Some(16));
    }
}
