use std::ops::Index;

mod collision;
mod iter;
mod node;
mod octant;

pub use collision::*;
pub use iter::*;
pub use node::*;
pub use octant::*;

use glam::Vec3;
use log::{debug, trace};
use serde::Serialize;

use crate::{aabb::Aabb, bounds, error::OctreeError, source::BoundingBoxSource};

/// Position of an object in the input of [`Octree::build`].
pub type ObjectId = u32;

/// An object handle together with the bounding box it had when the tree was built.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackedObject<T> {
    pub id: ObjectId,
    pub handle: T,
    pub bounds: Aabb,
}

impl<T> TrackedObject<T> {
    pub fn intersects(&self, bounds: &Aabb) -> bool {
        self.bounds.intersects(bounds)
    }
}

/// Broad-phase octree, built from scratch over a set of objects.
///
/// Nodes live in a single arena, the root is always node `0`. Children are
/// allocated 8 at a time, the first time an object reaches a node that is larger
/// than `min_node_size`. Objects straddling octant boundaries are stored in
/// every leaf they touch.
#[derive(Clone, Debug, Serialize)]
pub struct Octree<T> {
    pub bounds: Aabb,
    pub min_node_size: f32,
    nodes: Vec<OctreeNode>,
    objects: Vec<TrackedObject<T>>,
}

impl<T> Octree<T> {
    pub fn build<S>(
        handles: impl IntoIterator<Item = T>,
        source: &S,
        min_node_size: f32,
    ) -> Result<Self, OctreeError>
    where
        S: BoundingBoxSource<T> + ?Sized,
    {
        if min_node_size.is_nan() || min_node_size <= 0.0 {
            return Err(OctreeError::InvalidMinNodeSize(min_node_size));
        }

        let mut objects = Vec::new();
        for (index, handle) in handles.into_iter().enumerate() {
            let id = object_id(index)?;

            let bounds = source
                .bounding_box(&handle)
                .ok_or(OctreeError::MissingBoundingBox { object: id })?;

            // infinite or NaN extents would never shrink below the minimum size
            if !bounds.is_finite() {
                return Err(OctreeError::NonFiniteBoundingBox { object: id });
            }

            objects.push(TrackedObject { id, handle, bounds });
        }

        if objects.is_empty() {
            return Err(OctreeError::EmptyInput);
        }

        let bounds = bounds::enclosing_cube(objects.iter().map(|object| object.bounds))?;

        let mut octree = Self {
            bounds,
            min_node_size,
            nodes: vec![OctreeNode::new(bounds)],
            objects,
        };

        let ids: Vec<_> = octree.objects.iter().map(|object| object.id).collect();
        for id in ids {
            octree.insert(octree.root(), id, 0);
        }

        debug!(
            "Built octree over {} objects: {} nodes, root size {}",
            octree.objects.len(),
            octree.nodes.len(),
            bounds.size().x,
        );

        Ok(octree)
    }

    pub const fn root(&self) -> NodeId {
        0
    }

    /// Whether objects reaching `index` are stored there instead of going
    /// further down.
    ///
    /// Besides the size threshold, a node is final once it reaches the depth
    /// bound or once halving it no longer shrinks it, which happens when its
    /// edge is down to a few ulps of its coordinates.
    fn is_final(&self, index: NodeId, depth: u32) -> bool {
        let node = &self[index];
        let size = node.size();

        size <= self.min_node_size
            || depth >= self.max_depth_bound()
            || (node.child_bounds.iter()).any(|child| child.size().max_element() >= size)
    }

    fn insert(&mut self, index: NodeId, object: ObjectId, depth: u32) {
        if self.is_final(index, depth) {
            self.node_mut(index).add_object(object);
            return;
        }

        let first = match self[index].children {
            Some(first) => first,
            None => self.push_branch(index),
        };

        let bounds = self.object(object).bounds;
        let child_bounds = self[index].child_bounds;

        // every octant is checked, the object may land in several of them
        let mut intersected = false;
        for octant in Octant::ALL {
            if bounds.intersects(&child_bounds[octant.index()]) {
                self.insert(first + octant.index() as NodeId, object, depth + 1);
                intersected = true;
            }
        }

        if !intersected {
            trace!("Object {} intersects no octant of node {}", object, index);
            self.node_mut(index).add_object(object);
        }
    }

    fn push_branch(&mut self, parent: NodeId) -> NodeId {
        let first = self.nodes.len() as NodeId;

        let child_bounds = self[parent].child_bounds;
        (self.nodes).extend(child_bounds.iter().map(|bounds| OctreeNode::new(*bounds)));
        self.node_mut(parent).children = Some(first);

        first
    }

    fn node_mut(&mut self, index: NodeId) -> &mut OctreeNode {
        &mut self.nodes[index as usize]
    }

    pub fn node(&self, index: NodeId) -> Option<&OctreeNode> {
        self.nodes.get(index as usize)
    }

    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    pub fn object(&self, id: ObjectId) -> &TrackedObject<T> {
        &self.objects[id as usize]
    }

    pub fn objects(&self) -> &[TrackedObject<T>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Deepest instantiated node containing `point`.
    pub fn locate(&self, point: Vec3) -> Option<NodeId> {
        if !self.bounds.contains_point(point) {
            return None;
        }

        let mut index = self.root();
        loop {
            let node = &self[index];
            let octant = Octant::containing(node.bounds.center(), point);

            match node.child(octant) {
                Some(child) => index = child,
                None => return Some(index),
            }
        }
    }

    /// Upper bound on the depth of any node, the root being at depth 0.
    pub fn max_depth_bound(&self) -> u32 {
        let size = self.bounds.size().x;

        if size <= self.min_node_size {
            return 0;
        }

        (size / self.min_node_size).log2().ceil() as u32
    }
}

fn object_id(index: usize) -> Result<ObjectId, OctreeError> {
    ObjectId::try_from(index).map_err(|_| OctreeError::TooManyObjects)
}

impl<T> Index<NodeId> for Octree<T> {
    type Output = OctreeNode;

    #[inline]
    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index as usize]
    }
}
