use serde::Serialize;

use super::{NodeId, ObjectId, Octant, Octree, TrackedObject};

/// Two objects whose bounding boxes overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CollisionPair {
    pub a: ObjectId,
    pub b: ObjectId,
}

impl CollisionPair {
    pub const fn new(a: ObjectId, b: ObjectId) -> Self {
        Self { a, b }
    }

    /// The same pair with `a < b`.
    pub fn canonical(self) -> Self {
        Self {
            a: u32::min(self.a, self.b),
            b: u32::max(self.a, self.b),
        }
    }
}

/// Canonicalizes, sorts and removes repeated pairs.
pub fn dedup_pairs(pairs: impl IntoIterator<Item = CollisionPair>) -> Vec<CollisionPair> {
    let mut pairs: Vec<_> = pairs.into_iter().map(CollisionPair::canonical).collect();
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

impl<T> Octree<T> {
    /// Every overlapping pair of objects sharing a node.
    ///
    /// Pairs of a node come before the pairs of its children, children are
    /// visited in octant order. An overlapping pair sharing several leaves is
    /// reported once per leaf, see [`Octree::check_collisions_unique`].
    pub fn check_collisions(&self) -> Vec<CollisionPair> {
        let mut pairs = Vec::new();
        self.collect_collisions(self.root(), &mut pairs);
        pairs
    }

    pub fn check_collisions_unique(&self) -> Vec<CollisionPair> {
        dedup_pairs(self.check_collisions())
    }

    fn collect_collisions(&self, index: NodeId, pairs: &mut Vec<CollisionPair>) {
        let node = &self[index];

        for (i, &a) in node.objects.iter().enumerate() {
            for &b in &node.objects[i + 1..] {
                if self.object(a).intersects(&self.object(b).bounds) {
                    pairs.push(CollisionPair::new(a, b));
                }
            }
        }

        if let Some(first) = node.children {
            for octant in Octant::ALL {
                self.collect_collisions(first + octant.index() as NodeId, pairs);
            }
        }
    }

    pub fn resolve(&self, pair: CollisionPair) -> (&TrackedObject<T>, &TrackedObject<T>) {
        (self.object(pair.a), self.object(pair.b))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use glam::Vec3;

    use super::*;
    use crate::{
        aabb::Aabb,
        octree::tests::{build, cube, scattered},
    };

    #[test]
    fn overlapping_at_center() {
        let boxes = [cube(-1.0, 1.0), cube(-0.5, 0.5)];
        let octree = build(&boxes, 4.0);

        assert!(octree[octree.root()].is_leaf());
        assert_eq!(octree.check_collisions(), vec![CollisionPair::new(0, 1)]);
    }

    #[test]
    fn opposite_corners_do_not_collide() {
        let boxes = [cube(0.0, 1.0), cube(9.0, 10.0)];
        let octree = build(&boxes, 1.0);

        assert!(octree.check_collisions().is_empty());
    }

    #[test]
    fn only_the_overlapping_pair_is_reported() {
        let boxes = [cube(0.5, 1.5), cube(1.0, 2.0), cube(8.0, 9.0)];
        let octree = build(&boxes, 5.0);

        let pairs = octree.check_collisions();
        assert_eq!(pairs, vec![CollisionPair::new(0, 1)]);

        let (a, b) = octree.resolve(pairs[0]);
        assert_eq!(a.bounds, boxes[0]);
        assert_eq!(b.bounds, boxes[1]);
    }

    #[test]
    fn duplicated_pairs_are_removed() {
        // both boxes straddle the root center and land in all 8 leaves
        let boxes = [cube(-1.0, 1.0), cube(-0.5, 0.5), cube(-8.0, -7.0), cube(7.0, 8.0)];
        let octree = build(&boxes, 8.0);

        let pairs = octree.check_collisions();
        assert_eq!(pairs.iter().filter(|pair| **pair == CollisionPair::new(0, 1)).count(), 8);

        assert_eq!(octree.check_collisions_unique(), vec![CollisionPair::new(0, 1)]);
    }

    #[test]
    fn reported_pairs_overlap() {
        let boxes = scattered(200);
        let octree = build(&boxes, 2.0);

        let pairs = octree.check_collisions();
        assert!(!pairs.is_empty());

        for pair in pairs {
            let (a, b) = octree.resolve(pair);
            assert_ne!(a.id, b.id);
            assert!(a.bounds.intersects(&b.bounds));
        }
    }

    #[test]
    fn residents_of_a_node_are_paired() {
        let boxes = scattered(200);
        let octree = build(&boxes, 2.0);

        let pairs: HashSet<_> = octree.check_collisions_unique().into_iter().collect();

        for view in octree.iter_nodes() {
            for (i, &a) in view.objects.iter().enumerate() {
                for &b in &view.objects[i + 1..] {
                    if boxes[a as usize].intersects(&boxes[b as usize]) {
                        assert!(pairs.contains(&CollisionPair::new(a, b).canonical()));
                    }
                }
            }
        }
    }

    #[test]
    fn matches_brute_force() {
        let boxes = scattered(150);
        let octree = build(&boxes, 1.0);

        let mut expected = Vec::new();
        for (i, a) in boxes.iter().enumerate() {
            for (j, b) in boxes.iter().enumerate().skip(i + 1) {
                if a.intersects(b) {
                    expected.push(CollisionPair::new(i as ObjectId, j as ObjectId));
                }
            }
        }

        assert_eq!(octree.check_collisions_unique(), expected);
    }

    #[test]
    fn canonical_pair() {
        let pair = CollisionPair::new(5, 2);

        assert_eq!(pair.canonical(), CollisionPair::new(2, 5));
        assert_eq!(pair.canonical().canonical(), CollisionPair::new(2, 5));
    }

    #[test]
    fn dedup_sorts_pairs() {
        let pairs = [
            CollisionPair::new(3, 1),
            CollisionPair::new(0, 2),
            CollisionPair::new(1, 3),
            CollisionPair::new(0, 2),
        ];

        assert_eq!(
            dedup_pairs(pairs),
            vec![CollisionPair::new(0, 2), CollisionPair::new(1, 3)]
        );
    }

    #[test]
    fn touching_boxes_collide() {
        let boxes = [
            Aabb::new(Vec3::ZERO, Vec3::ONE),
            Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0)),
        ];
        let octree = build(&boxes, 0.25);

        assert_eq!(octree.check_collisions_unique(), vec![CollisionPair::new(0, 1)]);
    }
}
