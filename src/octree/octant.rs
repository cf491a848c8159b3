use glam::Vec3;

use crate::aabb::Aabb;

/// One of the 8 sub-cubes of a node.
///
/// Bit 0 selects +x, bit 1 selects +y and bit 2 selects +z, a cleared bit
/// selects the negative half of that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Octant(u8);

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant(0),
        Octant(1),
        Octant(2),
        Octant(3),
        Octant(4),
        Octant(5),
        Octant(6),
        Octant(7),
    ];

    pub const fn new(index: u8) -> Self {
        Self(index & 7)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn is_x_positive(&self) -> bool {
        self.0 & 1 != 0
    }

    pub const fn is_y_positive(&self) -> bool {
        self.0 & 2 != 0
    }

    pub const fn is_z_positive(&self) -> bool {
        self.0 & 4 != 0
    }

    /// The octant of `center` that `point` falls into, ties go to the positive side.
    pub fn containing(center: Vec3, point: Vec3) -> Self {
        let mut octant = 0;

        if point.x >= center.x {
            octant |= 1;
        }

        if point.y >= center.y {
            octant |= 2;
        }

        if point.z >= center.z {
            octant |= 4;
        }

        Self(octant)
    }

    pub fn sign(&self) -> Vec3 {
        let axis = |positive: bool| if positive { 1.0 } else { -1.0 };

        Vec3::new(
            axis(self.is_x_positive()),
            axis(self.is_y_positive()),
            axis(self.is_z_positive()),
        )
    }

    /// Half-size cube of `parent` centered a quarter of its size away from the
    /// parent center. Built from the parent corners and center so siblings
    /// share their faces exactly.
    pub fn child_bounds(&self, parent: &Aabb) -> Aabb {
        let center = parent.center();
        let positive = self.sign().cmpgt(Vec3::ZERO);

        Aabb::new(
            Vec3::select(positive, center, parent.min),
            Vec3::select(positive, parent.max, center),
        )
    }

    /// Precomputes the bounds of all 8 children of `parent`, indexed by octant.
    pub fn subdivide(parent: &Aabb) -> [Aabb; 8] {
        Self::ALL.map(|octant| octant.child_bounds(parent))
    }
}
