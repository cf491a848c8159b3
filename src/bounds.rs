use glam::Vec3;

use crate::{aabb::Aabb, error::OctreeError};

/// Computes the smallest cube, centered on the union of `boxes`, that contains
/// every box.
pub fn enclosing_cube(boxes: impl IntoIterator<Item = Aabb>) -> Result<Aabb, OctreeError> {
    let mut boxes = boxes.into_iter();
    let mut union = boxes.next().ok_or(OctreeError::EmptyInput)?;

    for aabb in boxes {
        union.encapsulate(&aabb);
    }

    let center = union.center();
    let half = Vec3::splat(union.size().max_element() * 0.5);

    // widened by the union so rounding around the center never cuts off an input
    Ok(Aabb::new(
        (center - half).min(union.min),
        (center + half).max(union.max),
    ))
}
