use crate::aabb::Aabb;

/// Provides the current bounding box of an object handle.
///
/// Queried once per object on every [`Octree::build`](crate::octree::Octree::build).
/// Returning `None` aborts the build.
pub trait BoundingBoxSource<T: ?Sized> {
    fn bounding_box(&self, handle: &T) -> Option<Aabb>;
}

impl<T: ?Sized, F> BoundingBoxSource<T> for F
where
    F: Fn(&T) -> Option<Aabb>,
{
    fn bounding_box(&self, handle: &T) -> Option<Aabb> {
        self(handle)
    }
}
