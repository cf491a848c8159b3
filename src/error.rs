use crate::octree::ObjectId;

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum OctreeError {
    #[error("Cannot build an octree without any objects")]
    EmptyInput,
    #[error("No bounding box available for object {object}")]
    MissingBoundingBox { object: ObjectId },
    #[error("Bounding box of object {object} is not finite")]
    NonFiniteBoundingBox { object: ObjectId },
    #[error("Cannot track more than {} objects", ObjectId::MAX)]
    TooManyObjects,
    #[error("Minimum node size must be greater than zero, got {0}")]
    InvalidMinNodeSize(f32),
}
