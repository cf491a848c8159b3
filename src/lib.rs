//! Broad-phase collision detection over axis-aligned boxes using an octree
//! that is rebuilt from scratch on every use.

pub mod aabb;
pub mod app;
pub mod bounds;
pub mod debug;
pub mod error;
pub mod octree;
pub mod scene;
pub mod source;

pub use aabb::Aabb;
pub use error::OctreeError;
pub use octree::{CollisionPair, Octree, TrackedObject};
pub use source::BoundingBoxSource;
