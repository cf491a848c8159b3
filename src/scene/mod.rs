mod generate;

use std::{fs, io, path::Path};

pub use generate::*;

use deref_derive::{Deref, DerefMut};
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{aabb::Aabb, source::BoundingBoxSource};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub center: Vec3,
    pub size: Vec3,
    #[serde(default)]
    pub velocity: Vec3,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, center: Vec3, size: Vec3) -> Self {
        Self {
            name: name.into(),
            center,
            size,
            velocity: Vec3::ZERO,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_size(self.center, self.size)
    }
}

/// The set of objects handed to the octree every frame.
///
/// Objects are identified by their index, which is the handle the octree
/// stores.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Deref, DerefMut)]
pub struct Scene {
    #[deref]
    pub objects: Vec<SceneObject>,
    /// Walls the objects bounce off when moving.
    #[serde(default)]
    pub arena: Option<Aabb>,
}

impl Scene {
    pub fn new(objects: Vec<SceneObject>) -> Self {
        Self {
            objects,
            arena: None,
        }
    }

    pub fn with_arena(mut self, arena: Aabb) -> Self {
        self.arena = Some(arena);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), SceneError> {
        for object in &self.objects {
            let valid = object.center.is_finite()
                && object.size.is_finite()
                && object.size.cmpge(Vec3::ZERO).all()
                && object.velocity.is_finite();

            if !valid {
                return Err(SceneError::InvalidObject(object.name.clone()));
            }
        }

        Ok(())
    }

    pub fn handles(&self) -> impl Iterator<Item = usize> {
        0..self.objects.len()
    }

    /// Moves every object by its velocity, reflecting it off the arena walls.
    pub fn advance(&mut self, delta: f32) {
        for object in &mut self.objects {
            object.center += object.velocity * delta;

            let Some(arena) = self.arena else {
                continue;
            };

            let half = object.size * 0.5;
            let min = arena.min + half;
            let max = (arena.max - half).max(min);

            let below = object.center.cmplt(min);
            let above = object.center.cmpgt(max);

            let flip = Vec3::select(below | above, Vec3::NEG_ONE, Vec3::ONE);
            object.velocity *= flip;
            object.center = object.center.clamp(min, max);
        }
    }
}

impl BoundingBoxSource<usize> for Scene {
    fn bounding_box(&self, handle: &usize) -> Option<Aabb> {
        self.objects.get(*handle).map(SceneObject::bounds)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("Failed to read scene: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse scene: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Scene object {0:?} has a non-finite or negative size")]
    InvalidObject(String),
}
