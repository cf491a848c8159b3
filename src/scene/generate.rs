use glam::Vec3;
use noise::{NoiseFn, Perlin};

use crate::aabb::Aabb;

use super::{Scene, SceneObject};

pub fn perlin(noise: &Perlin, p: Vec3) -> f32 {
    noise.get([p.x as f64, p.y as f64, p.z as f64]) as f32
}

/// Perlin noise remapped to `0..=1`.
pub fn sperlin(noise: &Perlin, p: Vec3) -> f32 {
    (perlin(noise, p) * 0.5 + 0.5).clamp(0.0, 1.0)
}

/// Deterministic layout of `count` boxes inside a cube of edge `arena`
/// centered on the origin.
#[derive(Clone, Copy, Debug)]
pub struct ScatterParams {
    pub count: usize,
    pub seed: u32,
    pub arena: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub max_speed: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            count: 32,
            seed: 0,
            arena: 16.0,
            min_size: 0.5,
            max_size: 2.0,
            max_speed: 2.0,
        }
    }
}

impl Scene {
    pub fn scatter(params: ScatterParams) -> Self {
        let noise = Perlin::new(params.seed);
        let arena = Aabb::from_center_size(Vec3::ZERO, Vec3::splat(params.arena));

        // sample off the integer lattice, perlin noise is zero on it
        let sample = |i: usize, channel: f32| {
            let t = i as f32 * 0.731 + 0.173;
            let axis = |offset: f32| sperlin(&noise, Vec3::new(t, channel + offset, 0.5 - t * 0.29));
            Vec3::new(axis(0.31), axis(11.57), axis(23.83))
        };

        let objects = (0..params.count)
            .map(|i| {
                let size = params.min_size + sample(i, 101.0) * (params.max_size - params.min_size);

                let half = (size * 0.5).min(arena.half_size());
                let min = arena.min + half;
                let max = arena.max - half;
                let center = min + sample(i, 0.0) * (max - min);

                let velocity = (sample(i, 211.0) * 2.0 - 1.0) * params.max_speed;

                SceneObject::new(format!("box{i}"), center, size).with_velocity(velocity)
            })
            .collect();

        Scene::new(objects).with_arena(arena)
    }
}
