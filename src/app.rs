use log::{debug, info};

use crate::{
    debug::TreeStats,
    octree::{CollisionPair, Octree},
    scene::Scene,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriverConfig {
    pub min_node_size: f32,
    pub frames: u64,
    pub delta: f32,
    /// Report each overlapping pair once per frame.
    pub unique: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            min_node_size: 1.0,
            frames: 1,
            delta: 1.0 / 60.0,
            unique: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub pairs: Vec<CollisionPair>,
    pub stats: TreeStats,
}

/// Rebuilds the octree over the scene every frame and reports the overlapping
/// pairs.
pub struct App {
    pub scene: Scene,
    pub config: DriverConfig,
    pub frame: u64,
    pub octree: Option<Octree<usize>>,
}

impl App {
    pub fn new(scene: Scene, config: DriverConfig) -> Self {
        Self {
            scene,
            config,
            frame: 0,
            octree: None,
        }
    }

    pub fn update(&mut self) -> anyhow::Result<FrameReport> {
        // the previous frame's tree is dropped, nothing carries over
        self.octree = None;

        let octree = Octree::build(self.scene.handles(), &self.scene, self.config.min_node_size)?;

        let pairs = if self.config.unique {
            octree.check_collisions_unique()
        } else {
            octree.check_collisions()
        };

        for &pair in &pairs {
            let (a, b) = octree.resolve(pair);
            info!(
                "collision detected between {} and {}",
                self.scene[a.handle].name, self.scene[b.handle].name
            );
        }

        let stats = octree.stats();
        debug!("Frame {}: {}, {} pairs", self.frame, stats, pairs.len());

        self.octree = Some(octree);

        Ok(FrameReport {
            frame: self.frame,
            pairs,
            stats,
        })
    }

    pub fn post_update(&mut self) {
        self.scene.advance(self.config.delta);
        self.frame += 1;
    }

    pub fn run_frame(&mut self) -> anyhow::Result<FrameReport> {
        let report = self.update()?;
        self.post_update();

        Ok(report)
    }

    pub fn run(&mut self) -> anyhow::Result<Vec<FrameReport>> {
        (0..self.config.frames).map(|_| self.run_frame()).collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{error::OctreeError, scene::SceneObject};

    fn approaching() -> Scene {
        Scene::new(vec![
            SceneObject::new("left", Vec3::new(-3.0, 0.0, 0.0), Vec3::splat(2.0))
                .with_velocity(Vec3::new(1.0, 0.0, 0.0)),
            SceneObject::new("right", Vec3::new(3.0, 0.0, 0.0), Vec3::splat(2.0))
                .with_velocity(Vec3::new(-1.0, 0.0, 0.0)),
            SceneObject::new("far", Vec3::new(0.0, 10.0, 0.0), Vec3::ONE).with_velocity(Vec3::Y),
        ])
    }

    #[test]
    fn objects_collide_once_they_meet() {
        let config = DriverConfig {
            min_node_size: 1.0,
            frames: 4,
            delta: 1.0,
            unique: true,
        };
        let mut app = App::new(approaching(), config);

        let reports = app.run().unwrap();

        assert_eq!(reports.len(), 4);
        assert_eq!(app.frame, 4);

        // the boxes start 6 apart and close 2 units per frame
        assert!(reports[0].pairs.is_empty());
        assert!(reports[1].pairs.is_empty());
        assert_eq!(reports[2].pairs, vec![CollisionPair::new(0, 1)]);
        assert_eq!(reports[3].pairs, vec![CollisionPair::new(0, 1)]);
    }

    #[test]
    fn tree_is_rebuilt_every_frame() {
        let config = DriverConfig {
            frames: 2,
            delta: 1.0,
            ..Default::default()
        };
        let mut app = App::new(approaching(), config);

        app.run_frame().unwrap();
        let first = app.octree.as_ref().unwrap().bounds;

        app.run_frame().unwrap();
        let second = app.octree.as_ref().unwrap().bounds;

        assert_ne!(first, second);
    }

    #[test]
    fn build_errors_are_propagated() {
        let config = DriverConfig {
            min_node_size: 0.0,
            ..Default::default()
        };
        let mut app = App::new(approaching(), config);

        let error = app.update().unwrap_err();
        assert_eq!(
            error.downcast_ref::<OctreeError>(),
            Some(&OctreeError::InvalidMinNodeSize(0.0))
        );
        assert!(app.octree.is_none());

        let mut app = App::new(Scene::default(), DriverConfig::default());
        let error = app.update().unwrap_err();
        assert_eq!(
            error.downcast_ref::<OctreeError>(),
            Some(&OctreeError::EmptyInput)
        );
    }
}
