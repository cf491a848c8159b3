use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::bail;
use broadleaf::{
    app::{App, DriverConfig},
    debug::TreeDump,
    scene::{ScatterParams, Scene},
};
use clap::Parser;
use log::info;

#[derive(Parser)]
pub struct Args {
    #[clap(short, long, default_value = "info")]
    pub log_level: log::LevelFilter,

    /// Nodes at or below this edge length are not subdivided.
    #[clap(short, long, default_value_t = 1.0)]
    pub min_node_size: f32,

    #[clap(short, long, default_value_t = 1)]
    pub frames: u64,

    /// Seconds simulated per frame.
    #[clap(long, default_value_t = 1.0 / 60.0)]
    pub delta: f32,

    /// JSON scene file, a scattered scene is generated when omitted.
    #[clap(short, long)]
    pub scene: Option<PathBuf>,

    #[clap(long, default_value_t = 32)]
    pub count: usize,

    #[clap(long, default_value_t = 0)]
    pub seed: u32,

    /// Edge length of the cube the generated objects move in.
    #[clap(long, default_value_t = 16.0)]
    pub arena: f32,

    /// Report each overlapping pair once per frame.
    #[clap(short, long)]
    pub unique: bool,

    /// Print the tree of the last frame.
    #[clap(long)]
    pub dump: bool,

    /// Write the tree of the last frame as JSON.
    #[clap(long)]
    pub export: Option<PathBuf>,
}

impl Args {
    pub fn init_logger(&self) {
        env_logger::builder().filter_level(self.log_level).init();
    }

    pub fn config(&self) -> anyhow::Result<DriverConfig> {
        if !self.delta.is_finite() || self.delta < 0.0 {
            bail!("Frame delta must be finite and non-negative, got {}", self.delta);
        }

        Ok(DriverConfig {
            min_node_size: self.min_node_size,
            frames: self.frames,
            delta: self.delta,
            unique: self.unique,
        })
    }

    pub fn scene(&self) -> anyhow::Result<Scene> {
        if let Some(path) = &self.scene {
            info!("Loading scene from {}", path.display());
            return Ok(Scene::load(path)?);
        }

        if !self.arena.is_finite() || self.arena <= 0.0 {
            bail!("Arena size must be positive, got {}", self.arena);
        }

        Ok(Scene::scatter(ScatterParams {
            count: self.count,
            seed: self.seed,
            arena: self.arena,
            ..Default::default()
        }))
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    args.init_logger();

    let mut app = App::new(args.scene()?, args.config()?);
    let reports = app.run()?;

    let total: usize = reports.iter().map(|report| report.pairs.len()).sum();
    info!("{} frames, {} collisions", reports.len(), total);

    if let Some(octree) = &app.octree {
        if args.dump {
            print!("{}", TreeDump(octree));
        }

        if let Some(path) = &args.export {
            let writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(writer, octree)?;
            info!("Exported octree to {}", path.display());
        }
    }

    Ok(())
}
