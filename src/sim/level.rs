//! Levels and waves
//!
//! A level is a queue of balloons released one at a time onto a shared path.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::balloon::BalloonLayer;
use super::path::Path;
use crate::error::SimError;

/// Anything that can feed balloons into the game
pub trait WaveSource {
    /// Next balloon to release, or `None` when exhausted
    fn next_spawn(&mut self) -> Option<(BalloonLayer, Arc<Path>)>;
    fn is_exhausted(&self) -> bool;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    balloons: VecDeque<BalloonLayer>,
    path: Arc<Path>,
}

/// On-disk level layout
#[derive(Deserialize)]
struct LevelFile {
    balloons: Vec<u8>,
    #[serde(default)]
    path: Option<Vec<[i32; 2]>>,
}

impl Level {
    pub fn new(balloons: impl IntoIterator<Item = BalloonLayer>, path: Arc<Path>) -> Self {
        Self {
            balloons: balloons.into_iter().collect(),
            path,
        }
    }

    /// Build a level from balloon levels (1..=5), rejecting anything else
    pub fn from_levels(levels: &[u8], path: Arc<Path>) -> Result<Self, SimError> {
        let balloons = levels
            .iter()
            .map(|&level| BalloonLayer::from_level(level))
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Self { balloons, path })
    }

    /// Parse a level such as `{"balloons": [4, 4, 2], "path": [[0, 0], [0, 1]]}`.
    /// Without a `path` the straight lane is used.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let file: LevelFile = serde_json::from_str(json)?;
        let path = match file.path {
            Some(points) => Path::new(points.into_iter().map(IVec2::from).collect())?,
            None => Path::straight_lane(),
        };
        Self::from_levels(&file.balloons, Arc::new(path))
    }

    /// The three built-in levels on the straight lane
    pub fn campaign() -> Vec<Level> {
        let path = Arc::new(Path::straight_lane());
        vec![
            Level::new([BalloonLayer::L4; 12], path.clone()),
            Level::new([BalloonLayer::L2; 12], path.clone()),
            Level::new([BalloonLayer::L1; 9], path),
        ]
    }

    /// Deterministic procedural wave. Later waves are longer and reach
    /// higher layers.
    pub fn generate(seed: u64, wave: u32, path: Arc<Path>) -> Self {
        let wave_seed = (wave as u64).wrapping_mul(2654435761).wrapping_add(seed);
        let mut rng = Pcg32::seed_from_u64(wave_seed);

        let count = wave.saturating_mul(2).saturating_add(5).min(40) as usize;
        let max_level = (1 + wave / 2).min(5) as u8;

        let balloons = (0..count)
            .map(|_| {
                let level = rng.random_range(1..=max_level);
                BalloonLayer::from_level(level).unwrap_or(BalloonLayer::L1)
            })
            .collect();
        log::debug!("Generated wave {wave}: {count} balloons up to L{max_level}");
        Self { balloons, path }
    }

    pub fn remaining(&self) -> usize {
        self.balloons.len()
    }

    pub fn path(&self) -> &Arc<Path> {
        &self.path
    }
}

impl WaveSource for Level {
    fn next_spawn(&mut self) -> Option<(BalloonLayer, Arc<Path>)> {
        let layer = self.balloons.pop_front()?;
        Some((layer, self.path.clone()))
    }

    fn is_exhausted(&self) -> bool {
        self.balloons.is_empty()
    }
}
