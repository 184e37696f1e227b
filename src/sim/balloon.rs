//! Balloons and their layers
//!
//! A balloon is a single entity whose health is its current layer. Each peel
//! pays out the layer's bounty and swaps in the next-lower layer; peeling L1
//! pops the balloon.

use std::sync::Arc;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::bullet::BulletEffect;
use super::economy::Currency;
use super::path::Path;
use crate::colour::Colour;
use crate::consts::*;
use crate::error::SimError;

/// Balloon health layers, ordered L1 < L2 < ... < L5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BalloonLayer {
    L1,
    L2,
    L3,
    L4,
    L5,
}

impl BalloonLayer {
    pub const ALL: [BalloonLayer; 5] = [
        BalloonLayer::L1,
        BalloonLayer::L2,
        BalloonLayer::L3,
        BalloonLayer::L4,
        BalloonLayer::L5,
    ];

    pub fn from_level(level: u8) -> Result<Self, SimError> {
        match level {
            1 => Ok(BalloonLayer::L1),
            2 => Ok(BalloonLayer::L2),
            3 => Ok(BalloonLayer::L3),
            4 => Ok(BalloonLayer::L4),
            5 => Ok(BalloonLayer::L5),
            _ => Err(SimError::InvalidLayer { level }),
        }
    }

    pub fn level(self) -> u8 {
        match self {
            BalloonLayer::L1 => 1,
            BalloonLayer::L2 => 2,
            BalloonLayer::L3 => 3,
            BalloonLayer::L4 => 4,
            BalloonLayer::L5 => 5,
        }
    }

    /// Money paid when this layer is peeled
    pub fn bounty(self) -> u32 {
        u32::from(self.level()) * 10
    }

    pub fn colour(self) -> Colour {
        match self {
            BalloonLayer::L1 => Colour::RED,
            BalloonLayer::L2 => Colour::ORANGE,
            BalloonLayer::L3 => Colour::YELLOW,
            BalloonLayer::L4 => Colour::GREEN,
            BalloonLayer::L5 => Colour::BLUE,
        }
    }

    pub fn size(self) -> (u32, u32) {
        BALLOON_SIZE
    }

    /// The layer revealed underneath, or `None` when L1 pops
    pub fn peel_layer(self) -> Option<BalloonLayer> {
        match self {
            BalloonLayer::L1 => None,
            BalloonLayer::L2 => Some(BalloonLayer::L1),
            BalloonLayer::L3 => Some(BalloonLayer::L2),
            BalloonLayer::L4 => Some(BalloonLayer::L3),
            BalloonLayer::L5 => Some(BalloonLayer::L4),
        }
    }
}

/// Where a balloon is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalloonStatus {
    Active(BalloonLayer),
    /// Peeled below L1
    Popped,
    /// Reached the end of its path
    Escaped,
}

/// Outcome of one movement step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    /// Was standing on the last waypoint; the balloon is now `Escaped`
    ReachedEnd,
    /// Balloon is no longer in play
    Idle,
}

/// Money and layers accounted for by one `peel` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeelReport {
    pub layers: u32,
    pub bounty: u32,
    pub popped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balloon {
    pub id: u32,
    pub path: Arc<Path>,
    /// Next waypoint to move onto
    pub path_index: usize,
    pub pos: IVec2,
    pub status: BalloonStatus,
}

impl Balloon {
    /// Place a balloon on `path` at `path_index`
    pub fn new(
        id: u32,
        layer: BalloonLayer,
        path: Arc<Path>,
        path_index: usize,
    ) -> Result<Self, SimError> {
        let pos = path.at(path_index)?;
        Ok(Self {
            id,
            path,
            path_index,
            pos,
            status: BalloonStatus::Active(layer),
        })
    }

    pub fn layer(&self) -> Option<BalloonLayer> {
        match self.status {
            BalloonStatus::Active(layer) => Some(layer),
            _ => None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.status, BalloonStatus::Active(_))
    }

    pub fn center(&self) -> Vec2 {
        self.pos.as_vec2()
    }

    /// Axis-aligned hitbox as (min, max) corners
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(BALLOON_SIZE.0 as f32, BALLOON_SIZE.1 as f32) / 2.0;
        let center = self.center();
        (center - half, center + half)
    }

    /// Walk onto the next waypoint
    pub fn advance(&mut self) -> Step {
        if !self.is_active() {
            return Step::Idle;
        }
        if self.path_index >= self.path.last_index() {
            self.status = BalloonStatus::Escaped;
            return Step::ReachedEnd;
        }
        match self.path.get(self.path_index) {
            Some(point) => {
                self.pos = point;
                self.path_index += 1;
                Step::Moved
            }
            None => {
                self.status = BalloonStatus::Escaped;
                Step::ReachedEnd
            }
        }
    }

    /// Apply a bullet's effect. Returns the number of layers to peel, or
    /// `None` when the hit teleported the balloon instead.
    pub fn receive_hit(
        &mut self,
        damage: u32,
        effect: BulletEffect,
        back_track: usize,
    ) -> Option<u32> {
        match effect {
            BulletEffect::Standard | BulletEffect::Explosive => Some(damage),
            BulletEffect::Teleporting => {
                self.teleport(back_track);
                None
            }
        }
    }

    /// Move back along the path, never before the first waypoint
    pub fn teleport(&mut self, back_track: usize) {
        self.path_index = self.path_index.saturating_sub(back_track);
    }

    /// Peel up to `n` layers, crediting each removed layer's bounty before
    /// revealing the next one.
    pub fn peel(&mut self, n: u32, bank: &mut impl Currency) -> PeelReport {
        let mut report = PeelReport::default();
        for _ in 0..n {
            let BalloonStatus::Active(layer) = self.status else {
                break;
            };
            bank.deposit(layer.bounty());
            report.layers += 1;
            report.bounty += layer.bounty();
            self.status = match layer.peel_layer() {
                Some(lower) => BalloonStatus::Active(lower),
                None => {
                    report.popped = true;
                    BalloonStatus::Popped
                }
            };
        }
        report
    }
}
