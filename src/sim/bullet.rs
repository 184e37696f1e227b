//! Projectiles
//!
//! A bullet flies in a straight line from where it was fired toward a
//! destination, covering `BULLET_SPEED` pixels per tick. It expires when its
//! lifetime runs out, whether or not it hit anything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a bullet does to the balloon it touches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletEffect {
    /// Peels `pop_power` layers
    Standard,
    /// Peels `pop_power` layers and bursts into four standard fragments
    Explosive,
    /// Peels nothing, pushes the balloon back along its path
    Teleporting,
}

/// Result of a bullet hitting a balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    /// Number of layers to peel
    Peel(u32),
    Teleport,
}

/// Outcome of one tick of flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flight {
    Alive,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub destination: Vec2,
    /// Displacement per tick
    pub step: Vec2,
    pub ticks_remaining: u32,
    pub pop_power: u32,
    pub effect: BulletEffect,
    /// Tower credited with any balloon this bullet (or its fragments) pops
    pub owner: Option<u32>,
    /// Set once the bullet has collided or expired
    pub spent: bool,
}

impl Bullet {
    pub fn new(
        effect: BulletEffect,
        start: Vec2,
        destination: Vec2,
        pop_power: u32,
        owner: Option<u32>,
    ) -> Self {
        let delta = destination - start;
        let ticks = ((delta.length() / BULLET_SPEED).ceil() as u32).max(1);
        Self {
            pos: start,
            destination,
            step: delta / ticks as f32,
            ticks_remaining: ticks,
            pop_power,
            effect,
            owner,
            spent: false,
        }
    }

    pub fn standard(start: Vec2, destination: Vec2, pop_power: u32, owner: Option<u32>) -> Self {
        Self::new(BulletEffect::Standard, start, destination, pop_power, owner)
    }

    #[inline]
    pub fn is_live(&self) -> bool {
        !self.spent
    }

    /// Move one step toward the destination
    pub fn advance(&mut self) -> Flight {
        if self.spent {
            return Flight::Expired;
        }
        if self.ticks_remaining > 0 {
            self.pos += self.step;
            self.ticks_remaining -= 1;
            Flight::Alive
        } else {
            self.spent = true;
            Flight::Expired
        }
    }

    /// Resolve a hit: the bullet is spent and reports what it does to the
    /// balloon. Explosive bullets push their fragments into `spawned` first.
    pub fn on_collision(&mut self, spawned: &mut Vec<Bullet>) -> Impact {
        let impact = match self.effect {
            BulletEffect::Standard => Impact::Peel(self.pop_power),
            BulletEffect::Explosive => {
                spawned.extend(self.fragments());
                Impact::Peel(self.pop_power)
            }
            BulletEffect::Teleporting => Impact::Teleport,
        };
        self.spent = true;
        impact
    }

    /// Four standard bullets aimed up, right, down and left of the impact point
    fn fragments(&self) -> [Bullet; 4] {
        let reach = EXPLOSION_FRAGMENT_REACH;
        [
            Vec2::new(0.0, -reach),
            Vec2::new(reach, 0.0),
            Vec2::new(0.0, reach),
            Vec2::new(-reach, 0.0),
        ]
        .map(|offset| Bullet::standard(self.pos, self.pos + offset, self.pop_power, self.owner))
    }

    /// Axis-aligned hitbox as (min, max) corners
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(BULLET_SIZE.0 as f32, BULLET_SIZE.1 as f32) / 2.0;
        (self.pos - half, self.pos + half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_and_step() {
        let bullet = Bullet::standard(Vec2::new(0.0, 0.0), Vec2::new(60.0, 80.0), 1, None);
        // 100 px at 20 px/tick
        assert_eq!(bullet.ticks_remaining, 5);
        assert!((bullet.step - Vec2::new(12.0, 16.0)).length() < 1e-4);
    }

    #[test]
    fn test_zero_distance_still_lives_one_tick() {
        let mut bullet = Bullet::standard(Vec2::splat(5.0), Vec2::splat(5.0), 1, None);
        assert_eq!(bullet.ticks_remaining, 1);
        assert_eq!(bullet.step, Vec2::ZERO);
        assert_eq!(bullet.advance(), Flight::Alive);
        assert_eq!(bullet.advance(), Flight::Expired);
    }

    #[test]
    fn test_advance_reaches_destination_then_expires() {
        let mut bullet = Bullet::standard(Vec2::ZERO, Vec2::new(0.0, 40.0), 1, None);
        assert_eq!(bullet.advance(), Flight::Alive);
        assert_eq!(bullet.advance(), Flight::Alive);
        assert!((bullet.pos - Vec2::new(0.0, 40.0)).length() < 1e-4);
        assert_eq!(bullet.ticks_remaining, 0);
        assert_eq!(bullet.advance(), Flight::Expired);
        assert!(bullet.spent);
        // Stays expired
        assert_eq!(bullet.advance(), Flight::Expired);
    }

    #[test]
    fn test_standard_collision() {
        let mut spawned = Vec::new();
        let mut bullet = Bullet::standard(Vec2::ZERO, Vec2::new(20.0, 0.0), 3, Some(1));
        assert_eq!(bullet.on_collision(&mut spawned), Impact::Peel(3));
        assert!(bullet.spent);
        assert!(spawned.is_empty());
    }

    #[test]
    fn test_explosive_collision_spawns_cardinal_fragments() {
        let mut spawned = Vec::new();
        let mut bullet = Bullet::new(
            BulletEffect::Explosive,
            Vec2::new(50.0, 50.0),
            Vec2::new(100.0, 50.0),
            2,
            Some(7),
        );
        assert_eq!(bullet.on_collision(&mut spawned), Impact::Peel(2));
        assert!(bullet.spent);
        assert_eq!(spawned.len(), 4);

        let targets: Vec<Vec2> = spawned.iter().map(|b| b.destination).collect();
        assert_eq!(
            targets,
            vec![
                Vec2::new(50.0, 30.0),
                Vec2::new(70.0, 50.0),
                Vec2::new(50.0, 70.0),
                Vec2::new(30.0, 50.0),
            ]
        );
        for fragment in &spawned {
            assert_eq!(fragment.effect, BulletEffect::Standard);
            assert_eq!(fragment.pop_power, 2);
            assert_eq!(fragment.owner, Some(7));
            assert_eq!(fragment.pos, Vec2::new(50.0, 50.0));
            assert_eq!(fragment.ticks_remaining, 1);
        }
    }

    #[test]
    fn test_teleporting_collision() {
        let mut spawned = Vec::new();
        let mut bullet = Bullet::new(
            BulletEffect::Teleporting,
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
            1,
            None,
        );
        assert_eq!(bullet.on_collision(&mut spawned), Impact::Teleport);
        assert!(bullet.spent);
        assert!(spawned.is_empty());
    }

    #[test]
    fn test_bounds() {
        let bullet = Bullet::standard(Vec2::new(10.0, 20.0), Vec2::new(10.0, 40.0), 1, None);
        assert_eq!(bullet.bounds(), (Vec2::new(5.0, 15.0), Vec2::new(15.0, 25.0)));
    }
}
