//! Balloon Defence - a tower-defense combat core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paths, balloons, towers, projectiles, tick)
//! - `settings`: Data-driven game balance loaded from JSON
//! - `colour`: RGBA palette shared by balloons, towers and projectiles
//! - `error`: Rejected-input and out-of-range errors

pub mod colour;
pub mod error;
pub mod settings;
pub mod sim;

pub use colour::Colour;
pub use error::SimError;
pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Pixels a projectile covers per tick
    pub const BULLET_SPEED: f32 = 20.0;
    /// Projectile hitbox (width, height)
    pub const BULLET_SIZE: (u32, u32) = (10, 10);

    /// Balloon hitbox (width, height), identical for every layer
    pub const BALLOON_SIZE: (u32, u32) = (30, 30);

    /// Path positions a teleport hit pushes a balloon back by default
    pub const DEFAULT_BACK_TRACK: usize = 20;

    /// Distance from the impact point to each explosion fragment's target
    pub const EXPLOSION_FRAGMENT_REACH: f32 = 20.0;
    /// Distance from the tower to each 360° projectile's target, per axis
    pub const THREE_SIXTY_REACH: f32 = 100.0;

    /// Ticks between balloon releases
    pub const SPAWN_INTERVAL_TICKS: u32 = 10;

    /// Starting player resources
    pub const STARTING_BALANCE: u32 = 100;
    pub const STARTING_LIVES: i32 = 20;
}

/// Euclidean distance between two integer points
#[inline]
pub fn distance(a: IVec2, b: IVec2) -> f32 {
    a.as_vec2().distance(b.as_vec2())
}

/// Validate a render size read from outside the crate
pub fn checked_dimension(width: u32, height: u32) -> Result<(u32, u32), SimError> {
    if width == 0 || height == 0 {
        return Err(SimError::InvalidDimension { width, height });
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_euclidean() {
        assert!((distance(IVec2::new(0, 0), IVec2::new(3, 4)) - 5.0).abs() < 1e-6);
        assert_eq!(distance(IVec2::new(7, 7), IVec2::new(7, 7)), 0.0);
    }

    #[test]
    fn test_checked_dimension() {
        assert_eq!(checked_dimension(30, 30), Ok((30, 30)));
        assert_eq!(
            checked_dimension(0, 10),
            Err(SimError::InvalidDimension { width: 0, height: 10 })
        );
    }
}
