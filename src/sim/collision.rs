//! Collision detection between projectiles and balloons
//!
//! Both are treated as axis-aligned boxes centred on their position.
//! Boxes that only share an edge do not collide.

use glam::Vec2;

use super::balloon::Balloon;
use super::bullet::Bullet;

/// Strict overlap test between two (min, max) boxes
#[inline]
pub fn boxes_overlap(a: (Vec2, Vec2), b: (Vec2, Vec2)) -> bool {
    a.0.x < b.1.x && b.0.x < a.1.x && a.0.y < b.1.y && b.0.y < a.1.y
}

pub fn bullet_hits_balloon(bullet: &Bullet, balloon: &Balloon) -> bool {
    bullet.is_live() && balloon.is_active() && boxes_overlap(bullet.bounds(), balloon.bounds())
}

/// Index of the first live bullet, in collection order, touching `balloon`
pub fn first_colliding_bullet(balloon: &Balloon, bullets: &[Bullet]) -> Option<usize> {
    bullets.iter().position(|b| bullet_hits_balloon(b, balloon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::balloon::BalloonLayer;
    use crate::sim::path::Path;
    use glam::IVec2;
    use std::sync::Arc;

    fn balloon_at(pos: IVec2) -> Balloon {
        let path = Arc::new(Path::new(vec![pos]).unwrap());
        Balloon::new(1, BalloonLayer::L2, path, 0).unwrap()
    }

    fn bullet_at(pos: Vec2) -> Bullet {
        Bullet::standard(pos, pos + Vec2::new(0.0, 40.0), 1, None)
    }

    #[test]
    fn test_overlap() {
        let balloon = balloon_at(IVec2::new(100, 100));
        assert!(bullet_hits_balloon(&bullet_at(Vec2::new(100.0, 100.0)), &balloon));
        // Balloon half-width 15 plus bullet half-width 5
        assert!(bullet_hits_balloon(&bullet_at(Vec2::new(119.0, 100.0)), &balloon));
        assert!(!bullet_hits_balloon(&bullet_at(Vec2::new(120.0, 100.0)), &balloon));
        assert!(!bullet_hits_balloon(&bullet_at(Vec2::new(100.0, 130.0)), &balloon));
    }

    #[test]
    fn test_spent_bullets_never_hit() {
        let balloon = balloon_at(IVec2::new(0, 0));
        let mut bullet = bullet_at(Vec2::ZERO);
        bullet.spent = true;
        assert!(!bullet_hits_balloon(&bullet, &balloon));
    }

    #[test]
    fn test_first_in_collection_order() {
        let balloon = balloon_at(IVec2::new(0, 0));
        let mut spent = bullet_at(Vec2::ZERO);
        spent.spent = true;
        let bullets = vec![
            bullet_at(Vec2::new(500.0, 500.0)),
            spent,
            bullet_at(Vec2::new(3.0, 3.0)),
            bullet_at(Vec2::ZERO),
        ];
        assert_eq!(first_colliding_bullet(&balloon, &bullets), Some(2));
        assert_eq!(first_colliding_bullet(&balloon, &bullets[..2]), None);
    }
}
