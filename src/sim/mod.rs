//! Deterministic simulation module
//!
//! All combat logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (collection order is load-bearing)
//! - No rendering or platform dependencies

pub mod analytics;
pub mod balloon;
pub mod bullet;
pub mod collision;
pub mod economy;
pub mod level;
pub mod path;
pub mod state;
pub mod tick;
pub mod tower;

pub use analytics::{DEFAULT_NEIGHBOURS, TowerStat, predict_pop_count};
pub use balloon::{Balloon, BalloonLayer, BalloonStatus, PeelReport, Step};
pub use bullet::{Bullet, BulletEffect, Flight, Impact};
pub use collision::{boxes_overlap, bullet_hits_balloon, first_colliding_bullet};
pub use economy::{Bank, Currency, LifeCounter, LifePoints};
pub use level::{Level, WaveSource};
pub use path::Path;
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::tick;
pub use tower::{AttackStat, AttackStats, AttackUpgrades, Tier, Tower, TowerKind, TowerPlacement, UpgradeTrack};
