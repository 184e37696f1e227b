//! Towers
//!
//! A tower sits where the player placed it and waits out its cooldown. Once
//! eligible it fires at the first balloon within range, then starts waiting
//! again. Each attack stat climbs an ordered list of priced upgrade tiers.

use std::str::FromStr;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::balloon::Balloon;
use super::bullet::{Bullet, BulletEffect};
use super::economy::Currency;
use crate::colour::Colour;
use crate::consts::*;
use crate::{checked_dimension, distance};
use crate::error::SimError;

/// Tower variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TowerKind {
    /// One aimed standard bullet per attack
    Linear,
    /// Eight standard bullets in every direction per attack
    ThreeSixty,
    /// One aimed explosive bullet per attack
    Explosion,
    /// One aimed teleporting bullet per attack
    Teleportation,
}

impl TowerKind {
    pub const ALL: [TowerKind; 4] = [
        TowerKind::Linear,
        TowerKind::ThreeSixty,
        TowerKind::Explosion,
        TowerKind::Teleportation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TowerKind::Linear => "LINEAR_TOWER",
            TowerKind::ThreeSixty => "THREE_SIXTY_TOWER",
            TowerKind::Explosion => "EXPLOSION_TOWER",
            TowerKind::Teleportation => "TELEPORTATION_TOWER",
        }
    }

    pub fn colour(&self) -> Colour {
        match self {
            TowerKind::Linear => Colour::YELLOW,
            TowerKind::ThreeSixty => Colour::CYAN,
            TowerKind::Explosion => Colour::WHITE,
            TowerKind::Teleportation => Colour::BROWN,
        }
    }

    pub fn dimension(&self) -> (u32, u32) {
        match self {
            TowerKind::Linear => (50, 50),
            _ => (40, 40),
        }
    }

    pub fn buy_price(&self) -> u32 {
        match self {
            TowerKind::Linear => 10,
            TowerKind::ThreeSixty => 20,
            TowerKind::Explosion => 30,
            TowerKind::Teleportation => 40,
        }
    }

    pub fn effect(&self) -> BulletEffect {
        match self {
            TowerKind::Linear | TowerKind::ThreeSixty => BulletEffect::Standard,
            TowerKind::Explosion => BulletEffect::Explosive,
            TowerKind::Teleportation => BulletEffect::Teleporting,
        }
    }

    pub fn base_stats(&self) -> AttackStats {
        let radius = match self {
            TowerKind::Linear => 80,
            TowerKind::ThreeSixty => 60,
            TowerKind::Explosion => 70,
            TowerKind::Teleportation => 100,
        };
        AttackStats {
            speed: 10,
            radius,
            pop_power: 1,
        }
    }

    /// Upgrade tiers as (value, cost), cheapest first
    pub fn upgrades(&self) -> AttackUpgrades {
        let (speed, radius, pop_power): ([(u32, u32); 2], [(u32, u32); 2], [(u32, u32); 2]) =
            match self {
                TowerKind::Linear => ([(7, 15), (5, 30)], [(100, 10), (120, 20)], [(2, 20), (3, 40)]),
                TowerKind::ThreeSixty => {
                    ([(8, 20), (6, 40)], [(75, 15), (90, 30)], [(2, 25), (3, 50)])
                }
                TowerKind::Explosion => {
                    ([(8, 25), (6, 50)], [(85, 15), (100, 30)], [(2, 30), (3, 60)])
                }
                TowerKind::Teleportation => {
                    ([(8, 30), (6, 60)], [(120, 20), (140, 40)], [(2, 10), (3, 20)])
                }
            };
        AttackUpgrades {
            speed: UpgradeTrack::new(&speed),
            radius: UpgradeTrack::new(&radius),
            pop_power: UpgradeTrack::new(&pop_power),
        }
    }
}

impl FromStr for TowerKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linear_tower" | "linear" => Ok(TowerKind::Linear),
            "three_sixty_tower" | "three_sixty" | "360" => Ok(TowerKind::ThreeSixty),
            "explosion_tower" | "explosion" => Ok(TowerKind::Explosion),
            "teleportation_tower" | "teleportation" => Ok(TowerKind::Teleportation),
            _ => Err(SimError::UnknownTowerKind { name: s.to_string() }),
        }
    }
}

/// The three upgradeable attack stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackStat {
    Speed,
    Radius,
    PopPower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackStats {
    /// Ticks between attacks
    pub speed: u32,
    /// Detection distance in pixels
    pub radius: u32,
    /// Layers peeled per hit
    pub pop_power: u32,
}

impl AttackStats {
    fn set(&mut self, stat: AttackStat, value: u32) {
        match stat {
            AttackStat::Speed => self.speed = value,
            AttackStat::Radius => self.radius = value,
            AttackStat::PopPower => self.pop_power = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub value: u32,
    pub cost: u32,
}

/// Ordered upgrade tiers for a single stat plus how many were bought
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeTrack {
    tiers: Vec<Tier>,
    purchased: usize,
}

impl UpgradeTrack {
    pub fn new(tiers: &[(u32, u32)]) -> Self {
        Self {
            tiers: tiers
                .iter()
                .map(|&(value, cost)| Tier { value, cost })
                .collect(),
            purchased: 0,
        }
    }

    pub fn next(&self) -> Option<Tier> {
        self.tiers.get(self.purchased).copied()
    }

    pub fn purchased(&self) -> usize {
        self.purchased
    }

    pub fn is_maxed(&self) -> bool {
        self.purchased >= self.tiers.len()
    }

    fn purchase(&mut self) -> Option<Tier> {
        let tier = self.next()?;
        self.purchased += 1;
        Some(tier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackUpgrades {
    pub speed: UpgradeTrack,
    pub radius: UpgradeTrack,
    pub pop_power: UpgradeTrack,
}

impl AttackUpgrades {
    pub fn track(&self, stat: AttackStat) -> &UpgradeTrack {
        match stat {
            AttackStat::Speed => &self.speed,
            AttackStat::Radius => &self.radius,
            AttackStat::PopPower => &self.pop_power,
        }
    }

    fn track_mut(&mut self, stat: AttackStat) -> &mut UpgradeTrack {
        match stat {
            AttackStat::Speed => &mut self.speed,
            AttackStat::Radius => &mut self.radius,
            AttackStat::PopPower => &mut self.pop_power,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tower {
    pub id: u32,
    pub kind: TowerKind,
    pub pos: IVec2,
    pub colour: Colour,
    /// Render size (width, height)
    pub dimension: (u32, u32),
    pub stats: AttackStats,
    pub upgrades: AttackUpgrades,
    /// Ticks waited since the last attack, capped at `stats.speed`
    pub cooldown: u32,
    pub buy_price: u32,
    pub sell_price: u32,
    /// Balloons popped by this tower's bullets
    pub pop_count: u32,
    pub sold: bool,
}

impl Tower {
    /// A freshly placed tower, ready to fire on its first tick
    pub fn new(id: u32, kind: TowerKind, pos: IVec2) -> Self {
        let stats = kind.base_stats();
        Self {
            id,
            kind,
            pos,
            colour: kind.colour(),
            dimension: kind.dimension(),
            stats,
            upgrades: kind.upgrades(),
            cooldown: stats.speed,
            buy_price: kind.buy_price(),
            sell_price: kind.buy_price() / 2,
            pop_count: 0,
            sold: false,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown == self.stats.speed
    }

    pub fn in_range(&self, balloon: &Balloon) -> bool {
        distance(self.pos, balloon.pos) <= self.stats.radius as f32
    }

    /// Run one tick of the attack cycle. While cooling down the counter
    /// advances; once ready the tower fires at the first live balloon in
    /// range, or keeps waiting without touching the counter.
    ///
    /// Returns true if the tower fired.
    pub fn scan_and_attack(&mut self, balloons: &[Balloon], bullets: &mut Vec<Bullet>) -> bool {
        if self.sold {
            return false;
        }
        if !self.is_ready() {
            self.cooldown += 1;
            return false;
        }

        let Some(target) = balloons
            .iter()
            .find(|b| b.is_active() && self.in_range(b))
        else {
            return false;
        };

        self.fire_at(target.center(), bullets);
        self.cooldown = 0;
        true
    }

    fn fire_at(&self, target: Vec2, bullets: &mut Vec<Bullet>) {
        let origin = self.pos.as_vec2();
        let pop_power = self.stats.pop_power;
        let owner = Some(self.id);

        match self.kind {
            TowerKind::ThreeSixty => {
                let r = THREE_SIXTY_REACH;
                let offsets = [
                    Vec2::new(0.0, -r),
                    Vec2::new(r, -r),
                    Vec2::new(r, 0.0),
                    Vec2::new(r, r),
                    Vec2::new(0.0, r),
                    Vec2::new(-r, r),
                    Vec2::new(-r, 0.0),
                    Vec2::new(-r, -r),
                ];
                bullets.extend(
                    offsets
                        .iter()
                        .map(|&offset| Bullet::standard(origin, origin + offset, pop_power, owner)),
                );
            }
            kind => {
                bullets.push(Bullet::new(kind.effect(), origin, target, pop_power, owner));
            }
        }
    }

    /// Cost of the next tier for `stat`, or `None` when maxed
    pub fn next_upgrade_cost(&self, stat: AttackStat) -> Option<u32> {
        self.upgrades.track(stat).next().map(|tier| tier.cost)
    }

    /// Buy the next tier for `stat`. Withdraws its cost without checking the
    /// balance, applies the new value and adds half the cost to the sell
    /// price. Returns the cost of the tier after it, if any. Does nothing
    /// when the stat is already maxed.
    pub fn upgrade(&mut self, stat: AttackStat, bank: &mut impl Currency) -> Option<u32> {
        let tier = self.upgrades.track_mut(stat).purchase()?;
        bank.withdraw(tier.cost);
        self.stats.set(stat, tier.value);
        self.sell_price += tier.cost / 2;
        if stat == AttackStat::Speed {
            self.cooldown = self.cooldown.min(self.stats.speed);
        }
        log::debug!(
            "Tower {} upgraded {:?} to {} for {}",
            self.id,
            stat,
            tier.value,
            tier.cost
        );
        self.next_upgrade_cost(stat)
    }

    /// Sell the tower, crediting its sell price. Selling twice pays nothing.
    pub fn sell(&mut self, bank: &mut impl Currency) -> u32 {
        if self.sold {
            return 0;
        }
        self.sold = true;
        bank.deposit(self.sell_price);
        self.sell_price
    }
}

/// Where and how to place one tower, usually read from a layout file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerPlacement {
    pub kind: TowerKind,
    pub pos: IVec2,
    pub colour: Colour,
    pub dimension: (u32, u32),
}

/// Layout entry as written on disk
#[derive(Deserialize)]
struct PlacementEntry {
    kind: String,
    position: [i32; 2],
    #[serde(default)]
    colour: Option<Vec<u8>>,
    #[serde(default)]
    size: Option<[u32; 2]>,
}

impl TowerPlacement {
    /// Placement with the kind's own colour and size
    pub fn new(kind: TowerKind, pos: IVec2) -> Self {
        Self {
            kind,
            pos,
            colour: kind.colour(),
            dimension: kind.dimension(),
        }
    }

    /// Parse a layout such as
    /// `[{"kind": "LINEAR_TOWER", "position": [160, 120], "colour": [255, 0, 0], "size": [40, 40]}]`.
    /// `colour` and `size` are optional.
    pub fn layout_from_json(json: &str) -> Result<Vec<TowerPlacement>, SimError> {
        let entries: Vec<PlacementEntry> = serde_json::from_str(json)?;
        entries.into_iter().map(Self::from_entry).collect()
    }

    /// Load a layout from a JSON file on disk
    pub fn load_layout(path: impl AsRef<std::path::Path>) -> Result<Vec<TowerPlacement>, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("{}: {e}", path.display())))?;
        let layout = Self::layout_from_json(&json)?;
        log::info!("Loaded {} tower placements from {}", layout.len(), path.display());
        Ok(layout)
    }

    fn from_entry(entry: PlacementEntry) -> Result<Self, SimError> {
        let kind: TowerKind = entry.kind.parse()?;
        let mut placement = Self::new(kind, IVec2::from(entry.position));
        if let Some(components) = entry.colour {
            placement.colour = Colour::from_components(&components)?;
        }
        if let Some([width, height]) = entry.size {
            placement.dimension = checked_dimension(width, height)?;
        }
        Ok(placement)
    }
}
