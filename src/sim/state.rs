//! Game state and player commands
//!
//! Everything a run needs lives in `GameState`, so a snapshot of it is a
//! complete save and two states built the same way tick identically.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::analytics::{self, TowerStat};
use super::balloon::{Balloon, BalloonLayer};
use super::bullet::Bullet;
use super::economy::{Bank, Currency, LifePoints};
use super::level::Level;
use super::path::Path;
use super::tower::{AttackStat, Tower, TowerKind, TowerPlacement};
use crate::error::SimError;
use crate::settings::Settings;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Every level cleared
    Won,
    /// Life points ran out
    Lost,
}

/// Something that happened during a tick or command, for the host to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: usize },
    BalloonSpawned { id: u32, layer: BalloonLayer },
    TowerFired { tower: u32, shots: usize },
    BalloonPeeled { id: u32, layers: u32, bounty: u32 },
    BalloonPopped { id: u32, bounty: u32, tower: Option<u32> },
    BalloonTeleported { id: u32, path_index: usize },
    BalloonEscaped { id: u32 },
    TowerPlaced { id: u32, kind: TowerKind },
    TowerUpgraded { id: u32, stat: AttackStat, value: u32 },
    TowerSold { id: u32, refund: u32 },
    RunWon,
    RunLost,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub bank: Bank,
    pub lives: LifePoints,
    /// Levels not yet started
    pub levels: VecDeque<Level>,
    /// Level currently releasing balloons
    pub current_level: Option<Level>,
    /// 1-based number of the current level, 0 before the first
    pub level_number: usize,
    /// Ticks until the next balloon is released
    pub spawn_countdown: u32,
    /// Balloons in play, in spawn order
    pub balloons: Vec<Balloon>,
    /// Projectiles in flight, in firing order
    pub bullets: Vec<Bullet>,
    /// Towers, in placement order
    pub towers: Vec<Tower>,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// A run through the built-in campaign
    pub fn new(settings: Settings) -> Self {
        Self::with_levels(settings, Level::campaign())
    }

    /// A run of `waves` procedurally generated levels seeded from the settings
    pub fn generated(settings: Settings, waves: u32) -> Self {
        let path = Arc::new(Path::straight_lane());
        let levels = (0..waves)
            .map(|wave| Level::generate(settings.seed, wave, path.clone()))
            .collect::<Vec<_>>();
        Self::with_levels(settings, levels)
    }

    pub fn with_levels(settings: Settings, levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            bank: Bank::new(settings.starting_balance),
            lives: LifePoints::new(settings.starting_lives),
            levels: levels.into_iter().collect(),
            current_level: None,
            level_number: 0,
            spawn_countdown: settings.spawn_interval_ticks,
            balloons: Vec::new(),
            bullets: Vec::new(),
            towers: Vec::new(),
            phase: GamePhase::Playing,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            settings,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Playing
    }

    /// Put a balloon into play at `path_index`
    pub fn spawn_balloon(
        &mut self,
        layer: BalloonLayer,
        path: Arc<Path>,
        path_index: usize,
    ) -> Result<u32, SimError> {
        let id = self.next_entity_id();
        self.balloons.push(Balloon::new(id, layer, path, path_index)?);
        self.events.push(GameEvent::BalloonSpawned { id, layer });
        Ok(id)
    }

    pub fn tower(&self, id: u32) -> Option<&Tower> {
        self.towers.iter().find(|t| t.id == id)
    }

    pub fn tower_mut(&mut self, id: u32) -> Option<&mut Tower> {
        self.towers.iter_mut().find(|t| t.id == id)
    }

    /// Buy and place a tower. Returns its id, or `None` when the bank cannot
    /// cover the price.
    pub fn place_tower(&mut self, kind: TowerKind, pos: IVec2) -> Option<u32> {
        self.place(TowerPlacement::new(kind, pos))
    }

    /// Buy and place a tower with the colour and size from `placement`
    pub fn place(&mut self, placement: TowerPlacement) -> Option<u32> {
        let TowerPlacement {
            kind,
            pos,
            colour,
            dimension,
        } = placement;
        let price = kind.buy_price();
        if !self.bank.can_afford(price) {
            log::warn!(
                "Cannot afford {} ({} > {})",
                kind.as_str(),
                price,
                self.bank.balance()
            );
            return None;
        }
        self.bank.withdraw(price);
        let id = self.next_entity_id();
        let mut tower = Tower::new(id, kind, pos);
        tower.colour = colour;
        tower.dimension = dimension;
        self.towers.push(tower);
        self.events.push(GameEvent::TowerPlaced { id, kind });
        log::info!("Placed {} #{} at {}", kind.as_str(), id, pos);
        Some(id)
    }

    /// Buy the next tier of `stat` for a tower. Returns the new stat value, or
    /// `None` when the tower is unknown, the stat is maxed, or the bank cannot
    /// cover the cost.
    pub fn upgrade_tower(&mut self, id: u32, stat: AttackStat) -> Option<u32> {
        let Some(tower) = self.towers.iter_mut().find(|t| t.id == id) else {
            log::warn!("No tower #{id} to upgrade");
            return None;
        };
        let Some(cost) = tower.next_upgrade_cost(stat) else {
            log::warn!("Tower #{id} {stat:?} is already maxed");
            return None;
        };
        if !self.bank.can_afford(cost) {
            log::warn!(
                "Cannot afford {stat:?} upgrade for tower #{id} ({} > {})",
                cost,
                self.bank.balance()
            );
            return None;
        }
        tower.upgrade(stat, &mut self.bank);
        let value = match stat {
            AttackStat::Speed => tower.stats.speed,
            AttackStat::Radius => tower.stats.radius,
            AttackStat::PopPower => tower.stats.pop_power,
        };
        self.events.push(GameEvent::TowerUpgraded { id, stat, value });
        log::info!("Upgraded tower #{id} {stat:?} to {value}");
        Some(value)
    }

    /// Sell a tower and remove it from play. Returns the refund.
    pub fn sell_tower(&mut self, id: u32) -> Option<u32> {
        let Some(index) = self.towers.iter().position(|t| t.id == id) else {
            log::warn!("No tower #{id} to sell");
            return None;
        };
        let mut tower = self.towers.remove(index);
        let refund = tower.sell(&mut self.bank);
        self.events.push(GameEvent::TowerSold { id, refund });
        log::info!("Sold tower #{id} for {refund}");
        Some(refund)
    }

    /// Placement and pop counts of every tower in play
    pub fn tower_stats(&self) -> Vec<TowerStat> {
        self.towers.iter().map(TowerStat::from).collect()
    }

    /// Pop count the towers in play suggest for a new tower at `pos`
    pub fn predict_pop_count(&self, pos: IVec2, k: usize) -> Option<u32> {
        analytics::predict_pop_count(&self.tower_stats(), pos, k)
    }

    /// Take every event recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
