//! Tower analytics
//!
//! Per-tower statistics collected from a run, and a nearest-neighbour guess
//! at how many balloons a tower placed somewhere new would pop.

use std::collections::BTreeMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::tower::{AttackStats, Tower, TowerKind};

/// Neighbours consulted by default
pub const DEFAULT_NEIGHBOURS: usize = 3;

/// Snapshot of one tower's placement and performance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TowerStat {
    pub id: u32,
    pub kind: TowerKind,
    pub pos: IVec2,
    pub stats: AttackStats,
    pub pop_count: u32,
}

impl From<&Tower> for TowerStat {
    fn from(tower: &Tower) -> Self {
        Self {
            id: tower.id,
            kind: tower.kind,
            pos: tower.pos,
            stats: tower.stats,
            pop_count: tower.pop_count,
        }
    }
}

/// Majority vote of the pop counts of the `k` towers closest to `pos`.
///
/// Equally distant towers are taken in collection order and a tied vote goes
/// to the smaller pop count. Returns `None` with no samples or `k == 0`.
pub fn predict_pop_count(samples: &[TowerStat], pos: IVec2, k: usize) -> Option<u32> {
    if samples.is_empty() || k == 0 {
        return None;
    }

    let mut by_distance: Vec<&TowerStat> = samples.iter().collect();
    by_distance.sort_by_key(|s| {
        let d = s.pos.as_i64vec2() - pos.as_i64vec2();
        d.dot(d)
    });

    let mut votes: BTreeMap<u32, usize> = BTreeMap::new();
    for sample in by_distance.iter().take(k) {
        *votes.entry(sample.pop_count).or_default() += 1;
    }

    // BTreeMap iterates ascending, so the first maximum is the smallest label
    let mut best: Option<(u32, usize)> = None;
    for (&pop_count, &count) in &votes {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((pop_count, count));
        }
    }
    best.map(|(pop_count, _)| pop_count)
}
