//! Fixed timestep simulation tick
//!
//! One tick runs, in order: level progression, balloon release, towers,
//! balloons, projectiles. Projectiles created during a tick join play at the
//! end of it.

use super::balloon::Step;
use super::bullet::{Bullet, Impact};
use super::collision::first_colliding_bullet;
use super::economy::{Currency, LifeCounter};
use super::level::WaveSource;
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) {
    if state.is_over() {
        return;
    }

    if !progress_levels(state) {
        return;
    }
    release_balloons(state);

    let mut pending: Vec<Bullet> = Vec::new();
    update_towers(state, &mut pending);
    update_balloons(state, &mut pending);
    update_bullets(state, pending);

    if state.lives.is_depleted() {
        state.phase = GamePhase::Lost;
        state.events.push(GameEvent::RunLost);
        log::info!(
            "Run lost at level {} after {} ticks",
            state.level_number,
            state.time_ticks
        );
    }

    state.time_ticks += 1;
}

/// Start the next level once the current one is released and cleared.
/// Returns false when the run has just been won.
fn progress_levels(state: &mut GameState) -> bool {
    let released = state
        .current_level
        .as_ref()
        .is_none_or(|level| level.is_exhausted());
    if !released || !state.balloons.is_empty() {
        return true;
    }

    match state.levels.pop_front() {
        Some(level) => {
            state.level_number += 1;
            log::info!(
                "Level {} started: {} balloons",
                state.level_number,
                level.remaining()
            );
            state.current_level = Some(level);
            state.spawn_countdown = state.settings.spawn_interval_ticks;
            state.events.push(GameEvent::LevelStarted {
                level: state.level_number,
            });
            true
        }
        None => {
            state.current_level = None;
            state.phase = GamePhase::Won;
            state.events.push(GameEvent::RunWon);
            log::info!(
                "Run won with {} lives and {} in the bank",
                state.lives.remaining(),
                state.bank.balance()
            );
            false
        }
    }
}

fn release_balloons(state: &mut GameState) {
    if state.spawn_countdown > 0 {
        state.spawn_countdown -= 1;
        return;
    }
    state.spawn_countdown = state.settings.spawn_interval_ticks;

    let Some((layer, path)) = state.current_level.as_mut().and_then(|l| l.next_spawn()) else {
        return;
    };
    if let Err(e) = state.spawn_balloon(layer, path, 0) {
        log::warn!("Failed to release {layer:?} balloon: {e}");
    }
}

fn update_towers(state: &mut GameState, pending: &mut Vec<Bullet>) {
    for tower in &mut state.towers {
        let before = pending.len();
        if tower.scan_and_attack(&state.balloons, pending) {
            state.events.push(GameEvent::TowerFired {
                tower: tower.id,
                shots: pending.len() - before,
            });
        }
    }
}

/// Each live balloon either resolves the first projectile touching it or
/// moves one waypoint along its path.
fn update_balloons(state: &mut GameState, pending: &mut Vec<Bullet>) {
    let back_track = state.settings.teleport_back_track;

    for balloon in &mut state.balloons {
        if !balloon.is_active() {
            continue;
        }

        let Some(index) = first_colliding_bullet(balloon, &state.bullets) else {
            if balloon.advance() == Step::ReachedEnd {
                state.lives.decrease(1);
                state.events.push(GameEvent::BalloonEscaped { id: balloon.id });
                log::debug!("Balloon {} escaped, {} lives left", balloon.id, state.lives.remaining());
            }
            continue;
        };

        let bullet = &mut state.bullets[index];
        let (effect, owner) = (bullet.effect, bullet.owner);
        let damage = match bullet.on_collision(pending) {
            Impact::Peel(layers) => layers,
            Impact::Teleport => 0,
        };

        let Some(layers) = balloon.receive_hit(damage, effect, back_track) else {
            state.events.push(GameEvent::BalloonTeleported {
                id: balloon.id,
                path_index: balloon.path_index,
            });
            log::debug!("Balloon {} teleported to {}", balloon.id, balloon.path_index);
            continue;
        };

        let report = balloon.peel(layers, &mut state.bank);
        if report.popped {
            if let Some(tower) = owner.and_then(|id| state.towers.iter_mut().find(|t| t.id == id)) {
                tower.pop_count += 1;
            }
            state.events.push(GameEvent::BalloonPopped {
                id: balloon.id,
                bounty: report.bounty,
                tower: owner,
            });
            log::debug!("Balloon {} popped for {}", balloon.id, report.bounty);
        } else {
            state.events.push(GameEvent::BalloonPeeled {
                id: balloon.id,
                layers: report.layers,
                bounty: report.bounty,
            });
        }
    }

    state.balloons.retain(|b| b.is_active());
}

fn update_bullets(state: &mut GameState, mut pending: Vec<Bullet>) {
    for bullet in &mut state.bullets {
        bullet.advance();
    }
    state.bullets.retain(Bullet::is_live);
    state.bullets.append(&mut pending);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::balloon::BalloonLayer;
    use crate::sim::bullet::BulletEffect;
    use crate::sim::level::Level;
    use crate::sim::path::Path;
    use crate::sim::tower::TowerKind;
    use glam::{IVec2, Vec2};
    use std::sync::Arc;

    fn empty_run() -> GameState {
        GameState::with_levels(Settings::default(), Vec::new())
    }

    fn lane() -> Arc<Path> {
        Arc::new(Path::straight_lane())
    }

    #[test]
    fn test_linear_tower_pops_balloon_in_range() {
        let mut state = empty_run();
        let tower = state.place_tower(TowerKind::Linear, IVec2::new(160, 50)).unwrap();
        state.spawn_balloon(BalloonLayer::L1, lane(), 0).unwrap();
        let balance = state.bank.balance();

        tick(&mut state);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].effect, BulletEffect::Standard);

        for _ in 0..10 {
            if state.balloons.is_empty() {
                break;
            }
            tick(&mut state);
        }
        assert!(state.balloons.is_empty());
        assert_eq!(state.bank.balance(), balance + 10);
        assert_eq!(state.tower(tower).unwrap().pop_count, 1);
        let shots = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::TowerFired { .. }))
            .count();
        assert_eq!(shots, 1);
    }

    #[test]
    fn test_new_bullets_wait_for_next_tick() {
        let mut state = empty_run();
        // Tower sits on top of the balloon: the shot would hit immediately
        state.place_tower(TowerKind::Linear, IVec2::new(100, 50)).unwrap();
        state.spawn_balloon(BalloonLayer::L2, lane(), 0).unwrap();

        tick(&mut state);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L2));
        assert_eq!(state.bullets.len(), 1);

        tick(&mut state);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L1));
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_one_bullet_per_balloon_per_tick() {
        let mut state = empty_run();
        state.spawn_balloon(BalloonLayer::L3, lane(), 0).unwrap();
        let at = Vec2::new(100.0, 50.0);
        state.bullets.push(Bullet::standard(at, at + Vec2::new(0.0, 60.0), 1, None));
        state.bullets.push(Bullet::standard(at, at + Vec2::new(0.0, 60.0), 1, None));

        tick(&mut state);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L2));
        // The spent bullet is gone, the other kept flying
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bank.balance(), 130);
    }

    #[test]
    fn test_explosion_spawns_fragments_after_hit() {
        let mut state = empty_run();
        state.spawn_balloon(BalloonLayer::L5, lane(), 0).unwrap();
        let at = Vec2::new(100.0, 50.0);
        state.bullets.push(Bullet::new(
            BulletEffect::Explosive,
            at,
            at + Vec2::new(40.0, 0.0),
            2,
            None,
        ));

        tick(&mut state);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L3));
        assert_eq!(state.bullets.len(), 4);
        assert!(state.bullets.iter().all(|b| b.effect == BulletEffect::Standard && b.pop_power == 2));
    }

    #[test]
    fn test_fragments_strike_the_target_again_next_tick() {
        let mut state = empty_run();
        state.spawn_balloon(BalloonLayer::L3, lane(), 0).unwrap();
        let at = Vec2::new(100.0, 50.0);
        state.bullets.push(Bullet::new(
            BulletEffect::Explosive,
            at,
            at + Vec2::new(40.0, 0.0),
            1,
            None,
        ));

        tick(&mut state);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L2));
        assert_eq!(state.bullets.len(), 4);

        // The upward fragment still overlaps the balloon it burst from
        tick(&mut state);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L1));
        assert_eq!(state.bullets.len(), 3);

        // The rest end 20px away and miss
        tick(&mut state);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L1));
        assert!(state.bullets.is_empty());
        assert_eq!(state.bank.balance(), 100 + 30 + 20);
    }

    #[test]
    fn test_teleport_hit() {
        let mut state = empty_run();
        state.spawn_balloon(BalloonLayer::L1, lane(), 50).unwrap();
        let at = Vec2::new(100.0, 100.0);
        state.bullets.push(Bullet::new(
            BulletEffect::Teleporting,
            at,
            at + Vec2::new(20.0, 0.0),
            1,
            None,
        ));

        tick(&mut state);
        assert_eq!(state.balloons[0].path_index, 30);
        assert_eq!(state.balloons[0].layer(), Some(BalloonLayer::L1));
        assert_eq!(state.bank.balance(), 100);
    }

    #[test]
    fn test_escape_costs_one_life() {
        let mut state = empty_run();
        let path = lane();
        state.spawn_balloon(BalloonLayer::L4, path.clone(), path.last_index()).unwrap();

        tick(&mut state);
        assert!(state.balloons.is_empty());
        assert_eq!(state.lives.remaining(), 19);
        assert_eq!(state.bank.balance(), 100);
    }

    #[test]
    fn test_run_lost_when_lives_run_out() {
        let settings = Settings {
            starting_lives: 2,
            ..Default::default()
        };
        let mut state = GameState::with_levels(settings, Vec::new());
        let path = lane();
        for _ in 0..2 {
            state.spawn_balloon(BalloonLayer::L1, path.clone(), path.last_index()).unwrap();
        }

        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Lost);
        let ticks = state.time_ticks;
        tick(&mut state);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_spawn_cadence_and_progression() {
        let path = lane();
        let levels = vec![
            Level::from_levels(&[1, 1], path.clone()).unwrap(),
            Level::from_levels(&[2], path.clone()).unwrap(),
        ];
        let mut state = GameState::with_levels(Settings::default(), levels);

        // Countdown runs 10 -> 0, the release happens on the tick after
        for _ in 0..10 {
            tick(&mut state);
        }
        assert!(state.balloons.is_empty());
        tick(&mut state);
        assert_eq!(state.balloons.len(), 1);
        assert_eq!(state.level_number, 1);

        for _ in 0..10 {
            tick(&mut state);
        }
        assert_eq!(state.balloons.len(), 1);
        tick(&mut state);
        assert_eq!(state.balloons.len(), 2);

        // No towers: every balloon escapes, then the next level starts
        while state.level_number == 1 {
            tick(&mut state);
        }
        assert_eq!(state.lives.remaining(), 18);
        assert!(state.events.contains(&GameEvent::LevelStarted { level: 2 }));

        while !state.is_over() {
            tick(&mut state);
        }
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.lives.remaining(), 17);
    }

    #[test]
    fn test_determinism() {
        fn run() -> GameState {
            let mut state = GameState::generated(Settings::default(), 3);
            state.place_tower(TowerKind::ThreeSixty, IVec2::new(130, 150));
            state.place_tower(TowerKind::Explosion, IVec2::new(70, 250));
            for _ in 0..600 {
                tick(&mut state);
            }
            state
        }

        let a = run();
        let b = run();
        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.bank, b.bank);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.balloons.len(), b.balloons.len());
        assert_eq!(a.events, b.events);
    }
}
