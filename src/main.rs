//! Balloon Defence entry point
//!
//! Plays the built-in campaign headless with a scripted tower layout and
//! reports how the run went. Pass a settings JSON file as the first argument
//! to override the defaults and a tower layout JSON file as the second to
//! replace the scripted towers.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use balloon_defence::Settings;
    use balloon_defence::sim::{
        AttackStat, Currency, DEFAULT_NEIGHBOURS, GameEvent, GameState, TowerKind, TowerPlacement,
        tick,
    };
    use glam::IVec2;

    env_logger::init();
    log::info!("Balloon Defence (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let settings = match args.get(1) {
        Some(path) => Settings::load_from(path),
        None => Ok(Settings::default()),
    };
    let layout = match args.get(2) {
        Some(path) => TowerPlacement::load_layout(path),
        None => Ok(vec![
            TowerPlacement::new(TowerKind::Linear, IVec2::new(160, 120)),
            TowerPlacement::new(TowerKind::ThreeSixty, IVec2::new(40, 200)),
            TowerPlacement::new(TowerKind::Explosion, IVec2::new(160, 280)),
        ]),
    };
    let (settings, layout) = match (settings, layout) {
        (Ok(settings), Ok(layout)) => (settings, layout),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut state = GameState::new(settings);
    let towers: Vec<u32> = layout
        .into_iter()
        .filter_map(|placement| state.place(placement))
        .collect();

    let upgrades = [AttackStat::PopPower, AttackStat::Speed, AttackStat::Radius];
    let mut popped = 0;
    let mut escaped = 0;

    while !state.is_over() && state.time_ticks < MAX_TICKS {
        tick(&mut state);

        for event in state.drain_events() {
            match event {
                GameEvent::BalloonPopped { .. } => popped += 1,
                GameEvent::BalloonEscaped { .. } => escaped += 1,
                _ => {}
            }
        }

        // Spend spare money every second of game time
        if state.time_ticks % 60 == 0 {
            for &id in &towers {
                for stat in upgrades {
                    let affordable = state
                        .tower(id)
                        .and_then(|t| t.next_upgrade_cost(stat))
                        .is_some_and(|cost| state.bank.can_afford(cost));
                    if affordable {
                        state.upgrade_tower(id, stat);
                    }
                }
            }
        }
    }

    println!("\nOutcome: {:?} after {} ticks", state.phase, state.time_ticks);
    println!("Level reached: {}", state.level_number);
    println!("Balloons popped: {popped}, escaped: {escaped}");
    for tower in &state.towers {
        println!(
            "  {} #{}: {} pops, speed {} radius {} pop power {}",
            tower.kind.as_str(),
            tower.id,
            tower.pop_count,
            tower.stats.speed,
            tower.stats.radius,
            tower.stats.pop_power
        );
    }

    let spot = IVec2::new(50, 100);
    match state.predict_pop_count(spot, DEFAULT_NEIGHBOURS) {
        Some(pops) => println!("Predicted pops for a tower at {spot}: {pops}"),
        None => println!("No towers to predict from"),
    }
}

/// Safety cap for runs that never end
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u64 = 100_000;

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on the web; nothing to run here
}
