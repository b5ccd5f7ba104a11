//! Hole Rush entry point
//!
//! Headless demo loop: builds a seeded demo round, drives it with scripted
//! input at the fixed timestep, and routes sim events through the null
//! collaborator services. Pass a JSON config path as the first argument to
//! override the defaults.

use glam::Vec2;

use hole_rush::config::RoundConfig;
use hole_rush::consts::{SIM_DT, TICKS_PER_SECOND};
use hole_rush::platform::{EventRouter, NullAudio, NullUi, ProgressLevelService, UiService};
use hole_rush::sim::{HoleGame, RoundPhase, TickInput, tick};

const DEMO_SEED: u64 = 7;

fn load_config() -> RoundConfig {
    let Some(path) = std::env::args().nth(1) else {
        return RoundConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match RoundConfig::from_json(&json) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{path}: {e}; using defaults");
                RoundConfig::default()
            }
        },
        Err(e) => {
            log::error!("cannot read {path}: {e}; using defaults");
            RoundConfig::default()
        }
    }
}

/// Sweep the hole across the play field so it eventually visits every corner
fn scripted_input(tick_index: u64) -> TickInput {
    let t = tick_index as f32 * SIM_DT;
    TickInput {
        move_delta: Vec2::new((t * 0.6).sin() * 8.0, (t * 0.4).cos() * 8.0),
        back_pressed: false,
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let duration = config.round_duration_secs;
    log::info!(
        "demo round: target {}, {}s, hole radius {}",
        config.total_score_target,
        duration,
        config.hole_radius
    );

    let mut game = HoleGame::demo_scene(config, "demo", DEMO_SEED);
    let mut router = EventRouter::new(NullAudio, NullUi::default(), ProgressLevelService::default());

    // Round duration plus slack for the outcome continuation
    let max_ticks = (duration as u64 + 5) * TICKS_PER_SECOND as u64;
    let mut outcome = RoundPhase::Running;
    for i in 0..max_ticks {
        tick(&mut game, &scripted_input(i), SIM_DT);
        router.route(game.drain_events());

        if game.round.phase() != RoundPhase::Running {
            outcome = game.round.phase();
            // Let the outcome window continuation fire before exiting
            if router.ui.is_window_shown(hole_rush::sim::WindowKind::Win)
                || router.ui.is_window_shown(hole_rush::sim::WindowKind::Lose)
            {
                break;
            }
        }
    }

    log::info!(
        "demo finished: {:?}, score {}, {}s left",
        outcome,
        game.round.score.get(),
        game.round.time_remaining.get()
    );
}
