//! Fixed timestep simulation tick
//!
//! Per-tick order: back-button handling, scheduled work (round timer,
//! delayed outcome window), then - only while unpaused - the world step:
//! hole motion, mesh deformation, trash integration, force-volume
//! attraction, and collector contacts (hazards before collectibles, so a
//! simultaneous win+lose resolves to the loss).

use glam::Vec2;

use super::state::HoleGame;
use super::trash::TrashKind;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer/touch movement since last tick, mapped onto the XZ plane
    pub move_delta: Vec2,
    /// Back/escape pressed this tick (edge, not level)
    pub back_pressed: bool,
}

/// Advance the game by one fixed timestep
pub fn tick(game: &mut HoleGame, input: &TickInput, dt: f32) {
    game.time_ticks += 1;

    if input.back_pressed {
        game.round.toggle_pause_menu();
    }

    // Timer and outcome continuations run even while paused; their handlers
    // gate themselves.
    game.round.advance_tick();

    if !game.round.paused() {
        let center = game.motion.update(input.move_delta, dt);
        game.deformer.update(&mut game.mesh, center);

        for object in game.trash.iter_mut().filter(|t| t.alive) {
            object.integrate(dt);
        }

        game.force_volume.sync(center, &game.trash);
        game.force_volume.attract(center, &mut game.trash, dt);

        let contacts = game.collector.scan(center, &game.trash);
        for contact in contacts.iter().filter(|c| c.kind == TrashKind::Hazard) {
            log::debug!("hazard {} hit the collector", contact.id);
            game.round.on_hazard_collected();
        }
        for contact in contacts.iter().filter(|c| c.kind == TrashKind::Collectible) {
            game.round.on_score_collected();
            game.swallow_trash(contact.id);
        }
    }

    game.sweep_dead();
}
