//! Top-level simulation state
//!
//! `HoleGame` wires the components together: the deformable ground, the
//! hole's motion and deformer, the trash list, the two trigger volumes and
//! the round state machine, all sharing one event queue.

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::RoundConfig;
use crate::consts::{COLLECTOR_RADIUS_FACTOR, FORCE_VOLUME_RADIUS_FACTOR};

use super::collect::{Collector, ForceVolume};
use super::events::{EventQueue, GameEvent};
use super::hole::{HoleDeformer, HoleMotion, MoveBounds};
use super::mesh::SurfaceMesh;
use super::round::Round;
use super::trash::{Trash, TrashKind};

/// Complete game state for one round
pub struct HoleGame {
    pub config: RoundConfig,
    pub mesh: SurfaceMesh,
    pub deformer: HoleDeformer,
    pub motion: HoleMotion,
    pub trash: Vec<Trash>,
    pub collector: Collector,
    pub force_volume: ForceVolume,
    pub round: Round,
    pub time_ticks: u64,
    events: EventQueue,
    next_trash_id: u32,
}

impl HoleGame {
    /// Set up a round on the given ground mesh, hole starting at the origin
    pub fn new(config: RoundConfig, level_id: &str, mesh: SurfaceMesh) -> Self {
        let events = EventQueue::new();
        let start = Vec3::ZERO;
        let bounds = MoveBounds {
            corner_x: config.bound_x,
            corner_z: config.bound_z,
        };

        let deformer = HoleDeformer::new(&mesh, start, config.hole_radius);
        let motion = HoleMotion::new(start, bounds, config.movement_speed, config.hole_radius);
        let collector = Collector::new(config.hole_radius * COLLECTOR_RADIUS_FACTOR);
        let force_volume = ForceVolume::new(config.hole_radius * FORCE_VOLUME_RADIUS_FACTOR);
        let round = Round::new(&config, level_id, events.clone());

        let mut game = Self {
            config,
            mesh,
            deformer,
            motion,
            trash: Vec::new(),
            collector,
            force_volume,
            round,
            time_ticks: 0,
            events,
            next_trash_id: 1,
        };

        // Settle the mesh around the starting position
        game.deformer.update(&mut game.mesh, game.motion.position());
        game
    }

    /// Spawn a trash object; returns its id
    pub fn spawn_trash(&mut self, kind: TrashKind, pos: Vec3, attractable: bool) -> u32 {
        let id = self.next_trash_id;
        self.next_trash_id += 1;
        let mut object = Trash::new(id, kind, pos);
        object.attractable = attractable;
        self.trash.push(object);
        id
    }

    pub fn find_trash(&self, id: u32) -> Option<&Trash> {
        self.trash.iter().find(|t| t.id == id)
    }

    /// Despawn a collected object and tell the host about it
    pub(crate) fn swallow_trash(&mut self, id: u32) {
        if let Some(object) = self.trash.iter_mut().find(|t| t.id == id) {
            object.alive = false;
            self.events.push(GameEvent::TrashSwallowed { id });
        }
    }

    /// Drop despawned objects at end of tick
    pub(crate) fn sweep_dead(&mut self) {
        self.trash.retain(|t| t.alive);
    }

    /// Host loop contract: take this frame's pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Host loop contract: pause/unpause the round
    pub fn set_paused(&mut self, paused: bool) {
        self.round.set_paused(paused);
    }

    /// Demo round: flat ground grid plus a seeded scatter of trash
    pub fn demo_scene(config: RoundConfig, level_id: &str, seed: u64) -> Self {
        let extent_x = config.bound_x;
        let extent_z = -config.bound_z;
        let mesh = SurfaceMesh::flat_grid(extent_x, extent_z, 40);
        let collectible_count = config.total_score_target;
        let mut game = Self::new(config, level_id, mesh);

        let mut rng = Pcg32::seed_from_u64(seed);
        let margin = 1.0;
        let mut scatter = |rng: &mut Pcg32| {
            Vec3::new(
                rng.random_range(-extent_x + margin..extent_x - margin),
                0.0,
                rng.random_range(-extent_z + margin..extent_z - margin),
            )
        };

        for _ in 0..collectible_count {
            let pos = scatter(&mut rng);
            game.spawn_trash(TrashKind::Collectible, pos, true);
        }
        // A couple of hazards, never attractable in the demo
        for _ in 0..2 {
            let pos = scatter(&mut rng);
            game.spawn_trash(TrashKind::Hazard, pos, false);
        }
        game
    }
}

impl std::fmt::Debug for HoleGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HoleGame")
            .field("round", &self.round)
            .field("trash", &self.trash.len())
            .field("time_ticks", &self.time_ticks)
            .finish()
    }
}
