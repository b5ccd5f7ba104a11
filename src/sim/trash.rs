//! Scene objects the hole interacts with
//!
//! Two collection kinds (score objects and hazards) plus an orthogonal
//! "attractable" capability used by the force volume. Spawning and hazard
//! lifecycle are owned by the level, not by this core; the collector only
//! ever despawns collectibles.

use glam::Vec3;

use crate::consts::{ATTRACT_ACCEL, TRASH_DAMPING};

/// What touching this object does to the round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrashKind {
    /// Increments the score and despawns on collection
    Collectible,
    /// Ends the round in a loss; never despawned by the collector
    Hazard,
}

/// A scene object
#[derive(Debug, Clone)]
pub struct Trash {
    pub id: u32,
    pub kind: TrashKind,
    pub pos: Vec3,
    pub vel: Vec3,
    pub radius: f32,
    /// Whether the force volume may pull this object
    pub attractable: bool,
    pub alive: bool,
}

impl Trash {
    pub fn new(id: u32, kind: TrashKind, pos: Vec3) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec3::ZERO,
            radius: 0.5,
            attractable: true,
            alive: true,
        }
    }

    /// Accelerate toward `anchor` (force volume attraction)
    pub fn force_to(&mut self, anchor: Vec3, dt: f32) {
        let to_anchor = anchor - self.pos;
        if let Some(dir) = to_anchor.try_normalize() {
            self.vel += dir * ATTRACT_ACCEL * dt;
        }
    }

    /// Advance position from velocity, with per-second damping
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.vel *= TRASH_DAMPING.powf(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_pulls_toward_anchor() {
        let mut trash = Trash::new(1, TrashKind::Collectible, Vec3::new(4.0, 0.0, 0.0));
        let anchor = Vec3::ZERO;
        let before = trash.pos.distance(anchor);

        for _ in 0..50 {
            trash.force_to(anchor, 0.02);
            trash.integrate(0.02);
        }
        assert!(trash.pos.distance(anchor) < before);
    }

    #[test]
    fn test_force_at_anchor_is_noop() {
        let mut trash = Trash::new(1, TrashKind::Collectible, Vec3::ZERO);
        trash.force_to(Vec3::ZERO, 0.02);
        assert_eq!(trash.vel, Vec3::ZERO);
    }

    #[test]
    fn test_damping_bleeds_velocity() {
        let mut trash = Trash::new(1, TrashKind::Hazard, Vec3::ZERO);
        trash.vel = Vec3::new(10.0, 0.0, 0.0);
        trash.integrate(1.0);
        assert!(trash.vel.x < 10.0);
        assert!(trash.vel.x > 0.0);
    }
}
