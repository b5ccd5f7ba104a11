//! Hole Rush - a "hole eats the world" arcade game, simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (hole motion, mesh deformation,
//!   collection triggers, round state machine)
//! - `platform`: Collaborator traits (audio, UI windows, level persistence)
//!   and the event router that feeds them
//! - `config`: Data-driven round configuration
//! - `progress`: Completed-level tracking

pub mod config;
pub mod platform;
pub mod progress;
pub mod sim;

pub use config::RoundConfig;
pub use progress::LevelProgress;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz, matching the physics step the
    /// gameplay tuning was done against)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Simulation ticks per wall-clock second
    pub const TICKS_PER_SECOND: u32 = 50;

    /// Base smoothing factor for hole motion (scaled by movement speed and dt)
    pub const HOLE_SMOOTHING: f32 = 0.2;
    /// Margin added to the hole radius when scanning for affected vertices
    pub const DETECTION_MARGIN: f32 = 1.0;
    /// Clamp inset factor: perfect radius = 1.5 x hole radius
    pub const PERFECT_RADIUS_FACTOR: f32 = 1.5;

    /// Direct collector volume radius, as a fraction of the hole radius
    pub const COLLECTOR_RADIUS_FACTOR: f32 = 0.6;
    /// Force volume radius, as a fraction of the hole radius
    pub const FORCE_VOLUME_RADIUS_FACTOR: f32 = 2.5;
    /// Attraction acceleration toward the force volume anchor (units/s^2)
    pub const ATTRACT_ACCEL: f32 = 30.0;
    /// Per-second velocity damping applied to free trash
    pub const TRASH_DAMPING: f32 = 0.92;
}

/// Linear interpolation from `a` toward `b` by factor `t`
///
/// `t` is clamped to [0, 1]; `t == 0` returns `a` unchanged, which is how a
/// zero movement speed or zero timestep degrades to a valid idle state.
#[inline]
pub fn lerp_toward(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a.lerp(b, t.clamp(0.0, 1.0))
}

/// Horizontal (XZ-plane) distance between two points, ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
