//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (demo scene scatter)
//! - Stable iteration order (id-ordered sets, in-order event queue)
//! - No rendering, audio or platform dependencies; side effects leave as
//!   `GameEvent`s

pub mod collect;
pub mod events;
pub mod hole;
pub mod mesh;
pub mod observe;
pub mod round;
pub mod schedule;
pub mod state;
pub mod tick;
pub mod trash;

pub use collect::{Collector, Contact, ForceVolume};
pub use events::{EventQueue, GameEvent, MusicCue, SoundCue, WindowKind};
pub use hole::{HoleDeformer, HoleMotion, MoveBounds};
pub use mesh::SurfaceMesh;
pub use observe::{SubscriptionId, Watched};
pub use round::{Round, RoundPhase};
pub use schedule::{Scheduler, TaskHandle};
pub use state::HoleGame;
pub use tick::{TickInput, tick};
pub use trash::{Trash, TrashKind};
