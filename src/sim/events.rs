//! Events emitted by the simulation
//!
//! The sim never talks to audio/UI/persistence directly; it pushes
//! `GameEvent`s into a shared queue that the host drains once per frame and
//! routes to the collaborator services (see `platform::EventRouter`).

use std::cell::RefCell;
use std::rc::Rc;

/// UI windows the round can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Win,
    Lose,
    PauseMenu,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Collect,
    HazardCollect,
    /// Countdown warning; index cycles through the configured warning clips
    TimeWarning(u32),
    Win,
    Lose,
}

impl SoundCue {
    /// Clip length in seconds. The outcome windows are shown after half the
    /// outcome clip has played, so these lengths are gameplay-relevant.
    pub fn duration_secs(&self) -> f32 {
        match self {
            SoundCue::Collect => 0.3,
            SoundCue::HazardCollect => 0.8,
            SoundCue::TimeWarning(_) => 0.4,
            SoundCue::Win => 3.0,
            SoundCue::Lose => 2.4,
        }
    }
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicCue {
    Background,
}

/// Everything the sim wants the outside world to do or know
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    Music { cue: MusicCue, looped: bool },
    ShowWindow(WindowKind),
    HideWindow(WindowKind),
    CameraShake,
    LevelCompleted { level_id: String },
    /// HUD update, fired on every score write (including unchanged values)
    ScoreChanged { score: u32, target: u32 },
    /// HUD update, fired on every timer write (including unchanged values)
    TimeChanged { seconds: i64 },
    /// Countdown entered the warning window
    TimeLow { seconds: i64 },
    TrashSwallowed { id: u32 },
}

/// Shared single-threaded event queue
///
/// Cloning is cheap; all clones push into the same buffer. `Watched`
/// subscribers capture a clone, which is why this is `Rc` and not a plain
/// `Vec` field on the game state.
#[derive(Clone, Default)]
pub struct EventQueue {
    inner: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: GameEvent) {
        self.inner.borrow_mut().push(event);
    }

    /// Take all pending events, leaving the queue empty
    pub fn drain(&self) -> Vec<GameEvent> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue")
            .field("pending", &self.inner.borrow().len())
            .finish()
    }
}
