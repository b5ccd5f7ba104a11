//! Collaborator services and event routing
//!
//! The sim emits `GameEvent`s; a host implements these narrow traits for its
//! actual audio backend, window system and save storage, and an
//! `EventRouter` moves drained events into them once per frame. The null
//! implementations here are enough for the headless demo and for tests.

use crate::progress::LevelProgress;
use crate::sim::{GameEvent, MusicCue, SoundCue, WindowKind};

/// Audio playback collaborator
pub trait AudioService {
    fn play_sound(&mut self, cue: SoundCue);
    fn play_music(&mut self, cue: MusicCue, looped: bool);
}

/// UI window collaborator
pub trait UiService {
    fn show_window(&mut self, kind: WindowKind);
    fn hide_window(&mut self, kind: WindowKind);
    fn is_window_shown(&self, kind: WindowKind) -> bool;
}

/// Level persistence collaborator
pub trait LevelService {
    fn mark_level_completed(&mut self, level_id: &str);
}

/// Routes drained sim events into the collaborator services
///
/// Presentation-only events (HUD updates, camera shake, despawns) are logged
/// and otherwise left to the host's renderer.
pub struct EventRouter<A, U, L> {
    pub audio: A,
    pub ui: U,
    pub levels: L,
}

impl<A: AudioService, U: UiService, L: LevelService> EventRouter<A, U, L> {
    pub fn new(audio: A, ui: U, levels: L) -> Self {
        Self { audio, ui, levels }
    }

    pub fn route(&mut self, events: Vec<GameEvent>) {
        for event in events {
            log::debug!("event: {event:?}");
            match event {
                GameEvent::Sound(cue) => self.audio.play_sound(cue),
                GameEvent::Music { cue, looped } => self.audio.play_music(cue, looped),
                GameEvent::ShowWindow(kind) => self.ui.show_window(kind),
                GameEvent::HideWindow(kind) => self.ui.hide_window(kind),
                GameEvent::LevelCompleted { level_id } => {
                    self.levels.mark_level_completed(&level_id);
                }
                GameEvent::ScoreChanged { score, target } => {
                    log::info!("score {score}/{target}");
                }
                GameEvent::TimeChanged { seconds } => {
                    log::trace!("timer {seconds}s");
                }
                GameEvent::TimeLow { seconds } => {
                    log::info!("time is running out: {seconds}s");
                }
                GameEvent::CameraShake => {
                    log::debug!("camera shake");
                }
                GameEvent::TrashSwallowed { id } => {
                    log::debug!("trash {id} swallowed");
                }
            }
        }
    }
}

/// Audio sink that only logs
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioService for NullAudio {
    fn play_sound(&mut self, cue: SoundCue) {
        log::debug!("play sound {cue:?} ({:.1}s)", cue.duration_secs());
    }

    fn play_music(&mut self, cue: MusicCue, looped: bool) {
        log::debug!("play music {cue:?} (looped: {looped})");
    }
}

/// UI sink that tracks window visibility without drawing anything
#[derive(Debug, Default)]
pub struct NullUi {
    shown: Vec<WindowKind>,
}

impl UiService for NullUi {
    fn show_window(&mut self, kind: WindowKind) {
        if !self.shown.contains(&kind) {
            self.shown.push(kind);
        }
        log::info!("show window {kind:?}");
    }

    fn hide_window(&mut self, kind: WindowKind) {
        self.shown.retain(|k| *k != kind);
        log::info!("hide window {kind:?}");
    }

    fn is_window_shown(&self, kind: WindowKind) -> bool {
        self.shown.contains(&kind)
    }
}

/// Level service backed by an in-memory [`LevelProgress`]
#[derive(Debug, Default)]
pub struct ProgressLevelService {
    pub progress: LevelProgress,
}

impl LevelService for ProgressLevelService {
    fn mark_level_completed(&mut self, level_id: &str) {
        if self.progress.mark_completed(level_id) {
            log::info!("level {level_id} completed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingAudio {
        sounds: Vec<SoundCue>,
    }

    impl AudioService for RecordingAudio {
        fn play_sound(&mut self, cue: SoundCue) {
            self.sounds.push(cue);
        }

        fn play_music(&mut self, _cue: MusicCue, _looped: bool) {}
    }

    fn router() -> EventRouter<RecordingAudio, NullUi, ProgressLevelService> {
        EventRouter::new(
            RecordingAudio::default(),
            NullUi::default(),
            ProgressLevelService::default(),
        )
    }

    #[test]
    fn test_routes_sounds_and_windows() {
        let mut router = router();
        router.route(vec![
            GameEvent::Sound(SoundCue::Win),
            GameEvent::ShowWindow(WindowKind::Win),
        ]);
        assert_eq!(router.audio.sounds, vec![SoundCue::Win]);
        assert!(router.ui.is_window_shown(WindowKind::Win));
    }

    #[test]
    fn test_routes_level_completion() {
        let mut router = router();
        router.route(vec![GameEvent::LevelCompleted {
            level_id: "level_03".to_string(),
        }]);
        assert!(router.levels.progress.is_completed("level_03"));
    }

    #[test]
    fn test_hide_window() {
        let mut router = router();
        router.route(vec![GameEvent::ShowWindow(WindowKind::PauseMenu)]);
        router.route(vec![GameEvent::HideWindow(WindowKind::PauseMenu)]);
        assert!(!router.ui.is_window_shown(WindowKind::PauseMenu));
    }

    #[test]
    fn test_full_round_through_router() {
        use crate::config::RoundConfig;
        use crate::consts::{SIM_DT, TICKS_PER_SECOND};
        use crate::sim::{HoleGame, TickInput, TrashKind, tick};
        use glam::Vec3;

        let config = RoundConfig {
            total_score_target: 1,
            ..Default::default()
        };
        let mesh = crate::sim::SurfaceMesh::flat_grid(10.0, 10.0, 10);
        let mut game = HoleGame::new(config, "level_07", mesh);
        game.spawn_trash(TrashKind::Collectible, Vec3::ZERO, true);

        let mut router = router();
        let input = TickInput::default();
        for _ in 0..5 * TICKS_PER_SECOND as u64 {
            tick(&mut game, &input, SIM_DT);
            router.route(game.drain_events());
        }

        assert!(router.audio.sounds.contains(&SoundCue::Collect));
        assert!(router.audio.sounds.contains(&SoundCue::Win));
        assert!(router.ui.is_window_shown(WindowKind::Win));
        assert!(router.levels.progress.is_completed("level_07"));
    }
}
