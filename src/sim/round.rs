//! Round state machine
//!
//! Owns the score, the countdown timer and the pause flag, and drives the
//! win/lose outcome. The original flow was a bundle of reactive
//! subscriptions; here it is explicit: `Watched` cells fan out HUD updates,
//! a `Scheduler` carries the per-second timer and the delayed outcome
//! window, and every external effect leaves through the event queue.

use crate::config::RoundConfig;
use crate::consts::TICKS_PER_SECOND;

use super::events::{EventQueue, GameEvent, MusicCue, SoundCue, WindowKind};
use super::observe::Watched;
use super::schedule::{Scheduler, TaskHandle};

/// Round phase. `Won` and `Lost` are terminal: entered at most once, and no
/// score/timer mutation happens after entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    Won,
    Lost,
}

/// Actions carried by the round's scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoundAction {
    SecondElapsed,
    ShowOutcome(RoundPhase),
}

/// Score, timer, pause and outcome for one round
pub struct Round {
    phase: RoundPhase,
    paused: bool,
    menu_shown: bool,
    /// Current score; every write notifies (HUD force-notify semantics)
    pub score: Watched<u32>,
    /// Seconds remaining; every write notifies
    pub time_remaining: Watched<i64>,
    total_score: u32,
    warning_sound_count: u32,
    level_id: String,
    scheduler: Scheduler<RoundAction>,
    timer_task: Option<TaskHandle>,
    events: EventQueue,
}

impl Round {
    /// Initialize a fresh round: score 0, full timer, unpaused, per-second
    /// timer task armed, background music requested
    pub fn new(config: &RoundConfig, level_id: &str, events: EventQueue) -> Self {
        let mut score = Watched::new(0u32);
        let mut time_remaining = Watched::new(config.round_duration_secs);

        let queue = events.clone();
        let target = config.total_score_target;
        score.subscribe(move |score| {
            queue.push(GameEvent::ScoreChanged { score, target });
        });
        let queue = events.clone();
        time_remaining.subscribe(move |seconds| {
            queue.push(GameEvent::TimeChanged { seconds });
        });

        let mut scheduler = Scheduler::new();
        let timer_task = scheduler.every(TICKS_PER_SECOND as u64, RoundAction::SecondElapsed);

        events.push(GameEvent::Music {
            cue: MusicCue::Background,
            looped: true,
        });

        let mut round = Self {
            phase: RoundPhase::Running,
            paused: false,
            menu_shown: false,
            score,
            time_remaining,
            total_score: config.total_score_target,
            warning_sound_count: config.warning_sound_count,
            level_id: level_id.to_string(),
            scheduler,
            timer_task: Some(timer_task),
            events,
        };

        // Prime the HUD with the starting values
        round.score.set(0);
        round.time_remaining.set(config.round_duration_secs);
        round
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != RoundPhase::Running
    }

    /// Host-driven pause (e.g. app losing focus). Ignored once terminal:
    /// the outcome owns the pause flag from then on.
    pub fn set_paused(&mut self, paused: bool) {
        if self.is_terminal() {
            return;
        }
        self.paused = paused;
    }

    /// Back/escape pressed: toggle the pause menu. Guarded against toggling
    /// after an outcome, where the win/lose window owns the screen.
    pub fn toggle_pause_menu(&mut self) {
        if self.is_terminal() {
            log::debug!("pause toggle ignored after {:?}", self.phase);
            return;
        }
        if !self.menu_shown {
            self.paused = true;
            self.menu_shown = true;
            self.events.push(GameEvent::ShowWindow(WindowKind::PauseMenu));
        } else {
            self.paused = false;
            self.menu_shown = false;
            self.events.push(GameEvent::HideWindow(WindowKind::PauseMenu));
        }
    }

    pub fn pause_menu_shown(&self) -> bool {
        self.menu_shown
    }

    /// A collectible reached the collector
    pub fn on_score_collected(&mut self) {
        if self.paused || self.is_terminal() {
            return;
        }
        self.events.push(GameEvent::Sound(SoundCue::Collect));
        let score = self.score.get() + 1;
        self.score.set(score);
        if score >= self.total_score {
            self.enter_outcome(RoundPhase::Won);
        }
    }

    /// A hazard reached the collector
    pub fn on_hazard_collected(&mut self) {
        if self.paused || self.is_terminal() {
            return;
        }
        self.events.push(GameEvent::Sound(SoundCue::HazardCollect));
        self.events.push(GameEvent::CameraShake);
        self.enter_outcome(RoundPhase::Lost);
    }

    /// Advance scheduled work by one tick. Runs unconditionally - the
    /// outcome-window continuation must fire while the game is paused - but
    /// the timer handler gates itself on the pause flag, so a paused second
    /// simply does not decrement.
    pub fn advance_tick(&mut self) {
        for action in self.scheduler.advance() {
            match action {
                RoundAction::SecondElapsed => self.on_second_elapsed(),
                RoundAction::ShowOutcome(phase) => {
                    let window = match phase {
                        RoundPhase::Won => WindowKind::Win,
                        RoundPhase::Lost => WindowKind::Lose,
                        RoundPhase::Running => continue,
                    };
                    self.events.push(GameEvent::ShowWindow(window));
                }
            }
        }
    }

    fn on_second_elapsed(&mut self) {
        if self.paused || self.is_terminal() {
            return;
        }
        let before = self.time_remaining.get();
        let now = before - 1;
        self.time_remaining.set(now);

        if before <= 6 && before > 1 {
            self.events.push(GameEvent::TimeLow { seconds: now });
            let index = (before as u32) % self.warning_sound_count;
            self.events.push(GameEvent::Sound(SoundCue::TimeWarning(index)));
        }

        if now <= 0 {
            self.enter_outcome(RoundPhase::Lost);
        }
    }

    /// Terminal transition. The guard makes a second transition in the same
    /// tick a no-op, which is what resolves a simultaneous win+lose in favor
    /// of whichever fired first (the tick orchestrator feeds hazards first,
    /// so lose takes precedence).
    fn enter_outcome(&mut self, outcome: RoundPhase) {
        if self.is_terminal() || outcome == RoundPhase::Running {
            return;
        }
        self.phase = outcome;
        self.paused = true;
        self.cancel_timer();

        let cue = match outcome {
            RoundPhase::Won => SoundCue::Win,
            _ => SoundCue::Lose,
        };
        self.events.push(GameEvent::Sound(cue));

        if outcome == RoundPhase::Won {
            // Persist completion before the window is requested
            self.events.push(GameEvent::LevelCompleted {
                level_id: self.level_id.clone(),
            });
        }

        let half_clip = cue.duration_secs() / 2.0;
        let delay_ticks = (half_clip * TICKS_PER_SECOND as f32).round() as u64;
        self.scheduler
            .after(delay_ticks, RoundAction::ShowOutcome(outcome));

        log::info!(
            "round over: {:?} (score {}/{}, {}s left)",
            outcome,
            self.score.get(),
            self.total_score,
            self.time_remaining.get()
        );
    }

    /// Cancel the per-second timer task; safe to call more than once
    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer_task.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl std::fmt::Debug for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Round")
            .field("phase", &self.phase)
            .field("paused", &self.paused)
            .field("score", &self.score.get())
            .field("time_remaining", &self.time_remaining.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(target: u32, duration: i64) -> RoundConfig {
        RoundConfig {
            total_score_target: target,
            round_duration_secs: duration,
            ..Default::default()
        }
    }

    fn advance_seconds(round: &mut Round, seconds: u64) {
        for _ in 0..seconds * TICKS_PER_SECOND as u64 {
            round.advance_tick();
        }
    }

    #[test]
    fn test_init_state() {
        let events = EventQueue::new();
        let round = Round::new(&config(3, 60), "level_01", events.clone());
        assert_eq!(round.phase(), RoundPhase::Running);
        assert!(!round.paused());
        assert_eq!(round.score.get(), 0);
        assert_eq!(round.time_remaining.get(), 60);

        let drained = events.drain();
        assert!(drained.contains(&GameEvent::Music {
            cue: MusicCue::Background,
            looped: true
        }));
        assert!(drained.contains(&GameEvent::ScoreChanged { score: 0, target: 3 }));
        assert!(drained.contains(&GameEvent::TimeChanged { seconds: 60 }));
    }

    #[test]
    fn test_score_to_target_wins() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(3, 60), "level_01", events.clone());
        events.drain();

        round.on_score_collected();
        round.on_score_collected();
        assert_eq!(round.phase(), RoundPhase::Running);
        round.on_score_collected();

        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.score.get(), 3);
        assert!(round.paused());

        let drained = events.drain();
        assert!(drained.contains(&GameEvent::Sound(SoundCue::Win)));
        assert!(drained.contains(&GameEvent::LevelCompleted {
            level_id: "level_01".to_string()
        }));
        // Window is delayed, not immediate
        assert!(!drained.contains(&GameEvent::ShowWindow(WindowKind::Win)));
    }

    #[test]
    fn test_win_window_shown_after_half_jingle() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(1, 60), "level_01", events.clone());
        round.on_score_collected();
        events.drain();

        let delay_ticks =
            (SoundCue::Win.duration_secs() / 2.0 * TICKS_PER_SECOND as f32).round() as u64;
        for _ in 0..delay_ticks - 1 {
            round.advance_tick();
        }
        assert!(!events.drain().contains(&GameEvent::ShowWindow(WindowKind::Win)));
        round.advance_tick();
        assert!(events.drain().contains(&GameEvent::ShowWindow(WindowKind::Win)));
    }

    #[test]
    fn test_timer_runs_out_loses() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(3, 10), "level_01", events.clone());
        events.drain();

        advance_seconds(&mut round, 10);
        assert_eq!(round.phase(), RoundPhase::Lost);
        assert_eq!(round.time_remaining.get(), 0);
        assert!(events.drain().contains(&GameEvent::Sound(SoundCue::Lose)));
    }

    #[test]
    fn test_time_warnings_in_window() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(3, 8), "level_01", events.clone());
        events.drain();

        // Seconds 8 and 7: no warning yet
        advance_seconds(&mut round, 2);
        assert!(
            !events
                .drain()
                .iter()
                .any(|e| matches!(e, GameEvent::TimeLow { .. }))
        );

        // Seconds 6 down to 2 fire warnings (pre-decrement value in (1, 6])
        advance_seconds(&mut round, 5);
        let warnings: Vec<_> = events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::TimeLow { .. }))
            .collect();
        assert_eq!(warnings.len(), 5);
    }

    #[test]
    fn test_warning_sound_index_cycles() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(3, 6), "level_01", events.clone());
        events.drain();

        advance_seconds(&mut round, 1);
        // Pre-decrement value 6, two warning clips configured: index 0
        assert!(
            events
                .drain()
                .contains(&GameEvent::Sound(SoundCue::TimeWarning(0)))
        );
        advance_seconds(&mut round, 1);
        assert!(
            events
                .drain()
                .contains(&GameEvent::Sound(SoundCue::TimeWarning(1)))
        );
    }

    #[test]
    fn test_hazard_loses_immediately_score_frozen() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(5, 30), "level_01", events.clone());
        round.on_score_collected();
        events.drain();

        round.on_hazard_collected();
        assert_eq!(round.phase(), RoundPhase::Lost);
        assert_eq!(round.score.get(), 1);

        let drained = events.drain();
        assert!(drained.contains(&GameEvent::CameraShake));
        assert!(drained.contains(&GameEvent::Sound(SoundCue::Lose)));
        assert!(
            !drained
                .iter()
                .any(|e| matches!(e, GameEvent::LevelCompleted { .. }))
        );
    }

    #[test]
    fn test_hazard_beats_score_in_same_tick() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(1, 30), "level_01", events.clone());
        events.drain();

        // Orchestrator order: hazards first
        round.on_hazard_collected();
        round.on_score_collected();

        assert_eq!(round.phase(), RoundPhase::Lost);
        assert_eq!(round.score.get(), 0);
    }

    #[test]
    fn test_paused_freezes_score_and_timer() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(3, 60), "level_01", events.clone());
        events.drain();

        round.toggle_pause_menu();
        assert!(round.paused());
        assert!(events.drain().contains(&GameEvent::ShowWindow(WindowKind::PauseMenu)));

        round.on_score_collected();
        round.on_hazard_collected();
        advance_seconds(&mut round, 5);
        assert_eq!(round.score.get(), 0);
        assert_eq!(round.time_remaining.get(), 60);
        assert_eq!(round.phase(), RoundPhase::Running);

        round.toggle_pause_menu();
        assert!(!round.paused());
        assert!(events.drain().contains(&GameEvent::HideWindow(WindowKind::PauseMenu)));

        advance_seconds(&mut round, 1);
        assert_eq!(round.time_remaining.get(), 59);
    }

    #[test]
    fn test_pause_toggle_guarded_after_outcome() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(1, 60), "level_01", events.clone());
        round.on_score_collected();
        events.drain();

        round.toggle_pause_menu();
        assert!(round.paused());
        assert!(!round.pause_menu_shown());
        assert!(events.drain().is_empty());
    }

    #[test]
    fn test_terminal_entered_once() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(1, 60), "level_01", events.clone());
        round.on_score_collected();
        events.drain();

        // Further events after the outcome change nothing
        round.on_score_collected();
        round.on_hazard_collected();
        assert_eq!(round.phase(), RoundPhase::Won);
        assert_eq!(round.score.get(), 1);

        // Only one outcome window ever shows
        advance_seconds(&mut round, 5);
        let windows: Vec<_> = events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ShowWindow(_)))
            .collect();
        assert_eq!(windows.len(), 1);
    }

    #[test]
    fn test_double_cancel_is_noop() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(1, 60), "level_01", events);
        round.cancel_timer();
        round.cancel_timer();
        // Timer gone: no decrement ever happens
        advance_seconds(&mut round, 3);
        assert_eq!(round.time_remaining.get(), 60);
    }

    #[test]
    fn test_host_pause_ignored_after_outcome() {
        let events = EventQueue::new();
        let mut round = Round::new(&config(1, 60), "level_01", events);
        round.on_score_collected();
        round.set_paused(false);
        assert!(round.paused());
    }
}
