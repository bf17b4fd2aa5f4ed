//! Session lifecycle: Ready -> Playing -> GameOver -> Playing ...
//!
//! All transitions are total. Commands issued in the wrong phase are ignored.

use super::spawn::spawn_enemy;
use super::state::{EndReason, GameEvent, GamePhase, GameState};

impl GameState {
    /// Begin a session. Ignored while one is already running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        if self.is_playing() {
            return false;
        }

        let duration = self.session_duration_secs();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.player.health = self.tuning.player_max_health;
        self.start_time_ms = now_ms;
        self.time_left = duration;
        self.last_fire_ms = None;
        self.clear_entities();

        log::info!(
            "Session {} started: {}s, spawn every {}ms",
            self.iteration + 1,
            duration,
            self.spawn_interval_ms()
        );
        self.events.push(GameEvent::SessionStarted {
            iteration: self.iteration,
            duration_secs: duration,
        });

        spawn_enemy(self);
        true
    }

    /// Finish the running session
    pub fn end(&mut self, reason: EndReason) {
        if !self.is_playing() {
            return;
        }

        self.high_score = self.high_score.max(self.score);
        self.iteration += 1;
        self.clear_entities();
        self.phase = GamePhase::GameOver;

        log::info!(
            "Session over ({:?}): score {}, high score {}",
            reason,
            self.score,
            self.high_score
        );
        self.events.push(GameEvent::SessionEnded {
            score: self.score,
            high_score: self.high_score,
            reason,
        });
    }

    /// Back to the idle state. Keeps high score and iteration count.
    pub fn reset(&mut self, now_ms: f64) {
        self.phase = GamePhase::Ready;
        self.score = 0;
        self.player.health = self.tuning.player_max_health;
        self.start_time_ms = now_ms;
        self.time_left = self.tuning.base_session_secs;
        self.last_fire_ms = None;
        self.clear_entities();
    }

    /// Hurt the player; ends the session when health runs out
    pub fn damage(&mut self, amount: u32) {
        if !self.is_playing() {
            return;
        }

        self.player.health = self.player.health.saturating_sub(amount);
        if self.player.health == 0 {
            self.end(EndReason::Destroyed);
        }
    }

    /// Recompute the countdown from the clock; ends the session at zero
    pub fn update_time_left(&mut self, now_ms: f64) {
        if !self.is_playing() {
            return;
        }

        let elapsed = ((now_ms - self.start_time_ms) / 1000.0).max(0.0);
        // Never let a clock step backwards raise the countdown
        self.time_left = (self.session_duration_secs() - elapsed)
            .max(0.0)
            .min(self.time_left);

        if self.time_left <= 0.0 {
            self.end(EndReason::Timeout);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(11, Tuning::default());
        state.start(0.0);
        state
    }

    #[test]
    fn test_start_from_ready() {
        let state = playing();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_left, 30.0);
        assert_eq!(state.enemies.len(), 1);
        assert!(matches!(
            state.events[0],
            GameEvent::SessionStarted { iteration: 0, .. }
        ));
    }

    #[test]
    fn test_start_while_playing_ignored() {
        let mut state = playing();
        state.score = 42;
        assert!(!state.start(500.0));
        assert_eq!(state.score, 42);
        assert_eq!(state.start_time_ms, 0.0);
    }

    #[test]
    fn test_end_updates_high_score_and_iteration() {
        let mut state = playing();
        state.score = 77;
        state.end(EndReason::Timeout);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score, 77);
        assert_eq!(state.iteration, 1);
        assert!(state.enemies.is_empty());

        // Lower score next time keeps the record
        state.start(1000.0);
        state.score = 10;
        state.end(EndReason::Timeout);
        assert_eq!(state.high_score, 77);
        assert_eq!(state.iteration, 2);
    }

    #[test]
    fn test_end_outside_session_ignored() {
        let mut state = GameState::new(1, Tuning::default());
        state.end(EndReason::Timeout);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.iteration, 0);
    }

    #[test]
    fn test_damage_clamps_and_ends_once() {
        let mut state = playing();
        state.damage(60);
        assert_eq!(state.player.health, 40);
        state.damage(60);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.iteration, 1);

        // Further damage is a no-op
        state.damage(10);
        assert_eq!(state.player.health, 0);
        assert_eq!(state.iteration, 1);
    }

    #[test]
    fn test_damage_ignored_when_not_playing() {
        let mut state = GameState::new(1, Tuning::default());
        state.damage(30);
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_timer_from_clock() {
        let mut state = playing();
        state.update_time_left(10_000.0);
        assert!((state.time_left - 20.0).abs() < 1e-4);
        // Clock going backwards does not refill the timer
        state.update_time_left(5_000.0);
        assert!((state.time_left - 20.0).abs() < 1e-4);
        state.update_time_left(30_000.0);
        assert_eq!(state.time_left, 0.0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_restart_scaling() {
        let mut state = playing();
        state.end(EndReason::Timeout);
        state.start(40_000.0);
        assert_eq!(state.session_duration_secs(), 60.0);
        assert_eq!(state.time_left, 60.0);
        assert_eq!(state.spawn_interval_ms(), 950.0);
    }

    #[test]
    fn test_reset_keeps_progress() {
        let mut state = playing();
        state.score = 30;
        state.end(EndReason::Timeout);
        state.reset(99.0);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 30);
        assert_eq!(state.iteration, 1);
        assert_eq!(state.time_left, 30.0);
        assert_eq!(state.player.health, 100);
    }
}
