use bug_blaster::sim::{GameEvent, GamePhase, GameState, tick};
use bug_blaster::tuning::Tuning;
use bug_blaster::{Arcade, ManualClock};

use proptest::prelude::*;

fn playing(seed: u64) -> GameState {
    let mut state = GameState::new(seed, Tuning::default());
    state.start(0.0);
    state
}

proptest! {
    #[test]
    fn health_never_below_zero_and_ends_once(damages in prop::collection::vec(0u32..60, 1..40)) {
        let mut state = playing(1);
        let mut ended = 0;

        for d in damages {
            let was_playing = state.phase == GamePhase::Playing;
            state.damage(d);
            prop_assert!(state.player.health <= 100);
            if was_playing && state.phase == GamePhase::GameOver {
                ended += 1;
                prop_assert_eq!(state.player.health, 0);
            }
        }

        let session_ends = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .count();
        prop_assert!(ended <= 1);
        prop_assert_eq!(session_ends, ended);
        prop_assert_eq!(state.iteration as usize, ended);
    }

    #[test]
    fn timer_non_increasing_and_expires(
        steps in prop::collection::vec(1.0f64..400.0, 1..200),
        completed in 0u32..3,
    ) {
        let mut state = GameState::new(2, Tuning::default());
        for _ in 0..completed {
            state.start(0.0);
            state.end(bug_blaster::sim::EndReason::Timeout);
        }
        state.start(0.0);
        let duration_ms = state.session_duration_secs() * 1000.0;
        // Keep the player out of harm's way
        state.player.pos = glam::DVec2::new(-2.9, 1.5);

        let mut now = 0.0;
        let mut last = state.time_left;
        for step in steps {
            now += step;
            tick(&mut state, now);
            if state.phase != GamePhase::Playing {
                break;
            }
            prop_assert!(state.time_left <= last);
            last = state.time_left;
        }

        // However irregular the cadence, the session is over once the clock passes the duration
        if state.phase == GamePhase::Playing {
            tick(&mut state, duration_ms);
        }
        prop_assert_ne!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn entity_ids_unique_within_session(seed in any::<u64>(), frames in 50usize..400) {
        let clock = ManualClock::new(0.0);
        let mut arcade = Arcade::new(seed, Tuning::default(), clock.clone());
        arcade.start();
        arcade.set_trigger(true);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..frames {
            clock.advance(16.0);
            arcade.pump();
            for event in arcade.drain_events() {
                match event {
                    GameEvent::BulletFired { id, .. } | GameEvent::EnemySpawned { id, .. } => {
                        prop_assert!(seen.insert(id), "id {} allocated twice", id);
                    }
                    _ => {}
                }
            }
        }
    }
}
