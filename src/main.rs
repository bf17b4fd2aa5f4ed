//! Bug Blaster entry point
//!
//! The browser build is driven from the page script through `web::WebArcade`.
//! Natively this runs a headless attract-mode demo: the autopilot plays a few
//! sessions on a simulated clock and the results are printed.
//!
//! Usage: `bug-blaster [seed] [sessions]`. Set `BUG_BLASTER_TUNING` to a JSON
//! file to override balance values, and `RUST_LOG` for more output.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bug_blaster::autopilot::steer;
    use bug_blaster::hud::{format_clock, next_game_message};
    use bug_blaster::sim::{EndReason, GameEvent, GamePhase};
    use bug_blaster::{Arcade, ManualClock, Tuning};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let sessions = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(3)
        .max(1);

    let tuning = match std::env::var("BUG_BLASTER_TUNING") {
        Ok(path) => Tuning::load_or_default(path),
        Err(_) => Tuning::default(),
    };
    let frame_ms = tuning.tick_interval_ms;

    log::info!("Bug Blaster (native) demo: seed {}, {} sessions", seed, sessions);

    let clock = ManualClock::new(0.0);
    let mut arcade = Arcade::new(seed, tuning, clock.clone());

    for _ in 0..sessions {
        arcade.start();
        let mut kills = 0u32;
        let mut grazes = 0u32;
        let mut reason = EndReason::Timeout;

        while arcade.phase() == GamePhase::Playing {
            let steering = steer(&arcade.snapshot());
            arcade.set_player_position(steering.target);
            arcade.set_trigger(steering.trigger);

            clock.advance(frame_ms);
            arcade.pump();

            for event in arcade.drain_events() {
                match event {
                    GameEvent::EnemyKilled { .. } => kills += 1,
                    GameEvent::PlayerGrazed { .. } => grazes += 1,
                    GameEvent::SessionEnded { reason: r, .. } => reason = r,
                    _ => {}
                }
            }
        }

        let snap = arcade.snapshot();
        println!(
            "Session {}: score {:>4} | high {:>4} | kills {:>3} | grazes {:>2} | health {:>3} | {:?} at {}",
            snap.iteration,
            snap.score,
            snap.high_score,
            kills,
            grazes,
            snap.player_health,
            reason,
            format_clock(snap.time_left),
        );
        println!(
            "  {}",
            next_game_message(snap.iteration, &arcade.state().tuning)
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
