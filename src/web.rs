//! Browser bindings
//!
//! Exposes the arcade to the page script, which owns the canvas, the
//! pointer listeners and the animation frame loop. Snapshots and events
//! cross the boundary as JSON.

use glam::DVec2;
use wasm_bindgen::prelude::*;

use crate::arcade::Arcade;
use crate::autopilot::steer;
use crate::hud::{format_clock, next_game_message};
use crate::platform::input::{Viewport, pointer_to_field};
use crate::platform::time::SystemClock;
use crate::sim::GamePhase;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier instance
        return;
    }
    log::info!("Bug Blaster core loaded");
}

/// One game instance bound to one canvas
#[wasm_bindgen]
pub struct WebArcade {
    arcade: Arcade<SystemClock>,
    viewport: Viewport,
    idle: bool,
}

#[wasm_bindgen]
impl WebArcade {
    /// Create an arcade; `tuning_json` may override balance values
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> WebArcade {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Using default tuning: {}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        WebArcade {
            arcade: Arcade::new(seed, tuning, SystemClock),
            viewport: Viewport::new(0.0, 0.0, 1000.0, 800.0),
            idle: false,
        }
    }

    pub fn start(&mut self) -> bool {
        self.arcade.start()
    }

    pub fn reset(&mut self) {
        self.arcade.reset();
    }

    /// Canvas bounding rectangle, in client coordinates
    pub fn set_viewport(&mut self, left: f64, top: f64, width: f64, height: f64) {
        self.viewport = Viewport::new(left, top, width, height);
    }

    /// Pointer or touch position in client coordinates
    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        if self.idle {
            return;
        }
        let pos = pointer_to_field(client_x, client_y, &self.viewport);
        self.arcade.set_player_position(pos);
    }

    /// Ship position already in play-field coordinates
    pub fn set_player_position(&mut self, x: f64, y: f64) {
        self.arcade.set_player_position(DVec2::new(x, y));
    }

    pub fn set_trigger(&mut self, held: bool) {
        if !self.idle {
            self.arcade.set_trigger(held);
        }
    }

    pub fn fire(&mut self) -> bool {
        self.arcade.fire_bullet().is_some()
    }

    /// Let the autopilot play (attract mode)
    pub fn set_idle(&mut self, idle: bool) {
        self.idle = idle;
        if !idle {
            self.arcade.set_trigger(false);
        }
    }

    /// Call once per animation frame
    pub fn frame(&mut self) {
        if self.idle {
            let steering = steer(&self.arcade.snapshot());
            self.arcade.set_player_position(steering.target);
            self.arcade.set_trigger(steering.trigger);
        }
        self.arcade.pump();
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&*self.arcade.snapshot()).unwrap_or_else(|e| {
            log::error!("Snapshot serialization failed: {}", e);
            String::from("null")
        })
    }

    pub fn drain_events_json(&mut self) -> String {
        let events = self.arcade.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|e| {
            log::error!("Event serialization failed: {}", e);
            String::from("[]")
        })
    }

    pub fn phase(&self) -> String {
        match self.arcade.phase() {
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::GameOver => "gameover",
        }
        .to_string()
    }

    pub fn score(&self) -> f64 {
        self.arcade.score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.arcade.high_score() as f64
    }

    pub fn time_left(&self) -> f64 {
        self.arcade.time_left()
    }

    pub fn time_left_text(&self) -> String {
        format_clock(self.arcade.time_left())
    }

    pub fn player_health(&self) -> u32 {
        self.arcade.player_health()
    }

    pub fn iteration_count(&self) -> u32 {
        self.arcade.iteration_count()
    }

    pub fn next_game_message(&self) -> String {
        next_game_message(self.arcade.iteration_count(), &self.arcade.state().tuning)
    }
}
