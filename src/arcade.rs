//! Command/query facade
//!
//! `Arcade` is the single writer of the game state. Input handlers push
//! commands into it, a frame callback calls [`Arcade::pump`] to run the tick
//! and spawn drivers, and the rendering layer reads an immutable
//! [`Snapshot`] that is replaced wholesale after every mutation.

use std::sync::{Arc, RwLock};

use glam::DVec2;
use serde::Serialize;

use crate::platform::time::{Clock, SystemClock};
use crate::sim::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, fire_bullet, spawn_enemy, tick,
};
use crate::tuning::Tuning;

/// Render-ready view of the game at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    /// Seconds remaining in the running session
    pub time_left: f64,
    pub player_health: u32,
    pub player_position: DVec2,
    /// Bullets in firing order
    pub bullets: Vec<Bullet>,
    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Completed sessions
    pub iteration: u32,
    /// Length of the running session, or of the next one outside a session
    pub session_secs: f64,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            high_score: state.high_score,
            time_left: state.time_left,
            player_health: state.player.health,
            player_position: state.player.pos,
            bullets: state.bullets.clone(),
            enemies: state.enemies.clone(),
            iteration: state.iteration,
            session_secs: state.session_duration_secs(),
        }
    }
}

/// Read handle for render callbacks or other threads
#[derive(Debug, Clone)]
pub struct SnapshotReader {
    cell: Arc<RwLock<Arc<Snapshot>>>,
}

impl SnapshotReader {
    /// Latest published snapshot
    pub fn load(&self) -> Arc<Snapshot> {
        match self.cell.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn store(&self, snapshot: Snapshot) {
        let snapshot = Arc::new(snapshot);
        match self.cell.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

/// Deadlines for the two periodic drivers of a running session
#[derive(Debug, Clone, Copy)]
struct Drivers {
    tick_interval_ms: f64,
    spawn_interval_ms: f64,
    next_tick_ms: f64,
    next_spawn_ms: f64,
}

impl Drivers {
    fn arm(now_ms: f64, tuning: &Tuning, spawn_interval_ms: f64) -> Self {
        Self {
            tick_interval_ms: tuning.tick_interval_ms,
            spawn_interval_ms,
            next_tick_ms: now_ms + tuning.tick_interval_ms,
            next_spawn_ms: now_ms + spawn_interval_ms,
        }
    }
}

/// The game as seen by the input, rendering and session-UI layers
pub struct Arcade<C: Clock = SystemClock> {
    state: GameState,
    clock: C,
    drivers: Option<Drivers>,
    trigger_held: bool,
    reader: SnapshotReader,
}

impl<C: Clock> Arcade<C> {
    /// Create an arcade in the `Ready` phase
    pub fn new(seed: u64, tuning: Tuning, clock: C) -> Self {
        let mut state = GameState::new(seed, tuning);
        state.reset(clock.now_ms());
        let reader = SnapshotReader {
            cell: Arc::new(RwLock::new(Arc::new(Snapshot::from(&state)))),
        };
        Self {
            state,
            clock,
            drivers: None,
            trigger_held: false,
            reader,
        }
    }

    // === Commands ===

    /// Start a session (from `Ready` or `GameOver`)
    pub fn start(&mut self) -> bool {
        let now = self.clock.now_ms();
        let started = self.state.start(now);
        if started {
            self.drivers = Some(Drivers::arm(
                now,
                &self.state.tuning,
                self.state.spawn_interval_ms(),
            ));
        }
        self.publish();
        started
    }

    /// Return to `Ready`, stopping both drivers
    pub fn reset(&mut self) {
        self.state.reset(self.clock.now_ms());
        self.drivers = None;
        self.trigger_held = false;
        self.publish();
    }

    /// Overwrite the ship position (already in play-field coordinates)
    pub fn set_player_position(&mut self, pos: DVec2) {
        self.state.player.pos = pos;
        self.publish();
    }

    /// Press or release the fire button. While held, every pump fires.
    pub fn set_trigger(&mut self, held: bool) {
        self.trigger_held = held;
    }

    /// Fire once. The engine drops shots inside the cooldown window.
    pub fn fire_bullet(&mut self) -> Option<u32> {
        let fired = fire_bullet(&mut self.state, self.clock.now_ms());
        if fired.is_some() {
            self.publish();
        }
        fired
    }

    /// Run one simulation step now, bypassing the tick driver
    pub fn tick(&mut self) {
        tick(&mut self.state, self.clock.now_ms());
        self.stop_drivers_if_over();
        self.publish();
    }

    /// Spawn one enemy now, bypassing the spawn driver
    pub fn spawn(&mut self) -> Option<u32> {
        let spawned = spawn_enemy(&mut self.state);
        self.publish();
        spawned
    }

    /// Drive the session from a frame callback.
    ///
    /// Fires if the trigger is held, then runs every due spawn and tick in
    /// deadline order. At most `max_catch_up_ticks` ticks run per call; after
    /// a longer stall the tick driver skips ahead instead of bursting.
    pub fn pump(&mut self) {
        let now = self.clock.now_ms();
        if self.trigger_held {
            fire_bullet(&mut self.state, now);
        }

        let max_ticks = self.state.tuning.max_catch_up_ticks;
        let mut ticks = 0;
        while self.state.is_playing() {
            let Some(drivers) = self.drivers.as_mut() else {
                break;
            };

            let spawn_first = drivers.next_spawn_ms <= drivers.next_tick_ms;
            if spawn_first && drivers.next_spawn_ms <= now {
                drivers.next_spawn_ms += drivers.spawn_interval_ms;
                if drivers.next_spawn_ms <= now {
                    drivers.next_spawn_ms = now + drivers.spawn_interval_ms;
                }
                spawn_enemy(&mut self.state);
            } else if drivers.next_tick_ms <= now {
                if ticks >= max_ticks {
                    log::trace!("Tick driver behind, skipping to now");
                    drivers.next_tick_ms = now + drivers.tick_interval_ms;
                    continue;
                }
                drivers.next_tick_ms += drivers.tick_interval_ms;
                ticks += 1;
                tick(&mut self.state, now);
            } else {
                break;
            }
        }

        self.stop_drivers_if_over();
        self.publish();
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn high_score(&self) -> u64 {
        self.state.high_score
    }

    pub fn time_left(&self) -> f64 {
        self.state.time_left
    }

    pub fn player_health(&self) -> u32 {
        self.state.player.health
    }

    pub fn player_position(&self) -> DVec2 {
        self.state.player.pos
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.state.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.state.enemies
    }

    pub fn iteration_count(&self) -> u32 {
        self.state.iteration
    }

    pub fn is_trigger_held(&self) -> bool {
        self.trigger_held
    }

    /// Length of the next session in seconds
    pub fn next_session_secs(&self) -> f64 {
        self.state.session_duration_secs()
    }

    /// Spawn driver period for the current iteration (ms)
    pub fn spawn_interval_ms(&self) -> f64 {
        self.state.spawn_interval_ms()
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.reader.load()
    }

    /// A handle that keeps seeing new snapshots
    pub fn reader(&self) -> SnapshotReader {
        self.reader.clone()
    }

    /// Read-only access to the full state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn stop_drivers_if_over(&mut self) {
        if !self.state.is_playing() {
            self.drivers = None;
        }
    }

    fn publish(&self) {
        self.reader.store(Snapshot::from(&self.state));
    }
}
