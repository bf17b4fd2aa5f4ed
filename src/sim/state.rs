//! Game state and core simulation types
//!
//! `GameState` is the session aggregate: it owns the player, the bullet and
//! enemy collections, the RNG and the entity ID allocator.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_START;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    /// Initial idle state, nothing simulated
    #[default]
    Ready,
    /// Session running
    Playing,
    /// Session over, waiting for the next start
    GameOver,
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnemyKind {
    Spider,
    Bee,
    Fly,
    Cockroach,
    HazardError,
    HazardWarning,
}

impl EnemyKind {
    /// Every kind, in spawn-roll order
    pub const ALL: [EnemyKind; 6] = [
        EnemyKind::Spider,
        EnemyKind::Bee,
        EnemyKind::Fly,
        EnemyKind::Cockroach,
        EnemyKind::HazardError,
        EnemyKind::HazardWarning,
    ];

    /// Hit points at spawn
    pub fn base_health(self) -> u32 {
        match self {
            EnemyKind::Cockroach => 3,
            EnemyKind::Spider | EnemyKind::HazardError => 2,
            EnemyKind::Bee | EnemyKind::Fly | EnemyKind::HazardWarning => 1,
        }
    }

    /// Points for shooting it down
    pub fn kill_score(self) -> u64 {
        match self {
            EnemyKind::Cockroach => 15,
            EnemyKind::Spider | EnemyKind::HazardError => 10,
            EnemyKind::Bee => 8,
            EnemyKind::Fly | EnemyKind::HazardWarning => 5,
        }
    }

    /// Points for colliding with it
    pub fn graze_score(self) -> u64 {
        match self {
            EnemyKind::HazardError => 3,
            _ => 2,
        }
    }

    /// Health taken from the player on contact
    pub fn contact_damage(self) -> u32 {
        match self {
            EnemyKind::Cockroach => 20,
            EnemyKind::Spider => 15,
            EnemyKind::HazardError => 12,
            EnemyKind::Bee => 10,
            EnemyKind::Fly | EnemyKind::HazardWarning => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnemyKind::Spider => "spider",
            EnemyKind::Bee => "bee",
            EnemyKind::Fly => "fly",
            EnemyKind::Cockroach => "cockroach",
            EnemyKind::HazardError => "hazard-error",
            EnemyKind::HazardWarning => "hazard-warning",
        }
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: DVec2,
    /// Fixed at creation; scaled by the bullet speed every tick
    pub dir: DVec2,
}

/// A bug drifting toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: DVec2,
    /// Leftward movement per tick
    pub speed: f64,
    /// Remaining hit points
    pub health: i32,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub health: u32,
}

impl Player {
    pub fn new(health: u32) -> Self {
        Self {
            pos: PLAYER_START,
            health,
        }
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Countdown reached zero
    Timeout,
    /// Player health reached zero
    Destroyed,
}

/// Things that happened during a command or tick, for effects/HUD layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    SessionStarted { iteration: u32, duration_secs: f64 },
    SessionEnded { score: u64, high_score: u64, reason: EndReason },
    BulletFired { id: u32, pos: DVec2 },
    EnemySpawned { id: u32, kind: EnemyKind, pos: DVec2 },
    EnemyHit { id: u32, kind: EnemyKind, health_left: i32 },
    EnemyKilled { id: u32, kind: EnemyKind, pos: DVec2, points: u64 },
    PlayerGrazed { id: u32, kind: EnemyKind, damage: u32, points: u64 },
    EnemyEscaped { id: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance parameters
    pub tuning: Tuning,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub score: u64,
    /// Best score this process has seen
    pub high_score: u64,
    /// Clock reading at the last start/reset (ms)
    pub start_time_ms: f64,
    /// Seconds remaining, derived from the clock
    pub time_left: f64,
    /// Completed sessions
    pub iteration: u32,
    pub player: Player,
    /// Live bullets in firing order
    pub bullets: Vec<Bullet>,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Clock reading of the last accepted shot (ms)
    pub last_fire_ms: Option<f64>,
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a state in the `Ready` phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let health = tuning.player_max_health;
        let time_left = tuning.session_secs(0);
        Self {
            tuning,
            seed,
            phase: GamePhase::Ready,
            score: 0,
            high_score: 0,
            start_time_ms: 0.0,
            time_left,
            iteration: 0,
            player: Player::new(health),
            bullets: Vec::new(),
            enemies: Vec::new(),
            events: Vec::new(),
            last_fire_ms: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    ///
    /// IDs count up for the lifetime of the state and are not reset between
    /// sessions. After `u32::MAX` the counter wraps back to 1; 0 is never
    /// issued.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Length of the current (or next, outside a session) session in seconds
    pub fn session_duration_secs(&self) -> f64 {
        self.tuning.session_secs(self.iteration)
    }

    /// Spawn driver period for the current iteration (ms)
    pub fn spawn_interval_ms(&self) -> f64 {
        self.tuning.spawn_interval_ms(self.iteration)
    }

    /// Add points to the running score
    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub(crate) fn clear_entities(&mut self) {
        self.bullets.clear();
        self.enemies.clear();
    }

    /// Take the events accumulated since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tables() {
        assert_eq!(EnemyKind::Cockroach.base_health(), 3);
        assert_eq!(EnemyKind::Spider.base_health(), 2);
        assert_eq!(EnemyKind::HazardError.base_health(), 2);
        assert_eq!(EnemyKind::Fly.base_health(), 1);

        assert_eq!(EnemyKind::Bee.kill_score(), 8);
        assert_eq!(EnemyKind::Fly.kill_score(), 5);
        assert_eq!(EnemyKind::HazardWarning.kill_score(), 5);

        assert_eq!(EnemyKind::HazardError.graze_score(), 3);
        assert_eq!(EnemyKind::Cockroach.graze_score(), 2);

        assert_eq!(EnemyKind::HazardError.contact_damage(), 12);
        assert_eq!(EnemyKind::HazardWarning.contact_damage(), 8);
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&EnemyKind::HazardError).unwrap();
        assert_eq!(json, "\"hazard-error\"");
        assert_eq!(EnemyKind::HazardWarning.as_str(), "hazard-warning");
    }

    #[test]
    fn test_new_state_is_ready() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.pos, PLAYER_START);
        assert_eq!(state.time_left, 30.0);
        assert!(state.bullets.is_empty() && state.enemies.is_empty());
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = GameState::new(7, Tuning::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        let c = state.next_entity_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_entity_id_wrap_skips_zero() {
        let mut state = GameState::new(7, Tuning::default());
        state.next_id = u32::MAX;
        assert_eq!(state.next_entity_id(), u32::MAX);
        assert_eq!(state.next_entity_id(), 1);
    }
}
