//! Game balance knobs
//!
//! Defaults reproduce the hero-section game. A JSON file can override any
//! subset of fields; missing fields keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tuning load errors
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its usable range
    #[error("Invalid tuning: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance parameters for the simulation and its drivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Drivers ===
    /// Simulation tick cadence (ms)
    pub tick_interval_ms: f64,
    /// Ticks a single pump may run to catch up after a stall
    pub max_catch_up_ticks: u32,
    /// Spawn cadence on the first session (ms)
    pub base_spawn_interval_ms: f64,
    /// Spawn cadence shortening per completed session (ms)
    pub spawn_interval_step_ms: f64,
    /// Spawn cadence floor (ms)
    pub min_spawn_interval_ms: f64,

    // === Session ===
    /// Length of the first session (s)
    pub base_session_secs: f64,
    /// Extra length per completed session (s)
    pub session_secs_per_iteration: f64,
    /// Player health at session start
    pub player_max_health: u32,

    // === Bullets ===
    /// World units per tick
    pub bullet_speed: f64,
    /// Minimum time between shots (ms)
    pub fire_cooldown_ms: f64,
    /// Bullets appear this far in front of the ship
    pub muzzle_offset: f64,

    // === Enemies ===
    /// Leftward drift per tick before difficulty scaling
    pub enemy_base_speed: f64,
    /// Random extra speed per completed session
    pub enemy_speed_jitter: f64,
    /// Vertical gap sought between a new enemy and existing ones
    pub spawn_clearance: f64,
    /// Extra samples taken when the first spawn height is crowded
    pub spawn_retries: u32,

    // === Collision ===
    /// Bullet-enemy hit distance
    pub bullet_hit_radius: f64,
    /// Enemy-player contact distance
    pub contact_radius: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: 16.0,
            max_catch_up_ticks: 4,
            base_spawn_interval_ms: 1000.0,
            spawn_interval_step_ms: 50.0,
            min_spawn_interval_ms: 500.0,

            base_session_secs: 30.0,
            session_secs_per_iteration: 30.0,
            player_max_health: 100,

            bullet_speed: 0.1,
            fire_cooldown_ms: 100.0,
            muzzle_offset: 0.4,

            enemy_base_speed: 0.005,
            enemy_speed_jitter: 0.005,
            spawn_clearance: 0.4,
            spawn_retries: 10,

            bullet_hit_radius: 0.2,
            contact_radius: 0.3,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Using default tuning: {}", e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive("tick_interval_ms", self.tick_interval_ms)?;
        positive("base_spawn_interval_ms", self.base_spawn_interval_ms)?;
        positive("min_spawn_interval_ms", self.min_spawn_interval_ms)?;
        positive("base_session_secs", self.base_session_secs)?;
        positive("bullet_speed", self.bullet_speed)?;
        positive("enemy_base_speed", self.enemy_base_speed)?;
        positive("bullet_hit_radius", self.bullet_hit_radius)?;
        positive("contact_radius", self.contact_radius)?;

        if self.min_spawn_interval_ms > self.base_spawn_interval_ms {
            return Err(TuningError::Invalid {
                field: "min_spawn_interval_ms",
                reason: "must not exceed base_spawn_interval_ms",
            });
        }
        if self.max_catch_up_ticks == 0 {
            return Err(TuningError::Invalid {
                field: "max_catch_up_ticks",
                reason: "must be at least 1",
            });
        }
        if self.player_max_health == 0 {
            return Err(TuningError::Invalid {
                field: "player_max_health",
                reason: "must be at least 1",
            });
        }
        if !(self.fire_cooldown_ms.is_finite() && self.fire_cooldown_ms >= 0.0) {
            return Err(TuningError::Invalid {
                field: "fire_cooldown_ms",
                reason: "must be zero or positive",
            });
        }
        Ok(())
    }

    /// Length of a session after `iteration` completed sessions (s)
    pub fn session_secs(&self, iteration: u32) -> f64 {
        self.base_session_secs + self.session_secs_per_iteration * iteration as f64
    }

    /// Spawn driver period after `iteration` completed sessions (ms)
    pub fn spawn_interval_ms(&self, iteration: u32) -> f64 {
        (self.base_spawn_interval_ms - self.spawn_interval_step_ms * iteration as f64)
            .max(self.min_spawn_interval_ms)
    }
}
