//! Bug Blaster - the arcade mini-game behind the portfolio hero section
//!
//! Core modules:
//! - `sim`: Authoritative simulation (entities, spawning, tick, session lifecycle)
//! - `arcade`: Command/query facade used by the input and rendering layers
//! - `platform`: Clock and pointer mapping seams
//! - `tuning`: Data-driven game balance
//! - `hud`: Text helpers for the session UI
//! - `autopilot`: Idle/demo steering

pub mod arcade;
pub mod autopilot;
pub mod hud;
pub mod platform;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use arcade::{Arcade, Snapshot, SnapshotReader};
pub use platform::time::{Clock, ManualClock, SystemClock};
pub use tuning::{Tuning, TuningError};

use glam::DVec2;

/// Play-field geometry
pub mod consts {
    use glam::DVec2;

    /// Play-field spans x in [-3, 3]
    pub const FIELD_HALF_WIDTH: f64 = 3.0;
    /// Play-field spans y in [-1.5, 1.5]
    pub const FIELD_HALF_HEIGHT: f64 = 1.5;

    /// Enemies enter on the right edge
    pub const SPAWN_X: f64 = FIELD_HALF_WIDTH;

    /// Where the ship sits before the first pointer sample
    pub const PLAYER_START: DVec2 = DVec2::new(-2.0, 0.0);

    /// Bullets always fly rightward
    pub const FIRE_DIRECTION: DVec2 = DVec2::X;
}

/// Whether a point lies inside the play-field (edges included)
#[inline]
pub fn in_play_field(pos: DVec2) -> bool {
    use consts::*;
    (-FIELD_HALF_WIDTH..=FIELD_HALF_WIDTH).contains(&pos.x)
        && (-FIELD_HALF_HEIGHT..=FIELD_HALF_HEIGHT).contains(&pos.y)
}

/// Clamp a point into the play-field
#[inline]
pub fn clamp_to_field(pos: DVec2) -> DVec2 {
    use consts::*;
    DVec2::new(
        pos.x.clamp(-FIELD_HALF_WIDTH, FIELD_HALF_WIDTH),
        pos.y.clamp(-FIELD_HALF_HEIGHT, FIELD_HALF_HEIGHT),
    )
}
