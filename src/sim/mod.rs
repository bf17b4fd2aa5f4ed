//! Authoritative game simulation
//!
//! All gameplay rules live here. This module must stay free of rendering and
//! platform dependencies:
//! - Per-call movement, clock readings passed in by the caller
//! - Seeded RNG only
//! - Stable iteration order (collection order is spawn/fire order)

pub mod collision;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{band_occupied, first_enemy_hit, within};
pub use spawn::{roll_enemy, spawn_enemy};
pub use state::{Bullet, EndReason, Enemy, EnemyKind, GameEvent, GamePhase, GameState, Player};
pub use tick::{fire_bullet, tick};
