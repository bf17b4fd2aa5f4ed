//! Idle/demo mode steering
//!
//! Plays the game from a snapshot alone, the same way a human would: pick a
//! lane, line up, hold the trigger.

use glam::DVec2;

use crate::arcade::Snapshot;
use crate::consts::{FIELD_HALF_HEIGHT, PLAYER_START};
use crate::sim::{Enemy, GamePhase};

/// Vertical misalignment still worth shooting at
pub const AIM_TOLERANCE: f64 = 0.15;

/// Desired input for the next frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Steering {
    /// Where the ship should be
    pub target: DVec2,
    /// Whether to hold the fire button
    pub trigger: bool,
}

/// Choose where to fly and whether to shoot
pub fn steer(snapshot: &Snapshot) -> Steering {
    let home = DVec2::new(PLAYER_START.x, snapshot.player_position.y);
    if snapshot.phase != GamePhase::Playing {
        return Steering {
            target: home,
            trigger: false,
        };
    }

    let Some(threat) = most_threatening(&snapshot.enemies, home.x) else {
        return Steering {
            target: home,
            trigger: false,
        };
    };

    let target = DVec2::new(
        PLAYER_START.x,
        threat.pos.y.clamp(-FIELD_HALF_HEIGHT, FIELD_HALF_HEIGHT),
    );
    let aligned = (snapshot.player_position.y - threat.pos.y).abs() < AIM_TOLERANCE;
    Steering {
        target,
        trigger: aligned,
    }
}

/// The enemy closest to the left edge that is still in front of the ship
fn most_threatening(enemies: &[Enemy], ship_x: f64) -> Option<&Enemy> {
    enemies
        .iter()
        .filter(|e| e.pos.x > ship_x)
        .min_by(|a, b| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}
