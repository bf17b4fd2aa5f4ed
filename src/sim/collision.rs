//! Proximity tests between bullets, enemies and the player
//!
//! Plain Euclidean distance against fixed radii. There is no swept test, so a
//! fast entity can skip past another between ticks.

use glam::DVec2;

use super::state::Enemy;

/// Whether two points are strictly closer than `radius`
#[inline]
pub fn within(a: DVec2, b: DVec2, radius: f64) -> bool {
    a.distance(b) < radius
}

/// Index of the first enemy (collection order) a bullet at `pos` hits
pub fn first_enemy_hit(pos: DVec2, enemies: &[Enemy], radius: f64) -> Option<usize> {
    enemies.iter().position(|e| within(pos, e.pos, radius))
}

/// Whether any existing enemy sits within `clearance` of height `y`
pub fn band_occupied(y: f64, enemies: &[Enemy], clearance: f64) -> bool {
    enemies.iter().any(|e| (e.pos.y - y).abs() <= clearance)
}
