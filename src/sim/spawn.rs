//! Enemy spawn policy
//!
//! Picks a kind, a lane and a speed for the next enemy. Lane spacing is best
//! effort: after the retry budget the last sample is used even if crowded.

use glam::DVec2;
use rand::Rng;

use super::collision::band_occupied;
use super::state::{Enemy, EnemyKind, GameEvent, GameState};
use crate::consts::{FIELD_HALF_HEIGHT, SPAWN_X};
use crate::tuning::Tuning;

/// Roll a new enemy without adding it anywhere
pub fn roll_enemy<R: Rng>(
    rng: &mut R,
    id: u32,
    iteration: u32,
    existing: &[Enemy],
    tuning: &Tuning,
) -> Enemy {
    let kind = EnemyKind::ALL[rng.random_range(0..EnemyKind::ALL.len())];

    let mut y = sample_lane(rng);
    let mut attempts = 0;
    while attempts < tuning.spawn_retries && band_occupied(y, existing, tuning.spawn_clearance) {
        y = sample_lane(rng);
        attempts += 1;
    }

    let speed =
        tuning.enemy_base_speed + rng.random::<f64>() * tuning.enemy_speed_jitter * iteration as f64;

    Enemy {
        id,
        kind,
        pos: DVec2::new(SPAWN_X, y),
        speed,
        health: kind.base_health() as i32,
    }
}

fn sample_lane<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>() * (2.0 * FIELD_HALF_HEIGHT) - FIELD_HALF_HEIGHT
}

/// Spawn one enemy into the state. No-op outside a session.
pub fn spawn_enemy(state: &mut GameState) -> Option<u32> {
    if !state.is_playing() {
        return None;
    }

    let id = state.next_entity_id();
    let enemy = roll_enemy(
        &mut state.rng,
        id,
        state.iteration,
        &state.enemies,
        &state.tuning,
    );
    log::debug!(
        "Spawned {} #{} at y={:.2} speed={:.4}",
        enemy.kind.as_str(),
        id,
        enemy.pos.y,
        enemy.speed
    );
    state.events.push(GameEvent::EnemySpawned {
        id,
        kind: enemy.kind,
        pos: enemy.pos,
    });
    state.enemies.push(enemy);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_roll_enemy_fields() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for id in 0..200 {
            let e = roll_enemy(&mut rng, id, 0, &[], &tuning);
            assert_eq!(e.pos.x, SPAWN_X);
            assert!((-FIELD_HALF_HEIGHT..=FIELD_HALF_HEIGHT).contains(&e.pos.y));
            assert_eq!(e.health, e.kind.base_health() as i32);
            // No scaling on the first session
            assert_eq!(e.speed, tuning.enemy_base_speed);
        }
    }

    #[test]
    fn test_speed_scales_with_iteration() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let mut fastest: f64 = 0.0;
        for id in 0..200 {
            let e = roll_enemy(&mut rng, id, 4, &[], &tuning);
            assert!(e.speed >= tuning.enemy_base_speed);
            assert!(e.speed <= tuning.enemy_base_speed + tuning.enemy_speed_jitter * 4.0);
            fastest = fastest.max(e.speed);
        }
        assert!(fastest > tuning.enemy_base_speed * 2.0);
    }

    #[test]
    fn test_every_kind_rolled() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for id in 0..500 {
            seen.insert(roll_enemy(&mut rng, id, 0, &[], &tuning).kind);
        }
        assert_eq!(seen.len(), EnemyKind::ALL.len());
    }

    #[test]
    fn test_lane_spacing_when_room() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(4);
        let existing = vec![Enemy {
            id: 1,
            kind: EnemyKind::Bee,
            pos: DVec2::new(2.0, 0.0),
            speed: 0.005,
            health: 1,
        }];
        // One occupied band leaves most of the field free, so eleven samples
        // nearly always find a gap.
        let spaced = (0..200)
            .filter(|&id| {
                let e = roll_enemy(&mut rng, id, 0, &existing, &tuning);
                (e.pos.y - 0.0).abs() > tuning.spawn_clearance
            })
            .count();
        assert!(spaced >= 195, "only {} of 200 spaced", spaced);
    }

    #[test]
    fn test_crowded_field_still_spawns() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let existing: Vec<Enemy> = (0..8)
            .map(|i| Enemy {
                id: i,
                kind: EnemyKind::Fly,
                pos: DVec2::new(2.0, -1.5 + i as f64 * 0.4),
                speed: 0.005,
                health: 1,
            })
            .collect();
        let e = roll_enemy(&mut rng, 99, 0, &existing, &tuning);
        assert_eq!(e.id, 99);
        assert!((-FIELD_HALF_HEIGHT..=FIELD_HALF_HEIGHT).contains(&e.pos.y));
    }

    #[test]
    fn test_full_field_keeps_last_of_eleven_lanes() {
        let tuning = Tuning::default();
        // Bands every 0.4 with clearance 0.4 leave no free lane anywhere
        let existing: Vec<Enemy> = (0..8)
            .map(|i| Enemy {
                id: i,
                kind: EnemyKind::Fly,
                pos: DVec2::new(2.0, -1.5 + i as f64 * 0.4),
                speed: 0.005,
                health: 1,
            })
            .collect();

        let mut rng = Pcg32::seed_from_u64(6);
        let mut replay = rng.clone();
        let e = roll_enemy(&mut rng, 1, 0, &existing, &tuning);

        let kind = EnemyKind::ALL[replay.random_range(0..EnemyKind::ALL.len())];
        let mut lane = 0.0;
        for _ in 0..=tuning.spawn_retries {
            lane = sample_lane(&mut replay);
        }
        let _speed_draw = replay.random::<f64>();

        assert_eq!(e.kind, kind);
        assert_eq!(e.pos.y, lane);
        assert_eq!(rng, replay);
    }

    #[test]
    fn test_spawn_ignored_outside_session() {
        let mut state = GameState::new(1, Tuning::default());
        assert_eq!(spawn_enemy(&mut state), None);
        assert!(state.enemies.is_empty());
    }
}
