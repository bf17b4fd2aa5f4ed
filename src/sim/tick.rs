//! Fixed-step simulation tick
//!
//! Movement is applied per call, not scaled by elapsed time. Only the
//! countdown reads the clock.

use super::collision::{first_enemy_hit, within};
use super::state::{Bullet, GameEvent, GameState};
use crate::consts::{FIELD_HALF_WIDTH, FIRE_DIRECTION};
use crate::in_play_field;

/// Advance the session by one step
pub fn tick(state: &mut GameState, now_ms: f64) {
    if !state.is_playing() {
        return;
    }

    advance_bullets(state);
    resolve_bullet_hits(state);
    advance_enemies(state);
    if !state.is_playing() {
        // Contact damage finished the player off
        return;
    }
    reap_escaped(state);
    state.update_time_left(now_ms);
}

/// Fire from the ship's nose. Returns the bullet ID when a shot was taken.
///
/// Shots closer together than the fire cooldown are dropped, so callers can
/// forward every trigger sample.
pub fn fire_bullet(state: &mut GameState, now_ms: f64) -> Option<u32> {
    if !state.is_playing() {
        return None;
    }
    if let Some(last) = state.last_fire_ms {
        if now_ms - last <= state.tuning.fire_cooldown_ms {
            return None;
        }
    }

    let id = state.next_entity_id();
    let pos = state.player.pos + FIRE_DIRECTION * state.tuning.muzzle_offset;
    state.bullets.push(Bullet {
        id,
        pos,
        dir: FIRE_DIRECTION,
    });
    state.last_fire_ms = Some(now_ms);
    state.events.push(GameEvent::BulletFired { id, pos });
    Some(id)
}

fn advance_bullets(state: &mut GameState) {
    let speed = state.tuning.bullet_speed;
    for bullet in &mut state.bullets {
        bullet.pos += bullet.dir * speed;
    }
    state.bullets.retain(|b| in_play_field(b.pos));
}

fn resolve_bullet_hits(state: &mut GameState) {
    let radius = state.tuning.bullet_hit_radius;
    let mut points = 0;
    let enemies = &mut state.enemies;
    let events = &mut state.events;

    state.bullets.retain(|bullet| {
        let Some(idx) = first_enemy_hit(bullet.pos, enemies, radius) else {
            return true;
        };

        let enemy = &mut enemies[idx];
        enemy.health -= 1;
        if enemy.health <= 0 {
            let enemy = enemies.remove(idx);
            let award = enemy.kind.kill_score();
            points += award;
            log::debug!("Killed {} #{} (+{})", enemy.kind.as_str(), enemy.id, award);
            events.push(GameEvent::EnemyKilled {
                id: enemy.id,
                kind: enemy.kind,
                pos: enemy.pos,
                points: award,
            });
        } else {
            events.push(GameEvent::EnemyHit {
                id: enemy.id,
                kind: enemy.kind,
                health_left: enemy.health,
            });
        }
        // Bullet is spent either way
        false
    });

    state.add_score(points);
}

fn advance_enemies(state: &mut GameState) {
    let radius = state.tuning.contact_radius;
    let player_pos = state.player.pos;

    let mut idx = 0;
    while idx < state.enemies.len() {
        let enemy = &mut state.enemies[idx];
        let mut next = enemy.pos;
        next.x -= enemy.speed;

        if !within(next, player_pos, radius) {
            enemy.pos = next;
            idx += 1;
            continue;
        }

        // Contact: the enemy is destroyed in place instead of moving
        let enemy = state.enemies.remove(idx);
        let damage = enemy.kind.contact_damage();
        let points = enemy.kind.graze_score();
        log::debug!(
            "Grazed by {} #{} (-{} health, +{})",
            enemy.kind.as_str(),
            enemy.id,
            damage,
            points
        );
        state.events.push(GameEvent::PlayerGrazed {
            id: enemy.id,
            kind: enemy.kind,
            damage,
            points,
        });
        state.add_score(points);
        state.damage(damage);
        if !state.is_playing() {
            return;
        }
    }
}

fn reap_escaped(state: &mut GameState) {
    let events = &mut state.events;
    state.enemies.retain(|e| {
        if e.pos.x < -FIELD_HALF_WIDTH {
            log::trace!("Enemy #{} escaped", e.id);
            events.push(GameEvent::EnemyEscaped { id: e.id });
            false
        } else {
            true
        }
    });
}
