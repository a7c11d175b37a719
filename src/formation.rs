//! Formation Controller: the enemy block sweeps side to side as one rigid
//! body and steps down whenever any member touches a wall.

use crate::consts::EDGE_MARGIN;
use crate::entities::FormationMotion;
use crate::store::EntityStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
}

/// Which wall, if any, the formation is touching. Left is checked first and
/// wins when both are touched in the same tick.
pub fn touching_wall(store: &EntityStore) -> Option<Wall> {
    let enemies = store.enemies();
    if enemies.iter().any(|e| e.x <= EDGE_MARGIN) {
        Some(Wall::Left)
    } else if enemies.iter().any(|e| e.x >= store.width() - EDGE_MARGIN) {
        Some(Wall::Right)
    } else {
        None
    }
}

/// Advance the formation by one tick.
///
/// The wall test uses positions from before this tick's move. On a hit every
/// enemy steps down and the velocity is pointed away from that wall; then
/// every enemy moves horizontally by the (possibly new) velocity.
///
/// Returns the wall that was bounced off, if any.
pub fn advance(store: &mut EntityStore, motion: &mut FormationMotion) -> Option<Wall> {
    let wall = touching_wall(store);

    if let Some(wall) = wall {
        motion.velocity = match wall {
            Wall::Left => motion.speed,
            Wall::Right => -motion.speed,
        };
        for enemy in store.enemies_mut() {
            enemy.y += motion.step_down;
        }
    }

    for enemy in store.enemies_mut() {
        enemy.x += motion.velocity;
    }

    wall
}

/// Divide the sweep speed by `divisor`, truncating and keeping the current
/// direction. Repeated calls compound and bottom out at a stationary formation.
pub fn slow_down(motion: &mut FormationMotion, divisor: i32) {
    motion.speed /= divisor;
    motion.velocity = motion.velocity.signum() * (motion.velocity.abs() / divisor);
}
