//! Collision Resolver: shots against the formation, and the formation
//! against the player's line.

use crate::consts::{ENEMY_HEIGHT, ENEMY_WIDTH, PLAYER_REACH};
use crate::entities::{Enemy, EntityId, Progression, Projectile};
use crate::progression;
use crate::store::EntityStore;

/// Axis-aligned box with inclusive edges. `top < bottom` (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aabb {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Aabb {
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left <= other.right
            && other.left <= self.right
            && self.top <= other.bottom
            && other.top <= self.bottom
    }
}

/// Enemies are centred on their position.
pub fn enemy_box(enemy: &Enemy) -> Aabb {
    Aabb {
        left: enemy.x - ENEMY_WIDTH / 2,
        right: enemy.x + ENEMY_WIDTH / 2,
        top: enemy.y - ENEMY_HEIGHT / 2,
        bottom: enemy.y + ENEMY_HEIGHT / 2,
    }
}

/// A projectile's position is its tip; the body extends `height` below it.
pub fn projectile_box(projectile: &Projectile) -> Aabb {
    let half_width = projectile.kind.width() / 2;
    Aabb {
        left: projectile.x - half_width,
        right: projectile.x + half_width,
        top: projectile.y - projectile.kind.height(),
        bottom: projectile.y,
    }
}

/// Match every live projectile against the formation.
///
/// Each projectile kills at most the first overlapping enemy in collection
/// order; both are retired and the kill is credited. Returns the number of
/// kills this pass.
pub fn resolve_projectile_enemy_hits(
    store: &mut EntityStore,
    progression: &mut Progression,
) -> u32 {
    let shots: Vec<(EntityId, Aabb)> = store
        .projectiles()
        .iter()
        .map(|p| (p.id, projectile_box(p)))
        .collect();

    let mut kills = 0;
    for (shot_id, shot) in shots {
        let target = store
            .enemies()
            .iter()
            .find(|e| enemy_box(e).overlaps(&shot))
            .map(|e| e.id);

        if let Some(enemy_id) = target {
            store.remove_projectile(shot_id);
            store.remove_enemy(enemy_id);
            progression::record_kill(progression);
            kills += 1;
        }
    }
    kills
}

/// Retire every enemy that has dropped past the player's line and charge a
/// life for each. Horizontal alignment with the player is not considered.
/// Returns the number of enemies that got through.
pub fn resolve_player_boundary_hits(
    store: &mut EntityStore,
    progression: &mut Progression,
) -> u32 {
    let line = store.player().y - PLAYER_REACH;
    let breached: Vec<EntityId> = store
        .enemies()
        .iter()
        .filter(|e| e.y > line)
        .map(|e| e.id)
        .collect();

    for id in &breached {
        store.remove_enemy(*id);
        progression::lose_life(progression);
    }
    breached.len() as u32
}
