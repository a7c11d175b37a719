//! Projectile Engine: firing under a cooldown, upward motion, and retiring
//! shots that reach the HUD band.

use crate::consts::{FIRE_COOLDOWN_TICKS, MUZZLE_OFFSET, PROJECTILE_CEILING};
use crate::entities::{EntityId, Weapon};
use crate::store::EntityStore;

/// Fire from the player's current position.
///
/// No-op while paused, while the player is dead, or while the cooldown is
/// still running. The new shot uses the weapon's current preset.
pub fn fire(store: &mut EntityStore, weapon: &mut Weapon, paused: bool) -> Option<EntityId> {
    let player = store.player();
    if paused || !player.alive || weapon.cooldown > 0 {
        return None;
    }
    let (x, y) = (player.x, player.y - MUZZLE_OFFSET);
    let id = store.spawn_projectile(x, y, weapon.kind);
    weapon.cooldown = FIRE_COOLDOWN_TICKS;
    Some(id)
}

/// Move every projectile up by its own speed and drop the ones that are now
/// above the ceiling. Returns how many were retired.
pub fn advance(store: &mut EntityStore) -> usize {
    for projectile in store.projectiles_mut() {
        projectile.y -= projectile.kind.speed();
    }
    let before = store.projectiles().len();
    store.retain_projectiles(|p| p.y >= PROJECTILE_CEILING);
    before - store.projectiles().len()
}

pub fn tick_cooldown(weapon: &mut Weapon) {
    weapon.cooldown = weapon.cooldown.saturating_sub(1);
}

/// Swap between the standard and large presets for future shots.
pub fn toggle_power(weapon: &mut Weapon) {
    weapon.kind = weapon.kind.toggled();
}
