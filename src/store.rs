//! Entity Store: the player and the live enemy/projectile collections.
//!
//! Collections keep insertion order. Nothing else is implied by that order
//! except where a caller iterates it (collision picks the first match).

use crate::consts::{
    EDGE_MARGIN, FORMATION_ORIGIN_X, FORMATION_ORIGIN_Y, FORMATION_SPACING, HEIGHT,
    PLAYER_HEIGHT, WIDTH,
};
use crate::entities::{Enemy, EntityId, Player, Projectile, ProjectileKind};

#[derive(Clone, Debug)]
pub struct EntityStore {
    width: i32,
    player: Player,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new(WIDTH / 2, HEIGHT - PLAYER_HEIGHT)
    }
}

impl EntityStore {
    /// Empty store with the player at `(x, y)`.
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            width: WIDTH,
            player: Player { x, y, alive: true },
            enemies: Vec::new(),
            projectiles: Vec::new(),
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut [Projectile] {
        &mut self.projectiles
    }

    // ── Player ───────────────────────────────────────────────────────────────

    /// Shift the player horizontally, clamped to `[EDGE_MARGIN, width - EDGE_MARGIN]`.
    pub fn move_player(&mut self, dx: i32) {
        self.player.x = (self.player.x + dx).clamp(EDGE_MARGIN, self.width - EDGE_MARGIN);
    }

    pub fn set_player_alive(&mut self, alive: bool) {
        self.player.alive = alive;
    }

    // ── Spawning ─────────────────────────────────────────────────────────────

    /// Spawn `count` enemies in a row starting at the formation origin.
    pub fn spawn_enemy_row(&mut self, count: usize) -> Vec<EntityId> {
        (0..count as i32)
            .map(|i| {
                let x = FORMATION_ORIGIN_X + i * FORMATION_SPACING;
                self.spawn_enemy(x, FORMATION_ORIGIN_Y)
            })
            .collect()
    }

    pub fn spawn_enemy(&mut self, x: i32, y: i32) -> EntityId {
        let id = self.allocate_id();
        self.enemies.push(Enemy { id, x, y });
        id
    }

    pub fn spawn_projectile(&mut self, x: i32, y: i32, kind: ProjectileKind) -> EntityId {
        let id = self.allocate_id();
        self.projectiles.push(Projectile { id, x, y, kind });
        id
    }

    // ── Removal ──────────────────────────────────────────────────────────────

    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    pub fn remove_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        let index = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(index))
    }

    /// Drop every projectile for which `keep` returns false.
    pub fn retain_projectiles(&mut self, keep: impl FnMut(&Projectile) -> bool) {
        self.projectiles.retain(keep);
    }

    pub fn clear_projectiles(&mut self) {
        self.projectiles.clear();
    }

    pub fn clear_enemies(&mut self) {
        self.enemies.clear();
    }
}
