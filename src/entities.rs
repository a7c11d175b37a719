//! Game entity types and the master state record. Pure data, no logic.

use crate::consts::{
    FIRST_LEVEL_ENEMIES, FORMATION_SPEED, FORMATION_STEP_DOWN, STARTING_LIVES,
};
use crate::store::EntityStore;

/// Opaque handle for an enemy or projectile. The renderer maps these to
/// whatever it draws; the core never hands out references into its lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    /// Fixed after spawn.
    pub y: i32,
    /// Cleared when the game ends so the sprite is frozen out of the scene.
    pub alive: bool,
}

/// A live member of the formation. Dead enemies are removed from the
/// store rather than flagged.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ProjectileKind {
    #[default]
    Standard,
    /// Bigger, faster bolt enabled by the projectile-power cheat.
    Large,
}

impl ProjectileKind {
    /// Upward displacement per tick.
    pub fn speed(self) -> i32 {
        match self {
            ProjectileKind::Standard => 7,
            ProjectileKind::Large => 15,
        }
    }

    pub fn width(self) -> i32 {
        match self {
            ProjectileKind::Standard => 5,
            ProjectileKind::Large => 15,
        }
    }

    pub fn height(self) -> i32 {
        match self {
            ProjectileKind::Standard => 10,
            ProjectileKind::Large => 20,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ProjectileKind::Standard => ProjectileKind::Large,
            ProjectileKind::Large => ProjectileKind::Standard,
        }
    }
}

/// A player shot. `(x, y)` is the bolt's tip; the body hangs below it.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub x: i32,
    pub y: i32,
    /// Size and speed are fixed at fire time.
    pub kind: ProjectileKind,
}

// ── Motion & weapon state ─────────────────────────────────────────────────────

/// Shared motion of the whole formation. Every enemy moves by `velocity`
/// each tick; there is no per-enemy velocity.
#[derive(Clone, Debug, PartialEq)]
pub struct FormationMotion {
    /// Signed horizontal displacement per tick.
    pub velocity: i32,
    /// Magnitude applied when the formation bounces off a wall.
    pub speed: i32,
    pub step_down: i32,
}

impl Default for FormationMotion {
    fn default() -> Self {
        Self {
            velocity: FORMATION_SPEED,
            speed: FORMATION_SPEED,
            step_down: FORMATION_STEP_DOWN,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct Weapon {
    /// Ticks until the next shot is allowed.
    pub cooldown: u32,
    /// Preset used for shots fired from now on.
    pub kind: ProjectileKind,
}

// ── Progression ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// A level was just cleared. Ticking continues; only the notice is timed.
    LevelTransition { ticks_left: u32 },
    GameOver,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Progression {
    /// Always `POINTS_PER_KILL * kills`.
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// Kills since the game started. Never reset between levels.
    pub kills: u32,
    /// Size of the most recently spawned formation.
    pub formation_size: usize,
    pub phase: Phase,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            kills: 0,
            formation_size: FIRST_LEVEL_ENEMIES,
            phase: Phase::Playing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct PauseState {
    pub paused: bool,
    /// Boss-key overlay is up.
    pub boss_key: bool,
    /// Pause flag as it was when the overlay went up; restored when it comes down.
    pub paused_before_boss: bool,
}

// ── Leaderboard ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub username: String,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(username: impl Into<String>, score: u32) -> Self {
        Self {
            username: username.into(),
            score,
        }
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Notifications for the rendering and menu layers.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// Score, lives or level changed.
    Hud { score: u32, lives: u32, level: u32 },
    LevelUp(u32),
    GameOver(u32),
    LeaderboardUpdated(Vec<ScoreEntry>),
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state. Cloneable so the pure update functions in
/// `compute` can return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub username: String,
    pub store: EntityStore,
    pub formation: FormationMotion,
    pub weapon: Weapon,
    pub progression: Progression,
    pub pause: PauseState,
}

impl GameState {
    pub fn hud_event(&self) -> GameEvent {
        GameEvent::Hud {
            score: self.progression.score,
            lives: self.progression.lives,
            level: self.progression.level,
        }
    }

    pub fn is_over(&self) -> bool {
        self.progression.phase == Phase::GameOver
    }
}
