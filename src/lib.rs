//! Laser Invasion: a fixed-tick arcade shooter.
//!
//! The simulation core (`entities` through `clock`) has no terminal
//! dependencies; `display` and the binary are the only crossterm users.

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod formation;
pub mod input;
pub mod persistence;
pub mod progression;
pub mod projectile;
pub mod store;

/// Playfield geometry and tuning, in pixel units.
pub mod consts {
    pub const WIDTH: i32 = 600;
    pub const HEIGHT: i32 = 400;

    pub const PLAYER_HEIGHT: i32 = 30;
    /// Horizontal distance covered by one move command.
    pub const PLAYER_STEP: i32 = 15;

    /// Enemies and the player are kept this far from the side walls.
    pub const EDGE_MARGIN: i32 = 15;

    pub const ENEMY_WIDTH: i32 = 40;
    pub const ENEMY_HEIGHT: i32 = 40;
    pub const FORMATION_ORIGIN_X: i32 = 175;
    pub const FORMATION_ORIGIN_Y: i32 = 50;
    pub const FORMATION_SPACING: i32 = 50;
    pub const FORMATION_SPEED: i32 = 12;
    pub const FORMATION_STEP_DOWN: i32 = 12;

    /// Projectiles spawn this far above the player's centre.
    pub const MUZZLE_OFFSET: i32 = 15;
    /// Projectiles above this line are behind the HUD and get retired.
    pub const PROJECTILE_CEILING: i32 = 40;
    pub const FIRE_COOLDOWN_TICKS: u32 = 10;

    /// An enemy below `player.y - PLAYER_REACH` has reached the player.
    pub const PLAYER_REACH: i32 = 26;

    pub const STARTING_LIVES: u32 = 3;
    pub const CHEAT_EXTRA_LIVES: u32 = 3;
    pub const CHEAT_SLOW_DIVISOR: i32 = 5;
    pub const POINTS_PER_KILL: u32 = 10;
    pub const FIRST_LEVEL_ENEMIES: usize = 6;

    pub const TICK_MS: u64 = 40;
    /// 2000 ms at 40 ms per tick.
    pub const LEVEL_UP_NOTICE_TICKS: u32 = 50;

    pub const LEADERBOARD_SIZE: usize = 5;
}
