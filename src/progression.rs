//! Progression Controller: score, lives, levels, and the
//! Playing / LevelTransition / GameOver phase machine.

use log::info;

use crate::consts::{
    CHEAT_EXTRA_LIVES, CHEAT_SLOW_DIVISOR, FIRST_LEVEL_ENEMIES, LEVEL_UP_NOTICE_TICKS,
    POINTS_PER_KILL,
};
use crate::entities::{FormationMotion, Phase, Progression, Weapon};
use crate::formation;
use crate::projectile;
use crate::store::EntityStore;

// ── Difficulty table ─────────────────────────────────────────────────────────

/// Formation size spawned on entering `level`.
pub fn enemies_for_level(level: u32) -> usize {
    match level {
        0 | 1 => FIRST_LEVEL_ENEMIES,
        2 => 8,
        3 => 9,
        _ => 10,
    }
}

// ── Score & lives ────────────────────────────────────────────────────────────

/// Credit one kill. The score is rebuilt from the kill count rather than
/// bumped.
pub fn record_kill(progression: &mut Progression) {
    progression.kills = progression.kills.saturating_add(1);
    progression.score = POINTS_PER_KILL.saturating_mul(progression.kills);
}

pub fn lose_life(progression: &mut Progression) {
    progression.lives = progression.lives.saturating_sub(1);
}

// ── Phase transitions ────────────────────────────────────────────────────────

/// True exactly once per game: lives are gone and the game has not ended yet.
pub fn should_end(progression: &Progression) -> bool {
    progression.lives == 0 && progression.phase != Phase::GameOver
}

/// Enter GameOver and take the player out of play.
pub fn end_game(progression: &mut Progression, store: &mut EntityStore) {
    progression.phase = Phase::GameOver;
    store.set_player_alive(false);
    info!(
        "game over at level {} with score {}",
        progression.level, progression.score
    );
}

/// If the formation is wiped out, move to the next level: clear shots in
/// flight, spawn a bigger row, and start the level-up notice.
///
/// Returns the new level when a transition happened.
pub fn advance_level_if_cleared(
    progression: &mut Progression,
    store: &mut EntityStore,
) -> Option<u32> {
    if !store.enemies().is_empty() || progression.phase == Phase::GameOver {
        return None;
    }

    progression.level = progression.level.saturating_add(1);
    store.clear_projectiles();

    let count = enemies_for_level(progression.level);
    store.spawn_enemy_row(count);
    progression.formation_size = count;
    progression.phase = Phase::LevelTransition {
        ticks_left: LEVEL_UP_NOTICE_TICKS,
    };

    info!("level {} ({} enemies)", progression.level, count);
    Some(progression.level)
}

/// Count down the level-up notice; back to Playing once it expires.
pub fn tick_notice(progression: &mut Progression) {
    if let Phase::LevelTransition { ticks_left } = progression.phase {
        progression.phase = match ticks_left.saturating_sub(1) {
            0 => Phase::Playing,
            left => Phase::LevelTransition { ticks_left: left },
        };
    }
}

// ── Cheats ───────────────────────────────────────────────────────────────────

pub fn grant_lives(progression: &mut Progression) {
    progression.lives = progression.lives.saturating_add(CHEAT_EXTRA_LIVES);
}

/// Divides the sweep speed by five. There is no floor: enough calls stop
/// the formation from moving sideways altogether.
pub fn slow_formation(motion: &mut FormationMotion) {
    formation::slow_down(motion, CHEAT_SLOW_DIVISOR);
}

/// Live projectiles keep the preset they were fired with.
pub fn toggle_projectile_power(weapon: &mut Weapon) {
    projectile::toggle_power(weapon);
}
