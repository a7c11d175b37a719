//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` and returns a brand-new one. Nothing here touches the clock,
//! the filesystem or the terminal.

use crate::collision;
use crate::consts::{FIRST_LEVEL_ENEMIES, PLAYER_STEP};
use crate::entities::{
    FormationMotion, GameEvent, GameState, PauseState, Phase, Progression, Weapon,
};
use crate::formation;
use crate::progression;
use crate::projectile;
use crate::store::EntityStore;

// ── Constructors ─────────────────────────────────────────────────────────────

/// A fresh game: player centred at the bottom, three lives, level 1 and the
/// opening row of six enemies.
pub fn new_game(username: &str) -> GameState {
    let mut store = EntityStore::default();
    store.spawn_enemy_row(FIRST_LEVEL_ENEMIES);
    GameState {
        username: username.to_string(),
        store,
        formation: FormationMotion::default(),
        weapon: Weapon::default(),
        progression: Progression::default(),
        pause: PauseState::default(),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Movement and firing are frozen while paused and after the game ends.
fn controls_locked(state: &GameState) -> bool {
    state.pause.paused || state.is_over()
}

pub fn move_player_left(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !controls_locked(state) {
        next.store.move_player(-PLAYER_STEP);
    }
    next
}

pub fn move_player_right(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !controls_locked(state) {
        next.store.move_player(PLAYER_STEP);
    }
    next
}

/// Fire a projectile from the player, subject to the cooldown.
pub fn player_shoot(state: &GameState) -> GameState {
    let mut next = state.clone();
    projectile::fire(&mut next.store, &mut next.weapon, state.pause.paused);
    next
}

/// Flip the player's own pause flag. Ignored while the boss-key overlay is
/// up (the overlay owns the flag until it is dismissed) and after game over.
pub fn toggle_pause(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !state.pause.boss_key && !state.is_over() {
        next.pause.paused = !state.pause.paused;
    }
    next
}

/// Raise or dismiss the boss-key overlay. Raising it forces a pause;
/// dismissing it puts the pause flag back the way the player left it.
pub fn toggle_boss_key(state: &GameState) -> GameState {
    let mut next = state.clone();
    let pause = &mut next.pause;
    if pause.boss_key {
        pause.boss_key = false;
        pause.paused = pause.paused_before_boss;
    } else {
        pause.paused_before_boss = pause.paused;
        pause.boss_key = true;
        pause.paused = true;
    }
    next
}

// ── Cheats ───────────────────────────────────────────────────────────────────

pub fn cheat_lives(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !state.is_over() {
        progression::grant_lives(&mut next.progression);
    }
    next
}

pub fn cheat_speed(state: &GameState) -> GameState {
    let mut next = state.clone();
    progression::slow_formation(&mut next.formation);
    next
}

pub fn cheat_bullets(state: &GameState) -> GameState {
    let mut next = state.clone();
    progression::toggle_projectile_power(&mut next.weapon);
    next
}

// ── Per-tick update ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    /// The game is over; the clock should stop calling `tick`.
    Halted,
}

#[derive(Clone, Debug)]
pub struct TickResult {
    pub state: GameState,
    pub events: Vec<GameEvent>,
    pub status: TickStatus,
}

/// Advance the simulation by one tick.
///
/// Order: game-over check, pause gate, level transition, projectiles,
/// formation, projectile/enemy hits, enemy/player hits, weapon cooldown.
pub fn tick(state: &GameState) -> TickResult {
    let mut next = state.clone();
    let mut events = Vec::new();

    // ── 1. Game over ─────────────────────────────────────────────────────────
    if next.is_over() {
        return TickResult {
            state: next,
            events,
            status: TickStatus::Halted,
        };
    }
    if progression::should_end(&next.progression) {
        progression::end_game(&mut next.progression, &mut next.store);
        events.push(GameEvent::GameOver(next.progression.score));
        return TickResult {
            state: next,
            events,
            status: TickStatus::Halted,
        };
    }

    // ── 2. Pause gate ────────────────────────────────────────────────────────
    if next.pause.paused {
        return TickResult {
            state: next,
            events,
            status: TickStatus::Running,
        };
    }

    // ── 3. Level transition ──────────────────────────────────────────────────
    progression::tick_notice(&mut next.progression);
    let cleared = progression::advance_level_if_cleared(&mut next.progression, &mut next.store);
    if let Some(level) = cleared {
        events.push(GameEvent::LevelUp(level));
    }

    // ── 4. Movement ──────────────────────────────────────────────────────────
    projectile::advance(&mut next.store);
    formation::advance(&mut next.store, &mut next.formation);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    collision::resolve_projectile_enemy_hits(&mut next.store, &mut next.progression);
    collision::resolve_player_boundary_hits(&mut next.store, &mut next.progression);

    // ── 6. Cooldown ──────────────────────────────────────────────────────────
    projectile::tick_cooldown(&mut next.weapon);

    if hud_changed(&state.progression, &next.progression) {
        events.push(next.hud_event());
    }

    TickResult {
        state: next,
        events,
        status: TickStatus::Running,
    }
}

pub fn hud_changed(before: &Progression, after: &Progression) -> bool {
    before.score != after.score || before.lives != after.lives || before.level != after.level
}

/// Whether the level-up notice should be on screen.
pub fn level_up_notice_visible(state: &GameState) -> bool {
    matches!(state.progression.phase, Phase::LevelTransition { .. })
}
