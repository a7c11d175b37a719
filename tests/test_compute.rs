use laser_invasion::compute::*;
use laser_invasion::entities::*;

fn make_state() -> GameState {
    new_game("tester")
}

/// State with a single enemy at `(x, y)` and nothing else in play.
fn lone_enemy(x: i32, y: i32) -> GameState {
    let mut s = make_state();
    s.store.clear_enemies();
    s.store.spawn_enemy(x, y);
    s
}

fn enemy_positions(s: &GameState) -> Vec<(i32, i32)> {
    s.store.enemies().iter().map(|e| (e.x, e.y)).collect()
}

fn projectile_positions(s: &GameState) -> Vec<(i32, i32)> {
    s.store.projectiles().iter().map(|p| (p.x, p.y)).collect()
}

// ── new_game ──────────────────────────────────────────────────────────────────

#[test]
fn new_game_player_position() {
    let s = make_state();
    assert_eq!(s.store.player().x, 300); // width / 2
    assert_eq!(s.store.player().y, 370); // height - 30
    assert!(s.store.player().alive);
    assert_eq!(s.username, "tester");
}

#[test]
fn new_game_spawns_first_formation() {
    let s = make_state();
    let expected: Vec<(i32, i32)> = (0..6).map(|i| (175 + 50 * i, 50)).collect();
    assert_eq!(enemy_positions(&s), expected);
    assert!(s.store.projectiles().is_empty());
    assert_eq!(s.progression, Progression::default());
}

// ── movement ──────────────────────────────────────────────────────────────────

#[test]
fn move_left_normal() {
    let s = make_state();
    let s2 = move_player_left(&s);
    assert_eq!(s2.store.player().x, 285); // step is 15
}

#[test]
fn move_right_normal() {
    let s = make_state();
    let s2 = move_player_right(&s);
    assert_eq!(s2.store.player().x, 315);
}

#[test]
fn move_does_not_mutate_original() {
    let s = make_state();
    let _s2 = move_player_left(&s);
    let _s3 = move_player_right(&s);
    assert_eq!(s.store.player().x, 300);
}

#[test]
fn move_ignored_while_paused() {
    let s = toggle_pause(&make_state());
    assert_eq!(move_player_left(&s).store.player().x, 300);
    assert_eq!(move_player_right(&s).store.player().x, 300);
}

#[test]
fn move_ignored_after_game_over() {
    let mut s = make_state();
    s.progression.phase = Phase::GameOver;
    assert_eq!(move_player_left(&s).store.player().x, 300);
}

// ── player_shoot ──────────────────────────────────────────────────────────────

#[test]
fn shoot_spawns_projectile_above_player() {
    let s = make_state();
    let s2 = player_shoot(&s);
    assert_eq!(projectile_positions(&s2), vec![(300, 355)]);
    assert_eq!(s2.store.projectiles()[0].kind, ProjectileKind::Standard);
    assert_eq!(s2.weapon.cooldown, 10);
}

#[test]
fn shoot_blocked_during_cooldown() {
    let s = player_shoot(&make_state());
    let s2 = player_shoot(&s);
    assert_eq!(s2.store.projectiles().len(), 1);
}

#[test]
fn shoot_allowed_again_after_ten_ticks() {
    let mut s = player_shoot(&make_state());
    for _ in 0..9 {
        s = tick(&s).state;
    }
    assert_eq!(s.weapon.cooldown, 1);
    let blocked = player_shoot(&s);
    assert_eq!(blocked.store.projectiles().len(), s.store.projectiles().len());

    s = tick(&s).state;
    assert_eq!(s.weapon.cooldown, 0);
    let count = s.store.projectiles().len();
    let fired = player_shoot(&s);
    assert_eq!(fired.store.projectiles().len(), count + 1);
}

#[test]
fn shoot_ignored_while_paused() {
    let s = toggle_pause(&make_state());
    let s2 = player_shoot(&s);
    assert!(s2.store.projectiles().is_empty());
    assert_eq!(s2.weapon.cooldown, 0);
}

#[test]
fn shoot_does_not_mutate_original() {
    let s = make_state();
    let _ = player_shoot(&s);
    assert!(s.store.projectiles().is_empty());
}

#[test]
fn shoot_uses_large_preset_after_cheat() {
    let s = cheat_bullets(&make_state());
    let s2 = player_shoot(&s);
    assert_eq!(s2.store.projectiles()[0].kind, ProjectileKind::Large);
}

// ── pause & boss key ──────────────────────────────────────────────────────────

#[test]
fn paused_tick_changes_nothing() {
    let mut s = player_shoot(&make_state());
    s = toggle_pause(&s);
    let result = tick(&s);
    assert_eq!(result.status, TickStatus::Running);
    assert!(result.events.is_empty());
    assert_eq!(enemy_positions(&result.state), enemy_positions(&s));
    assert_eq!(projectile_positions(&result.state), projectile_positions(&s));
    assert_eq!(result.state.progression, s.progression);
    assert_eq!(result.state.weapon, s.weapon);
    assert_eq!(result.state.formation, s.formation);
}

#[test]
fn boss_key_forces_pause_and_restores_unpaused() {
    let s = toggle_boss_key(&make_state());
    assert!(s.pause.boss_key);
    assert!(s.pause.paused);
    let s = toggle_boss_key(&s);
    assert!(!s.pause.boss_key);
    assert!(!s.pause.paused);
}

#[test]
fn boss_key_keeps_manual_pause() {
    let s = toggle_pause(&make_state());
    let s = toggle_boss_key(&s);
    assert!(s.pause.paused);
    let s = toggle_boss_key(&s);
    assert!(s.pause.paused, "player paused before the overlay; stay paused");
}

#[test]
fn pause_toggle_ignored_under_boss_key() {
    let s = toggle_boss_key(&make_state());
    let s = toggle_pause(&s);
    assert!(s.pause.paused);
    let s = toggle_boss_key(&s);
    assert!(!s.pause.paused);
}

// ── tick: projectiles ─────────────────────────────────────────────────────────

#[test]
fn tick_projectile_moves_up_by_its_speed() {
    let mut s = make_state();
    s.store.clear_enemies();
    s.store.spawn_enemy(300, 50);
    s.store.spawn_projectile(500, 300, ProjectileKind::Standard);
    s.store.spawn_projectile(100, 300, ProjectileKind::Large);
    let s2 = tick(&s).state;
    assert_eq!(projectile_positions(&s2), vec![(500, 293), (100, 285)]);
}

#[test]
fn tick_projectile_retired_below_ceiling() {
    let mut s = lone_enemy(300, 200);
    s.store.spawn_projectile(500, 47, ProjectileKind::Standard); // -> 40, kept
    s.store.spawn_projectile(520, 46, ProjectileKind::Standard); // -> 39, retired
    let s2 = tick(&s).state;
    assert_eq!(projectile_positions(&s2), vec![(500, 40)]);
}

// ── tick: formation ───────────────────────────────────────────────────────────

#[test]
fn tick_formation_sweeps_right() {
    let s = make_state();
    let s2 = tick(&s).state;
    let expected: Vec<(i32, i32)> = (0..6).map(|i| (187 + 50 * i, 50)).collect();
    assert_eq!(enemy_positions(&s2), expected);
}

#[test]
fn tick_left_margin_breach_flips_and_descends() {
    let mut s = lone_enemy(14, 100);
    s.store.spawn_enemy(64, 100);
    s.formation.velocity = -12;
    let s2 = tick(&s).state;
    assert_eq!(s2.formation.velocity, 12);
    assert_eq!(enemy_positions(&s2), vec![(26, 112), (76, 112)]);
}

// ── tick: collisions & score ──────────────────────────────────────────────────

#[test]
fn tick_projectile_kills_enemy_and_scores() {
    // Enemy moves to (312, 100); projectile moves to (312, 113).
    let mut s = lone_enemy(300, 100);
    s.store.spawn_enemy(300, 250);
    s.store.spawn_projectile(312, 120, ProjectileKind::Standard);
    let result = tick(&s);
    assert_eq!(result.state.store.enemies().len(), 1);
    assert!(result.state.store.projectiles().is_empty());
    assert_eq!(result.state.progression.kills, 1);
    assert_eq!(result.state.progression.score, 10);
    assert!(result
        .events
        .contains(&GameEvent::Hud { score: 10, lives: 3, level: 1 }));
}

#[test]
fn tick_score_tracks_kills() {
    let mut s = make_state();
    s.progression.kills = 4;
    s.progression.score = 40;
    s.store.clear_enemies();
    s.store.spawn_enemy(300, 100);
    s.store.spawn_enemy(400, 100);
    s.store.spawn_projectile(312, 120, ProjectileKind::Standard);
    s.store.spawn_projectile(412, 120, ProjectileKind::Standard);
    let s2 = tick(&s).state;
    assert_eq!(s2.progression.kills, 6);
    assert_eq!(s2.progression.score, 60);
    assert_eq!(s2.progression.score, 10 * s2.progression.kills);
}

#[test]
fn tick_enemy_reaching_player_costs_a_life() {
    // Bounce off the left wall drops the enemy from 340 to 352, past 370 - 26.
    let mut s = lone_enemy(14, 340);
    s.store.spawn_enemy(300, 100);
    let result = tick(&s);
    assert_eq!(result.state.progression.lives, 2);
    assert_eq!(result.state.store.enemies().len(), 1);
    assert!(result
        .events
        .contains(&GameEvent::Hud { score: 0, lives: 2, level: 1 }));
}

// ── tick: level transition ────────────────────────────────────────────────────

#[test]
fn tick_killing_last_enemy_levels_up() {
    let mut s = make_state();
    let extra: Vec<EntityId> = s.store.enemies()[1..].iter().map(|e| e.id).collect();
    for id in extra {
        s.store.remove_enemy(id);
    }
    s.progression.kills = 5;
    s.progression.score = 50;
    // Last enemy moves to (187, 50); this shot moves to (187, 65) and hits.
    s.store.spawn_projectile(187, 72, ProjectileKind::Standard);
    // A stray shot still in flight when the level ends.
    s.store.spawn_projectile(500, 300, ProjectileKind::Standard);

    let first = tick(&s);
    assert!(first.state.store.enemies().is_empty());
    assert_eq!(first.state.progression.score, 60);
    assert_eq!(first.state.store.projectiles().len(), 1);

    let second = tick(&first.state);
    assert_eq!(second.state.progression.level, 2);
    assert_eq!(second.state.store.enemies().len(), 8);
    assert!(second.state.store.projectiles().is_empty());
    assert_eq!(second.state.progression.formation_size, 8);
    assert!(second.events.contains(&GameEvent::LevelUp(2)));
    assert!(level_up_notice_visible(&second.state));
}

#[test]
fn level_up_notice_expires_without_blocking() {
    let mut s = make_state();
    s.store.clear_enemies();
    s = tick(&s).state;
    assert_eq!(s.progression.phase, Phase::LevelTransition { ticks_left: 50 });

    let before = enemy_positions(&s);
    s = tick(&s).state;
    assert_ne!(enemy_positions(&s), before, "simulation keeps running");

    for _ in 0..49 {
        s = tick(&s).state;
    }
    assert_eq!(s.progression.phase, Phase::Playing);
    assert!(!level_up_notice_visible(&s));
}

// ── tick: game over ───────────────────────────────────────────────────────────

#[test]
fn tick_game_over_when_lives_reach_zero() {
    let mut s = make_state();
    s.progression.lives = 0;
    s.progression.kills = 3;
    s.progression.score = 30;
    let before = enemy_positions(&s);

    let result = tick(&s);
    assert_eq!(result.status, TickStatus::Halted);
    assert_eq!(result.events, vec![GameEvent::GameOver(30)]);
    assert_eq!(result.state.progression.phase, Phase::GameOver);
    assert!(!result.state.store.player().alive);
    // Checked before anything moves.
    assert_eq!(enemy_positions(&result.state), before);
}

#[test]
fn tick_game_over_fires_once() {
    let mut s = make_state();
    s.progression.lives = 0;
    let over = tick(&s).state;
    let again = tick(&over);
    assert_eq!(again.status, TickStatus::Halted);
    assert!(again.events.is_empty());
}

#[test]
fn tick_game_over_checked_even_while_paused() {
    let mut s = toggle_pause(&make_state());
    s.progression.lives = 0;
    let result = tick(&s);
    assert_eq!(result.status, TickStatus::Halted);
    assert_eq!(result.events, vec![GameEvent::GameOver(0)]);
}

#[test]
fn tick_no_game_over_when_lives_above_zero() {
    let mut s = make_state();
    s.progression.lives = 1;
    let result = tick(&s);
    assert_eq!(result.status, TickStatus::Running);
    assert_eq!(result.state.progression.phase, Phase::Playing);
}

#[test]
fn tick_lives_saturate_at_zero() {
    // Three enemies break through with only one life left.
    let mut s = make_state();
    s.store.clear_enemies();
    for x in [100, 200, 300] {
        s.store.spawn_enemy(x, 350);
    }
    s.store.spawn_enemy(400, 100);
    s.progression.lives = 1;
    let s2 = tick(&s).state;
    assert_eq!(s2.progression.lives, 0);
}

// ── cheats ────────────────────────────────────────────────────────────────────

#[test]
fn cheat_lives_adds_three() {
    let s = cheat_lives(&make_state());
    assert_eq!(s.progression.lives, 6);
}

#[test]
fn cheat_lives_ignored_after_game_over() {
    let mut s = make_state();
    s.progression.lives = 0;
    s.progression.phase = Phase::GameOver;
    assert_eq!(cheat_lives(&s).progression.lives, 0);
}

#[test]
fn cheat_speed_compounds_towards_zero() {
    let s = cheat_speed(&make_state());
    assert_eq!(s.formation.speed, 2);
    assert_eq!(s.formation.velocity, 2);
    let s = cheat_speed(&s);
    assert_eq!(s.formation.speed, 0);
    assert_eq!(s.formation.velocity, 0);
}

#[test]
fn cheat_bullets_keeps_live_projectiles() {
    let s = player_shoot(&make_state());
    let s = cheat_bullets(&s);
    assert_eq!(s.weapon.kind, ProjectileKind::Large);
    assert_eq!(s.store.projectiles()[0].kind, ProjectileKind::Standard);
    let s = cheat_bullets(&s);
    assert_eq!(s.weapon.kind, ProjectileKind::Standard);
}
