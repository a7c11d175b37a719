use laser_invasion::compute::new_game;
use laser_invasion::entities::*;
use laser_invasion::store::EntityStore;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(ProjectileKind::Standard, ProjectileKind::Standard);
    assert_ne!(ProjectileKind::Standard, ProjectileKind::Large);
    assert_eq!(Phase::Playing, Phase::Playing);
    assert_ne!(Phase::Playing, Phase::GameOver);
    assert_ne!(
        Phase::LevelTransition { ticks_left: 1 },
        Phase::LevelTransition { ticks_left: 2 }
    );

    let kind = ProjectileKind::Large;
    assert_eq!(kind.clone(), ProjectileKind::Large);
}

#[test]
fn projectile_presets() {
    let standard = ProjectileKind::Standard;
    assert_eq!((standard.speed(), standard.width(), standard.height()), (7, 5, 10));
    let large = ProjectileKind::Large;
    assert_eq!((large.speed(), large.width(), large.height()), (15, 15, 20));
    assert_eq!(standard.toggled(), large);
    assert_eq!(large.toggled(), standard);
}

#[test]
fn defaults_match_a_fresh_game() {
    let progression = Progression::default();
    assert_eq!(progression.score, 0);
    assert_eq!(progression.lives, 3);
    assert_eq!(progression.level, 1);
    assert_eq!(progression.kills, 0);
    assert_eq!(progression.formation_size, 6);
    assert_eq!(progression.phase, Phase::Playing);

    let motion = FormationMotion::default();
    assert_eq!((motion.velocity, motion.speed, motion.step_down), (12, 12, 12));

    assert_eq!(Weapon::default().cooldown, 0);
    assert_eq!(PauseState::default(), PauseState {
        paused: false,
        boss_key: false,
        paused_before_boss: false,
    });
}

#[test]
fn game_state_clone_is_independent() {
    let original = new_game("ace");
    let mut cloned = original.clone();

    cloned.store.move_player(15);
    cloned.progression.score = 999;
    cloned.store.clear_enemies();
    cloned.store.spawn_projectile(10, 100, ProjectileKind::Standard);

    assert_eq!(original.store.player().x, 300);
    assert_eq!(original.progression.score, 0);
    assert_eq!(original.store.enemies().len(), 6);
    assert!(original.store.projectiles().is_empty());
}

#[test]
fn hud_event_reflects_progression() {
    let mut state = new_game("ace");
    state.progression.score = 40;
    state.progression.kills = 4;
    state.progression.lives = 2;
    state.progression.level = 3;
    assert_eq!(state.hud_event(), GameEvent::Hud { score: 40, lives: 2, level: 3 });
    assert!(!state.is_over());
    state.progression.phase = Phase::GameOver;
    assert!(state.is_over());
}

// ── Entity Store ──────────────────────────────────────────────────────────────

#[test]
fn store_spawns_enemy_row_at_formation_origin() {
    let mut store = EntityStore::default();
    let ids = store.spawn_enemy_row(6);
    assert_eq!(ids.len(), 6);
    let positions: Vec<(i32, i32)> = store.enemies().iter().map(|e| (e.x, e.y)).collect();
    assert_eq!(
        positions,
        vec![(175, 50), (225, 50), (275, 50), (325, 50), (375, 50), (425, 50)]
    );
}

#[test]
fn store_ids_are_unique_across_kinds() {
    let mut store = EntityStore::default();
    let a = store.spawn_enemy(10, 10);
    let b = store.spawn_projectile(10, 10, ProjectileKind::Standard);
    let c = store.spawn_enemy(20, 20);
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn store_removes_by_id() {
    let mut store = EntityStore::default();
    let first = store.spawn_enemy(100, 50);
    let second = store.spawn_enemy(150, 50);
    let shot = store.spawn_projectile(100, 200, ProjectileKind::Standard);

    let removed = store.remove_enemy(first).expect("enemy present");
    assert_eq!((removed.x, removed.y), (100, 50));
    assert_eq!(store.enemies().len(), 1);
    assert_eq!(store.enemies()[0].id, second);
    assert!(store.remove_enemy(first).is_none());

    assert!(store.remove_projectile(shot).is_some());
    assert!(store.projectiles().is_empty());
}

#[test]
fn store_clears_collections() {
    let mut store = EntityStore::default();
    store.spawn_enemy_row(4);
    store.spawn_projectile(300, 300, ProjectileKind::Large);
    store.clear_enemies();
    store.clear_projectiles();
    assert!(store.enemies().is_empty());
    assert!(store.projectiles().is_empty());
}

#[test]
fn store_player_movement_is_clamped() {
    let mut store = EntityStore::new(30, 370);
    store.move_player(-15);
    assert_eq!(store.player().x, 15);
    store.move_player(-15);
    assert_eq!(store.player().x, 15);

    let mut store = EntityStore::new(570, 370);
    store.move_player(15);
    assert_eq!(store.player().x, 585);
    store.move_player(15);
    assert_eq!(store.player().x, 585);
    assert_eq!(store.player().y, 370);
}
