//! Game Clock: the fixed-interval scheduler and the session it drives.
//!
//! `GameSession` owns the simulation state and is the only thing that calls
//! `compute::tick`. Input is applied through its methods between ticks, so a
//! tick always sees a consistent state.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{error, info};

use crate::compute::{self, TickStatus};
use crate::consts::LEADERBOARD_SIZE;
use crate::entities::{GameEvent, GameState, ScoreEntry};
use crate::error::PersistenceError;
use crate::input::Action;
use crate::persistence::{self, ScoreBoard, Snapshot};

// ── Scheduler ────────────────────────────────────────────────────────────────

/// Fixed-rate tick scheduler. It keeps running while the game is paused;
/// the pause gate lives in the tick itself.
#[derive(Debug, Clone)]
pub struct Clock {
    interval: Duration,
    next: Instant,
}

impl Clock {
    /// First tick is due one interval after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True if a tick is due at `now`; schedules the next one. If the caller
    /// fell more than a whole interval behind, the backlog is dropped rather
    /// than replayed.
    pub fn tick_due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }

    pub fn time_until_next(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

// ── Session ──────────────────────────────────────────────────────────────────

pub struct GameSession {
    state: GameState,
    status: TickStatus,
    snapshot_path: PathBuf,
    scoreboard: Box<dyn ScoreBoard>,
    events: Vec<GameEvent>,
    last_error: Option<PersistenceError>,
}

impl GameSession {
    pub fn new(
        username: &str,
        snapshot_path: impl Into<PathBuf>,
        scoreboard: Box<dyn ScoreBoard>,
    ) -> Self {
        let state = compute::new_game(username);
        let events = vec![state.hud_event()];
        Self {
            state,
            status: TickStatus::Running,
            snapshot_path: snapshot_path.into(),
            scoreboard,
            events,
            last_error: None,
        }
    }

    /// Start a session from the snapshot at `snapshot_path`.
    pub fn resume(
        snapshot_path: impl Into<PathBuf>,
        scoreboard: Box<dyn ScoreBoard>,
    ) -> Result<Self, PersistenceError> {
        let snapshot_path = snapshot_path.into();
        let state = persistence::load_snapshot(&snapshot_path)?.restore();
        let events = vec![state.hud_event()];
        Ok(Self {
            state,
            status: TickStatus::Running,
            snapshot_path,
            scoreboard,
            events,
            last_error: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> TickStatus {
        self.status
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    /// Run one tick. Once the game is over this returns `Halted` without
    /// doing anything, so the leaderboard is written exactly once.
    pub fn tick(&mut self) -> TickStatus {
        if self.status == TickStatus::Halted {
            return TickStatus::Halted;
        }

        let result = compute::tick(&self.state);
        self.state = result.state;
        self.status = result.status;

        for event in result.events {
            let final_score = match event {
                GameEvent::GameOver(score) => Some(score),
                _ => None,
            };
            self.events.push(event);
            if let Some(score) = final_score {
                self.record_result(score);
            }
        }
        self.status
    }

    fn record_result(&mut self, score: u32) {
        let entry = ScoreEntry::new(self.state.username.clone(), score);
        let outcome = self
            .scoreboard
            .append(&entry)
            .and_then(|_| self.scoreboard.top(LEADERBOARD_SIZE));
        match outcome {
            Ok(top) => self.events.push(GameEvent::LeaderboardUpdated(top)),
            Err(e) => {
                error!("could not record score: {e}");
                self.last_error = Some(e);
            }
        }
    }

    /// Replace the state through a pure transition and report HUD changes.
    fn update(&mut self, transition: fn(&GameState) -> GameState) {
        let next = transition(&self.state);
        if compute::hud_changed(&self.state.progression, &next.progression) {
            self.events.push(next.hud_event());
        }
        self.state = next;
    }

    // ── Player commands ──────────────────────────────────────────────────────

    pub fn move_left(&mut self) {
        self.update(compute::move_player_left);
    }

    pub fn move_right(&mut self) {
        self.update(compute::move_player_right);
    }

    pub fn fire(&mut self) {
        self.update(compute::player_shoot);
    }

    pub fn toggle_pause(&mut self) {
        self.update(compute::toggle_pause);
    }

    pub fn toggle_boss_key(&mut self) {
        self.update(compute::toggle_boss_key);
    }

    pub fn grant_lives(&mut self) {
        self.update(compute::cheat_lives);
    }

    pub fn slow_formation(&mut self) {
        self.update(compute::cheat_speed);
    }

    pub fn toggle_projectile_power(&mut self) {
        self.update(compute::cheat_bullets);
    }

    /// Dispatch a routed action. Only `Save` can fail.
    pub fn apply(&mut self, action: Action) -> Result<(), PersistenceError> {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Fire => self.fire(),
            Action::Pause => self.toggle_pause(),
            Action::CheatLives => self.grant_lives(),
            Action::CheatSpeed => self.slow_formation(),
            Action::CheatBullets => self.toggle_projectile_power(),
            Action::BossKey => self.toggle_boss_key(),
            Action::Save => self.save()?,
        }
        Ok(())
    }

    // ── Save / load / reset ──────────────────────────────────────────────────

    pub fn save(&self) -> Result<(), PersistenceError> {
        persistence::save_snapshot(&self.snapshot_path, &Snapshot::capture(&self.state))
    }

    /// Replace the running game with the saved one. On any error the current
    /// game is left exactly as it was.
    pub fn load(&mut self) -> Result<(), PersistenceError> {
        let snapshot = persistence::load_snapshot(&self.snapshot_path)?;
        self.state = snapshot.restore();
        self.status = TickStatus::Running;
        self.events.push(self.state.hud_event());
        Ok(())
    }

    /// Start over: new entities, score 0, three lives, level 1.
    pub fn reset(&mut self, username: &str) {
        info!("new game for {username}");
        self.state = compute::new_game(username);
        self.status = TickStatus::Running;
        self.events.push(self.state.hud_event());
    }

    // ── Outputs ──────────────────────────────────────────────────────────────

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Leaderboard write failures from the game-over transition.
    pub fn take_error(&mut self) -> Option<PersistenceError> {
        self.last_error.take()
    }

    pub fn leaderboard(&self) -> Result<Vec<ScoreEntry>, PersistenceError> {
        self.scoreboard.top(LEADERBOARD_SIZE)
    }
}
