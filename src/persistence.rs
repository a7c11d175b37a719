//! Persistence Gateway: save/load of a game snapshot, and the append-only
//! leaderboard.
//!
//! Both files are plain line-oriented text. A snapshot is:
//!
//! ```text
//! username
//! playerX,playerY
//! score
//! lives
//! level
//! enemyCount
//! killCount
//! x,y        (one line per enemy)
//! END
//! x,y        (one line per projectile)
//! END
//! ```
//!
//! The leaderboard is one `username,score` line per finished game.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};

use crate::consts::POINTS_PER_KILL;
use crate::entities::{
    FormationMotion, GameState, PauseState, Phase, Progression, ProjectileKind, ScoreEntry,
    Weapon,
};
use crate::error::{PersistenceError, SnapshotError};
use crate::store::EntityStore;

pub const END_MARKER: &str = "END";

// ── Snapshot ─────────────────────────────────────────────────────────────────

/// Everything needed to resume a game. Pause, overlay, cooldown, cheat and
/// formation-velocity state are not part of it.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub username: String,
    pub player: (i32, i32),
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// Size of the formation spawned for the current level.
    pub enemy_count: usize,
    pub kills: u32,
    pub enemies: Vec<(i32, i32)>,
    pub projectiles: Vec<(i32, i32)>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = state.store.player();
        Self {
            username: state.username.clone(),
            player: (player.x, player.y),
            score: state.progression.score,
            lives: state.progression.lives,
            level: state.progression.level,
            enemy_count: state.progression.formation_size,
            kills: state.progression.kills,
            enemies: state.store.enemies().iter().map(|e| (e.x, e.y)).collect(),
            projectiles: state.store.projectiles().iter().map(|p| (p.x, p.y)).collect(),
        }
    }

    /// Rebuild a running, unpaused game from this snapshot. Entities get
    /// fresh ids; projectiles come back with the standard preset.
    pub fn restore(&self) -> GameState {
        let mut store = EntityStore::new(self.player.0, self.player.1);
        for &(x, y) in &self.enemies {
            store.spawn_enemy(x, y);
        }
        for &(x, y) in &self.projectiles {
            store.spawn_projectile(x, y, ProjectileKind::Standard);
        }

        GameState {
            username: self.username.clone(),
            store,
            formation: FormationMotion::default(),
            weapon: Weapon::default(),
            progression: Progression {
                score: self.score,
                lives: self.lives,
                level: self.level,
                kills: self.kills,
                formation_size: self.enemy_count,
                phase: Phase::Playing,
            },
            pause: PauseState::default(),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", single_line(&self.username)));
        out.push_str(&format!("{},{}\n", self.player.0, self.player.1));
        out.push_str(&format!("{}\n", self.score));
        out.push_str(&format!("{}\n", self.lives));
        out.push_str(&format!("{}\n", self.level));
        out.push_str(&format!("{}\n", self.enemy_count));
        out.push_str(&format!("{}\n", self.kills));
        for (x, y) in &self.enemies {
            out.push_str(&format!("{x},{y}\n"));
        }
        out.push_str(END_MARKER);
        out.push('\n');
        for (x, y) in &self.projectiles {
            out.push_str(&format!("{x},{y}\n"));
        }
        out.push_str(END_MARKER);
        out.push('\n');
        out
    }

    /// Parse snapshot text. Nothing is applied anywhere; the caller gets a
    /// complete snapshot or an error.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        let mut lines = NumberedLines::new(text);

        let (_, username) = lines.field("username")?;
        let player = lines.pair("player position")?;
        let score = lines.number("score")?;
        let lives = lines.number("lives")?;
        let level = lines.number("level")?;
        let enemy_count = lines.number("enemy count")?;
        let kills: u32 = lines.number("kill count")?;
        let enemies = lines.pair_list("enemy")?;
        let projectiles = lines.pair_list("projectile")?;

        if POINTS_PER_KILL.checked_mul(kills) != Some(score) {
            return Err(SnapshotError::ScoreMismatch { score, kills });
        }

        Ok(Self {
            username: username.to_string(),
            player,
            score,
            lives,
            level,
            enemy_count,
            kills,
            enemies,
            projectiles,
        })
    }
}

/// Line cursor that remembers 1-based line numbers for error messages.
struct NumberedLines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> NumberedLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.lines().enumerate(),
        }
    }

    fn field(&mut self, name: &'static str) -> Result<(usize, &'a str), SnapshotError> {
        self.inner
            .next()
            .map(|(i, line)| (i + 1, line))
            .ok_or(SnapshotError::MissingLine(name))
    }

    fn number<T: FromStr>(&mut self, name: &'static str) -> Result<T, SnapshotError> {
        let (line, value) = self.field(name)?;
        parse_number(line, value)
    }

    fn pair(&mut self, name: &'static str) -> Result<(i32, i32), SnapshotError> {
        let (line, value) = self.field(name)?;
        parse_pair(line, value)
    }

    /// `x,y` lines up to and including the END marker.
    fn pair_list(&mut self, name: &'static str) -> Result<Vec<(i32, i32)>, SnapshotError> {
        let mut items = Vec::new();
        loop {
            let (line, value) = self
                .inner
                .next()
                .map(|(i, line)| (i + 1, line))
                .ok_or(SnapshotError::MissingEnd(name))?;
            if value.trim() == END_MARKER {
                return Ok(items);
            }
            items.push(parse_pair(line, value)?);
        }
    }
}

/// Line breaks in a name would shift every later line of the file.
fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

fn parse_number<T: FromStr>(line: usize, value: &str) -> Result<T, SnapshotError> {
    value.trim().parse().map_err(|_| SnapshotError::BadNumber {
        line,
        value: value.to_string(),
    })
}

fn parse_pair(line: usize, value: &str) -> Result<(i32, i32), SnapshotError> {
    let bad = || SnapshotError::BadPair {
        line,
        value: value.to_string(),
    };
    let (x, y) = value.trim().split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse().map_err(|_| bad())?;
    let y = y.trim().parse().map_err(|_| bad())?;
    Ok((x, y))
}

pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), PersistenceError> {
    fs::write(path, snapshot.to_text()).map_err(|e| PersistenceError::io(path, e))?;
    info!(
        "saved game for {} to {} ({} enemies, {} projectiles)",
        snapshot.username,
        path.display(),
        snapshot.enemies.len(),
        snapshot.projectiles.len()
    );
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot, PersistenceError> {
    let text = fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
    if text.trim().is_empty() {
        return Err(PersistenceError::Empty(path.to_path_buf()));
    }
    let snapshot = Snapshot::parse(&text)?;
    info!("loaded game for {} from {}", snapshot.username, path.display());
    Ok(snapshot)
}

// ── Leaderboard ──────────────────────────────────────────────────────────────

/// Append-only store of finished games.
pub trait ScoreBoard {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), PersistenceError>;

    /// Best `n` entries, highest score first. Equal scores keep the order
    /// they were appended in.
    fn top(&self, n: usize) -> Result<Vec<ScoreEntry>, PersistenceError>;
}

/// Stable descending sort by score, truncated to `n`.
pub fn rank(mut entries: Vec<ScoreEntry>, n: usize) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(n);
    entries
}

/// Leaderboard backed by a text file, one `username,score` per line.
#[derive(Debug, Clone)]
pub struct FileScoreBoard {
    path: PathBuf,
}

impl FileScoreBoard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every parseable entry in file order. A missing file is an empty board.
    pub fn entries(&self) -> Result<Vec<ScoreEntry>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        let mut entries = Vec::new();
        for (i, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_score_line(line) {
                Some(entry) => entries.push(entry),
                None => warn!(
                    "{}:{}: skipping unreadable leaderboard line {:?}",
                    self.path.display(),
                    i + 1,
                    line
                ),
            }
        }
        Ok(entries)
    }
}

/// The score is after the last comma so names may contain commas.
fn parse_score_line(line: &str) -> Option<ScoreEntry> {
    let (name, score) = line.trim().rsplit_once(',')?;
    let score = score.trim().parse().ok()?;
    Some(ScoreEntry::new(name, score))
}

impl ScoreBoard for FileScoreBoard {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), PersistenceError> {
        let name = single_line(&entry.username);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e))?;
        writeln!(file, "{},{}", name, entry.score)
            .map_err(|e| PersistenceError::io(&self.path, e))?;
        info!("leaderboard: {} scored {}", name, entry.score);
        Ok(())
    }

    fn top(&self, n: usize) -> Result<Vec<ScoreEntry>, PersistenceError> {
        Ok(rank(self.entries()?, n))
    }
}

/// In-memory leaderboard, used when no file is wanted.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreBoard {
    pub entries: Vec<ScoreEntry>,
}

impl MemoryScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreBoard for MemoryScoreBoard {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), PersistenceError> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn top(&self, n: usize) -> Result<Vec<ScoreEntry>, PersistenceError> {
        Ok(rank(self.entries.clone(), n))
    }
}
