//! Rendering layer. All terminal I/O for the playfield lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! pixel-space state into terminal cells.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use rand::Rng;

use crate::compute::level_up_notice_visible;
use crate::consts::{HEIGHT, WIDTH};
use crate::entities::{
    Enemy, GameEvent, GameState, Projectile, ProjectileKind, ScoreEntry,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Magenta;
const C_LASER: Color = Color::Blue;
const C_LASER_LARGE: Color = Color::Cyan;
const C_STAR: Color = Color::DarkGrey;
const C_NOTICE: Color = Color::Yellow;
const C_GAME_OVER: Color = Color::Red;
const C_BOSS_TEXT: Color = Color::Grey;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal area the 600x400 playfield is scaled onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Map a playfield position to a terminal cell, clamped on screen.
    pub fn cell(&self, x: i32, y: i32) -> (u16, u16) {
        let col = (x.clamp(0, WIDTH - 1) as i64 * self.cols as i64 / WIDTH as i64) as u16;
        let row = (y.clamp(0, HEIGHT - 1) as i64 * self.rows as i64 / HEIGHT as i64) as u16;
        (col, row)
    }

    fn centre_col(&self, text: &str) -> u16 {
        (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2)
    }
}

// ── HUD model ─────────────────────────────────────────────────────────────────

/// Last values reported through `GameEvent::Hud`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}

impl Hud {
    pub fn apply(&mut self, event: &GameEvent) {
        if let GameEvent::Hud {
            score,
            lives,
            level,
        } = *event
        {
            *self = Hud {
                score,
                lives,
                level,
            };
        }
    }
}

// ── Background ────────────────────────────────────────────────────────────────

/// Scattered background stars, fixed for the duration of a game.
#[derive(Clone, Debug, Default)]
pub struct Starfield {
    pub stars: Vec<(u16, u16)>,
}

impl Starfield {
    /// Roughly one star per 40 cells, kept off the HUD row.
    pub fn new(viewport: Viewport, rng: &mut impl Rng) -> Self {
        let count = (viewport.cols as usize * viewport.rows as usize) / 40;
        let stars = if viewport.rows < 2 {
            Vec::new()
        } else {
            (0..count)
                .map(|_| {
                    (
                        rng.gen_range(0..viewport.cols),
                        rng.gen_range(1..viewport.rows),
                    )
                })
                .collect()
        };
        Self { stars }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Everything besides the game state that a frame needs.
pub struct Frame<'a> {
    pub viewport: Viewport,
    pub hud: &'a Hud,
    pub starfield: &'a Starfield,
    /// Shown on the game-over screen.
    pub leaderboard: &'a [ScoreEntry],
    /// One-line status message for the bottom row, e.g. a failed save.
    pub message: Option<&'a str>,
}

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState, frame: &Frame) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if state.pause.boss_key {
        draw_boss_screen(out, frame.viewport)?;
        out.flush()?;
        return Ok(());
    }

    draw_starfield(out, frame.starfield)?;
    draw_hud(out, frame)?;

    for enemy in state.store.enemies() {
        draw_enemy(out, frame.viewport, enemy)?;
    }
    for projectile in state.store.projectiles() {
        draw_projectile(out, frame.viewport, projectile)?;
    }
    if state.store.player().alive {
        draw_player(out, frame.viewport, state)?;
    }

    if state.is_over() {
        draw_game_over(out, frame)?;
    } else if state.pause.paused {
        draw_notice(out, frame.viewport, "Game Paused", 3)?;
    } else if level_up_notice_visible(state) {
        draw_notice(out, frame.viewport, "Level Up!", 0)?;
    }

    if let Some(message) = frame.message {
        out.queue(cursor::MoveTo(1, frame.viewport.rows.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_NOTICE))?;
        out.queue(Print(message))?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, frame.viewport.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Background & HUD ──────────────────────────────────────────────────────────

fn draw_starfield<W: Write>(out: &mut W, starfield: &Starfield) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_STAR))?;
    for &(col, row) in &starfield.stars {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("."))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let hud = frame.hud;
    out.queue(style::SetForegroundColor(C_HUD))?;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!("Score: {}", hud.score)))?;

    let level = format!("Level: {}", hud.level);
    out.queue(cursor::MoveTo(frame.viewport.centre_col(&level), 0))?;
    out.queue(Print(&level))?;

    let lives = format!("Lives: {}", hud.lives);
    let col = frame
        .viewport
        .cols
        .saturating_sub(lives.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(Print(&lives))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    viewport: Viewport,
    state: &GameState,
) -> std::io::Result<()> {
    // Sprite (2 rows, 3 cols):
    //   ▲
    //  /|\
    let p = state.store.player();
    let (col, row) = viewport.cell(p.x, p.y);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(Print("▲"))?;
    if row + 1 < viewport.rows {
        out.queue(cursor::MoveTo(col.saturating_sub(1), row + 1))?;
        out.queue(Print("/|\\"))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, viewport: Viewport, enemy: &Enemy) -> std::io::Result<()> {
    // Row 0:  <▼>
    // Row 1:  /"\
    let (col, row) = viewport.cell(enemy.x, enemy.y);
    let left = col.saturating_sub(1);
    out.queue(style::SetForegroundColor(C_ENEMY))?;
    out.queue(cursor::MoveTo(left, row))?;
    out.queue(Print("<▼>"))?;
    if row + 1 < viewport.rows {
        out.queue(cursor::MoveTo(left, row + 1))?;
        out.queue(Print("/\"\\"))?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    viewport: Viewport,
    projectile: &Projectile,
) -> std::io::Result<()> {
    let (col, row) = viewport.cell(projectile.x, projectile.y);
    out.queue(cursor::MoveTo(col, row))?;
    match projectile.kind {
        ProjectileKind::Standard => {
            out.queue(style::SetForegroundColor(C_LASER))?;
            out.queue(Print("|"))?;
        }
        ProjectileKind::Large => {
            out.queue(style::SetForegroundColor(C_LASER_LARGE))?;
            out.queue(Print("║"))?;
        }
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

/// Centred message, `lift` rows above the middle of the screen.
fn draw_notice<W: Write>(
    out: &mut W,
    viewport: Viewport,
    text: &str,
    lift: u16,
) -> std::io::Result<()> {
    let row = (viewport.rows / 2).saturating_sub(lift);
    out.queue(cursor::MoveTo(viewport.centre_col(text), row))?;
    out.queue(style::SetForegroundColor(C_NOTICE))?;
    out.queue(Print(text))?;
    Ok(())
}

fn draw_game_over<W: Write>(out: &mut W, frame: &Frame) -> std::io::Result<()> {
    let viewport = frame.viewport;
    let score_line = format!("Final Score: {}", frame.hud.score);
    let mut lines: Vec<(String, Color)> = vec![
        ("GAME OVER".to_string(), C_GAME_OVER),
        (score_line, C_NOTICE),
        (String::new(), C_HUD),
        ("Leaderboard".to_string(), C_NOTICE),
    ];
    for (i, entry) in frame.leaderboard.iter().enumerate() {
        lines.push((format!("{}. {}: {}", i + 1, entry.username, entry.score), C_HUD));
    }
    lines.push((String::new(), C_HUD));
    lines.push(("R - Play Again  Q - Quit".to_string(), Color::White));

    let start_row = (viewport.rows / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(viewport.centre_col(text), start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

const BOSS_SCREEN: &[&str] = &[
    "src/ledger/reconcile.rs",
    "",
    "pub fn reconcile(batch: &[Txn], books: &mut Ledger) -> Result<Summary, LedgerError> {",
    "    let mut summary = Summary::default();",
    "    for txn in batch {",
    "        let account = books.account_mut(txn.account_id)?;",
    "        account.post(txn.amount, txn.posted_at)?;",
    "        summary.posted += 1;",
    "        if account.balance() < account.overdraft_limit() {",
    "            summary.flagged.push(txn.account_id);",
    "        }",
    "    }",
    "    books.close_period()?;",
    "    Ok(summary)",
    "}",
    "",
    "   Compiling ledger v0.4.2",
    "    Finished dev [unoptimized + debuginfo] target(s) in 3.71s",
];

/// Full-screen decoy listing shown while the boss key is active.
fn draw_boss_screen<W: Write>(out: &mut W, viewport: Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_BOSS_TEXT))?;
    for (i, line) in BOSS_SCREEN.iter().enumerate().take(viewport.rows as usize) {
        out.queue(cursor::MoveTo(0, i as u16))?;
        out.queue(Print(*line))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}
