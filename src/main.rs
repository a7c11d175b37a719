use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use laser_invasion::clock::{Clock, GameSession};
use laser_invasion::compute::TickStatus;
use laser_invasion::config::GameConfig;
use laser_invasion::consts::LEADERBOARD_SIZE;
use laser_invasion::display::{self, Frame, Hud, Starfield, Viewport};
use laser_invasion::entities::{GameEvent, ScoreEntry};
use laser_invasion::input::{Action, InputRouter, Key};
use laser_invasion::persistence::{FileScoreBoard, ScoreBoard};

const MAX_USERNAME: usize = 16;

/// Actions offered on the settings screen.
const REMAPPABLE: [Action; 3] = [Action::MoveLeft, Action::MoveRight, Action::Fire];

fn viewport() -> std::io::Result<Viewport> {
    let (cols, rows) = terminal::size()?;
    Ok(Viewport::new(cols, rows))
}

/// Next key press (or auto-repeat) from the event thread. `None` once the
/// thread has gone away.
fn next_key(rx: &mpsc::Receiver<Event>) -> Option<KeyEvent> {
    loop {
        match rx.recv() {
            Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => return Some(key),
            Ok(_) => continue,
            Err(_) => return None,
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

fn print_centered<W: Write>(
    out: &mut W,
    vp: Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (vp.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(String),
    Load,
    Settings,
    Quit,
}

fn draw_menu<W: Write>(
    out: &mut W,
    username: &str,
    leaderboard: &[ScoreEntry],
    message: Option<&str>,
) -> std::io::Result<()> {
    let vp = viewport()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let top = vp.rows / 8;
    print_centered(out, vp, top, "LASER  INVASION", Color::Red)?;

    print_centered(out, vp, top + 2, "Leaderboard", Color::Yellow)?;
    for (i, entry) in leaderboard.iter().enumerate() {
        let line = format!("{}. {}: {}", i + 1, entry.username, entry.score);
        print_centered(out, vp, top + 3 + i as u16, &line, Color::Green)?;
    }

    let form = top + 4 + LEADERBOARD_SIZE as u16;
    print_centered(out, vp, form, &format!("Enter Username: {username}_"), Color::White)?;
    print_centered(
        out,
        vp,
        form + 2,
        "Enter : Start   F2 : Load Game   F3 : Settings   Esc : Quit",
        Color::DarkGrey,
    )?;
    if let Some(message) = message {
        print_centered(out, vp, form + 4, message, Color::Red)?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    scoreboard: &FileScoreBoard,
    mut message: Option<String>,
) -> std::io::Result<MenuResult> {
    let leaderboard = scoreboard.top(LEADERBOARD_SIZE).unwrap_or_else(|e| {
        log::warn!("leaderboard unavailable: {e}");
        Vec::new()
    });
    let mut username = String::new();

    loop {
        draw_menu(out, &username, &leaderboard, message.as_deref())?;
        let Some(key) = next_key(rx) else {
            return Ok(MenuResult::Quit);
        };
        if is_interrupt(&key) {
            return Ok(MenuResult::Quit);
        }
        match key.code {
            KeyCode::Esc => return Ok(MenuResult::Quit),
            KeyCode::F(2) => return Ok(MenuResult::Load),
            KeyCode::F(3) => return Ok(MenuResult::Settings),
            KeyCode::Enter => {
                let name = username.trim();
                if name.is_empty() {
                    message = Some("Enter a valid username".to_string());
                } else {
                    return Ok(MenuResult::Start(name.to_string()));
                }
            }
            KeyCode::Backspace => {
                username.pop();
            }
            KeyCode::Char(c) if !c.is_control() && username.chars().count() < MAX_USERNAME => {
                username.push(c);
            }
            _ => {}
        }
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

fn show_settings<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &mut GameConfig,
) -> std::io::Result<()> {
    let mut selected: Option<Action> = None;

    loop {
        let vp = viewport()?;
        out.queue(terminal::Clear(terminal::ClearType::All))?;
        let top = vp.rows / 4;
        print_centered(out, vp, top, "Game Settings", Color::Yellow)?;
        for (i, action) in REMAPPABLE.iter().enumerate() {
            let key = config
                .bindings
                .key_for(*action)
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string());
            let marker = if selected == Some(*action) { ">" } else { " " };
            let line = format!("{marker} [{}] {:<12} {:>8}", i + 1, action.label(), key);
            print_centered(out, vp, top + 2 + i as u16, &line, Color::White)?;
        }
        let hint = match selected {
            Some(_) => "Press the new key",
            None => "1-3 : Choose action   Esc : Save keybinds",
        };
        print_centered(out, vp, top + 6, hint, Color::DarkGrey)?;
        out.queue(style::ResetColor)?;
        out.flush()?;

        let Some(key) = next_key(rx) else {
            return Ok(());
        };
        match selected.take() {
            Some(action) => {
                if let Some(new_key) = Key::from_key_code(key.code) {
                    config.bindings.bind(action, new_key);
                    log::info!("bound {:?} to {}", action, new_key);
                }
            }
            None => match key.code {
                KeyCode::Esc => {
                    config.save();
                    return Ok(());
                }
                KeyCode::Char(c @ '1'..='3') => {
                    selected = Some(REMAPPABLE[(c as u8 - b'1') as usize]);
                }
                _ => {}
            },
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum LoopExit {
    Quit,
    Menu(Option<String>),
}

/// Runs one game until the player quits, saves, or leaves the game-over
/// screen.
///
/// Input is drained between ticks so the session never sees a key in the
/// middle of a tick. The clock keeps its cadence while the game is paused.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    router: &InputRouter,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<LoopExit> {
    let mut rng = thread_rng();
    let mut vp = viewport()?;
    let mut starfield = Starfield::new(vp, &mut rng);
    let mut hud = Hud::default();
    let mut leaderboard: Vec<ScoreEntry> = Vec::new();
    let mut message: Option<String> = None;
    let mut clock = Clock::new(config.tick_interval(), Instant::now());

    loop {
        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            if is_interrupt(&key) || key.code == KeyCode::Esc {
                return Ok(LoopExit::Quit);
            }

            if session.status() == TickStatus::Halted {
                match key.code {
                    KeyCode::Char('r') | KeyCode::Char('R') => return Ok(LoopExit::Menu(None)),
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(LoopExit::Quit),
                    _ => continue,
                }
            }

            let Some(action) = router.route(key.code) else { continue };
            match session.apply(action) {
                Ok(()) if action == Action::Save => {
                    return Ok(LoopExit::Menu(Some("Game saved".to_string())));
                }
                Ok(()) => {}
                Err(e) => {
                    log::error!("save failed: {e}");
                    message = Some(format!("Save failed: {e}"));
                }
            }
        }

        // ── Tick ──────────────────────────────────────────────────────────────
        if clock.tick_due(Instant::now()) {
            session.tick();
        }

        for event in session.drain_events() {
            hud.apply(&event);
            match event {
                GameEvent::LevelUp(level) => log::info!("reached level {level}"),
                GameEvent::GameOver(score) => log::info!("final score {score}"),
                GameEvent::LeaderboardUpdated(top) => leaderboard = top,
                GameEvent::Hud { .. } => {}
            }
        }
        if let Some(e) = session.take_error() {
            message = Some(format!("Leaderboard not saved: {e}"));
        }

        // ── Render ────────────────────────────────────────────────────────────
        let current = viewport()?;
        if current != vp {
            vp = current;
            starfield = Starfield::new(vp, &mut rng);
        }
        let frame = Frame {
            viewport: vp,
            hud: &hud,
            starfield: &starfield,
            leaderboard: &leaderboard,
            message: message.as_deref(),
        };
        display::render(out, session.state(), &frame)?;

        thread::sleep(clock.time_until_next(Instant::now()));
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-repeat reporting where the terminal supports it; others fall back
    // to plain presses.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads run on their own thread and arrive over a channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut config = GameConfig::load();
    let scoreboard = FileScoreBoard::new(config.leaderboard_path.clone());
    let mut session: Option<GameSession> = None;
    let mut message: Option<String> = None;

    loop {
        match show_menu(out, rx, &scoreboard, message.take())? {
            MenuResult::Quit => break,
            MenuResult::Settings => {
                show_settings(out, rx, &mut config)?;
                continue;
            }
            MenuResult::Start(name) => match session.as_mut() {
                Some(s) => s.reset(&name),
                None => {
                    session = Some(GameSession::new(
                        &name,
                        config.snapshot_path.clone(),
                        Box::new(scoreboard.clone()),
                    ))
                }
            },
            MenuResult::Load => {
                let loaded = match session.as_mut() {
                    Some(s) => s.load(),
                    None => GameSession::resume(
                        config.snapshot_path.clone(),
                        Box::new(scoreboard.clone()),
                    )
                    .map(|s| session = Some(s)),
                };
                if let Err(e) = loaded {
                    log::warn!("load failed: {e}");
                    message = Some(format!("Could not load game: {e}"));
                    continue;
                }
            }
        }

        let Some(active) = session.as_mut() else {
            continue;
        };
        let router = InputRouter::new(config.bindings.clone());
        match game_loop(out, active, &router, &config, rx)? {
            LoopExit::Quit => break,
            LoopExit::Menu(note) => message = note,
        }
    }
    Ok(())
}
