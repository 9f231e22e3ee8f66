mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use side_scroller::{Action, ActionSet, Command, Game, GameConfig};

use display::TerminalSurface;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the
/// OS key-repeat rate keeps refreshing it while the key is down.
const HOLD_WINDOW: Duration = Duration::from_millis(120);

#[derive(Parser)]
#[command(name = "side_scroller")]
#[command(about = "Side-scrolling runner in the terminal")]
struct Args {
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for enemy and pickup placement
    #[arg(long)]
    seed: Option<u64>,

    /// Start in debug mode (no game over, no energy cost)
    #[arg(long)]
    debug: bool,

    /// Where log output goes; the terminal itself is busy
    #[arg(long, default_value = "side_scroller.log")]
    log_file: PathBuf,
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn action_for(code: &KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::Char(' ') => Some(Action::Roll),
        _ => None,
    }
}

/// Actions whose key was seen within `HOLD_WINDOW`.
fn held_actions(key_seen: &HashMap<Action, Instant>, now: Instant) -> ActionSet {
    key_seen
        .iter()
        .filter(|&(_, &last)| now.duration_since(last) <= HOLD_WINDOW)
        .map(|(&action, _)| action)
        .collect()
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: every movement key maps to the instant its last press or
/// repeat arrived.  Each frame the still-fresh keys form the `ActionSet`,
/// so Space + arrows can be held together.  Keyboard-enhancement terminals
/// also send `Release`, which drops the key immediately.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut key_seen: HashMap<Action, Instant> = HashMap::new();
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    if let Some(action) = action_for(&code) {
                        key_seen.insert(action, frame_start);
                        continue;
                    }
                    if kind == KeyEventKind::Repeat {
                        continue;
                    }
                    match code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Char('q') if game.debug => game.command(Command::ClearEnemies),
                        KeyCode::Char('q') => return Ok(()),
                        KeyCode::Char('p') => game.command(Command::TogglePause),
                        KeyCode::Char('d') => game.command(Command::ToggleDebug),
                        KeyCode::Char('a') => game.command(Command::ToggleAudio),
                        KeyCode::Char('r') => {
                            key_seen.clear();
                            game.command(Command::Restart);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Release => {
                    if let Some(action) = action_for(&code) {
                        key_seen.remove(&action);
                    }
                }
            }
        }

        let delta_ms = frame_start.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = frame_start;

        if game.wants_ticks() {
            let input = held_actions(&key_seen, frame_start);
            game.update(delta_ms, &input);
        }

        let (cols, rows) = terminal::size()?;
        let mut surface = TerminalSurface::new(
            cols,
            rows,
            game.config.world.width,
            game.config.world.height,
            game.player.ground_y() + game.player.height,
        );
        game.draw(&mut surface);
        surface.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &PathBuf) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let mut game = Game::new(config).context("invalid config")?;
    game.debug = args.debug;
    info!(seed = ?game.config.seed, debug = game.debug, "starting run");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut game, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(
        score = game.ledger.score,
        victory = game.is_victory(),
        "run finished"
    );
    result.context("terminal I/O failed")
}
