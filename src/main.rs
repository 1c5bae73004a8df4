//! Gray Dodge entry point
//!
//! Runs the game in the terminal. Logs go to stderr, so run with
//! `RUST_LOG=debug gray-dodge 2>game.log` to keep them out of the picture.

use std::io::{Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal,
};

use gray_dodge::persistence::JsonFileStore;
use gray_dodge::platform::{ScreenGuard, TerminalFrontend};
use gray_dodge::sim::{Direction, GamePhase};
use gray_dodge::{GameConfig, Session, format_score};

/// Default best score file, overridable with `GRAY_DODGE_SCORES`
const SCORES_FILE: &str = "best_score.json";
/// Largest jump of the game clock per frame; a stalled terminal resumes
/// instead of replaying the missed ticks
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);
/// Input poll / redraw cadence
const FRAME_POLL: Duration = Duration::from_millis(5);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => GameConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => GameConfig::default(),
    };

    let seed = config.seed.unwrap_or_else(clock_seed);
    let scores = std::env::var("GRAY_DODGE_SCORES")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SCORES_FILE));
    let store = JsonFileStore::new(scores);
    log::info!("Gray Dodge starting (scores in {})", store.path().display());

    let session = Session::new(config, store, seed)?;

    // Restores the terminal on every exit path, panics included
    let mut screen = ScreenGuard::enter(stdout())?;
    run(session, screen.out())
}

fn run(mut session: Session<JsonFileStore>, out: &mut impl Write) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut ui = TerminalFrontend::new(session.arena().surface(), cols, rows);

    let mut clock = Duration::ZERO;
    let mut clock_ms: u64 = 0;
    let mut last = Instant::now();
    session.show_main_menu(clock_ms, &mut ui);

    loop {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Up => session.steer(Direction::Up),
                    KeyCode::Down => session.steer(Direction::Down),
                    KeyCode::Left => session.steer(Direction::Left),
                    KeyCode::Right => session.steer(Direction::Right),
                    KeyCode::Enter | KeyCode::Char(' ') => match session.phase() {
                        GamePhase::Menu => session.start_game(clock_ms, &mut ui),
                        GamePhase::Ended => session.show_main_menu(clock_ms, &mut ui),
                        GamePhase::Running => {}
                    },
                    KeyCode::Esc if session.phase() == GamePhase::Running => {
                        session.show_main_menu(clock_ms, &mut ui);
                    }
                    _ => {}
                },
                Event::Resize(c, r) => ui.resize(c, r),
                _ => {}
            }
        }

        let now = Instant::now();
        clock += now.duration_since(last).min(MAX_FRAME_GAP);
        clock_ms = clock.as_millis() as u64;
        last = now;

        if session.advance(clock_ms, &mut ui) > 0 {
            let status = match session.elapsed_ms(clock_ms) {
                Some(ms) => format_score(ms),
                None => String::new(),
            };
            ui.set_status(status);
        }
        // A resize repaints even when no timer is running (game over)
        if ui.needs_redraw() {
            ui.present(out)?;
        }

        std::thread::sleep(FRAME_POLL);
    }
}

/// Seed from the wall clock when the config does not pin one
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
