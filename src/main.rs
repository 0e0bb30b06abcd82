//! Terminal memory game (default binary).
//!
//! crossterm for input, the framebuffer renderer for output, and a local
//! JSON leaderboard under the data directory.

use std::fs::{self, OpenOptions};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use memory_match::input::{handle_key_event, should_quit};
use memory_match::store::{FileStorage, KeyedScoreStore, ScoreStore};
use memory_match::term::{FrameBuffer, TerminalRenderer, Viewport};
use memory_match::{App, AppConfig};

/// Poll interval; also the granularity of the clock fed to the game.
const FRAME_MS: u64 = 50;

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!(
        "starting on {} (data dir {})",
        config.difficulty,
        config.data_dir.display()
    );

    let store = KeyedScoreStore::new(FileStorage::new(&config.data_dir));
    let mut app = App::new(config.difficulty, store);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

/// Log to a file: the terminal itself is in raw alternate-screen mode.
fn init_logging(config: &AppConfig) -> Result<()> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating log directory {}", parent.display()))?;
        }
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("opening log file {}", config.log_path.display()))?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .format_timestamp_millis()
    .try_init()?;
    Ok(())
}

fn run<S: ScoreStore>(term: &mut TerminalRenderer, app: &mut App<S>) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS);
    let mut fb = FrameBuffer::new(0, 0);
    let mut size = (0, 0);
    let mut last = Instant::now();

    loop {
        let current = crossterm::terminal::size().unwrap_or((80, 24));
        let resized = current != size;
        if resized {
            size = current;
            term.invalidate();
        }
        if app.surface_mut().take_dirty() || resized {
            app.compose(Viewport::new(size.0, size.1), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        if event::poll(frame)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.handle_input(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Whole milliseconds only; the remainder carries into the next frame.
        let elapsed_ms = last.elapsed().as_millis().min(u32::MAX as u128) as u32;
        last += Duration::from_millis(elapsed_ms as u64);
        app.tick(elapsed_ms);
    }
}
