use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use thiserror::Error;

use space_game::audio::{AudioCue, Bell, Silent};
use space_game::compute::{handle_key, init_state, resize, tick};
use space_game::display::{self, Starfield, Viewport};
use space_game::input::{Key, KeyRepeatFilter};
use space_game::settings::SettingsError;
use space_game::Settings;

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Map a terminal key to a game key.  Quit keys are handled separately.
fn game_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Char(' ') => Some(Key::Fire),
        KeyCode::Esc => Some(Key::Pause),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Logs go to the configured file; a terminal game cannot write to stderr.
fn init_logging(settings: &Settings) -> std::io::Result<()> {
    let Some(path) = &settings.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key arrives or the input thread goes away.
///
/// The loop is the single owner of the game state: input events queue up
/// in the channel and are drained at the start of each frame, so nothing
/// ever mutates the state concurrently.
fn game_loop<W: Write>(
    out: &mut W,
    settings: &Settings,
    reports_release: bool,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut audio: Box<dyn AudioCue> = if settings.bell {
        Box::new(Bell)
    } else {
        Box::new(Silent)
    };

    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, settings.cell_width, settings.cell_height);
    let mut state = init_state(view.playfield(), settings.scoring, &mut rng);
    let mut stars = Starfield::default();
    let mut keys = if reports_release {
        KeyRepeatFilter::reporting_releases()
    } else {
        KeyRepeatFilter::new(settings.hold_window_ticks())
    };
    let frame_time = Duration::from_millis(settings.tick_interval_ms);
    let mut frame: u64 = 0;

    log::info!(
        "Starting on a {}x{} playfield",
        state.playfield.width,
        state.playfield.height
    );

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            let ev = match rx.try_recv() {
                Ok(ev) => ev,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return Ok(()),
            };
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                    if is_quit(code, modifiers) {
                        return Ok(());
                    }
                    let Some(key) = game_key(code) else { continue };
                    if let Some(edge) = keys.feed(key, kind, frame) {
                        state = handle_key(&state, edge, audio.as_mut());
                    }
                }
                Event::Resize(cols, rows) => {
                    view = Viewport::new(cols, rows, settings.cell_width, settings.cell_height);
                    state = resize(&state, view.playfield());
                }
                _ => {}
            }
        }

        for edge in keys.expire(frame) {
            state = handle_key(&state, edge, audio.as_mut());
        }

        state = tick(&state, &mut rng);
        stars.advance(state.paused);

        display::render(out, &state, &view, &stars)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    let settings = Settings::load(&Settings::default_path())?;
    init_logging(&settings)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Terminals without the kitty protocol fall back to hold-window expiry.
    // The query reads stdin, so it must run before the input thread starts.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    log::debug!("Keyboard enhancement: {}", keyboard_enhanced);

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("Input thread stopped: {}", e);
                break;
            }
        }
    });

    let result = game_loop(&mut out, &settings, keyboard_enhanced, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(AppError::from)
}
