//! Flappy entry point
//!
//! Sets up the terminal and runs the fixed-rate frame loop.

use std::io::{self, Stdout};
use std::path::Path;

use crossterm::{
    ExecutableCommand, cursor,
    event::{KeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal,
};

use flappy::consts::SETTINGS_FILE;
use flappy::platform::{FrameClock, InputPoller, restore_terminal};
use flappy::renderer::{Frame, TerminalPresenter};
use flappy::sim::{GameState, TickInput, tick};
use flappy::{JsonFileStore, Settings};

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Flappy starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let mut store = JsonFileStore::new(settings.score_file.clone());

    let mut stdout = io::stdout();
    let reports_release = enter_terminal(&mut stdout)?;
    let result = run(&mut stdout, settings, &mut store, reports_release);

    // Always restore the terminal; a failed run takes precedence
    let restored = restore_terminal(&mut stdout, reports_release, terminal::disable_raw_mode);
    if let Err(e) = &restored {
        log::warn!("Terminal restore incomplete: {e}");
    }

    log::info!("Flappy exiting");
    result.and(restored)
}

/// Raw mode, alternate screen, hidden cursor. Returns whether key releases
/// will be reported. A failure partway leaves the terminal as it was.
fn enter_terminal(stdout: &mut Stdout) -> io::Result<bool> {
    terminal::enable_raw_mode()?;
    let reports_release = terminal::supports_keyboard_enhancement().unwrap_or(false);
    if let Err(e) = enter_screen(stdout, reports_release) {
        let _ = restore_terminal(stdout, reports_release, terminal::disable_raw_mode);
        return Err(e);
    }
    if !reports_release {
        log::info!("Terminal does not report key releases; presses count as releases");
    }
    Ok(reports_release)
}

fn enter_screen(stdout: &mut Stdout, reports_release: bool) -> io::Result<()> {
    stdout.execute(terminal::EnterAlternateScreen)?;
    stdout.execute(cursor::Hide)?;
    if reports_release {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    Ok(())
}

fn run(
    stdout: &mut Stdout,
    settings: Settings,
    store: &mut JsonFileStore,
    reports_release: bool,
) -> io::Result<()> {
    let mut clock = FrameClock::new(settings.fps);
    let mut input = InputPoller::new(reports_release);
    let mut presenter = TerminalPresenter::new();
    let mut state = GameState::new(settings, store, clock.now_ms());

    loop {
        let events = input.poll(clock.now_ms())?;
        let output = tick(
            &mut state,
            store,
            &TickInput {
                now_ms: clock.now_ms(),
                events,
            },
        );
        if output.quit {
            return Ok(());
        }

        presenter.present(stdout, &Frame::from_snapshot(&output.snapshot))?;
        clock.wait_next_frame();
    }
}
