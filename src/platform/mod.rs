//! Platform layer
//!
//! Handles the native terminal side of the frame driver:
//! - Time/ticks (fixed-rate pacing)
//! - Input events (key mapping onto logical game events)
//! - Terminal teardown

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, PopKeyboardEnhancementFlags,
    },
    terminal,
};

use crate::sim::InputEvent;

/// Fixed-rate frame pacing.
///
/// Late frames are not made up: the next deadline is measured from when the
/// late frame finished, so a slow machine runs the game slower.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    frame: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let start = Instant::now();
        let frame = Duration::from_secs(1) / fps.max(1);
        Self {
            start,
            frame,
            next: start + frame,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Milliseconds since the clock was created
    pub fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Sleep until the next frame boundary
    pub fn wait_next_frame(&mut self) {
        let now = Instant::now();
        if now < self.next {
            std::thread::sleep(self.next - now);
            self.next += self.frame;
        } else {
            self.next = now + self.frame;
        }
    }
}

/// A key counts as still held if its last press arrived within this many
/// milliseconds. OS auto-repeat fires at 15 Hz or faster, so a held key keeps
/// refreshing the window while a fresh tap falls outside it.
pub const HOLD_WINDOW_MS: u64 = 100;

/// Maps terminal key events onto logical events.
///
/// When the terminal cannot report releases, a press stands in for both the
/// press and the release, and auto-repeated Space presses are dropped so a
/// held key flaps once.
#[derive(Debug, Clone, Copy)]
pub struct KeyMapper {
    reports_release: bool,
    /// Time of the last Space press seen, repeats included
    last_space_ms: Option<u64>,
}

impl KeyMapper {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            last_space_ms: None,
        }
    }

    /// Whether a Space press at `now_ms` is auto-repeat of a held key
    fn is_held(&self, now_ms: u64) -> bool {
        self.last_space_ms
            .map(|last| now_ms.saturating_sub(last) <= HOLD_WINDOW_MS)
            .unwrap_or(false)
    }

    pub fn map(&mut self, key: &KeyEvent, now_ms: u64, out: &mut Vec<InputEvent>) {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code != KeyCode::Char(' ') {
            self.last_space_ms = None;
        }
        match (key.code, key.kind) {
            _ if ctrl_c && key.kind == KeyEventKind::Press => out.push(InputEvent::Quit),
            (KeyCode::Esc | KeyCode::Char('q'), KeyEventKind::Press) => {
                out.push(InputEvent::Quit)
            }
            (KeyCode::Char(' '), KeyEventKind::Press) if self.reports_release => {
                out.push(InputEvent::JumpPress)
            }
            (KeyCode::Char(' '), KeyEventKind::Press) => {
                let held = self.is_held(now_ms);
                self.last_space_ms = Some(now_ms);
                if !held {
                    out.push(InputEvent::JumpPress);
                    out.push(InputEvent::JumpRelease);
                }
            }
            (KeyCode::Char(' '), KeyEventKind::Release) => out.push(InputEvent::JumpRelease),
            (KeyCode::Char('r' | 'R'), KeyEventKind::Press) if !self.reports_release => {
                out.push(InputEvent::RestartRelease)
            }
            (KeyCode::Char('r' | 'R'), KeyEventKind::Release) => {
                out.push(InputEvent::RestartRelease)
            }
            _ => {}
        }
    }
}

/// Non-blocking reader of terminal input
#[derive(Debug, Clone, Copy)]
pub struct InputPoller {
    mapper: KeyMapper,
}

impl InputPoller {
    pub fn new(reports_release: bool) -> Self {
        Self {
            mapper: KeyMapper::new(reports_release),
        }
    }

    /// Drain every pending terminal event without blocking
    pub fn poll(&mut self, now_ms: u64) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.mapper.map(&key, now_ms, &mut events);
            }
        }
        Ok(events)
    }
}

/// Undo terminal setup.
///
/// Every step runs even if an earlier one failed; the first error is returned.
pub fn restore_terminal<W: Write>(
    out: &mut W,
    reports_release: bool,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let mut first_err = None;
    let mut keep = |result: io::Result<()>| {
        if let Err(e) = result {
            first_err.get_or_insert(e);
        }
    };

    if reports_release {
        keep(out.execute(PopKeyboardEnhancementFlags).map(|_| ()));
    }
    keep(out.execute(cursor::Show).map(|_| ()));
    keep(out.execute(terminal::LeaveAlternateScreen).map(|_| ()));
    keep(disable_raw_mode());

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
