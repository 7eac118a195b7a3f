//! Terminal session for the browser
//!
//! Owns raw mode and the alternate screen, and turns crossterm input into
//! the three things the app reacts to: key presses, resizes and ticks.

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};

/// Input the main loop acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// The tick interval elapsed
    Tick,
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    tick_rate: Duration,
    last_tick: Instant,
    /// Raw mode and alternate screen are currently on
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;
        Ok(Self {
            terminal,
            tick_rate: Duration::from_millis(100),
            last_tick: Instant::now(),
            active: false,
        })
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        self.active = true;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)
            .context("Failed to setup terminal")?;
        self.terminal.clear()?;
        self.last_tick = Instant::now();
        Ok(())
    }

    /// Give the terminal back to the shell. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode().context("Failed to disable raw mode")?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
            .context("Failed to restore terminal")?;
        Ok(())
    }

    /// Wait for input until the next tick is due.
    ///
    /// Ticks keep their schedule while keys are arriving, so time-based
    /// state (copy feedback) expires on time during fast typing. `None`
    /// means an event arrived that the app ignores (key release, mouse,
    /// focus, paste).
    pub fn next_event(&mut self) -> Result<Option<TuiEvent>> {
        let timeout = until_next_tick(self.tick_rate, self.last_tick.elapsed());
        if !event::poll(timeout)? {
            self.last_tick = Instant::now();
            return Ok(Some(TuiEvent::Tick));
        }

        let event = match event::read()? {
            // Windows reports releases too
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TuiEvent::Key(key)),
            Event::Resize(w, h) => Some(TuiEvent::Resize(w, h)),
            _ => None,
        };
        Ok(event)
    }

    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f).context("Failed to draw terminal")?;
        Ok(())
    }
}

/// Poll timeout left before the next tick; zero once a tick is overdue
fn until_next_tick(tick_rate: Duration, since_last_tick: Duration) -> Duration {
    tick_rate.saturating_sub(since_last_tick)
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_presses_do_not_push_back_the_tick() {
        let rate = Duration::from_millis(100);
        assert_eq!(until_next_tick(rate, Duration::ZERO), rate);
        // 70ms of typing since the last tick leaves 30ms, not a fresh 100ms
        assert_eq!(
            until_next_tick(rate, Duration::from_millis(70)),
            Duration::from_millis(30)
        );
        assert_eq!(until_next_tick(rate, Duration::from_millis(250)), Duration::ZERO);
    }
}
