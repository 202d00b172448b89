use crossterm::{
    cursor,
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode and alternate screen for as long as this lives; undone on drop.
pub struct TerminalSession {
    terminal: Tui,
    restored: bool,
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let mut session = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            restored: false,
        };
        session.terminal.clear()?;
        Ok(session)
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Hand the terminal back to the shell. Safe to call more than once.
    pub fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!("failed to restore terminal: {}", e);
        }
    }
}

/// One wake-up of the display loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// Time to paint a frame.
    Frame,
    /// Time to re-read the wall clock.
    Resample,
    Event(Event),
    /// The event source ended; nothing will wake the loop again.
    Closed,
}

/// Frame ticker, resample timer and terminal events, released together on drop.
pub struct Triggers<S> {
    frame: Interval,
    resample: Interval,
    events: S,
}

impl<S> Triggers<S>
where
    S: Stream<Item = io::Result<Event>> + Unpin,
{
    /// Starts both timers; each fires once immediately.
    pub fn acquire(frame_rate: u32, resample_every: Duration, events: S) -> Self {
        let mut frame = interval(Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64));
        frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut resample = interval(resample_every.max(Duration::from_secs(1)));
        resample.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(frame_rate, ?resample_every, "triggers acquired");
        Self {
            frame,
            resample,
            events,
        }
    }

    pub async fn next(&mut self) -> io::Result<Trigger> {
        tokio::select! {
            _ = self.frame.tick() => Ok(Trigger::Frame),
            _ = self.resample.tick() => Ok(Trigger::Resample),
            event = self.events.next() => match event {
                Some(Ok(event)) => Ok(Trigger::Event(event)),
                Some(Err(e)) => Err(e),
                None => Ok(Trigger::Closed),
            },
        }
    }
}

impl<S> Drop for Triggers<S> {
    fn drop(&mut self) {
        tracing::debug!("triggers released");
    }
}
