use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::app::{App, AppEvent};
use crate::clock::Clock;
use crate::store::Store;

/// Input poll timeout. The elapsed clock refreshes on its own cadence.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Polls for crossterm events and maps them to `AppEvent`s.
pub fn poll(timeout: Duration) -> Result<Option<AppEvent>> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }
            return Ok(Some(AppEvent::KeyPress(key.code)));
        }
    }
    Ok(Some(AppEvent::Tick))
}

/// Runs the main event loop.
pub fn run<S: Store, C: Clock>(app: &mut App<S, C>, terminal: &mut crate::tui::Terminal) -> Result<()> {
    while app.running {
        terminal.draw(|frame| crate::ui::draw(frame, app))?;

        match poll(TICK_RATE)? {
            Some(AppEvent::Tick) => app.update(AppEvent::Tick),
            Some(event) => {
                app.update(event);
                // keep the clock moving while keys arrive faster than the timeout
                app.update(AppEvent::Tick);
            }
            None => {}
        }
    }
    Ok(())
}
