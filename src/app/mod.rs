mod state;

use crossterm::event::KeyCode;

pub use state::{App, ConfirmPopup, StartTimerPopup};

/// Possible input events the app reacts to.
pub enum AppEvent {
    Tick,
    KeyPress(KeyCode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppView {
    Dashboard,
    Sessions,
    Help,
}

pub const TABS: [AppView; 2] = [AppView::Dashboard, AppView::Sessions];
