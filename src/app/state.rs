use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::clock::{Clock, ElapsedClock};
use crate::format::format_time;
use crate::stats;
use crate::store::Store;
use crate::timer::Tracker;
use crate::types::{ProjectId, SessionId, TimeSession};

use super::{AppEvent, AppView, TABS};

/// The top-level application state.
pub struct App<S: Store, C: Clock> {
    pub running: bool,
    pub tracker: Tracker<S, C>,
    pub elapsed_clock: ElapsedClock,
    pub view: AppView,
    view_history: Vec<AppView>,
    pub project_totals: Vec<(ProjectId, i64)>,
    pub today_seconds: i64,
    pub today_sessions: usize,
    totals_day: NaiveDate,
    pub status: Option<String>,
    pub selected_project_index: usize,
    pub selected_session_index: usize,
    pub start_popup: Option<StartTimerPopup>,
    pub confirm_popup: Option<ConfirmPopup>,
}

/// Prompt for a project id to start timing.
#[derive(Clone, Debug, Default)]
pub struct StartTimerPopup {
    pub project: String,
}

#[derive(Clone, Debug)]
pub struct ConfirmPopup {
    pub message: String,
    pub session_id: SessionId,
}

impl<S: Store, C: Clock> App<S, C> {
    pub fn new(tracker: Tracker<S, C>) -> Self {
        let totals_day = tracker.now().date_naive();
        let mut app = Self {
            running: true,
            tracker,
            elapsed_clock: ElapsedClock::default(),
            view: AppView::Dashboard,
            view_history: Vec::new(),
            project_totals: Vec::new(),
            today_seconds: 0,
            today_sessions: 0,
            totals_day,
            status: None,
            selected_project_index: 0,
            selected_session_index: 0,
            start_popup: None,
            confirm_popup: None,
        };
        app.sync_clock();
        app
    }

    /// Central update function - process an event and mutate state.
    pub fn update(&mut self, event: AppEvent) {
        match event {
            AppEvent::Tick => {
                let now = self.tracker.now();
                let refreshed = self.elapsed_clock.tick(now);
                if refreshed || now.date_naive() != self.totals_day {
                    self.refresh_totals();
                }
            }
            AppEvent::KeyPress(key) => self.handle_key(key),
        }
    }

    /// Sessions in display order, newest first.
    pub fn sessions(&self) -> Vec<&TimeSession> {
        self.tracker.ledger().recent(usize::MAX)
    }

    pub fn elapsed(&self) -> i64 {
        self.elapsed_clock.elapsed()
    }

    fn handle_key(&mut self, key: KeyCode) {
        if self.start_popup.is_some() {
            self.handle_start_popup_key(key);
            return;
        }
        if self.confirm_popup.is_some() {
            self.handle_confirm_key(key);
            return;
        }

        match key {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => {
                if self.view == AppView::Help {
                    self.go_back();
                } else {
                    self.navigate_to(AppView::Help);
                }
            }
            KeyCode::Tab => self.next_tab(),
            KeyCode::Esc => self.go_back(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Enter => {
                if self.view == AppView::Dashboard {
                    self.start_selected_project();
                }
            }
            KeyCode::Char('s') => self.stop_timer(),
            KeyCode::Char('n') => self.start_popup = Some(StartTimerPopup::default()),
            KeyCode::Char('d') => {
                if self.view == AppView::Sessions {
                    self.open_confirm_delete();
                }
            }
            _ => {}
        }
    }

    fn handle_start_popup_key(&mut self, key: KeyCode) {
        let Some(popup) = self.start_popup.as_mut() else {
            return;
        };
        match key {
            KeyCode::Esc => self.start_popup = None,
            KeyCode::Enter => {
                let project = popup.project.clone();
                self.start_popup = None;
                self.start_timer(&project);
            }
            KeyCode::Backspace => {
                popup.project.pop();
            }
            KeyCode::Char(c) => popup.project.push(c),
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(popup) = self.confirm_popup.take() {
                    self.delete_session(&popup.session_id);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.confirm_popup = None,
            _ => {}
        }
    }

    fn navigate_to(&mut self, view: AppView) {
        if self.view != view {
            self.view_history.push(self.view);
            self.view = view;
        }
        self.clear_status();
    }

    fn go_back(&mut self) {
        if let Some(prev_view) = self.view_history.pop() {
            self.view = prev_view;
        }
        self.clear_status();
    }

    fn next_tab(&mut self) {
        let index = TABS.iter().position(|view| *view == self.view).unwrap_or(0);
        let next = TABS[(index + 1) % TABS.len()];
        self.navigate_to(next);
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    fn move_selection_up(&mut self) {
        match self.view {
            AppView::Dashboard => {
                self.selected_project_index = self.selected_project_index.saturating_sub(1);
            }
            AppView::Sessions => {
                self.selected_session_index = self.selected_session_index.saturating_sub(1);
            }
            AppView::Help => {}
        }
    }

    fn move_selection_down(&mut self) {
        match self.view {
            AppView::Dashboard => {
                if self.selected_project_index + 1 < self.project_totals.len() {
                    self.selected_project_index += 1;
                }
            }
            AppView::Sessions => {
                if self.selected_session_index + 1 < self.tracker.ledger().len() {
                    self.selected_session_index += 1;
                }
            }
            AppView::Help => {}
        }
    }

    fn start_selected_project(&mut self) {
        let Some((project, _)) = self.project_totals.get(self.selected_project_index) else {
            self.status = Some("No project selected. Press n to start a new one.".to_string());
            return;
        };
        let project = project.as_str().to_string();
        self.start_timer(&project);
    }

    fn start_timer(&mut self, project: &str) {
        match self.tracker.start(project) {
            Ok(closed) => {
                self.status = Some(match closed {
                    Some(session) => format!(
                        "Switched from '{}' ({}) to '{}'",
                        session.project_id,
                        format_time(session.duration),
                        project.trim()
                    ),
                    None => format!("Started '{}'", project.trim()),
                });
            }
            Err(err) => self.status = Some(format!("Failed to start timer: {err}")),
        }
        self.sync_clock();
    }

    fn stop_timer(&mut self) {
        match self.tracker.stop() {
            Ok(Some(session)) => {
                self.status = Some(format!(
                    "Stopped '{}' after {}",
                    session.project_id,
                    format_time(session.duration)
                ));
            }
            Ok(None) => self.status = Some("No timer running.".to_string()),
            Err(err) => self.status = Some(format!("Failed to stop timer: {err}")),
        }
        self.sync_clock();
    }

    fn open_confirm_delete(&mut self) {
        let popup = self
            .sessions()
            .get(self.selected_session_index)
            .map(|session| ConfirmPopup {
                message: format!(
                    "Delete {} session on '{}' from {}?",
                    format_time(session.duration),
                    session.project_id,
                    session.start_time.format("%Y-%m-%d %H:%M")
                ),
                session_id: session.id.clone(),
            });
        if popup.is_none() {
            self.status = Some("No session selected.".to_string());
        }
        self.confirm_popup = popup;
    }

    fn delete_session(&mut self, id: &SessionId) {
        match self.tracker.delete_session(id) {
            Ok(true) => self.status = Some("Session deleted.".to_string()),
            Ok(false) => self.status = Some("Session already gone.".to_string()),
            Err(err) => self.status = Some(format!("Failed to delete session: {err}")),
        }
        let len = self.tracker.ledger().len();
        if self.selected_session_index >= len {
            self.selected_session_index = len.saturating_sub(1);
        }
        self.refresh_totals();
    }

    /// Re-arms or tears down the display clock to match the timer.
    fn sync_clock(&mut self) {
        self.elapsed_clock
            .sync(self.tracker.state(), self.tracker.now());
        self.refresh_totals();
    }

    fn refresh_totals(&mut self) {
        let elapsed = self.elapsed_clock.elapsed();
        let ledger = self.tracker.ledger().as_slice();
        let state = self.tracker.state();
        let today = self.tracker.now().date_naive();
        self.project_totals = stats::time_by_project(ledger, state, elapsed);
        self.today_seconds = stats::today_time(ledger, state, elapsed, today);
        self.today_sessions = stats::sessions_on(ledger, today);
        self.totals_day = today;
        if self.selected_project_index >= self.project_totals.len() {
            self.selected_project_index = self.project_totals.len().saturating_sub(1);
        }
    }
}
