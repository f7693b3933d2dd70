/// Derived time totals. Everything here is a pure read.
use chrono::NaiveDate;

use crate::types::{ProjectId, TimeSession, TimerState};

/// Tracked seconds for `project`, including the live timer when it runs for `project`.
pub fn total_time(
    sessions: &[TimeSession],
    state: &TimerState,
    elapsed: i64,
    project: &ProjectId,
) -> i64 {
    let closed: i64 = sessions
        .iter()
        .filter(|session| &session.project_id == project)
        .map(|session| session.duration)
        .sum();
    if state.is_running_for(project) {
        closed + elapsed
    } else {
        closed
    }
}

/// Tracked seconds attributed to the local calendar day `today`.
///
/// Sessions count by the day they started. A running timer counts only if
/// it started on `today`, so a timer left running past midnight adds nothing
/// until it is stopped and a new interval begins.
pub fn today_time(
    sessions: &[TimeSession],
    state: &TimerState,
    elapsed: i64,
    today: NaiveDate,
) -> i64 {
    let closed = closed_on(sessions, today);
    match state.start_time() {
        Some(start) if start.date_naive() == today => closed + elapsed,
        _ => closed,
    }
}

/// Per-project totals in the order projects first appear, live timer included.
pub fn time_by_project(
    sessions: &[TimeSession],
    state: &TimerState,
    elapsed: i64,
) -> Vec<(ProjectId, i64)> {
    let mut totals: Vec<(ProjectId, i64)> = Vec::new();
    for session in sessions {
        match totals.iter_mut().find(|(id, _)| id == &session.project_id) {
            Some((_, total)) => *total += session.duration,
            None => totals.push((session.project_id.clone(), session.duration)),
        }
    }
    if let Some(running) = state.project_id() {
        match totals.iter_mut().find(|(id, _)| id == running) {
            Some((_, total)) => *total += elapsed,
            None => totals.push((running.clone(), elapsed)),
        }
    }
    totals
}

/// Closed-session seconds for each day in `days`.
pub fn day_totals(sessions: &[TimeSession], days: &[NaiveDate]) -> Vec<(NaiveDate, i64)> {
    days.iter()
        .map(|day| (*day, closed_on(sessions, *day)))
        .collect()
}

/// Number of closed sessions that started on `day`.
pub fn sessions_on(sessions: &[TimeSession], day: NaiveDate) -> usize {
    sessions
        .iter()
        .filter(|session| session.start_time.date_naive() == day)
        .count()
}

pub fn earnings(seconds: i64, hourly_rate: f64) -> f64 {
    seconds as f64 / 3600.0 * hourly_rate
}

fn closed_on(sessions: &[TimeSession], day: NaiveDate) -> i64 {
    sessions
        .iter()
        .filter(|session| session.start_time.date_naive() == day)
        .map(|session| session.duration)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Local, TimeZone};

    fn noon(day: NaiveDate) -> DateTime<Local> {
        Local
            .from_local_datetime(&day.and_hms_opt(12, 0, 0).unwrap())
            .earliest()
            .unwrap()
    }

    fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    fn pid(raw: &str) -> ProjectId {
        ProjectId::new(raw).unwrap()
    }

    fn session(project: &str, start: DateTime<Local>, secs: i64) -> TimeSession {
        TimeSession::close(pid(project), start, start + Duration::seconds(secs))
    }

    fn running(project: &str, start: DateTime<Local>) -> TimerState {
        TimerState::Running {
            project_id: pid(project),
            start_time: start,
        }
    }

    #[test]
    fn test_total_time_sums_closed_sessions() {
        let base = noon(today());
        let sessions = vec![
            session("a", base, 90),
            session("b", base, 60),
            session("a", base, 30),
        ];
        assert_eq!(total_time(&sessions, &TimerState::Idle, 0, &pid("a")), 120);
        assert_eq!(total_time(&sessions, &TimerState::Idle, 0, &pid("b")), 60);
        assert_eq!(total_time(&sessions, &TimerState::Idle, 0, &pid("c")), 0);
    }

    #[test]
    fn test_total_time_adds_live_elapsed_only_for_running_project() {
        let base = noon(today());
        let sessions = vec![session("a", base, 90)];
        let state = running("a", base);
        for elapsed in [0, 1, 3600] {
            assert_eq!(total_time(&sessions, &state, elapsed, &pid("a")), 90 + elapsed);
            assert_eq!(total_time(&sessions, &state, elapsed, &pid("b")), 0);
        }
    }

    #[test]
    fn test_today_time_filters_by_start_day() {
        let day = today();
        let yesterday = day.pred_opt().unwrap();
        let sessions = vec![
            session("a", noon(day), 100),
            session("b", noon(yesterday), 500),
        ];
        assert_eq!(today_time(&sessions, &TimerState::Idle, 0, day), 100);
        assert_eq!(today_time(&sessions, &TimerState::Idle, 0, yesterday), 500);
    }

    #[test]
    fn test_today_time_counts_timer_started_today() {
        let day = today();
        let state = running("a", noon(day));
        assert_eq!(today_time(&[], &state, 5, day), 5);
    }

    #[test]
    fn test_today_time_ignores_overnight_timer() {
        let day = today();
        let state = running("a", noon(day.pred_opt().unwrap()));
        assert_eq!(today_time(&[], &state, 50_000, day), 0);
    }

    #[test]
    fn test_time_by_project_keeps_first_seen_order() {
        let base = noon(today());
        let sessions = vec![
            session("b", base, 10),
            session("a", base, 20),
            session("b", base, 5),
        ];
        let totals = time_by_project(&sessions, &running("c", base), 7);
        assert_eq!(totals, vec![(pid("b"), 15), (pid("a"), 20), (pid("c"), 7)]);

        let totals = time_by_project(&sessions, &running("a", base), 7);
        assert_eq!(totals, vec![(pid("b"), 15), (pid("a"), 27)]);
    }

    #[test]
    fn test_day_totals_per_day() {
        let day = today();
        let yesterday = day.pred_opt().unwrap();
        let sessions = vec![session("a", noon(day), 60), session("a", noon(day), 40)];
        assert_eq!(
            day_totals(&sessions, &[yesterday, day]),
            vec![(yesterday, 0), (day, 100)]
        );
    }

    #[test]
    fn test_sessions_on_counts_by_start_day() {
        let day = today();
        let yesterday = day.pred_opt().unwrap();
        let sessions = vec![
            session("a", noon(yesterday), 60),
            session("b", noon(day), 10),
            session("a", noon(day), 20),
        ];
        assert_eq!(sessions_on(&sessions, day), 2);
        assert_eq!(sessions_on(&sessions, yesterday), 1);
        assert_eq!(sessions_on(&[], day), 0);
    }

    #[test]
    fn test_earnings_scales_by_rate() {
        assert_eq!(earnings(3600, 50.0), 50.0);
        assert_eq!(earnings(1800, 80.0), 40.0);
        assert_eq!(earnings(0, 120.0), 0.0);
    }
}
