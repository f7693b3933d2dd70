/// The collection of closed time sessions.
use serde::{Deserialize, Serialize};

use crate::types::{ProjectId, SessionId, TimeSession};

/// Insertion-ordered session list. Sessions are never edited in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionLedger {
    sessions: Vec<TimeSession>,
}

impl SessionLedger {
    pub fn append(&mut self, session: TimeSession) {
        self.sessions.push(session);
    }

    /// Removes the session with `id`. Returns `false` if nothing matched.
    pub fn delete(&mut self, id: &SessionId) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|session| &session.id != id);
        self.sessions.len() != before
    }

    /// Sessions belonging to `project`, in ledger order.
    pub fn by_project<'a>(
        &'a self,
        project: &'a ProjectId,
    ) -> impl Iterator<Item = &'a TimeSession> + Clone + 'a {
        self.sessions
            .iter()
            .filter(move |session| &session.project_id == project)
    }

    pub fn get(&self, id: &SessionId) -> Option<&TimeSession> {
        self.sessions.iter().find(|session| &session.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSession> {
        self.sessions.iter()
    }

    pub fn as_slice(&self) -> &[TimeSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions ordered by start time, oldest first.
    pub fn sorted_by_start(&self) -> Vec<&TimeSession> {
        let mut sorted: Vec<_> = self.sessions.iter().collect();
        sorted.sort_by_key(|session| session.start_time);
        sorted
    }

    /// The `limit` most recently started sessions, newest first.
    pub fn recent(&self, limit: usize) -> Vec<&TimeSession> {
        let mut sorted = self.sorted_by_start();
        sorted.reverse();
        sorted.truncate(limit);
        sorted
    }
}

impl<'a> IntoIterator for &'a SessionLedger {
    type Item = &'a TimeSession;
    type IntoIter = std::slice::Iter<'a, TimeSession>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone};

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn session(project: &str, start: i64, end: i64) -> TimeSession {
        TimeSession::close(ProjectId::new(project).unwrap(), at(start), at(end))
    }

    #[test]
    fn test_by_project_filters_in_ledger_order() {
        let mut ledger = SessionLedger::default();
        ledger.append(session("a", 100, 110));
        ledger.append(session("b", 0, 5));
        ledger.append(session("a", 0, 30));

        let a = ProjectId::new("a").unwrap();
        let durations: Vec<_> = ledger.by_project(&a).map(|s| s.duration).collect();
        assert_eq!(durations, vec![10, 30]);
    }

    #[test]
    fn test_by_project_is_restartable() {
        let mut ledger = SessionLedger::default();
        ledger.append(session("a", 0, 10));
        let a = ProjectId::new("a").unwrap();
        let seq = ledger.by_project(&a);
        assert_eq!(seq.clone().count(), 1);
        assert_eq!(seq.count(), 1);
        assert_eq!(ledger.by_project(&a).count(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut ledger = SessionLedger::default();
        let kept = session("a", 0, 10);
        let doomed = session("a", 10, 20);
        let doomed_id = doomed.id.clone();
        ledger.append(kept.clone());
        ledger.append(doomed);

        assert!(ledger.delete(&doomed_id));
        let after_first = ledger.clone();
        assert!(!ledger.delete(&doomed_id));
        assert_eq!(ledger, after_first);
        assert_eq!(ledger.as_slice(), &[kept]);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut ledger = SessionLedger::default();
        ledger.append(session("a", 0, 10));
        assert!(!ledger.delete(&SessionId::from("nope")));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut ledger = SessionLedger::default();
        ledger.append(session("a", 50, 60));
        ledger.append(session("b", 0, 10));
        ledger.append(session("c", 100, 110));

        let recent: Vec<_> = ledger
            .recent(2)
            .into_iter()
            .map(|s| s.project_id.as_str().to_string())
            .collect();
        assert_eq!(recent, vec!["c", "a"]);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut ledger = SessionLedger::default();
        ledger.append(session("a", 0, 90));
        let json = serde_json::to_value(&ledger).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["projectId"], "a");
        assert_eq!(json[0]["duration"], 90);
    }
}
