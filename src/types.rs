use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};

/// Opaque project key. Existence is the caller's concern, never checked here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Surrounding whitespace is stripped, so `" a"` and `"a"` name the same project.
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TrackerError::InvalidProject);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A closed timer interval. Never stored without an end.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSession {
    pub id: SessionId,
    pub project_id: ProjectId,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    /// Whole seconds between start and end, rounded down.
    pub duration: i64,
}

impl TimeSession {
    /// Closes an interval. A clock that moved backwards yields a zero-length session.
    pub fn close(
        project_id: ProjectId,
        start_time: DateTime<Local>,
        end_time: DateTime<Local>,
    ) -> Self {
        let end_time = end_time.max(start_time);
        Self {
            id: SessionId::generate(),
            project_id,
            start_time,
            end_time,
            duration: crate::clock::elapsed_since(start_time, end_time),
        }
    }
}

/// The single process-wide timer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TimerRecord", into = "TimerRecord")]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        project_id: ProjectId,
        start_time: DateTime<Local>,
    },
}

impl TimerState {
    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running { .. })
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            TimerState::Running { project_id, .. } => Some(project_id),
            TimerState::Idle => None,
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Local>> {
        match self {
            TimerState::Running { start_time, .. } => Some(*start_time),
            TimerState::Idle => None,
        }
    }

    pub fn is_running_for(&self, project: &ProjectId) -> bool {
        self.project_id() == Some(project)
    }
}

/// Flat persisted form of [`TimerState`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimerRecord {
    project_id: Option<String>,
    start_time: Option<DateTime<Local>>,
    is_running: bool,
}

impl From<TimerState> for TimerRecord {
    fn from(state: TimerState) -> Self {
        match state {
            TimerState::Idle => TimerRecord {
                project_id: None,
                start_time: None,
                is_running: false,
            },
            TimerState::Running {
                project_id,
                start_time,
            } => TimerRecord {
                project_id: Some(project_id.0),
                start_time: Some(start_time),
                is_running: true,
            },
        }
    }
}

impl TryFrom<TimerRecord> for TimerState {
    type Error = String;

    fn try_from(record: TimerRecord) -> std::result::Result<Self, Self::Error> {
        match (record.is_running, record.project_id, record.start_time) {
            (false, None, None) => Ok(TimerState::Idle),
            (true, Some(project), Some(start_time)) => {
                let project_id =
                    ProjectId::new(project).map_err(|_| "running timer has an empty project id")?;
                Ok(TimerState::Running {
                    project_id,
                    start_time,
                })
            }
            (is_running, project, start) => Err(format!(
                "inconsistent timer record: isRunning={is_running}, projectId set={}, startTime set={}",
                project.is_some(),
                start.is_some()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Local> {
        Local.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_project_id_rejects_blank() {
        assert!(matches!(ProjectId::new(""), Err(TrackerError::InvalidProject)));
        assert!(matches!(ProjectId::new("   "), Err(TrackerError::InvalidProject)));
        assert_eq!(ProjectId::new(" acme ").unwrap().as_str(), "acme");
    }

    #[test]
    fn test_close_floors_partial_seconds() {
        let start = at(0);
        let end = start + Duration::milliseconds(90_999);
        let session = TimeSession::close(ProjectId::new("a").unwrap(), start, end);
        assert_eq!(session.duration, 90);
        assert_eq!(session.end_time, end);
    }

    #[test]
    fn test_close_clamps_backwards_clock() {
        let session = TimeSession::close(ProjectId::new("a").unwrap(), at(10), at(5));
        assert_eq!(session.duration, 0);
        assert_eq!(session.end_time, session.start_time);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let p = ProjectId::new("a").unwrap();
        let first = TimeSession::close(p.clone(), at(0), at(1));
        let second = TimeSession::close(p, at(0), at(1));
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_timer_record_shape() {
        let running = TimerState::Running {
            project_id: ProjectId::new("acme").unwrap(),
            start_time: at(0),
        };
        let json = serde_json::to_value(&running).unwrap();
        assert_eq!(json["projectId"], "acme");
        assert_eq!(json["isRunning"], true);
        assert!(json["startTime"].is_string());

        let idle = serde_json::to_value(TimerState::Idle).unwrap();
        assert_eq!(idle["isRunning"], false);
        assert!(idle["projectId"].is_null());
        assert!(idle["startTime"].is_null());
    }

    #[test]
    fn test_timer_record_rejects_half_set_state() {
        let raw = r#"{"projectId":"acme","startTime":null,"isRunning":true}"#;
        assert!(serde_json::from_str::<TimerState>(raw).is_err());

        let raw = r#"{"projectId":"acme","startTime":null,"isRunning":false}"#;
        assert!(serde_json::from_str::<TimerState>(raw).is_err());
    }

    #[test]
    fn test_timer_record_reads_back() {
        let running = TimerState::Running {
            project_id: ProjectId::new("acme").unwrap(),
            start_time: at(42),
        };
        let raw = serde_json::to_string(&running).unwrap();
        let decoded: TimerState = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded, running);
        assert!(decoded.is_running_for(&ProjectId::new("acme").unwrap()));
    }
}
