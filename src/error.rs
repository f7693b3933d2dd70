/// Error taxonomy for the time-tracking core.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// A timer was started without a usable project identifier.
    #[error("project id must not be empty")]
    InvalidProject,

    /// The persistent store could not be read or written.
    #[error("storage failure: {0}")]
    Storage(String),

    /// A stored value exists but cannot be decoded.
    #[error("corrupt value under '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl From<rusqlite::Error> for TrackerError {
    fn from(err: rusqlite::Error) -> Self {
        TrackerError::Storage(err.to_string())
    }
}

impl TrackerError {
    pub(crate) fn corrupt(key: &str, reason: impl ToString) -> Self {
        TrackerError::Corrupt {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}
