/// Persistent key-value storage for the timer and the session ledger.
#[cfg(test)]
mod memory;
mod migrations;
mod sqlite;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{Result, TrackerError};

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub const SESSIONS_KEY: &str = "stint.sessions";
pub const TIMER_KEY: &str = "stint.timer";

/// Durable key-value persistence.
///
/// `load` returns `Ok(None)` only when the key has never been written;
/// any failure to reach the backing storage is an `Err`.
pub trait Store {
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// Writes every entry or none of them.
    fn save_all(&mut self, entries: &[(&str, String)]) -> Result<()>;
}

/// Loads and decodes `key`, falling back to `T::default()` only if the key is absent.
pub fn load_or_default<T, S>(store: &S, key: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
    S: Store + ?Sized,
{
    match store.load(key)? {
        Some(raw) => serde_json::from_str(&raw).map_err(|err| TrackerError::corrupt(key, err)),
        None => Ok(T::default()),
    }
}

pub fn encode<T: Serialize>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|err| TrackerError::corrupt(key, err))
}
