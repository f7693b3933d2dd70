/// Runtime configuration: where data and logs live.
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    /// Uses `db_path` when given, otherwise the default location.
    /// The log file always sits next to the database.
    pub fn resolve(db_path: Option<PathBuf>) -> Self {
        let db_path = db_path.unwrap_or_else(default_db_path);
        let log_path = log_path_for(&db_path);
        Self { db_path, log_path }
    }
}

/// Returns the default database path inside the user's data directory.
/// Falls back to `./stint.db` when no data dir is found.
pub fn default_db_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let stint_dir = data_dir.join("stint");
        std::fs::create_dir_all(&stint_dir).ok();
        stint_dir.join("stint.db")
    } else {
        PathBuf::from("stint.db")
    }
}

fn log_path_for(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join("stint.log"),
        _ => PathBuf::from("stint.log"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_db_path_wins() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/work/time.db")));
        assert_eq!(config.db_path, PathBuf::from("/tmp/work/time.db"));
        assert_eq!(config.log_path, PathBuf::from("/tmp/work/stint.log"));
    }

    #[test]
    fn test_bare_file_name_logs_to_cwd() {
        let config = Config::resolve(Some(PathBuf::from("time.db")));
        assert_eq!(config.log_path, PathBuf::from("stint.log"));
    }
}
