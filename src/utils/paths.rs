use dirs::home_dir;
use std::{env, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".budget_tracker";
const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_DATA_FILE: &str = "budget_data.json";

/// Environment variable that relocates the whole application directory.
pub const HOME_ENV: &str = "BUDGET_TRACKER_HOME";
/// Environment variable that points straight at a ledger file.
pub const DATA_FILE_ENV: &str = "BUDGET_TRACKER_DATA";

/// Returns the application-specific data directory, defaulting to `~/.budget_tracker`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Path to the configuration file inside `base`.
pub fn config_file_in(base: &std::path::Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

/// Default ledger file inside `base`.
pub fn data_file_in(base: &std::path::Path) -> PathBuf {
    base.join(DEFAULT_DATA_FILE)
}

/// Ledger file override taken from the environment, if set and non-empty.
pub fn data_file_override() -> Option<PathBuf> {
    env::var_os(DATA_FILE_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
