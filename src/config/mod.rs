use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::StoreOptions,
    errors::{ConfigError, LedgerError},
    ledger::IdPolicy,
    utils::{paths, persistence::write_atomic},
};

/// User preferences that shape how the ledger is stored and displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ledger file location. Defaults to `budget_data.json` in the app directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub id_policy: IdPolicy,
    /// Move unreadable ledger files aside instead of overwriting them later.
    pub preserve_corrupt: bool,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            id_policy: IdPolicy::default(),
            preserve_corrupt: true,
            currency_symbol: "$".into(),
        }
    }
}

impl Config {
    /// Ledger file to use, honouring the `BUDGET_TRACKER_DATA` override.
    pub fn resolve_data_file(&self, base: &Path) -> PathBuf {
        paths::data_file_override()
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| paths::data_file_in(base))
    }

    /// Updates one setting from its textual form, as typed on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        let value = value.trim();
        match key {
            "data_file" => {
                self.data_file = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "id_policy" => {
                self.id_policy = match value.to_ascii_lowercase().as_str() {
                    "dense" => IdPolicy::Dense,
                    "stable" => IdPolicy::Stable,
                    _ => return Err(invalid_value(key, value, "dense or stable")),
                };
            }
            "preserve_corrupt" => {
                self.preserve_corrupt = value
                    .parse()
                    .map_err(|_| invalid_value(key, value, "true or false"))?;
            }
            "currency_symbol" => self.currency_symbol = value.to_string(),
            other => {
                return Err(LedgerError::InvalidInput(format!(
                    "unknown setting `{other}` (expected data_file, id_policy, preserve_corrupt or currency_symbol)"
                )))
            }
        }
        Ok(())
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            id_policy: self.id_policy,
            preserve_corrupt: self.preserve_corrupt,
        }
    }
}

/// Handles persistence for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        let path = paths::config_file_in(&base);
        Self { base, path }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

fn invalid_value(key: &str, value: &str, expected: &str) -> LedgerError {
    LedgerError::InvalidInput(format!("`{value}` is not valid for {key} (expected {expected})"))
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
