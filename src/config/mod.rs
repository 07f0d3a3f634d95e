use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{
    errors::LedgerError,
    utils::{
        self,
        persistence::{ensure_dir, read_json, write_json_atomic},
    },
};

const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Ledger file to open; the data directory's `ledger.json` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_file: Option<PathBuf>,
    #[serde(default = "Config::default_list_limit")]
    pub list_limit: usize,
}

impl Config {
    fn default_list_limit() -> usize {
        DEFAULT_LIST_LIMIT
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            ledger_file: None,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, LedgerError> {
        Self::with_base_dir(utils::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, LedgerError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: utils::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        Ok(read_json::<Config>(&self.path)?.unwrap_or_default())
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        write_json_atomic(config, &self.path)
    }

    /// Ledger file named by `config`, resolved against the data directory.
    pub fn ledger_path(&self, config: &Config) -> PathBuf {
        match &config.ledger_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.base.join(path),
            None => utils::ledger_file_in(&self.base),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
