use std::path::{Path, PathBuf};

use crate::{
    ledger::LedgerData,
    utils::{
        self,
        persistence::{read_json, write_json_atomic},
    },
};

use super::{LedgerStore, Result};

/// Ledger kept as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location inside the application data directory.
    pub fn new_default() -> Self {
        Self::new(utils::ledger_file_in(&utils::app_data_dir()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<LedgerData> {
        match load_ledger_from_path(&self.path)? {
            Some(data) => {
                tracing::info!(
                    path = %self.path.display(),
                    transactions = data.transactions.len(),
                    "ledger loaded"
                );
                Ok(data)
            }
            None => {
                tracing::info!(path = %self.path.display(), "no ledger file, starting empty");
                Ok(LedgerData::default())
            }
        }
    }

    fn save(&self, data: &LedgerData) -> Result<()> {
        save_ledger_to_path(data, &self.path)?;
        tracing::info!(
            path = %self.path.display(),
            transactions = data.transactions.len(),
            "ledger saved"
        );
        Ok(())
    }
}

pub fn load_ledger_from_path(path: &Path) -> Result<Option<LedgerData>> {
    read_json(path)
}

pub fn save_ledger_to_path(data: &LedgerData, path: &Path) -> Result<()> {
    write_json_atomic(data, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{BaseTransaction, Recurrence, RecurrenceKind};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty_ledger() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        assert_eq!(store.load().unwrap(), LedgerData::default());
    }

    #[test]
    fn save_then_load_keeps_stored_transactions_only() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        let mut data = LedgerData::new();
        data.add_transaction(
            BaseTransaction::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), -5.0, "cat")
                .with_recurrence(Recurrence::new(RecurrenceKind::Daily)),
        );
        store.save(&data).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, data);
        assert_eq!(loaded.transactions.len(), 1);
    }

    #[test]
    fn corrupt_file_reports_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, crate::errors::LedgerError::Serde(_)));
    }
}
