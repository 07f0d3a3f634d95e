use std::sync::Mutex;

use crate::ledger::LedgerData;

use super::{LedgerStore, Result};

/// In-process store, handy for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<LedgerData>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new(data: LedgerData) -> Self {
        Self {
            data: Mutex::new(data),
            saves: Mutex::new(0),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LedgerStore for MemoryStore {
    fn load(&self) -> Result<LedgerData> {
        let data = self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(data.clone())
    }

    fn save(&self, data: &LedgerData) -> Result<()> {
        *self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = data.clone();
        *self.saves.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) += 1;
        Ok(())
    }
}
