pub mod json_backend;
pub mod memory;

use crate::{errors::LedgerError, ledger::LedgerData};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends holding the ledger snapshot.
///
/// Loads hand back fully normalized data (legacy recurrence labels are already
/// converted to rules). Occurrences are never written; only stored transactions are.
pub trait LedgerStore: Send + Sync {
    fn load(&self) -> Result<LedgerData>;
    fn save(&self, data: &LedgerData) -> Result<()>;
}

impl<S: LedgerStore + ?Sized> LedgerStore for Box<S> {
    fn load(&self) -> Result<LedgerData> {
        (**self).load()
    }

    fn save(&self, data: &LedgerData) -> Result<()> {
        (**self).save(data)
    }
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
